pub mod filter_state;

pub use filter_state::{FilterKind, FilterState, FilterTransition, RefetchPolicy};
