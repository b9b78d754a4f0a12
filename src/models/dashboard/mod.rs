pub mod dash_data;

pub use dash_data::{DashData, DashResponse};
