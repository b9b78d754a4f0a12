pub mod command;
pub mod session;

pub use session::Session;
