pub mod format_utils;
pub mod log_utils;

pub use format_utils::DisplayFormat;
pub use log_utils::init_logging;
