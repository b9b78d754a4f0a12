pub mod dash;

pub use dash::get_dash_data;
