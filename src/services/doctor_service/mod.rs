pub mod list;

pub use list::get_all_doctors;
