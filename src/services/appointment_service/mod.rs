pub mod cancel;
pub mod fetch;
pub mod query;

pub use cancel::cancel_appointments;
pub use fetch::fetch_appointments_page;
pub use query::{AppointmentQuery, BookingsView, QueryBuilder};
