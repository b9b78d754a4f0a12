pub mod appointment;

pub use appointment::{Appointment, AppointmentsResponse, PageResult};
