pub mod params;

pub use params::{ApiEnvelope, CancelAppointmentRequest, SimpleResponse};
