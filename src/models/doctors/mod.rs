pub mod doctor;

pub use doctor::{Doctor, DoctorsResponse};
