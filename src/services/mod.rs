pub mod appointment_service;
pub mod dashboard_service;
pub mod doctor_service;
