// src/models/mod.rs

pub mod api;
pub mod app;
pub mod appointments;
pub mod dashboard;
pub mod doctors;
pub mod filter;
