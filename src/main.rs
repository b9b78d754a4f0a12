use anyhow::{Context, Result};
use log::info;
use tokio::io::BufReader;

mod api;
mod config;
mod console;
mod error;
mod models;
mod services;
mod utils;
mod view;

#[cfg(test)]
mod test_support;

use crate::api::AdminClient;
use crate::config::AdminConfig;
use crate::console::Session;
use crate::services::appointment_service::BookingsView;
use crate::utils::{init_logging, DisplayFormat};

fn initial_view(arg: Option<&str>) -> Result<BookingsView> {
    match arg {
        None | Some("latest") => Ok(BookingsView::LatestBookings),
        Some("all") => Ok(BookingsView::AllAppointments),
        Some("doctor") => Ok(BookingsView::DoctorBookings),
        Some(other) => anyhow::bail!("unknown screen {:?}, expected latest, all or doctor", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AdminConfig::from_env().context("Failed to load configuration")?;
    init_logging(config.log_file.as_deref())?;

    let arg = std::env::args().nth(1);
    let view = initial_view(arg.as_deref())?;

    let client = AdminClient::from_config(&config).context("Failed to build HTTP client")?;
    let format = DisplayFormat::for_today(&config.currency);

    info!("Admin console using backend {}", config.backend_url);
    println!("Admin console connected to {}", config.backend_url);

    Session::new(client, format, view)
        .run(BufReader::new(tokio::io::stdin()))
        .await
}
