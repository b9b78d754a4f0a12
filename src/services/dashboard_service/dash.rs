use log::error;

use crate::api::AdminClient;
use crate::error::AdminError;
use crate::models::dashboard::{DashData, DashResponse};

pub const DASHBOARD: &str = "/api/admin/dashboard";

pub async fn get_dash_data(client: &AdminClient) -> Result<DashData, AdminError> {
    match client.get_json::<DashResponse>(DASHBOARD, &[]).await {
        Ok(response) => Ok(response.dash_data.unwrap_or_default()),
        Err(e) => {
            error!("Error fetching dashboard counters: {}", e);
            Err(e)
        }
    }
}
