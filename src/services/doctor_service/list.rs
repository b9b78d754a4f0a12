use log::{error, info};

use crate::api::AdminClient;
use crate::error::AdminError;
use crate::models::doctors::{Doctor, DoctorsResponse};

pub const ALL_DOCTORS: &str = "/api/admin/all-doctors";

/// Doctor names feed the doctor filter; the list is fetched once per session.
pub async fn get_all_doctors(client: &AdminClient) -> Result<Vec<Doctor>, AdminError> {
    match client
        .post_json::<_, DoctorsResponse>(ALL_DOCTORS, &serde_json::json!({}))
        .await
    {
        Ok(response) => {
            info!("Loaded {} doctors", response.doctors.len());
            Ok(response.doctors)
        }
        Err(e) => {
            error!("Error fetching doctors: {}", e);
            Err(e)
        }
    }
}
