use futures::future::join_all;
use log::{error, info};

use crate::api::AdminClient;
use crate::error::AdminError;
use crate::models::api::{CancelAppointmentRequest, SimpleResponse};

pub const CANCEL_APPOINTMENT: &str = "/api/admin/cancel-appointment";

/// Cancels one appointment and returns the backend's confirmation text.
pub async fn cancel_appointment(
    client: &AdminClient,
    appointment_id: &str,
) -> Result<String, AdminError> {
    let body = CancelAppointmentRequest {
        appointment_id: appointment_id.to_string(),
    };

    match client
        .post_json::<_, SimpleResponse>(CANCEL_APPOINTMENT, &body)
        .await
    {
        Ok(response) => {
            let message = response
                .message
                .unwrap_or_else(|| "Appointment Cancelled".to_string());
            info!("Cancelled appointment {}: {}", appointment_id, message);
            Ok(message)
        }
        Err(e) => {
            error!("Error cancelling appointment {}: {}", appointment_id, e);
            Err(e)
        }
    }
}

/// Cancels several appointments at once. Each id is independent, so one
/// failure does not hold back the others.
pub async fn cancel_appointments(
    client: &AdminClient,
    appointment_ids: &[String],
) -> Vec<(String, Result<String, AdminError>)> {
    let requests = appointment_ids.iter().map(|id| async move {
        let outcome = cancel_appointment(client, id).await;
        (id.clone(), outcome)
    });
    join_all(requests).await
}
