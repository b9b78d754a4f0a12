use log::{error, info};

use crate::api::AdminClient;
use crate::error::AdminError;
use crate::models::appointments::{AppointmentsResponse, PageResult};
use crate::services::appointment_service::query::AppointmentQuery;

pub async fn fetch_appointments_page(
    client: &AdminClient,
    query: &AppointmentQuery,
) -> Result<PageResult, AdminError> {
    match client
        .get_json::<AppointmentsResponse>(query.path, &query.params)
        .await
    {
        Ok(response) => {
            let page = PageResult::from(response);
            info!(
                "{} page {} -> {} appointments ({} pages)",
                query.path,
                query.param("page").unwrap_or("1"),
                page.appointments.len(),
                page.total_pages
            );
            Ok(page)
        }
        Err(e) => {
            if e.is_rejection() {
                error!("Backend rejected {} query: {}", query.path, e);
            } else {
                error!("Error fetching appointments from {}: {}", query.path, e);
            }
            Err(e)
        }
    }
}
