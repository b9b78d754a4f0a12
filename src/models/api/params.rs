use serde::{Deserialize, Serialize};

use crate::models::appointments::AppointmentsResponse;
use crate::models::dashboard::DashResponse;
use crate::models::doctors::DoctorsResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    pub appointment_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimpleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Every admin endpoint wraps its payload in `{success, message, ...}`.
pub trait ApiEnvelope {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

#[macro_export]
macro_rules! impl_envelope {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $crate::models::api::ApiEnvelope for $type {
                fn success(&self) -> bool {
                    self.success
                }

                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }
            }
        )+
    };
}

crate::impl_envelope! {
    SimpleResponse,
    AppointmentsResponse,
    DoctorsResponse,
    DashResponse,
}
