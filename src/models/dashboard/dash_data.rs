use serde::Deserialize;

/// Headline counters shown above the latest bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct DashData {
    #[serde(default)]
    pub doctors: u64,
    #[serde(default)]
    pub appointments: u64,
    #[serde(default)]
    pub patients: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub dash_data: Option<DashData>,
}
