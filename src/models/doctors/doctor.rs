use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Doctor {
    pub name: String,
    #[serde(default)]
    pub speciality: String,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct DoctorsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}
