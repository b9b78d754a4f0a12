use crate::error::AdminError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";
pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub backend_url: String,
    pub token: String,
    pub currency: String,
    pub request_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl AdminConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, AdminError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_url = non_empty("ADMIN_BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let token = non_empty("ADMIN_TOKEN")
            .ok_or_else(|| AdminError::Config("ADMIN_TOKEN is not set".to_string()))?;

        let currency = non_empty("ADMIN_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let timeout_secs = match non_empty("ADMIN_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AdminError::Config(format!(
                    "ADMIN_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(AdminConfig {
            backend_url,
            token,
            currency,
            request_timeout: Duration::from_secs(timeout_secs),
            log_file: non_empty("ADMIN_LOG_FILE").map(PathBuf::from),
        })
    }
}
