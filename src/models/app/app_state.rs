use crate::config::AdminConfig;

/// Backend location and credential, handed to the client explicitly.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub backend_url: String,
    pub token: String,
}

impl AdminContext {
    pub fn new(backend_url: &str, token: &str) -> Self {
        AdminContext {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

impl From<&AdminConfig> for AdminContext {
    fn from(config: &AdminConfig) -> Self {
        AdminContext::new(&config.backend_url, &config.token)
    }
}
