use thiserror::Error;

/// Failures at the backend boundary. Every variant is non-fatal for the
/// console: the view keeps its last good page and shows the message.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Could not read backend response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdminError {
    /// Server-side rejection (`success:false`) as opposed to a transport fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AdminError::Rejected(_))
    }
}
