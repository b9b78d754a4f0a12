use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::models::api::{ApiEnvelope, SimpleResponse};
use crate::models::app::AdminContext;

/// Header the admin backend reads the credential from.
pub const AUTH_HEADER: &str = "atoken";

/// Thin wrapper over `reqwest::Client` that knows the backend base URL,
/// attaches the admin credential and unwraps the `{success, message}`
/// envelope. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    http: Client,
    context: AdminContext,
}

impl AdminClient {
    pub fn new(context: AdminContext, timeout: Duration) -> Result<Self, AdminError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(AdminClient { http, context })
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, AdminError> {
        Self::new(AdminContext::from(config), config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.context.backend_url, path)
    }

    pub async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, AdminError>
    where
        T: DeserializeOwned + ApiEnvelope,
    {
        debug!("GET {} {:?}", path, params);
        let response = self
            .http
            .get(self.url(path))
            .header(AUTH_HEADER, &self.context.token)
            .query(params)
            .send()
            .await?;

        read_envelope(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AdminError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + ApiEnvelope,
    {
        debug!("POST {}", path);
        let response = self
            .http
            .post(self.url(path))
            .header(AUTH_HEADER, &self.context.token)
            .json(body)
            .send()
            .await?;

        read_envelope(response).await
    }
}

/// `success:false` is folded into an error here so callers treat it
/// exactly like a transport failure.
async fn read_envelope<T>(response: Response) -> Result<T, AdminError>
where
    T: DeserializeOwned + ApiEnvelope,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // The backend often explains a 4xx/5xx with the usual envelope.
        if let Ok(envelope) = serde_json::from_str::<SimpleResponse>(&body) {
            if let Some(message) = envelope.message.filter(|m| !m.is_empty()) {
                return Err(AdminError::Rejected(message));
            }
        }
        return Err(AdminError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: T = serde_json::from_str(&body).map_err(|e| AdminError::Decode(e.to_string()))?;

    if !parsed.success() {
        let message = parsed
            .message()
            .filter(|m| !m.is_empty())
            .unwrap_or("Request was rejected by the server");
        return Err(AdminError::Rejected(message.to_string()));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn client(base_url: &str) -> AdminClient {
        AdminClient::new(AdminContext::new(base_url, "tok-123"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_credential_header() {
        let app = Router::new().route(
            "/api/ping",
            get(|headers: HeaderMap| async move {
                let token = headers
                    .get("atoken")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let ok = token == "tok-123";
                Json(json!({ "success": ok, "message": "bad token" }))
            }),
        );
        let base = serve(app).await;

        let response: SimpleResponse = client(&base).get_json("/api/ping", &[]).await.unwrap();
        assert!(response.success);
    }

    #[tokio::test]
    async fn success_false_becomes_rejection() {
        let app = Router::new().route(
            "/api/ping",
            get(|| async { Json(json!({ "success": false, "message": "Not Authorized Login Again" })) }),
        );
        let base = serve(app).await;

        let err = client(&base)
            .get_json::<SimpleResponse>("/api/ping", &[])
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Not Authorized Login Again");
    }

    #[tokio::test]
    async fn plain_server_error_keeps_status() {
        let app = Router::new().route(
            "/api/ping",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = serve(app).await;

        let err = client(&base)
            .get_json::<SimpleResponse>("/api/ping", &[])
            .await
            .unwrap_err();
        match err {
            AdminError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let err = client("http://127.0.0.1:9")
            .get_json::<SimpleResponse>("/api/ping", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Transport(_)));
    }
}
