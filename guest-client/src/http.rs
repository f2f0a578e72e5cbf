//! HTTP client for the hosted backend's REST surface
//!
//! Tables are reached through PostgREST-style URLs under `rest/v1/`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{BROADCAST_TARGET, Notification, RolePermissionRecord, RolePermissionRow};

use crate::{Backend, ClientConfig, ClientError, ClientResult};

const ROLE_PERMISSIONS_TABLE: &str = "role_permissions";
const GUEST_NOTIFICATIONS_TABLE: &str = "guest_notifications";

/// HTTP client for making requests to the hosted backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn table_url(&self, table: &str) -> String {
        table_url(&self.base_url, table)
    }

    /// Attach `apikey` and bearer headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = error_message(&text);
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST
                | StatusCode::CONFLICT
                | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
                _ => ClientError::Backend {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpClient {
    async fn fetch_role_permissions(&self) -> ClientResult<Vec<RolePermissionRow>> {
        let request = self
            .client
            .get(self.table_url(ROLE_PERMISSIONS_TABLE))
            .query(&[("select", "role,permissions")]);

        let response = self.authorize(request).send().await?;
        Self::handle_response(response).await
    }

    async fn upsert_role_permissions(
        &self,
        record: &RolePermissionRecord,
    ) -> ClientResult<()> {
        let row = RolePermissionRow::from(record);
        let request = self
            .client
            .post(self.table_url(ROLE_PERMISSIONS_TABLE))
            .query(&[("on_conflict", "role")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[row]);

        let response = self.authorize(request).send().await?;
        let _: Vec<RolePermissionRow> = Self::handle_response(response).await?;
        tracing::debug!(role = %record.role, "Role permissions upserted");
        Ok(())
    }

    async fn fetch_guest_notifications(
        &self,
        guest_id: &str,
        limit: usize,
    ) -> ClientResult<Vec<Notification>> {
        let limit = limit.to_string();
        let target = target_filter(guest_id);
        let request = self
            .client
            .get(self.table_url(GUEST_NOTIFICATIONS_TABLE))
            .query(&[
                ("select", "*"),
                ("or", target.as_str()),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ]);

        let response = self.authorize(request).send().await?;
        Self::handle_response(response).await
    }
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

/// `or` filter matching one guest or the broadcast sentinel
fn target_filter(guest_id: &str) -> String {
    format!(
        "(guest_id.eq.{},guest_id.eq.{})",
        quote_filter_value(guest_id),
        BROADCAST_TARGET
    )
}

/// Double-quote a filter value so reserved characters (`,` `.` `(` `)`) stay literal
fn quote_filter_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Pull `message` out of a backend error body, falling back to the raw text
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        hint: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            hint: Some(hint),
        }) => format!("{} ({})", message, hint),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        assert_eq!(
            table_url("https://demo.example.co/", "role_permissions"),
            "https://demo.example.co/rest/v1/role_permissions"
        );
    }

    #[test]
    fn test_target_filter_includes_broadcast() {
        assert_eq!(
            target_filter("g1"),
            "(guest_id.eq.\"g1\",guest_id.eq.all)"
        );
    }

    #[test]
    fn test_filter_value_escaping() {
        assert_eq!(quote_filter_value("a,b"), "\"a,b\"");
        assert_eq!(quote_filter_value("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_filter_value("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy"}"#;
        assert_eq!(
            error_message(body),
            "new row violates row-level security policy"
        );

        let body = r#"{"message":"column does not exist","hint":"Perhaps you meant permission"}"#;
        assert_eq!(
            error_message(body),
            "column does not exist (Perhaps you meant permission)"
        );

        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_new_client_keeps_config() {
        let config = ClientConfig::new("http://localhost:54321")
            .with_api_key("anon")
            .with_token("user-jwt");
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.token(), Some("user-jwt"));
    }
}
