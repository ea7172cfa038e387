// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound client for the realtime client-secret endpoint.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::{error::MintError, session::SessionConfig};

pub const MINT_CLIENT_SECRET_PATH: &str = "/v1/realtime/client_secrets";

/// A client secret minted by the upstream.
///
/// The body is kept as the exact bytes the upstream sent so it can be
/// returned to the browser unchanged.
#[derive(Debug, Clone)]
pub struct MintedSecret {
    body: Bytes,
    expires_at: Option<Value>,
}

impl MintedSecret {
    pub fn expires_at(&self) -> Option<&Value> {
        self.expires_at.as_ref()
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

#[derive(Debug, Clone)]
pub struct RealtimeClient {
    http: Client,
    endpoint: String,
}

impl RealtimeClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, MintError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MintError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}{}",
                base_url.as_str().trim_end_matches('/'),
                MINT_CLIENT_SECRET_PATH
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Mint one ephemeral client secret for `session`.
    ///
    /// Exactly one request is made. There is no retry; a slow upstream is
    /// cut off by the client timeout and reported as [`MintError::UpstreamTimeout`].
    pub async fn mint_client_secret(
        &self,
        api_key: &SecretString,
        session: &SessionConfig,
    ) -> Result<MintedSecret, MintError> {
        let payload = serde_json::to_vec(&session.mint_request())
            .map_err(|e| MintError::Internal(format!("serialize session failed: {e}")))?;

        debug!(
            endpoint = %self.endpoint,
            payload = %String::from_utf8_lossy(&payload),
            "Requesting realtime client secret"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(MintError::from_transport)?;

        let status = response.status();
        info!(status = status.as_u16(), "Upstream responded");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable response body: {e}>"));
            warn!(status = status.as_u16(), body = %body, "Upstream rejected client secret request");
            return Err(MintError::UpstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(MintError::from_transport)?;
        let parsed: Value = serde_json::from_slice(&body).map_err(|e| {
            MintError::UpstreamTransport(format!("upstream returned invalid JSON: {e}"))
        })?;

        Ok(MintedSecret {
            expires_at: parsed.get("expires_at").cloned(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> RealtimeClient {
        let base = Url::parse(&server.base_url()).unwrap();
        RealtimeClient::new(&base, timeout).unwrap()
    }

    fn key() -> SecretString {
        SecretString::new("sk-test".to_string())
    }

    #[test]
    fn endpoint_joins_base_without_double_slash() {
        let base = Url::parse("https://api.openai.com/").unwrap();
        let client = RealtimeClient::new(&base, Duration::from_secs(30)).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://api.openai.com/v1/realtime/client_secrets"
        );
    }

    #[tokio::test]
    async fn sends_bearer_key_and_session_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(MINT_CLIENT_SECRET_PATH)
                    .header("authorization", "Bearer sk-test")
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "session": {
                            "type": "realtime",
                            "model": "gpt-realtime",
                            "audio": { "output": { "voice": "marin" } },
                            "instructions": "You are a helpful voice assistant. Be conversational and friendly."
                        }
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"value":"ek_123","expires_at":1756310470}"#);
            })
            .await;

        let minted = client_for(&server, Duration::from_secs(5))
            .mint_client_secret(&key(), &SessionConfig::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(minted.expires_at(), Some(&json!(1756310470)));
        assert_eq!(
            minted.into_body().as_ref(),
            br#"{"value":"ek_123","expires_at":1756310470}"#
        );
    }

    #[tokio::test]
    async fn non_success_status_is_rejected_with_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(MINT_CLIENT_SECRET_PATH);
                then.status(401).body("invalid api key");
            })
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .mint_client_secret(&key(), &SessionConfig::default())
            .await
            .unwrap_err();

        match err {
            MintError::UpstreamRejected { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(MINT_CLIENT_SECRET_PATH);
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .body(r#"{"value":"late"}"#);
            })
            .await;

        let err = client_for(&server, Duration::from_millis(200))
            .mint_client_secret(&key(), &SessionConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, MintError::UpstreamTimeout), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let base = Url::parse("http://127.0.0.1:1").unwrap();
        let client = RealtimeClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client
            .mint_client_secret(&key(), &SessionConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, MintError::UpstreamUnreachable(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn invalid_json_success_is_a_transport_fault() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(MINT_CLIENT_SECRET_PATH);
                then.status(200).body("<html>gateway</html>");
            })
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .mint_client_secret(&key(), &SessionConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, MintError::UpstreamTransport(_)), "got {err:?}");
    }
}
