// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token minting errors.
//!
//! Every failure reaches the caller as HTTP 500 with an `error` field.
//! The text is diagnostic only; callers must not branch on it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum MintError {
    /// No API key configured; the upstream is never contacted.
    #[error("OPENAI_API_KEY not configured")]
    NotConfigured,

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamRejected { status: u16, body: String },

    #[error("upstream request timed out")]
    UpstreamTimeout,

    #[error("could not connect to upstream: {0}")]
    UpstreamUnreachable(String),

    #[error("upstream request failed: {0}")]
    UpstreamTransport(String),

    #[error("unexpected error: {0}")]
    Internal(String),
}

/// JSON body returned for a failed token request.
#[derive(Debug, Serialize, ToSchema)]
pub struct MintErrorBody {
    pub error: String,
    /// Upstream response text, present when the upstream rejected the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Upstream HTTP status, present when the upstream rejected the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl MintError {
    /// Classify a transport-level failure from the HTTP client.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MintError::UpstreamTimeout
        } else if err.is_connect() {
            MintError::UpstreamUnreachable(err.to_string())
        } else {
            MintError::UpstreamTransport(err.to_string())
        }
    }

    /// Stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            MintError::NotConfigured => "configuration",
            MintError::UpstreamRejected { .. } => "upstream_rejected",
            MintError::UpstreamTimeout => "upstream_timeout",
            MintError::UpstreamUnreachable(_) => "upstream_unreachable",
            MintError::UpstreamTransport(_) => "upstream_transport",
            MintError::Internal(_) => "internal",
        }
    }

    pub fn body(&self) -> MintErrorBody {
        let (error, details, status_code) = match self {
            MintError::NotConfigured => (self.to_string(), None, None),
            MintError::UpstreamRejected { status, body } => (
                "Failed to generate token".to_string(),
                Some(body.clone()),
                Some(*status),
            ),
            MintError::UpstreamTimeout => ("Request timeout".to_string(), None, None),
            MintError::UpstreamUnreachable(_) => ("Connection error".to_string(), None, None),
            MintError::UpstreamTransport(msg) => (format!("Request failed: {msg}"), None, None),
            MintError::Internal(msg) => (format!("Unexpected error: {msg}"), None, None),
        };
        MintErrorBody {
            error,
            details,
            status_code,
        }
    }
}

impl IntoResponse for MintError {
    fn into_response(self) -> Response {
        match &self {
            MintError::NotConfigured => {
                tracing::warn!(kind = self.kind(), "Token requested but OPENAI_API_KEY is not set")
            }
            _ => tracing::error!(kind = self.kind(), error = %self, "Token request failed"),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.body())).into_response()
    }
}
