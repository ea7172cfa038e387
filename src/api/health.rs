// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "openai-realtime-backend";

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving.
    pub status: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
    pub service: String,
    pub version: String,
    /// Whether an upstream API key was present at startup.
    /// When false, `/api/token` fails until the key is configured.
    pub api_key_configured: bool,
}

/// Health check endpoint handler.
///
/// Always returns 200. A missing API key is reported, not treated as failure.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_key_configured: state.config.api_key_configured(),
    })
}
