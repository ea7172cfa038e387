// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ephemeral token endpoint.
//!
//! `GET /api/token` mints a realtime client secret with the server's API key
//! and returns the upstream JSON untouched. The browser uses the returned
//! `value` to authenticate its WebRTC session; the API key never leaves the
//! server.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    realtime::{error::MintErrorBody, MintError},
    state::AppState,
};

/// Shape of a successful mint (documentation only; the body is passed through).
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientSecret {
    /// Ephemeral credential the browser presents to the realtime API.
    pub value: String,
    /// Unix timestamp after which `value` is no longer accepted.
    pub expires_at: i64,
}

#[utoipa::path(
    get,
    path = "/api/token",
    tag = "Token",
    responses(
        (status = 200, description = "Ephemeral client secret, as returned by the upstream", body = ClientSecret),
        (status = 500, description = "Key not configured or upstream call failed", body = MintErrorBody)
    )
)]
pub async fn get_token(State(state): State<AppState>) -> Result<Response, MintError> {
    let api_key = state
        .config
        .api_key
        .as_ref()
        .ok_or(MintError::NotConfigured)?;

    let minted = state
        .realtime
        .mint_client_secret(api_key, &state.config.session)
        .await?;

    match minted.expires_at() {
        Some(expires_at) => tracing::info!(%expires_at, "Token generated"),
        None => tracing::info!("Token generated without expires_at"),
    }

    Ok(([(CONTENT_TYPE, "application/json")], minted.into_body()).into_response())
}

/// Preflight for `/api/token`: empty 200 regardless of configuration.
#[utoipa::path(
    options,
    path = "/api/token",
    tag = "Token",
    responses((status = 200, description = "Preflight accepted"))
)]
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
