// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::any::Any;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Routes advertised when a caller hits an unknown path.
pub const AVAILABLE_ENDPOINTS: [&str; 4] = ["/", "/api/health", "/api/token", "/api/test"];

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                message: None,
                available_endpoints: None,
            },
        }
    }

    pub fn endpoint_not_found() -> Self {
        let mut err = Self::new(StatusCode::NOT_FOUND, "Endpoint not found");
        err.body.available_endpoints =
            Some(AVAILABLE_ENDPOINTS.iter().map(|p| p.to_string()).collect());
        err
    }

    pub fn internal() -> Self {
        let mut err = Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        err.body.message = Some("Something went wrong on the server".to_string());
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::endpoint_not_found()
}

/// Response for a handler that panicked.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError::internal().into_response()
}
