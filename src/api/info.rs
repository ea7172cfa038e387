// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static informational endpoints.

use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub endpoints: EndpointDescriptions,
    pub cors: String,
    pub docs: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointDescriptions {
    pub health: String,
    pub token: String,
    pub test: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelfTestResponse {
    pub message: String,
    pub timestamp: String,
    pub endpoints: EndpointDescriptions,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Info",
    responses((status = 200, description = "Service information", body = ServiceInfo))
)]
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "OpenAI Realtime API Backend".to_string(),
        status: "running".to_string(),
        endpoints: EndpointDescriptions {
            health: "/api/health - Health check".to_string(),
            token: "/api/token - Get ephemeral token".to_string(),
            test: "/api/test - Test endpoint".to_string(),
        },
        cors: "Enabled for all origins".to_string(),
        docs: "/docs".to_string(),
    })
}

/// Confirms the server is routing requests.
#[utoipa::path(
    get,
    path = "/api/test",
    tag = "Info",
    responses((status = 200, description = "Backend is reachable", body = SelfTestResponse))
)]
pub async fn self_test() -> Json<SelfTestResponse> {
    Json(SelfTestResponse {
        message: "Backend is working!".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        endpoints: EndpointDescriptions {
            health: "/api/health".to_string(),
            token: "/api/token".to_string(),
            test: "/api/test".to_string(),
        },
    })
}
