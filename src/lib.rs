// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Realtime Token Relay - Ephemeral credential broker
//!
//! Browser voice clients call this service to obtain a short-lived OpenAI
//! Realtime client secret. The long-lived API key stays on the server; the
//! browser uses the minted secret to open its WebRTC session directly with
//! the upstream API.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Startup configuration read from the environment
//! - `realtime` - Upstream client-secret minting
//! - `state` - Shared handler state
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod config;
pub mod error;
pub mod realtime;
pub mod state;
pub mod telemetry;
