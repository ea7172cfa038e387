// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Config`] struct built once at startup and injected into handlers through
//! [`crate::state::AppState`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `OPENAI_API_KEY` | Upstream API key used to mint client secrets | Unset (token endpoint degrades) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `APP_ENV` | `development` enables debug mode | Unset |
//! | `OPENAI_BASE_URL` | Upstream API base URL | `https://api.openai.com` |
//! | `OPENAI_TIMEOUT_SECS` | Upstream request timeout | `30` |
//! | `REALTIME_MODEL` | Realtime session model | `gpt-realtime` |
//! | `REALTIME_VOICE` | Output voice (`marin`, `lara`, `echo`, `onyx`) | `marin` |
//! | `REALTIME_INSTRUCTIONS` | Session instructions | Friendly assistant prompt |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! Empty or whitespace-only values are treated as unset.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::realtime::session::{SessionConfig, UnknownVoice};

/// Environment variable holding the upstream API key.
///
/// A missing key does not stop the server from starting. Every call to the
/// token endpoint fails with a configuration error until it is set.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
/// Set to `development` to enable debug mode (verbose default log filter).
pub const APP_ENV_ENV: &str = "APP_ENV";
pub const UPSTREAM_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const UPSTREAM_TIMEOUT_ENV: &str = "OPENAI_TIMEOUT_SECS";
pub const MODEL_ENV: &str = "REALTIME_MODEL";
pub const VOICE_ENV: &str = "REALTIME_VOICE";
pub const INSTRUCTIONS_ENV: &str = "REALTIME_INSTRUCTIONS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.openai.com";
/// Upper bound on a single mint call. A hung upstream must not hold a worker.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Startup configuration errors. A missing API key is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got {value:?}")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{name} is not a usable http(s) URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error(transparent)]
    Voice(#[from] UnknownVoice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug)]
pub struct Config {
    /// Upstream API key. `None` degrades `/api/token` to a configuration error.
    pub api_key: Option<SecretString>,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub upstream_base_url: Url,
    pub upstream_timeout: Duration,
    /// Fixed payload sent with every mint call.
    pub session: SessionConfig,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = var(API_KEY_ENV).map(SecretString::new);
        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let debug = var(APP_ENV_ENV)
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let upstream_base_url = parse_base_url(
            &var(UPSTREAM_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string()),
        )?;

        let upstream_timeout = match var(UPSTREAM_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: UPSTREAM_TIMEOUT_ENV,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_UPSTREAM_TIMEOUT,
        };

        let mut session = SessionConfig::default();
        if let Some(model) = var(MODEL_ENV) {
            session.model = model;
        }
        if let Some(voice) = var(VOICE_ENV) {
            session.voice = voice.parse()?;
        }
        if let Some(instructions) = var(INSTRUCTIONS_ENV) {
            session.instructions = instructions;
        }

        let log_format = var(LOG_FORMAT_ENV)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            api_key,
            host,
            port,
            debug,
            upstream_base_url,
            upstream_timeout,
            session,
            log_format,
        })
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Override the upstream request timeout.
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Configuration pointing at a mock upstream.
    #[cfg(test)]
    pub(crate) fn for_test(upstream_base_url: &str, api_key: Option<&str>) -> Self {
        let base = upstream_base_url.to_string();
        let key = api_key.map(str::to_string);
        Self::from_lookup(|name| match name {
            UPSTREAM_BASE_URL_ENV => Some(base.clone()),
            API_KEY_ENV => key.clone(),
            _ => None,
        })
        .expect("test configuration is valid")
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        name: UPSTREAM_BASE_URL_ENV,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            name: UPSTREAM_BASE_URL_ENV,
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
