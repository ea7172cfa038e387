// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    config::Config,
    realtime::{MintError, RealtimeClient},
};

/// Handler state. Immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub realtime: RealtimeClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, MintError> {
        let realtime = RealtimeClient::new(&config.upstream_base_url, config.upstream_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            realtime,
        })
    }
}
