// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OpenAI Realtime integration.
//!
//! The relay makes exactly one kind of upstream call: minting a realtime
//! client secret for a fixed session description. The minted secret is
//! handed to the browser, which then talks to the upstream directly.
//!
//! - `session` - the fixed session payload and its recognised voices
//! - `client` - the outbound mint call
//! - `error` - failure taxonomy and its HTTP mapping

pub mod client;
pub mod error;
pub mod session;

pub use client::{MintedSecret, RealtimeClient};
pub use error::MintError;
pub use session::{SessionConfig, Voice};
