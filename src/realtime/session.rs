// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Realtime session description sent with every mint call.

use std::{fmt, str::FromStr};

use serde::Serialize;

pub const DEFAULT_MODEL: &str = "gpt-realtime";
pub const DEFAULT_INSTRUCTIONS: &str =
    "You are a helpful voice assistant. Be conversational and friendly.";
const SESSION_TYPE: &str = "realtime";

/// Output voices the relay will request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Marin,
    Lara,
    Echo,
    Onyx,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Marin, Voice::Lara, Voice::Echo, Voice::Onyx];

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Marin => "marin",
            Voice::Lara => "lara",
            Voice::Echo => "echo",
            Voice::Onyx => "onyx",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown voice {0:?} (expected one of marin, lara, echo, onyx)")]
pub struct UnknownVoice(pub String);

impl FromStr for Voice {
    type Err = UnknownVoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Voice::ALL
            .into_iter()
            .find(|voice| voice.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVoice(s.to_string()))
    }
}

/// Session parameters fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub model: String,
    pub voice: Voice,
    pub instructions: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            voice: Voice::default(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn mint_request(&self) -> SessionMintRequest<'_> {
        SessionMintRequest {
            session: RealtimeSession {
                kind: SESSION_TYPE,
                model: &self.model,
                audio: AudioConfig {
                    output: AudioOutput { voice: self.voice },
                },
                instructions: &self.instructions,
            },
        }
    }
}

/// Request body for `POST /v1/realtime/client_secrets`.
#[derive(Debug, Serialize)]
pub struct SessionMintRequest<'a> {
    session: RealtimeSession<'a>,
}

#[derive(Debug, Serialize)]
struct RealtimeSession<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    model: &'a str,
    audio: AudioConfig,
    instructions: &'a str,
}

#[derive(Debug, Serialize)]
struct AudioConfig {
    output: AudioOutput,
}

#[derive(Debug, Serialize)]
struct AudioOutput {
    voice: Voice,
}
