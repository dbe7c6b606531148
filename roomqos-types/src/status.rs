/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use serde::{Deserialize, Serialize};

/// Tone of a user-visible status toast. These two are the only tones the
/// policy layer ever emits; persistent failure UI belongs to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Warning,
    Success,
}

/// Status record handed to the UI layer for toast rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub message: String,
    pub tone: StatusTone,
}

impl ConnectionStatus {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: StatusTone::Warning,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: StatusTone::Success,
        }
    }
}

/// Per-participant connection quality signal read from the session, mapped
/// for indicator rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionQualityTier {
    Excellent,
    Good,
    Poor,
    Lost,
}

impl ConnectionQualityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionQualityTier::Excellent => "excellent",
            ConnectionQualityTier::Good => "good",
            ConnectionQualityTier::Poor => "poor",
            ConnectionQualityTier::Lost => "lost",
        }
    }
}
