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
 */

use serde::{Deserialize, Serialize};

/// Target fidelity tier for a remote participant's video.
///
/// Audio is never part of this trade-off: every participant's audio stays
/// subscribed regardless of tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFidelity {
    /// Highest simulcast layer available.
    Full,
    /// A reduced layer, suitable for thumbnails and non-speakers.
    Reduced,
    /// No video subscription at all; audio only.
    AudioOnly,
}

impl VideoFidelity {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoFidelity::Full => "full",
            VideoFidelity::Reduced => "reduced",
            VideoFidelity::AudioOnly => "audio_only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fidelity_as_str() {
        assert_eq!(VideoFidelity::Full.as_str(), "full");
        assert_eq!(VideoFidelity::Reduced.as_str(), "reduced");
        assert_eq!(VideoFidelity::AudioOnly.as_str(), "audio_only");
    }
}
