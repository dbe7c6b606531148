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

/// User-selectable video quality level.
///
/// `Auto` is a policy alias: everywhere it is consulted it resolves to the
/// `Medium` (720p) preset. It is a fixed default, not a dynamic choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Low,
    Medium,
    High,
    #[default]
    Auto,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Low => "low",
            QualityLevel::Medium => "medium",
            QualityLevel::High => "high",
            QualityLevel::Auto => "auto",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Capture resolution and frame rate for one quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPreset {
    pub resolution: Resolution,
    pub frame_rate: u32,
}

impl VideoPreset {
    pub const fn new(width: u32, height: u32, frame_rate: u32) -> Self {
        Self {
            resolution: Resolution { width, height },
            frame_rate,
        }
    }

    /// 1920x1080 @ 30fps
    pub const H1080: VideoPreset = VideoPreset::new(1920, 1080, 30);
    /// 1280x720 @ 30fps
    pub const H720: VideoPreset = VideoPreset::new(1280, 720, 30);
    /// 640x360 @ 24fps
    pub const H360: VideoPreset = VideoPreset::new(640, 360, 24);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_level_as_str() {
        assert_eq!(QualityLevel::Low.as_str(), "low");
        assert_eq!(QualityLevel::Medium.as_str(), "medium");
        assert_eq!(QualityLevel::High.as_str(), "high");
        assert_eq!(QualityLevel::Auto.as_str(), "auto");
    }

    #[test]
    fn test_quality_level_default_is_auto() {
        assert_eq!(QualityLevel::default(), QualityLevel::Auto);
    }

    #[test]
    fn test_quality_level_serde_round_trip() {
        let json = serde_json::to_string(&QualityLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let level: QualityLevel = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(level, QualityLevel::Auto);
    }

    #[test]
    fn test_preset_constants() {
        assert_eq!(VideoPreset::H1080.resolution.width, 1920);
        assert_eq!(VideoPreset::H1080.resolution.height, 1080);
        assert_eq!(VideoPreset::H1080.frame_rate, 30);
        assert_eq!(VideoPreset::H360.frame_rate, 24);
    }
}
