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

//! Quality level to capture preset lookup.

use roomqos_types::{QualityLevel, VideoPreset};

/// Capture parameters for a quality level.
///
/// Total over [`QualityLevel`]: the match is exhaustive with no wildcard arm,
/// so a new level without a preset fails to compile instead of silently
/// defaulting. `Auto` resolves to the medium (720p) preset.
pub fn capture_preset(level: QualityLevel) -> VideoPreset {
    match level {
        QualityLevel::High => VideoPreset::H1080,
        QualityLevel::Medium => VideoPreset::H720,
        QualityLevel::Low => VideoPreset::H360,
        QualityLevel::Auto => VideoPreset::H720,
    }
}
