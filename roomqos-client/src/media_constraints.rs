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

//! Capture constraints derived from a quality preset.

use roomqos_types::{DeviceIdConstraint, IdealMax, MediaConstraints, QualityLevel};

use crate::presets::capture_preset;

/// Platform media constraints for a quality level and optional camera.
///
/// `ideal` and `max` are set to the same preset value on purpose: the capture
/// device is asked not to exceed the preset even opportunistically. When a
/// device id is supplied it becomes an exact-match constraint, so capture
/// fails if that device is unavailable instead of silently switching cameras;
/// the resulting error is the capture caller's to handle.
pub fn media_constraints(level: QualityLevel, device_id: Option<&str>) -> MediaConstraints {
    let preset = capture_preset(level);
    MediaConstraints {
        width: IdealMax::exactly(preset.resolution.width),
        height: IdealMax::exactly(preset.resolution.height),
        frame_rate: preset.frame_rate,
        device_id: device_id.map(|id| DeviceIdConstraint {
            exact: id.to_string(),
        }),
    }
}
