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

//! Bandwidth sample classification into remedial actions.

use roomqos_telemetry::BandwidthSample;
use serde::Serialize;

use crate::constants::{BANDWIDTH_LOW_BPS, BANDWIDTH_MEDIUM_BPS};

/// Remedial action for a measured bandwidth sample.
///
/// A `reason` exists only on the non-`None` variants; serialization follows
/// the wire shape `{ "action": ..., "reason": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BandwidthAction {
    None,
    QualityReduced { reason: String },
    VideoDisabled { reason: String },
}

impl BandwidthAction {
    /// The wire name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            BandwidthAction::None => "none",
            BandwidthAction::QualityReduced { .. } => "quality_reduced",
            BandwidthAction::VideoDisabled { .. } => "video_disabled",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            BandwidthAction::None => None,
            BandwidthAction::QualityReduced { reason }
            | BandwidthAction::VideoDisabled { reason } => Some(reason),
        }
    }
}

/// Classify a throughput measurement in bits/second.
///
/// Brackets are half-open with exact thresholds belonging to the upper one:
/// a sample of exactly 200_000 bps reduces quality rather than disabling
/// video, and exactly 500_000 bps needs no action. Stateless and safe to call
/// on every telemetry tick; smoothing against oscillation is the sample
/// producer's responsibility.
pub fn classify(bits_per_second: u64) -> BandwidthAction {
    if bits_per_second < BANDWIDTH_LOW_BPS {
        BandwidthAction::VideoDisabled {
            reason: format!(
                "measured bandwidth {bits_per_second} bps is below minimum threshold {BANDWIDTH_LOW_BPS} bps, disabling video"
            ),
        }
    } else if bits_per_second < BANDWIDTH_MEDIUM_BPS {
        BandwidthAction::QualityReduced {
            reason: format!(
                "measured bandwidth {bits_per_second} bps is constrained, reducing quality"
            ),
        }
    } else {
        BandwidthAction::None
    }
}

/// Convenience wrapper taking the telemetry collaborator's sample type.
pub fn classify_sample(sample: &BandwidthSample) -> BandwidthAction {
    classify(sample.bits_per_second)
}
