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

//! Simulcast layer planning per quality level.

use roomqos_types::{LayerRid, QualityLevel, SimulcastLayer, SimulcastPlan};

/// Ordered encoding layers for a quality level, smallest first.
///
/// `High` publishes three layers (q/4, h/2, f/1), `Medium` and `Auto` two
/// (q/4, f/1). `Low` returns an empty plan: the caller publishes a single
/// non-simulcast encoding. An empty plan never means "no video".
pub fn simulcast_plan(level: QualityLevel) -> SimulcastPlan {
    match level {
        QualityLevel::High => vec![
            SimulcastLayer::new(LayerRid::Quarter, 4),
            SimulcastLayer::new(LayerRid::Half, 2),
            SimulcastLayer::new(LayerRid::Full, 1),
        ],
        QualityLevel::Medium | QualityLevel::Auto => vec![
            SimulcastLayer::new(LayerRid::Quarter, 4),
            SimulcastLayer::new(LayerRid::Full, 1),
        ],
        QualityLevel::Low => Vec::new(),
    }
}
