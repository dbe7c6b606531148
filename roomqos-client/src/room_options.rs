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

//! Session-negotiation options composed from the preset catalog, the
//! simulcast planner, and the codec selector.

use roomqos_types::{PublishDefaults, QualityLevel, RoomNegotiationOptions, Simulcast};

use crate::codec::preferred_codec;
use crate::simulcast::simulcast_plan;

/// Caller configuration for [`build_room_options`].
///
/// `prefer_h264` is deliberately an `Option`: leaving it unset means "no
/// codec opinion" and the built options carry no codec at all, rather than a
/// silently assumed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOptionsConfig {
    pub quality: QualityLevel,
    pub enable_simulcast: bool,
    pub prefer_h264: Option<bool>,
}

impl Default for RoomOptionsConfig {
    fn default() -> Self {
        Self {
            quality: QualityLevel::Auto,
            enable_simulcast: true,
            prefer_h264: None,
        }
    }
}

/// Compose the complete negotiation configuration for a session.
///
/// `adaptive_stream` and `dynacast` are always on; they are safe transport
/// self-adjustments that do not bypass this layer's decisions. Audio publish
/// defaults always enable DTX and RED. With `enable_simulcast: false` the
/// simulcast field is [`Simulcast::Disabled`], distinct from the empty plan
/// a `Low` quality level produces when simulcast is on.
pub fn build_room_options(config: RoomOptionsConfig) -> RoomNegotiationOptions {
    let video_simulcast_layers = if config.enable_simulcast {
        Simulcast::Enabled(simulcast_plan(config.quality))
    } else {
        Simulcast::Disabled
    };

    RoomNegotiationOptions {
        adaptive_stream: true,
        dynacast: true,
        publish_defaults: PublishDefaults {
            video_codec: config.prefer_h264.map(preferred_codec),
            video_simulcast_layers,
            dtx: true,
            red: true,
        },
    }
}
