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

//! Wire-shaped configuration objects handed to the room abstraction when a
//! session is negotiated. Field omission is part of the contract: an absent
//! key and an empty placeholder mean different things to the transport, so
//! optional fields are skipped rather than serialized as null.

use serde::Serialize;

use crate::codec::VideoCodec;
use crate::simulcast::Simulcast;

/// Complete session-negotiation configuration produced by the options builder.
///
/// `adaptive_stream` and `dynacast` are always true: the transport may
/// auto-adjust subscribed resolutions and halt unwatched encodings without
/// taking control away from this policy layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomNegotiationOptions {
    pub adaptive_stream: bool,
    pub dynacast: bool,
    pub publish_defaults: PublishDefaults,
}

/// Defaults applied to every locally published track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishDefaults {
    /// Set only when the caller stated a codec preference; never guessed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<VideoCodec>,
    /// Present iff simulcast is enabled by caller configuration.
    #[serde(skip_serializing_if = "Simulcast::is_disabled")]
    pub video_simulcast_layers: Simulcast,
    /// Discontinuous transmission: the audio encoder sends nothing during
    /// silence.
    pub dtx: bool,
    /// Redundant audio encoding across packets to survive loss.
    pub red: bool,
}

/// Range constraint asking the capture device for `ideal` without ever
/// exceeding `max`. The builder sets both to the same preset value so the
/// device cannot opportunistically over-deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdealMax {
    pub ideal: u32,
    pub max: u32,
}

impl IdealMax {
    pub const fn exactly(value: u32) -> Self {
        Self {
            ideal: value,
            max: value,
        }
    }
}

/// Exact-match device selector. Capture fails if the device is gone; the
/// policy layer never substitutes another camera behind the user's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdConstraint {
    pub exact: String,
}

/// Platform media constraints derived from a quality preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaConstraints {
    pub width: IdealMax,
    pub height: IdealMax,
    pub frame_rate: u32,
    /// Omitted from the serialized form entirely when no device was selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceIdConstraint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulcast::{LayerRid, SimulcastLayer};

    fn options(simulcast: Simulcast) -> RoomNegotiationOptions {
        RoomNegotiationOptions {
            adaptive_stream: true,
            dynacast: true,
            publish_defaults: PublishDefaults {
                video_codec: None,
                video_simulcast_layers: simulcast,
                dtx: true,
                red: true,
            },
        }
    }

    #[test]
    fn test_disabled_simulcast_omits_key() {
        let json = serde_json::to_value(options(Simulcast::Disabled)).unwrap();
        let defaults = json["publishDefaults"].as_object().unwrap();
        assert!(!defaults.contains_key("videoSimulcastLayers"));
    }

    #[test]
    fn test_enabled_simulcast_serializes_layers() {
        let plan = vec![
            SimulcastLayer::new(LayerRid::Quarter, 4),
            SimulcastLayer::new(LayerRid::Full, 1),
        ];
        let json = serde_json::to_value(options(Simulcast::Enabled(plan))).unwrap();
        let layers = json["publishDefaults"]["videoSimulcastLayers"]
            .as_array()
            .unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0]["rid"], "q");
        assert_eq!(layers[1]["scaleDownBy"], 1);
    }

    #[test]
    fn test_unset_codec_omits_key() {
        let json = serde_json::to_value(options(Simulcast::Disabled)).unwrap();
        let defaults = json["publishDefaults"].as_object().unwrap();
        assert!(!defaults.contains_key("videoCodec"));
        assert_eq!(defaults["dtx"], true);
        assert_eq!(defaults["red"], true);
    }

    #[test]
    fn test_constraints_device_id_omitted_when_absent() {
        let constraints = MediaConstraints {
            width: IdealMax::exactly(1280),
            height: IdealMax::exactly(720),
            frame_rate: 30,
            device_id: None,
        };
        let json = serde_json::to_value(&constraints).unwrap();
        assert!(!json.as_object().unwrap().contains_key("deviceId"));
        assert_eq!(json["width"]["ideal"], 1280);
        assert_eq!(json["width"]["max"], 1280);
    }

    #[test]
    fn test_constraints_device_id_exact_when_present() {
        let constraints = MediaConstraints {
            width: IdealMax::exactly(1280),
            height: IdealMax::exactly(720),
            frame_rate: 30,
            device_id: Some(DeviceIdConstraint {
                exact: "device123".to_string(),
            }),
        };
        let json = serde_json::to_value(&constraints).unwrap();
        assert_eq!(json["deviceId"]["exact"], "device123");
    }
}
