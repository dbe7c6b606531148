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

/// Restriction identifier of a simulcast encoding, from smallest to full size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerRid {
    /// Quarter resolution ("q").
    #[serde(rename = "q")]
    Quarter,
    /// Half resolution ("h"). Only present in the 3-layer 1080p plan.
    #[serde(rename = "h")]
    Half,
    /// Full resolution ("f").
    #[serde(rename = "f")]
    Full,
}

impl LayerRid {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerRid::Quarter => "q",
            LayerRid::Half => "h",
            LayerRid::Full => "f",
        }
    }
}

/// One simulcast encoding: the rid plus the factor the capture resolution is
/// divided by for this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulcastLayer {
    pub rid: LayerRid,
    pub scale_down_by: u32,
}

impl SimulcastLayer {
    pub const fn new(rid: LayerRid, scale_down_by: u32) -> Self {
        Self { rid, scale_down_by }
    }
}

/// Ordered layer list, smallest (`q`) first. Consumers iterate in order for
/// priority when the encoder runs out of resources.
pub type SimulcastPlan = Vec<SimulcastLayer>;

/// Whether simulcast is negotiated for a publication.
///
/// `Disabled` and `Enabled(vec![])` mean different things: the first is
/// "simulcast intentionally off", the second is "single non-simulcast
/// encoding because the quality level is low". The serialized options object
/// carries no layer key at all in the `Disabled` case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simulcast {
    Disabled,
    Enabled(SimulcastPlan),
}

impl Simulcast {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Simulcast::Enabled(_))
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Simulcast::Disabled)
    }

    /// The negotiated layers, or `None` when simulcast is off entirely.
    pub fn layers(&self) -> Option<&[SimulcastLayer]> {
        match self {
            Simulcast::Disabled => None,
            Simulcast::Enabled(layers) => Some(layers),
        }
    }
}

// Serializes as the bare layer array; `Disabled` is expected to be skipped by
// the containing struct (`skip_serializing_if = "Simulcast::is_disabled"`).
impl Serialize for Simulcast {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Simulcast::Disabled => serializer.serialize_none(),
            Simulcast::Enabled(layers) => layers.serialize(serializer),
        }
    }
}
