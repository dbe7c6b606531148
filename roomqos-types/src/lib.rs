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

//! Shared data model for the roomqos adaptive quality and resilience layer:
//! quality levels and presets, simulcast layer descriptions, codec
//! preferences, the wire-shaped negotiation objects, fidelity tiers, and the
//! status records surfaced to the UI.

pub mod callback;
pub mod codec;
pub mod fidelity;
pub mod negotiation;
pub mod quality;
pub mod simulcast;
pub mod status;

pub use callback::Callback;
pub use codec::{CodecPreference, VideoCodec};
pub use fidelity::VideoFidelity;
pub use negotiation::{
    DeviceIdConstraint, IdealMax, MediaConstraints, PublishDefaults, RoomNegotiationOptions,
};
pub use quality::{QualityLevel, Resolution, VideoPreset};
pub use simulcast::{LayerRid, Simulcast, SimulcastLayer, SimulcastPlan};
pub use status::{ConnectionQualityTier, ConnectionStatus, StatusTone};
