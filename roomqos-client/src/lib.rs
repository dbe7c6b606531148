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

//! Adaptive video quality and connection resilience policy for real-time
//! rooms. This crate decides *what* to ask of an underlying WebRTC-capable
//! session (capture presets, simulcast layer plans, codec preference, track
//! subscription fidelity, reconnection behavior) and leaves the transport
//! itself to the session implementation behind narrow capability traits.
//!
//! This crate makes no assumptions about the UI: status updates and track
//! state changes are delivered through callbacks, and the only UI-facing
//! artifacts are `{message, tone}` status records and per-track events.
//!
//! # Outline of usage
//!
//! ## Negotiating a session:
//! ```no_run
//! use roomqos_client::{build_room_options, media_constraints, RoomOptionsConfig};
//! use roomqos_types::QualityLevel;
//!
//! let options = build_room_options(RoomOptionsConfig {
//!     quality: QualityLevel::High,
//!     enable_simulcast: true,
//!     prefer_h264: Some(true),
//! });
//! let constraints = media_constraints(QualityLevel::High, Some("camera-id"));
//! // hand `options` and `constraints` to the room abstraction
//! ```
//!
//! ## Reacting to bandwidth while connected:
//! ```no_run
//! # use roomqos_client::classify;
//! let action = classify(300_000);
//! // apply via TrackPublicationController::apply_bandwidth_action
//! ```
//!
//! ## Surviving a dropped session:
//! ```ignore
//! let monitor = ConnectionResilienceMonitor::attach(session, &events, options);
//! // lifecycle events drive the bounded retry loop; drop to detach
//! ```

pub mod bandwidth;
pub mod codec;
pub mod connection;
pub mod constants;
pub mod media_constraints;
pub mod presets;
pub mod room_options;
pub mod simulcast;
pub mod subscription;
pub mod track_control;

pub use bandwidth::{classify, classify_sample, BandwidthAction};
pub use codec::{codec_preference, preferred_codec};
pub use connection::{
    BackoffSchedule, ConnectionResilienceMonitor, EventSubscription, MonitorState,
    ReconnectCapability, ResilienceMonitorOptions, SessionEvent, SessionEventBus,
    SessionEventSource,
};
pub use media_constraints::media_constraints;
pub use presets::capture_preset;
pub use room_options::{build_room_options, RoomOptionsConfig};
pub use simulcast::simulcast_plan;
pub use subscription::{
    ParticipantSnapshot, RoomSizePreset, SubscriptionPlan, SubscriptionStrategySelector,
    SubscriptionTarget,
};
pub use track_control::{
    fidelity_for_width, TrackControl, TrackEvent, TrackPublicationController,
};
