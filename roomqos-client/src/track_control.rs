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

//! Applies bandwidth and subscription decisions to live track publications.
//!
//! Pausing a track stops frame delivery without renegotiating the session, so
//! it is cheap and reversible. All operations here are idempotent: pausing a
//! paused track or resuming an active one changes nothing and emits nothing.

use std::collections::HashMap;

use anyhow::Result;
use log::debug;
use roomqos_telemetry::{emit, metric, TelemetryEvent};
use roomqos_types::{Callback, VideoFidelity};

use crate::bandwidth::BandwidthAction;
use crate::constants::{FULL_FIDELITY_MIN_WIDTH_PX, REDUCED_FIDELITY_MIN_WIDTH_PX};
use crate::subscription::SubscriptionPlan;

/// Track-level capability the room adapter implements. This is the only
/// surface this component touches; session-level reconnection is not
/// reachable from here.
pub trait TrackControl {
    fn set_track_enabled(&self, track_sid: &str, enabled: bool) -> Result<()>;
    fn set_track_fidelity(&self, track_sid: &str, fidelity: VideoFidelity) -> Result<()>;
}

/// Per-track state change, for UI indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackEvent {
    Paused(String),
    Resumed(String),
    FidelityChanged {
        track_sid: String,
        fidelity: VideoFidelity,
    },
}

#[derive(Debug, Default)]
struct TrackState {
    participant_id: Option<String>,
    paused: bool,
    fidelity: Option<VideoFidelity>,
}

/// Fidelity tier for a remote video rendered at `width_px`.
///
/// Breakpoints come from the stage/thumbnail layout: a tile below the reduced
/// breakpoint is too small for video to be worth the bandwidth.
pub fn fidelity_for_width(width_px: u32) -> VideoFidelity {
    if width_px >= FULL_FIDELITY_MIN_WIDTH_PX {
        VideoFidelity::Full
    } else if width_px >= REDUCED_FIDELITY_MIN_WIDTH_PX {
        VideoFidelity::Reduced
    } else {
        VideoFidelity::AudioOnly
    }
}

/// Tracks pause state and fidelity per publication and forwards only actual
/// changes to the underlying [`TrackControl`].
pub struct TrackPublicationController<C: TrackControl> {
    control: C,
    tracks: HashMap<String, TrackState>,
    on_track_event: Callback<TrackEvent>,
}

impl<C: TrackControl> TrackPublicationController<C> {
    pub fn new(control: C, on_track_event: Callback<TrackEvent>) -> Self {
        Self {
            control,
            tracks: HashMap::new(),
            on_track_event,
        }
    }

    /// Make a track known to the controller, optionally associating it with a
    /// remote participant so subscription plans can find it.
    pub fn register_track(&mut self, track_sid: &str, participant_id: Option<&str>) {
        let state = self.tracks.entry(track_sid.to_string()).or_default();
        state.participant_id = participant_id.map(str::to_string);
    }

    pub fn unregister_track(&mut self, track_sid: &str) {
        self.tracks.remove(track_sid);
    }

    pub fn is_paused(&self, track_sid: &str) -> bool {
        self.tracks.get(track_sid).is_some_and(|s| s.paused)
    }

    /// Stop frame delivery for a track. Returns whether anything changed.
    pub fn pause(&mut self, track_sid: &str) -> Result<bool> {
        if self.is_paused(track_sid) {
            debug!("pause: track {track_sid} already paused");
            return Ok(false);
        }
        self.control.set_track_enabled(track_sid, false)?;
        self.tracks.entry(track_sid.to_string()).or_default().paused = true;
        self.on_track_event
            .emit(TrackEvent::Paused(track_sid.to_string()));
        Ok(true)
    }

    /// Restore frame delivery for a track. Returns whether anything changed.
    pub fn resume(&mut self, track_sid: &str) -> Result<bool> {
        if !self.is_paused(track_sid) {
            debug!("resume: track {track_sid} already active");
            return Ok(false);
        }
        self.control.set_track_enabled(track_sid, true)?;
        self.tracks.entry(track_sid.to_string()).or_default().paused = false;
        self.on_track_event
            .emit(TrackEvent::Resumed(track_sid.to_string()));
        Ok(true)
    }

    /// Select the simulcast layer a subscription receives. Returns whether
    /// anything changed.
    pub fn set_fidelity(&mut self, track_sid: &str, fidelity: VideoFidelity) -> Result<bool> {
        let current = self.tracks.get(track_sid).and_then(|s| s.fidelity);
        if current == Some(fidelity) {
            return Ok(false);
        }
        self.control.set_track_fidelity(track_sid, fidelity)?;
        self.tracks.entry(track_sid.to_string()).or_default().fidelity = Some(fidelity);
        self.on_track_event.emit(TrackEvent::FidelityChanged {
            track_sid: track_sid.to_string(),
            fidelity,
        });
        Ok(true)
    }

    /// Pause every known track (e.g. the app went to background).
    pub fn pause_all(&mut self) -> Result<()> {
        for sid in self.track_sids() {
            self.pause(&sid)?;
        }
        Ok(())
    }

    /// Resume every known track.
    pub fn resume_all(&mut self) -> Result<()> {
        for sid in self.track_sids() {
            self.resume(&sid)?;
        }
        Ok(())
    }

    /// Apply a bandwidth classification to the tracks under management.
    ///
    /// `VideoDisabled` pauses every track, `QualityReduced` drops every
    /// subscription to the reduced layer, and `None` leaves current state
    /// untouched; recovery after bandwidth improves is the host's call.
    pub fn apply_bandwidth_action(&mut self, action: &BandwidthAction) -> Result<()> {
        let mut metrics = vec![metric!("action", action.name())];
        if let Some(reason) = action.reason() {
            metrics.push(metric!("reason", reason));
        }
        emit(TelemetryEvent::new("bandwidth", metrics));

        match action {
            BandwidthAction::None => Ok(()),
            BandwidthAction::QualityReduced { .. } => {
                for sid in self.track_sids() {
                    self.set_fidelity(&sid, VideoFidelity::Reduced)?;
                }
                Ok(())
            }
            BandwidthAction::VideoDisabled { .. } => self.pause_all(),
        }
    }

    /// Apply a subscription plan to the remote tracks registered with a
    /// participant id. `AudioOnly` pauses the participant's video tracks;
    /// other tiers resume them and select the layer.
    pub fn apply_subscription_plan(&mut self, plan: &SubscriptionPlan) -> Result<()> {
        for target in &plan.targets {
            for sid in self.tracks_of_participant(&target.participant_id) {
                match target.video {
                    VideoFidelity::AudioOnly => {
                        self.pause(&sid)?;
                    }
                    fidelity => {
                        self.resume(&sid)?;
                        self.set_fidelity(&sid, fidelity)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn track_sids(&self) -> Vec<String> {
        self.tracks.keys().cloned().collect()
    }

    fn tracks_of_participant(&self, participant_id: &str) -> Vec<String> {
        self.tracks
            .iter()
            .filter(|(_, s)| s.participant_id.as_deref() == Some(participant_id))
            .map(|(sid, _)| sid.clone())
            .collect()
    }
}
