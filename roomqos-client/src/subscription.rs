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

//! Room-size-aware selective subscription strategy.
//!
//! Chooses, for each remote participant, the video fidelity tier to subscribe
//! at, trading fidelity for bandwidth as the room grows. Audio is never part
//! of the trade: every participant's audio stays subscribed in every preset.

use roomqos_types::VideoFidelity;

use crate::constants::SPEAKER_COOLDOWN_MS;

/// Named subscription presets keyed by room size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSizePreset {
    /// Single remote participant: full fidelity, unconditionally.
    OneOnOne,
    /// 2-5 remotes: active speaker full, everyone else a reduced layer.
    SmallGroup,
    /// 6-15 remotes: up to two speakers full, the rest thumbnail layers.
    LargeGroup,
    /// 16+ remotes: one speaker full, everyone else audio only.
    Webinar,
}

impl RoomSizePreset {
    pub fn for_remote_count(count: usize) -> Self {
        match count {
            0 | 1 => RoomSizePreset::OneOnOne,
            2..=5 => RoomSizePreset::SmallGroup,
            6..=15 => RoomSizePreset::LargeGroup,
            _ => RoomSizePreset::Webinar,
        }
    }

    /// Cap on concurrently subscribed full-fidelity video tracks.
    pub fn max_full_fidelity(&self) -> usize {
        match self {
            RoomSizePreset::OneOnOne => 1,
            RoomSizePreset::SmallGroup => 1,
            RoomSizePreset::LargeGroup => 2,
            RoomSizePreset::Webinar => 1,
        }
    }

    /// Fidelity for participants who are not among the active speakers.
    pub fn background_fidelity(&self) -> VideoFidelity {
        match self {
            RoomSizePreset::OneOnOne => VideoFidelity::Full,
            RoomSizePreset::SmallGroup => VideoFidelity::Reduced,
            RoomSizePreset::LargeGroup => VideoFidelity::Reduced,
            RoomSizePreset::Webinar => VideoFidelity::AudioOnly,
        }
    }
}

/// What the selector needs to know about one remote participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSnapshot {
    pub id: String,
    pub is_speaking: bool,
    /// Unix milliseconds of the last time this participant was an active
    /// speaker, if known.
    pub last_spoke_at_ms: Option<u64>,
}

impl ParticipantSnapshot {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_speaking: false,
            last_spoke_at_ms: None,
        }
    }

    pub fn speaking(mut self) -> Self {
        self.is_speaking = true;
        self
    }
}

/// Per-participant subscription decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTarget {
    pub participant_id: String,
    pub video: VideoFidelity,
    /// Always true; carried explicitly so the invariant is visible at the
    /// call site applying the plan.
    pub subscribe_audio: bool,
}

/// The full decision for a room at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub preset: RoomSizePreset,
    pub targets: Vec<SubscriptionTarget>,
}

/// Selects subscription targets from room size and active-speaker state.
///
/// Re-run `plan` whenever the participant set or the active speakers change.
/// A participant who recently stopped speaking keeps full fidelity for the
/// cooldown window so short pauses do not thrash layers.
#[derive(Debug, Clone)]
pub struct SubscriptionStrategySelector {
    speaker_cooldown_ms: u64,
}

impl SubscriptionStrategySelector {
    pub fn new() -> Self {
        Self {
            speaker_cooldown_ms: SPEAKER_COOLDOWN_MS,
        }
    }

    pub fn with_cooldown_ms(speaker_cooldown_ms: u64) -> Self {
        Self {
            speaker_cooldown_ms,
        }
    }

    pub fn plan(&self, participants: &[ParticipantSnapshot], now_ms: u64) -> SubscriptionPlan {
        let preset = RoomSizePreset::for_remote_count(participants.len());

        if preset == RoomSizePreset::OneOnOne {
            return SubscriptionPlan {
                preset,
                targets: participants
                    .iter()
                    .map(|p| SubscriptionTarget {
                        participant_id: p.id.clone(),
                        video: VideoFidelity::Full,
                        subscribe_audio: true,
                    })
                    .collect(),
            };
        }

        // Rank speakers: currently speaking first, then those inside the
        // cooldown window, most recent first.
        let mut speaker_indices: Vec<usize> = participants
            .iter()
            .enumerate()
            .filter(|(_, p)| self.is_recently_active(p, now_ms))
            .map(|(i, _)| i)
            .collect();
        speaker_indices.sort_by_key(|&i| {
            let p = &participants[i];
            (
                std::cmp::Reverse(p.is_speaking),
                std::cmp::Reverse(p.last_spoke_at_ms.unwrap_or(0)),
            )
        });
        speaker_indices.truncate(preset.max_full_fidelity());

        let targets = participants
            .iter()
            .enumerate()
            .map(|(i, p)| SubscriptionTarget {
                participant_id: p.id.clone(),
                video: if speaker_indices.contains(&i) {
                    VideoFidelity::Full
                } else {
                    preset.background_fidelity()
                },
                subscribe_audio: true,
            })
            .collect();

        SubscriptionPlan { preset, targets }
    }

    fn is_recently_active(&self, participant: &ParticipantSnapshot, now_ms: u64) -> bool {
        if participant.is_speaking {
            return true;
        }
        match participant.last_spoke_at_ms {
            Some(last) => now_ms.saturating_sub(last) <= self.speaker_cooldown_ms,
            None => false,
        }
    }
}

impl Default for SubscriptionStrategySelector {
    fn default() -> Self {
        Self::new()
    }
}
