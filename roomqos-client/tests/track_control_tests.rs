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

//! Integration tests for the track publication controller: idempotent
//! pause/resume and application of bandwidth/subscription decisions.

use std::cell::RefCell;
use std::rc::Rc;

use roomqos_client::{
    classify, ParticipantSnapshot, SubscriptionStrategySelector, TrackControl, TrackEvent,
    TrackPublicationController,
};
use roomqos_types::{Callback, VideoFidelity};

/// Records every capability call the controller actually issues.
#[derive(Clone, Default)]
struct RecordingControl {
    calls: Rc<RefCell<Vec<String>>>,
}

impl RecordingControl {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl TrackControl for RecordingControl {
    fn set_track_enabled(&self, track_sid: &str, enabled: bool) -> anyhow::Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("enabled:{track_sid}:{enabled}"));
        Ok(())
    }

    fn set_track_fidelity(&self, track_sid: &str, fidelity: VideoFidelity) -> anyhow::Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("fidelity:{track_sid}:{}", fidelity.as_str()));
        Ok(())
    }
}

fn controller() -> (
    TrackPublicationController<RecordingControl>,
    RecordingControl,
    Rc<RefCell<Vec<TrackEvent>>>,
) {
    let control = RecordingControl::default();
    let events: Rc<RefCell<Vec<TrackEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let controller = TrackPublicationController::new(
        control.clone(),
        Callback::from(move |event| sink.borrow_mut().push(event)),
    );
    (controller, control, events)
}

#[test]
fn test_pause_is_idempotent() {
    let (mut controller, control, events) = controller();

    assert!(controller.pause("track-1").unwrap());
    assert!(!controller.pause("track-1").unwrap());
    assert!(!controller.pause("track-1").unwrap());

    // One capability call, one event, despite three pause requests.
    assert_eq!(control.calls(), vec!["enabled:track-1:false"]);
    assert_eq!(
        *events.borrow(),
        vec![TrackEvent::Paused("track-1".to_string())]
    );
    assert!(controller.is_paused("track-1"));
}

#[test]
fn test_resume_of_active_track_is_noop() {
    let (mut controller, control, events) = controller();
    controller.register_track("track-1", None);

    assert!(!controller.resume("track-1").unwrap());
    assert!(control.calls().is_empty());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_pause_then_resume_round_trip() {
    let (mut controller, control, events) = controller();

    assert!(controller.pause("track-1").unwrap());
    assert!(controller.resume("track-1").unwrap());
    assert!(!controller.resume("track-1").unwrap());

    assert_eq!(
        control.calls(),
        vec!["enabled:track-1:false", "enabled:track-1:true"]
    );
    assert_eq!(
        *events.borrow(),
        vec![
            TrackEvent::Paused("track-1".to_string()),
            TrackEvent::Resumed("track-1".to_string()),
        ]
    );
    assert!(!controller.is_paused("track-1"));
}

#[test]
fn test_set_fidelity_skips_repeats() {
    let (mut controller, control, events) = controller();

    assert!(controller
        .set_fidelity("track-1", VideoFidelity::Reduced)
        .unwrap());
    assert!(!controller
        .set_fidelity("track-1", VideoFidelity::Reduced)
        .unwrap());
    assert!(controller
        .set_fidelity("track-1", VideoFidelity::Full)
        .unwrap());

    assert_eq!(
        control.calls(),
        vec!["fidelity:track-1:reduced", "fidelity:track-1:full"]
    );
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_video_disabled_action_pauses_every_track() {
    let (mut controller, control, _) = controller();
    controller.register_track("track-1", None);
    controller.register_track("track-2", None);

    let action = classify(100_000);
    controller.apply_bandwidth_action(&action).unwrap();

    let mut calls = control.calls();
    calls.sort();
    assert_eq!(calls, vec!["enabled:track-1:false", "enabled:track-2:false"]);
    assert!(controller.is_paused("track-1"));
    assert!(controller.is_paused("track-2"));

    // Applying the same action again changes nothing.
    controller.apply_bandwidth_action(&action).unwrap();
    assert_eq!(control.calls().len(), 2);
}

#[test]
fn test_quality_reduced_action_drops_every_subscription_layer() {
    let (mut controller, control, _) = controller();
    controller.register_track("track-1", None);

    controller
        .apply_bandwidth_action(&classify(300_000))
        .unwrap();

    assert_eq!(control.calls(), vec!["fidelity:track-1:reduced"]);
    assert!(!controller.is_paused("track-1"));
}

#[test]
fn test_no_action_leaves_tracks_untouched() {
    let (mut controller, control, _) = controller();
    controller.register_track("track-1", None);

    controller
        .apply_bandwidth_action(&classify(600_000))
        .unwrap();

    assert!(control.calls().is_empty());
}

#[test]
fn test_subscription_plan_application() {
    let (mut controller, control, _) = controller();
    controller.register_track("video-a", Some("peer-a"));
    controller.register_track("video-b", Some("peer-b"));

    // Webinar-sized room: one speaker at full, the rest audio only.
    let mut participants: Vec<ParticipantSnapshot> = (0..20)
        .map(|i| ParticipantSnapshot::new(format!("peer-{i}")))
        .collect();
    participants[0] = ParticipantSnapshot::new("peer-a").speaking();
    participants[1] = ParticipantSnapshot::new("peer-b");

    let plan = SubscriptionStrategySelector::new().plan(&participants, 1_000);
    controller.apply_subscription_plan(&plan).unwrap();

    let calls = control.calls();
    assert!(calls.contains(&"fidelity:video-a:full".to_string()));
    assert!(calls.contains(&"enabled:video-b:false".to_string()));
    assert!(controller.is_paused("video-b"));
    assert!(!controller.is_paused("video-a"));
}

#[test]
fn test_pause_all_and_resume_all_are_idempotent() {
    let (mut controller, control, _) = controller();
    controller.register_track("track-1", None);
    controller.register_track("track-2", None);

    controller.pause_all().unwrap();
    controller.pause_all().unwrap();
    assert_eq!(control.calls().len(), 2);

    controller.resume_all().unwrap();
    controller.resume_all().unwrap();
    assert_eq!(control.calls().len(), 4);
}
