// Host-side tests for the gesture-gated audio unlock.

use birthday_show::core::{AttemptSource, HintState, PlaybackGate, UnlockState};

#[test]
fn gesture_attempt_happens_exactly_once() {
    let mut gate = PlaybackGate::new(true);
    let first = gate.on_gesture().expect("first gesture gets the attempt");
    assert_eq!(first.source, AttemptSource::Gesture);
    assert_eq!(first.seq, 1);
    assert_eq!(gate.state(), UnlockState::Unlocked);

    // pointerdown, touchstart, click, keydown... nothing more gets through
    for _ in 0..50 {
        assert!(gate.on_gesture().is_none());
    }
    assert_eq!(gate.attempts(), 1);
}

#[test]
fn gesture_attempt_once_even_while_result_pending_or_after_it() {
    let mut gate = PlaybackGate::new(false);
    let a = gate.on_gesture().unwrap();
    assert!(gate.on_gesture().is_none());
    gate.on_playback_result(a, true);
    assert!(gate.on_gesture().is_none());
    assert_eq!(gate.attempts(), 1);
}

#[test]
fn refused_attempt_still_closes_the_gate() {
    let mut gate = PlaybackGate::new(true);
    let a = gate.on_gesture().unwrap();
    let settled = gate.on_playback_result(a, false);

    assert!(!settled.dismiss_hint);
    assert!(!settled.started_playing);
    assert!(!gate.is_playing());
    assert_eq!(gate.state(), UnlockState::Unlocked);
    assert_eq!(gate.hint(), HintState::Visible);
    assert!(gate.on_gesture().is_none());
}

#[test]
fn successful_tap_dismisses_hint_and_second_tap_is_ignored() {
    let mut gate = PlaybackGate::new(true);
    let a = gate.on_gesture().unwrap();
    let settled = gate.on_playback_result(a, true);

    assert!(settled.dismiss_hint);
    assert!(settled.started_playing);
    // listeners were already detached when the gesture attempt was issued
    assert!(!settled.detach_gesture_listeners);
    assert_eq!(gate.hint(), HintState::Dismissed);
    assert!(gate.is_playing());

    assert!(gate.on_gesture().is_none());
    assert!(gate.on_hint_pressed().is_none());
    assert_eq!(gate.attempts(), 1);
}

#[test]
fn page_without_hint_never_reports_dismissal() {
    let mut gate = PlaybackGate::new(false);
    assert_eq!(gate.hint(), HintState::Absent);
    let a = gate.on_gesture().unwrap();
    let settled = gate.on_playback_result(a, true);
    assert!(!settled.dismiss_hint);
    assert_eq!(gate.hint(), HintState::Absent);
}

#[test]
fn successful_autoplay_probe_unlocks_without_a_gesture() {
    let mut gate = PlaybackGate::new(true);
    let probe = gate.on_autoplay_probe().unwrap();
    assert_eq!(probe.source, AttemptSource::AutoplayProbe);
    assert_eq!(gate.state(), UnlockState::Pending);

    let settled = gate.on_playback_result(probe, true);
    assert!(settled.detach_gesture_listeners);
    assert!(settled.dismiss_hint);
    assert_eq!(gate.state(), UnlockState::Unlocked);
    assert!(gate.on_gesture().is_none());
}

#[test]
fn refused_autoplay_probe_leaves_the_gesture_attempt() {
    let mut gate = PlaybackGate::new(true);
    let probe = gate.on_autoplay_probe().unwrap();
    gate.on_playback_result(probe, false);
    assert_eq!(gate.state(), UnlockState::Pending);

    let a = gate.on_gesture().unwrap();
    assert_eq!(a.source, AttemptSource::Gesture);
    assert!(gate.on_autoplay_probe().is_none());
}

#[test]
fn probe_is_not_stacked_while_one_is_in_flight() {
    let mut gate = PlaybackGate::new(true);
    assert!(gate.on_autoplay_probe().is_some());
    assert!(gate.on_autoplay_probe().is_none());
    // the gesture is still honoured while the probe is pending
    assert!(gate.on_gesture().is_some());
    assert_eq!(gate.attempts(), 2);
}

#[test]
fn hint_press_retries_only_after_refusal() {
    let mut gate = PlaybackGate::new(true);
    // before any gesture the document listener owns the first attempt
    assert!(gate.on_hint_pressed().is_none());

    let a = gate.on_gesture().unwrap();
    // not while the gesture attempt is pending
    assert!(gate.on_hint_pressed().is_none());
    gate.on_playback_result(a, false);

    let retry = gate.on_hint_pressed().unwrap();
    assert_eq!(retry.source, AttemptSource::HintPress);
    assert!(gate.on_hint_pressed().is_none());

    let settled = gate.on_playback_result(retry, true);
    assert!(settled.dismiss_hint);
    assert!(settled.started_playing);
    assert!(gate.on_hint_pressed().is_none());
    assert_eq!(gate.attempts(), 2);
}

#[test]
fn start_button_retries_after_a_refused_tap() {
    let mut gate = PlaybackGate::new(true);
    let tap = gate.on_gesture().unwrap();
    gate.on_playback_result(tap, false);
    assert!(gate.on_gesture().is_none());

    let press = gate.on_explicit_request().expect("start button asks again");
    assert_eq!(press.source, AttemptSource::StartButton);
    assert_eq!(press.seq, 2);
    // no stacking while the press is pending
    assert!(gate.on_explicit_request().is_none());
    assert!(gate.on_hint_pressed().is_none());

    let settled = gate.on_playback_result(press, true);
    assert!(settled.started_playing);
    assert!(settled.dismiss_hint);
    assert!(gate.on_explicit_request().is_none());
    assert_eq!(gate.attempts(), 2);
}

#[test]
fn start_button_counts_as_the_first_gesture() {
    let mut gate = PlaybackGate::new(false);
    let press = gate.on_explicit_request().unwrap();
    assert_eq!(gate.state(), UnlockState::Unlocked);
    // the same click bubbling to the document gets nothing
    assert!(gate.on_gesture().is_none());
    gate.on_playback_result(press, false);
    assert!(gate.on_explicit_request().is_some());
}

#[test]
fn start_button_waits_for_an_in_flight_probe() {
    let mut gate = PlaybackGate::new(true);
    let probe = gate.on_autoplay_probe().unwrap();
    assert!(gate.on_explicit_request().is_none());
    gate.on_playback_result(probe, false);
    assert!(gate.on_explicit_request().is_some());
}
