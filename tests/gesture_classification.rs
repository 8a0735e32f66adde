use std::sync::Arc;

use adscrub::audio::AudioEngine;
use adscrub::candidates::{Candidate, DetectionStage};
use adscrub::media::synth_tone;
use adscrub::review::{
    Command, EditorOptions, GestureTracker, PlaybackSync, ReviewSession, SegmentSpan, TouchTapMode,
};

fn candidate(start: f64, end: f64) -> Candidate {
    Candidate {
        start,
        end,
        confidence: 0.7,
        reason: "test".into(),
        sponsor: None,
        detection_stage: DetectionStage::Fingerprint,
        scope: None,
        pattern_id: None,
    }
}

fn session(candidates: Vec<Candidate>) -> ReviewSession {
    let engine = Arc::new(AudioEngine::new_for_test());
    engine.set_samples(Arc::new(synth_tone(600.0, 8_000)));
    ReviewSession::new(
        candidates,
        PlaybackSync::new(engine, None),
        EditorOptions::default(),
    )
}

/// Feed every tracker output into the session, like the app shell does.
fn drive(session: &mut ReviewSession, cmd: Option<Command>) {
    if let Some(cmd) = cmd {
        session.apply(cmd);
    }
}

#[test]
fn double_tap_sets_start_once_not_two_seeks() {
    // Two taps on the same segment within 300 ms must collapse into a
    // single set-start, not dispatch the seek action twice.
    let seg = SegmentSpan { start: 20.0, end: 25.0 };
    let mut s = session(vec![candidate(18.0, 30.0)]);
    let mut g = GestureTracker::new(true);
    g.set_mode(TouchTapMode::Seek);

    drive(&mut s, g.touch_begin(0.00, (50.0, 50.0), Some(seg)));
    drive(&mut s, g.touch_end(0.08, (50.0, 50.0)));
    drive(&mut s, g.poll(0.20));
    drive(&mut s, g.touch_begin(0.25, (51.0, 50.0), Some(seg)));
    drive(&mut s, g.touch_end(0.33, (51.0, 50.0)));
    for t in [0.4, 0.6, 0.8, 1.0] {
        drive(&mut s, g.poll(t));
    }

    assert_eq!(s.working_bounds().unwrap().start, 20.0);
    // No seek ever fired.
    assert_eq!(s.playback().position(), 0.0);
}

#[test]
fn long_press_adopts_segment_end_and_release_is_silent() {
    // Held 600 ms on segment 20..25: set-end fires at the threshold, and
    // the quick release afterwards must not also classify as a tap.
    let seg = SegmentSpan { start: 20.0, end: 25.0 };
    let mut s = session(vec![candidate(10.0, 15.0)]);
    let mut g = GestureTracker::new(true);
    g.set_mode(TouchTapMode::Seek);

    drive(&mut s, g.touch_begin(0.0, (50.0, 50.0), Some(seg)));
    drive(&mut s, g.poll(0.3));
    assert_eq!(s.working_bounds().unwrap().end, 15.0);
    drive(&mut s, g.poll(0.6));
    assert_eq!(s.working_bounds().unwrap().end, 25.0);

    drive(&mut s, g.touch_end(0.65, (50.0, 50.0)));
    for t in [0.7, 0.9, 1.1] {
        drive(&mut s, g.poll(t));
    }
    // Seek mode tap never fired.
    assert_eq!(s.playback().position(), 0.0);
    assert_eq!(s.working_bounds().unwrap().end, 25.0);
}

#[test]
fn single_tap_respects_selected_mode() {
    let seg = SegmentSpan { start: 40.0, end: 46.0 };
    let mut s = session(vec![candidate(35.0, 60.0)]);
    let mut g = GestureTracker::new(true);

    g.set_mode(TouchTapMode::SetEnd);
    drive(&mut s, g.touch_begin(0.0, (50.0, 50.0), Some(seg)));
    drive(&mut s, g.touch_end(0.1, (50.0, 50.0)));
    drive(&mut s, g.poll(0.5));
    assert_eq!(s.working_bounds().unwrap().end, 46.0);

    g.set_mode(TouchTapMode::Seek);
    drive(&mut s, g.touch_begin(1.0, (50.0, 50.0), Some(seg)));
    drive(&mut s, g.touch_end(1.1, (50.0, 50.0)));
    drive(&mut s, g.poll(1.5));
    assert!((s.playback().position() - 40.0).abs() < 1e-3);
}

#[test]
fn swipes_navigate_candidates() {
    let mut s = session(vec![
        candidate(10.0, 15.0),
        candidate(30.0, 35.0),
        candidate(50.0, 55.0),
    ]);
    let mut g = GestureTracker::new(true);

    // Left swipe: next candidate.
    drive(&mut s, g.touch_begin(0.0, (200.0, 80.0), None));
    g.touch_move((120.0, 84.0));
    drive(&mut s, g.touch_end(0.2, (120.0, 84.0)));
    assert_eq!(s.selected_index(), Some(1));

    // Right swipe: previous candidate.
    drive(&mut s, g.touch_begin(1.0, (120.0, 80.0), None));
    g.touch_move((220.0, 78.0));
    drive(&mut s, g.touch_end(1.2, (220.0, 78.0)));
    assert_eq!(s.selected_index(), Some(0));

    // Below the 50 px threshold nothing moves.
    drive(&mut s, g.touch_begin(2.0, (120.0, 80.0), None));
    g.touch_move((160.0, 80.0));
    drive(&mut s, g.touch_end(2.2, (160.0, 80.0)));
    assert_eq!(s.selected_index(), Some(0));
}

#[test]
fn swipe_navigation_resolves_index_at_dispatch_time() {
    // The tracker emits relative commands; the session resolves them
    // against the live index, so a selection change between gesture and
    // dispatch cannot act on a stale value.
    let mut s = session(vec![
        candidate(10.0, 15.0),
        candidate(30.0, 35.0),
        candidate(50.0, 55.0),
    ]);
    let mut g = GestureTracker::new(true);
    drive(&mut s, g.touch_begin(0.0, (200.0, 80.0), None));
    g.touch_move((100.0, 80.0));
    let swipe = g.touch_end(0.2, (100.0, 80.0));
    assert_eq!(swipe, Some(Command::NextCandidate));

    // Another surface moves selection first.
    s.apply(Command::SelectCandidate(1));
    drive(&mut s, swipe);
    assert_eq!(s.selected_index(), Some(2));
}

#[test]
fn touch_cancel_clears_long_press_timer() {
    let seg = SegmentSpan { start: 20.0, end: 25.0 };
    let mut s = session(vec![candidate(10.0, 15.0)]);
    let mut g = GestureTracker::new(true);
    drive(&mut s, g.touch_begin(0.0, (50.0, 50.0), Some(seg)));
    g.touch_cancel();
    drive(&mut s, g.poll(0.9));
    assert_eq!(s.working_bounds().unwrap().end, 15.0);
}
