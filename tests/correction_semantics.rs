use std::sync::Arc;

use adscrub::audio::AudioEngine;
use adscrub::candidates::{Candidate, DetectionStage};
use adscrub::media::synth_tone;
use adscrub::review::{
    Command, CommitKind, CorrectionKind, EditorOptions, PlaybackSync, ReviewSession, SaveStatus,
};

fn candidate(start: f64, end: f64) -> Candidate {
    Candidate {
        start,
        end,
        confidence: 0.8,
        reason: "sponsor read".into(),
        sponsor: None,
        detection_stage: DetectionStage::Verification,
        scope: None,
        pattern_id: Some(7),
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

#[test]
fn nudged_save_emits_adjust_with_both_bounds() {
    // Candidate 10..15, end nudged forward twice by the default 0.5 s.
    let mut s = session(vec![candidate(10.0, 15.0)]);
    assert!(s.apply(Command::NudgeEndForward).is_none());
    assert!(s.apply(Command::NudgeEndForward).is_none());
    assert_eq!(s.working_bounds().unwrap().end, 16.0);

    let correction = s.apply(Command::Save).expect("commit emits");
    assert_eq!(correction.kind, CorrectionKind::Adjust);
    assert_eq!(correction.adjusted_start, Some(10.0));
    assert_eq!(correction.adjusted_end, Some(16.0));
    assert_eq!(correction.original, candidate(10.0, 15.0));
    assert_eq!(s.save_status(), SaveStatus::Saving);
}

#[test]
fn untouched_save_degrades_to_confirm() {
    let mut s = session(vec![candidate(10.0, 15.0)]);
    let correction = s.apply(Command::Save).expect("commit emits");
    assert_eq!(correction.kind, CorrectionKind::Confirm);
    assert_eq!(correction.adjusted_start, None);
    assert_eq!(correction.adjusted_end, None);
}

#[test]
fn cancelling_nudges_still_reads_as_confirm() {
    let mut s = session(vec![candidate(10.0, 15.0)]);
    s.apply(Command::NudgeEndForward);
    s.apply(Command::NudgeEndBackward);
    let confirm = s.commit(CommitKind::Save).expect("commit emits");
    let mut s2 = session(vec![candidate(10.0, 15.0)]);
    let plain = s2.commit(CommitKind::Confirm).expect("commit emits");
    assert_eq!(confirm.kind, plain.kind);
    assert_eq!(confirm.adjusted_start, plain.adjusted_start);
    assert_eq!(confirm.adjusted_end, plain.adjusted_end);
}

#[test]
fn confirm_and_reject_ignore_working_bounds() {
    let mut s = session(vec![candidate(10.0, 15.0)]);
    s.apply(Command::NudgeStartForward);
    let c = s.apply(Command::Confirm).expect("commit emits");
    assert_eq!(c.kind, CorrectionKind::Confirm);
    assert_eq!(c.adjusted_start, None);
    s.resolve_save(true);
    s.acknowledge_save();

    let mut s = session(vec![candidate(10.0, 15.0)]);
    s.apply(Command::NudgeEndForward);
    let c = s.apply(Command::Reject).expect("commit emits");
    assert_eq!(c.kind, CorrectionKind::Reject);
    assert_eq!(c.adjusted_end, None);
}

#[test]
fn successful_save_advances_to_next_candidate() {
    let mut s = session(vec![candidate(10.0, 15.0), candidate(30.0, 35.0)]);
    s.apply(Command::Save).expect("commit emits");
    s.resolve_save(true);
    assert_eq!(s.save_status(), SaveStatus::Success);
    assert_eq!(s.selected_index(), Some(1));
    // Fresh working bounds for the new candidate.
    assert_eq!(s.working_bounds().unwrap().start, 30.0);
    assert_eq!(s.relative_adjustment(), Some((0.0, 0.0)));
    assert!(s.is_reviewed(0));
    assert!(!s.is_terminal());
}

#[test]
fn save_on_last_candidate_reaches_terminal() {
    let mut s = session(vec![candidate(10.0, 15.0)]);
    s.apply(Command::Save).expect("commit emits");
    s.resolve_save(true);
    assert!(s.is_terminal());
    assert_eq!(s.selected_index(), Some(0));
    assert_eq!(s.reviewed_count(), 1);
}

#[test]
fn failed_save_stays_on_candidate_for_retry() {
    let mut s = session(vec![candidate(10.0, 15.0), candidate(30.0, 35.0)]);
    s.apply(Command::NudgeEndForward);
    s.apply(Command::Save).expect("commit emits");
    s.resolve_save(false);
    assert_eq!(s.save_status(), SaveStatus::Error);
    assert_eq!(s.selected_index(), Some(0));
    assert!(!s.is_reviewed(0));
    // Controls re-enabled: the retry emits again.
    s.acknowledge_save();
    let retry = s.apply(Command::Save).expect("retry emits");
    assert_eq!(retry.kind, CorrectionKind::Adjust);
}

#[test]
fn commands_are_gated_while_saving_except_navigation() {
    let mut s = session(vec![candidate(10.0, 15.0), candidate(30.0, 35.0)]);
    s.apply(Command::Save).expect("commit emits");
    assert!(s.save_status().is_saving());

    // Edits and further commits are ignored mid-flight.
    s.apply(Command::NudgeEndForward);
    assert_eq!(s.working_bounds().unwrap().end, 15.0);
    assert!(s.apply(Command::Save).is_none());
    assert!(s.apply(Command::Confirm).is_none());

    // Navigation stays live.
    s.apply(Command::SelectCandidate(1));
    assert_eq!(s.selected_index(), Some(1));
    s.apply(Command::SeekTo(31.0));
    assert!((s.playback().position() - 31.0).abs() < 1e-3);
}

#[test]
fn save_status_lifecycle_is_a_cycle() {
    let mut s = session(vec![candidate(10.0, 15.0)]);
    assert_eq!(s.save_status(), SaveStatus::Idle);
    s.apply(Command::Save).expect("commit emits");
    assert_eq!(s.save_status(), SaveStatus::Saving);
    s.resolve_save(true);
    assert_eq!(s.save_status(), SaveStatus::Success);
    s.acknowledge_save();
    assert_eq!(s.save_status(), SaveStatus::Idle);
    // Resolving without an in-flight save is a no-op.
    s.resolve_save(false);
    assert_eq!(s.save_status(), SaveStatus::Idle);
}

#[test]
fn notes_ride_along_once_and_clear() {
    let mut s = session(vec![candidate(10.0, 15.0), candidate(30.0, 35.0)]);
    *s.notes_mut() = "  cold open ends later  ".to_string();
    let c = s.apply(Command::Save).expect("commit emits");
    assert_eq!(c.notes.as_deref(), Some("cold open ends later"));
    s.resolve_save(true);
    s.acknowledge_save();
    let c2 = s.apply(Command::Save).expect("commit emits");
    assert_eq!(c2.notes, None);
}

#[test]
fn empty_candidate_list_is_inert() {
    let mut s = session(Vec::new());
    assert_eq!(s.selected_index(), None);
    assert!(s.apply(Command::Save).is_none());
    assert!(s.apply(Command::Confirm).is_none());
    assert!(s.apply(Command::NextCandidate).is_none());
    assert!(s.apply(Command::SeekTo(10.0)).is_none());
    assert_eq!(s.playback().position(), 0.0);
    assert_eq!(s.save_status(), SaveStatus::Idle);
}
