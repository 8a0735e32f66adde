use crate::candidates::Candidate;

/// Default keyboard/stepper nudge increment in seconds.
pub const DEFAULT_NUDGE_STEP: f64 = 0.5;
/// A candidate can never be shorter than this.
pub const MIN_SPAN_SECS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkingBounds {
    pub start: f64,
    pub end: f64,
}

impl WorkingBounds {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Clamped edit arithmetic over one candidate's working start/end. Rebuilt
/// whenever the active candidate changes; in-progress edits never survive a
/// selection transition.
#[derive(Clone, Debug)]
pub struct BoundsEditor {
    original: WorkingBounds,
    working: WorkingBounds,
    duration: f64, // f64::INFINITY while the media duration is unknown
}

impl BoundsEditor {
    pub fn new(candidate: &Candidate, duration: f64) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            f64::INFINITY
        };
        let original = WorkingBounds {
            start: candidate.start,
            end: candidate.end,
        };
        let mut editor = Self {
            original,
            working: original,
            duration,
        };
        editor.normalize();
        editor
    }

    // Working bounds always satisfy 0 <= start, start + MIN <= end <= duration.
    fn normalize(&mut self) {
        let max_start = (self.duration - MIN_SPAN_SECS).max(0.0);
        self.working.start = self.working.start.min(max_start).max(0.0);
        self.working.end = self
            .working
            .end
            .min(self.duration)
            .max(self.working.start + MIN_SPAN_SECS);
    }

    pub fn working(&self) -> WorkingBounds {
        self.working
    }

    pub fn original(&self) -> WorkingBounds {
        self.original
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Media duration can arrive after the editor was built (streamed
    /// audio); working bounds are re-clamped against the new ceiling.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            f64::INFINITY
        };
        self.normalize();
    }

    pub fn nudge_start(&mut self, amount: f64) {
        self.set_start(self.working.start + amount);
    }

    pub fn nudge_end(&mut self, amount: f64) {
        self.set_end(self.working.end + amount);
    }

    pub fn set_start(&mut self, t: f64) {
        self.working.start = t.min(self.working.end - MIN_SPAN_SECS).max(0.0);
    }

    pub fn set_end(&mut self, t: f64) {
        self.working.end = t
            .min(self.duration)
            .max(self.working.start + MIN_SPAN_SECS);
    }

    pub fn reset(&mut self) {
        self.working = self.original;
        self.normalize();
    }

    pub fn is_modified(&self) -> bool {
        self.working != self.original
    }

    /// Signed deltas against the original bounds, shown as "±N s". Always
    /// recomputed from the two base values so display and clamped bound can
    /// never drift apart.
    pub fn relative_adjustment(&self) -> (f64, f64) {
        (
            self.working.start - self.original.start,
            self.working.end - self.original.end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{Candidate, DetectionStage};

    fn candidate(start: f64, end: f64) -> Candidate {
        Candidate {
            start,
            end,
            confidence: 0.9,
            reason: "test".into(),
            sponsor: None,
            detection_stage: DetectionStage::Unspecified,
            scope: None,
            pattern_id: None,
        }
    }

    #[test]
    fn nudge_start_clamps_at_zero() {
        let mut ed = BoundsEditor::new(&candidate(0.0, 5.0), 100.0);
        ed.nudge_start(-DEFAULT_NUDGE_STEP);
        assert_eq!(ed.working().start, 0.0);
    }

    #[test]
    fn min_span_holds_through_opposed_nudges() {
        let mut ed = BoundsEditor::new(&candidate(10.0, 12.0), 100.0);
        for _ in 0..10 {
            ed.nudge_start(DEFAULT_NUDGE_STEP);
            ed.nudge_end(-DEFAULT_NUDGE_STEP);
            let w = ed.working();
            assert!(w.start + MIN_SPAN_SECS <= w.end + 1e-9);
        }
    }

    #[test]
    fn end_clamps_at_duration() {
        let mut ed = BoundsEditor::new(&candidate(10.0, 58.0), 60.0);
        ed.nudge_end(5.0);
        assert_eq!(ed.working().end, 60.0);
    }

    #[test]
    fn unknown_duration_is_unbounded() {
        let mut ed = BoundsEditor::new(&candidate(10.0, 15.0), f64::INFINITY);
        ed.nudge_end(100_000.0);
        assert_eq!(ed.working().end, 100_015.0);
    }

    #[test]
    fn reset_restores_original_exactly() {
        let mut ed = BoundsEditor::new(&candidate(10.0, 15.0), 100.0);
        ed.nudge_start(1.5);
        ed.nudge_end(-0.5);
        ed.set_end(42.0);
        ed.reset();
        assert_eq!(ed.working(), WorkingBounds { start: 10.0, end: 15.0 });
        assert_eq!(ed.relative_adjustment(), (0.0, 0.0));
        assert!(!ed.is_modified());
    }

    #[test]
    fn adjustment_reflects_clamp_not_request() {
        let mut ed = BoundsEditor::new(&candidate(0.5, 5.0), 100.0);
        ed.nudge_start(-2.0);
        // The clamp capped the move at 0.0; the displayed delta must agree
        // with the bound it describes.
        assert_eq!(ed.working().start, 0.0);
        assert_eq!(ed.relative_adjustment().0, -0.5);
    }
}
