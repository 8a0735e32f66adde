use crate::review::command::Command;

pub const TAP_MAX_SECS: f64 = 0.5;
pub const DOUBLE_TAP_WINDOW_SECS: f64 = 0.3;
pub const LONG_PRESS_SECS: f64 = 0.5;
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;
/// Movement beyond this cancels the long-press timer and tap eligibility.
pub const MOVE_SLOP_PX: f32 = 10.0;

/// What a bare tap on a transcript segment means. Selectable in the UI;
/// double tap and long press override it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchTapMode {
    Seek,
    SetStart,
    SetEnd,
}

impl TouchTapMode {
    pub fn label(self) -> &'static str {
        match self {
            TouchTapMode::Seek => "tap seeks",
            TouchTapMode::SetStart => "tap sets start",
            TouchTapMode::SetEnd => "tap sets end",
        }
    }

    fn command_for(self, seg: SegmentSpan) -> Command {
        match self {
            TouchTapMode::Seek => Command::SeekTo(seg.start),
            TouchTapMode::SetStart => Command::SetStartBound(seg.start),
            TouchTapMode::SetEnd => Command::SetEndBound(seg.end),
        }
    }
}

/// Time range of the transcript segment under a touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSpan {
    pub start: f64,
    pub end: f64,
}

struct ActiveTouch {
    started_at: f64,
    start_pos: (f32, f32),
    segment: Option<SegmentSpan>,
    moved: bool,
    long_press_fired: bool,
    consumed: bool,
}

struct PendingTap {
    deadline: f64,
    segment: SegmentSpan,
}

/// Classifies raw touch phases into editor commands: tap (mode-dependent,
/// deferred through the double-tap window), double tap (forces set-start),
/// long press (forces set-end, suppresses the release), and horizontal
/// swipe (candidate navigation). Timestamps come from the host clock so
/// the classifier itself schedules nothing; `poll` must be called
/// regularly for the long-press and deferred-tap deadlines to fire.
pub struct GestureTracker {
    mode: TouchTapMode,
    swipe_enabled: bool,
    active: Option<ActiveTouch>,
    pending_tap: Option<PendingTap>,
}

impl GestureTracker {
    pub fn new(swipe_enabled: bool) -> Self {
        Self {
            mode: TouchTapMode::Seek,
            swipe_enabled,
            active: None,
            pending_tap: None,
        }
    }

    pub fn mode(&self) -> TouchTapMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TouchTapMode) {
        self.mode = mode;
    }

    pub fn touch_begin(
        &mut self,
        now: f64,
        pos: (f32, f32),
        segment: Option<SegmentSpan>,
    ) -> Option<Command> {
        let mut fired = None;
        let mut consumed = false;
        if let Some(pending) = self.pending_tap.take() {
            if now <= pending.deadline && segment == Some(pending.segment) {
                // Second tap inside the window: the pair collapses into one
                // set-start command, whatever the tap mode says.
                fired = Some(Command::SetStartBound(pending.segment.start));
                consumed = true;
            } else {
                // A press elsewhere keeps the first tap's intent.
                fired = Some(self.mode.command_for(pending.segment));
            }
        }
        self.active = Some(ActiveTouch {
            started_at: now,
            start_pos: pos,
            segment,
            moved: false,
            long_press_fired: false,
            consumed,
        });
        fired
    }

    pub fn touch_move(&mut self, pos: (f32, f32)) {
        if let Some(active) = self.active.as_mut() {
            let dx = pos.0 - active.start_pos.0;
            let dy = pos.1 - active.start_pos.1;
            if (dx * dx + dy * dy).sqrt() > MOVE_SLOP_PX {
                // Long-press timer is dead once the finger travels.
                active.moved = true;
            }
        }
    }

    pub fn touch_cancel(&mut self) {
        self.active = None;
    }

    pub fn touch_end(&mut self, now: f64, pos: (f32, f32)) -> Option<Command> {
        let active = self.active.take()?;
        if active.consumed || active.long_press_fired {
            return None;
        }
        let dx = pos.0 - active.start_pos.0;
        let dy = pos.1 - active.start_pos.1;
        if self.swipe_enabled && dx.abs() > SWIPE_THRESHOLD_PX && dx.abs() > dy.abs() {
            return Some(if dx < 0.0 {
                Command::NextCandidate
            } else {
                Command::PreviousCandidate
            });
        }
        if active.moved {
            return None;
        }
        if now - active.started_at < TAP_MAX_SECS {
            if let Some(segment) = active.segment {
                // Defer so a double tap can still claim this tap.
                self.pending_tap = Some(PendingTap {
                    deadline: now + DOUBLE_TAP_WINDOW_SECS,
                    segment,
                });
            }
        }
        None
    }

    /// True while a deadline is outstanding and `poll` must keep running.
    pub fn needs_poll(&self) -> bool {
        self.active.is_some() || self.pending_tap.is_some()
    }

    /// Drives the two deadlines: a held press crossing the long-press
    /// threshold, and a deferred tap whose double-tap window expired.
    pub fn poll(&mut self, now: f64) -> Option<Command> {
        if let Some(active) = self.active.as_mut() {
            if !active.moved
                && !active.long_press_fired
                && !active.consumed
                && now - active.started_at >= LONG_PRESS_SECS
            {
                active.long_press_fired = true;
                if let Some(seg) = active.segment {
                    return Some(Command::SetEndBound(seg.end));
                }
            }
        }
        if self
            .pending_tap
            .as_ref()
            .is_some_and(|p| now >= p.deadline)
        {
            if let Some(pending) = self.pending_tap.take() {
                return Some(self.mode.command_for(pending.segment));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEG: SegmentSpan = SegmentSpan { start: 20.0, end: 25.0 };

    fn tracker() -> GestureTracker {
        GestureTracker::new(true)
    }

    #[test]
    fn single_tap_dispatches_mode_action_after_window() {
        let mut g = tracker();
        assert!(g.touch_begin(0.0, (10.0, 10.0), Some(SEG)).is_none());
        assert!(g.touch_end(0.1, (10.0, 10.0)).is_none());
        // Still inside the double-tap window: nothing yet.
        assert!(g.poll(0.2).is_none());
        assert_eq!(g.poll(0.45), Some(Command::SeekTo(20.0)));
        assert!(g.poll(0.6).is_none());
    }

    #[test]
    fn double_tap_forces_set_start_once() {
        let mut g = tracker();
        g.set_mode(TouchTapMode::Seek);
        assert!(g.touch_begin(0.0, (10.0, 10.0), Some(SEG)).is_none());
        assert!(g.touch_end(0.1, (10.0, 10.0)).is_none());
        let second = g.touch_begin(0.25, (11.0, 10.0), Some(SEG));
        assert_eq!(second, Some(Command::SetStartBound(20.0)));
        // The second release classifies as nothing.
        assert!(g.touch_end(0.32, (11.0, 10.0)).is_none());
        assert!(g.poll(1.0).is_none());
    }

    #[test]
    fn slow_second_tap_is_two_singles() {
        let mut g = tracker();
        g.touch_begin(0.0, (10.0, 10.0), Some(SEG));
        g.touch_end(0.1, (10.0, 10.0));
        assert_eq!(g.poll(0.41), Some(Command::SeekTo(20.0)));
        g.touch_begin(0.6, (10.0, 10.0), Some(SEG));
        g.touch_end(0.7, (10.0, 10.0));
        assert_eq!(g.poll(1.01), Some(Command::SeekTo(20.0)));
    }

    #[test]
    fn long_press_forces_set_end_and_suppresses_release() {
        let mut g = tracker();
        g.set_mode(TouchTapMode::Seek);
        assert!(g.touch_begin(0.0, (10.0, 10.0), Some(SEG)).is_none());
        assert!(g.poll(0.3).is_none());
        assert_eq!(g.poll(0.6), Some(Command::SetEndBound(25.0)));
        assert!(g.touch_end(0.65, (10.0, 10.0)).is_none());
        assert!(g.poll(1.2).is_none());
    }

    #[test]
    fn movement_clears_long_press_timer() {
        let mut g = tracker();
        g.touch_begin(0.0, (10.0, 10.0), Some(SEG));
        g.touch_move((30.0, 12.0));
        assert!(g.poll(0.8).is_none());
    }

    #[test]
    fn left_swipe_selects_next_right_swipe_previous() {
        let mut g = tracker();
        g.touch_begin(0.0, (100.0, 10.0), None);
        g.touch_move((40.0, 14.0));
        assert_eq!(g.touch_end(0.2, (40.0, 14.0)), Some(Command::NextCandidate));
        g.touch_begin(1.0, (100.0, 10.0), None);
        g.touch_move((170.0, 6.0));
        assert_eq!(
            g.touch_end(1.2, (170.0, 6.0)),
            Some(Command::PreviousCandidate)
        );
    }

    #[test]
    fn swipe_disabled_tracker_ignores_swipes() {
        let mut g = GestureTracker::new(false);
        g.touch_begin(0.0, (100.0, 10.0), None);
        g.touch_move((40.0, 14.0));
        assert!(g.touch_end(0.2, (40.0, 14.0)).is_none());
    }

    #[test]
    fn vertical_scroll_is_not_a_swipe() {
        let mut g = tracker();
        g.touch_begin(0.0, (100.0, 10.0), Some(SEG));
        g.touch_move((120.0, 200.0));
        assert!(g.touch_end(0.3, (120.0, 200.0)).is_none());
        assert!(g.poll(1.0).is_none());
    }

    #[test]
    fn cancel_drops_active_touch_without_firing() {
        let mut g = tracker();
        g.touch_begin(0.0, (10.0, 10.0), Some(SEG));
        g.touch_cancel();
        assert!(g.poll(0.8).is_none());
        assert!(g.touch_end(0.9, (10.0, 10.0)).is_none());
    }

    #[test]
    fn press_on_other_segment_flushes_pending_tap() {
        let other = SegmentSpan { start: 40.0, end: 44.0 };
        let mut g = tracker();
        g.touch_begin(0.0, (10.0, 10.0), Some(SEG));
        g.touch_end(0.1, (10.0, 10.0));
        let flushed = g.touch_begin(0.2, (80.0, 10.0), Some(other));
        assert_eq!(flushed, Some(Command::SeekTo(20.0)));
        g.touch_end(0.3, (80.0, 10.0));
        assert_eq!(g.poll(0.65), Some(Command::SeekTo(40.0)));
    }
}
