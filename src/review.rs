pub mod bounds;
pub mod command;
pub mod gesture;
pub mod playback;
pub mod selection;

use std::sync::atomic::AtomicI64;
use std::sync::Arc;

use crate::candidates::Candidate;

pub use bounds::{BoundsEditor, WorkingBounds, DEFAULT_NUDGE_STEP, MIN_SPAN_SECS};
pub use command::{map_key, map_segment_click, ClickModifiers, Command, EditorKey};
pub use gesture::{GestureTracker, SegmentSpan, TouchTapMode};
pub use playback::PlaybackSync;
pub use selection::{SelectionController, NO_SELECTION};

/// Save lifecycle of the one in-flight correction. One instance per review
/// session; the host resolves it from the submission result and returns it
/// to `Idle` after the acknowledgment window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

impl SaveStatus {
    pub fn is_saving(self) -> bool {
        self == SaveStatus::Saving
    }
}

/// What the reviewer pressed. `Save` degrades to a confirm when the bounds
/// were never touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitKind {
    Confirm,
    Reject,
    Save,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrectionKind {
    Confirm,
    Reject,
    Adjust,
}

impl CorrectionKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            CorrectionKind::Confirm => "confirm",
            CorrectionKind::Reject => "reject",
            CorrectionKind::Adjust => "adjust",
        }
    }
}

/// The reviewer's decision about one candidate, handed to the host exactly
/// once per commit.
#[derive(Clone, Debug, PartialEq)]
pub struct Correction {
    pub kind: CorrectionKind,
    pub candidate_index: usize,
    pub original: Candidate,
    pub adjusted_start: Option<f64>,
    pub adjusted_end: Option<f64>,
    pub notes: Option<String>,
}

/// Capability descriptor: one parameterized editor instead of per-surface
/// widget variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorOptions {
    pub supports_touch: bool,
    pub supports_swipe: bool,
    pub show_sponsor_badge: bool,
    pub nudge_step: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            supports_touch: true,
            supports_swipe: true,
            show_sponsor_badge: true,
            nudge_step: DEFAULT_NUDGE_STEP,
        }
    }
}

/// One episode's review state: the ordered candidate list, the active
/// candidate's working bounds, selection, playback binding, and the save
/// lifecycle. All mutation funnels through [`ReviewSession::apply`] so
/// commands behave identically no matter which input surface produced
/// them.
pub struct ReviewSession {
    candidates: Vec<Candidate>,
    selection: SelectionController,
    bounds: Option<BoundsEditor>,
    bounds_for: Option<usize>,
    playback: PlaybackSync,
    save_status: SaveStatus,
    options: EditorOptions,
    notes: String,
    reviewed: Vec<bool>,
    pending_advance: bool,
    terminal: bool,
}

impl ReviewSession {
    pub fn new(candidates: Vec<Candidate>, playback: PlaybackSync, options: EditorOptions) -> Self {
        let selection = SelectionController::internal(candidates.len());
        Self::with_selection(candidates, selection, playback, options)
    }

    /// Externally-controlled selection: the owner keeps the index cell and
    /// observes every change through it.
    pub fn new_with_shared_selection(
        candidates: Vec<Candidate>,
        cell: Arc<AtomicI64>,
        playback: PlaybackSync,
        options: EditorOptions,
    ) -> Self {
        let selection = SelectionController::external(cell, candidates.len());
        Self::with_selection(candidates, selection, playback, options)
    }

    fn with_selection(
        candidates: Vec<Candidate>,
        selection: SelectionController,
        playback: PlaybackSync,
        options: EditorOptions,
    ) -> Self {
        let reviewed = vec![false; candidates.len()];
        let mut session = Self {
            candidates,
            selection,
            bounds: None,
            bounds_for: None,
            playback,
            save_status: SaveStatus::Idle,
            options,
            notes: String::new(),
            reviewed,
            pending_advance: false,
            terminal: false,
        };
        session.sync_selection();
        session
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn options(&self) -> EditorOptions {
        self.options
    }

    pub fn playback(&self) -> &PlaybackSync {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackSync {
        &mut self.playback
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.current()
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.selection.current().and_then(|i| self.candidates.get(i))
    }

    pub fn working_bounds(&self) -> Option<WorkingBounds> {
        self.bounds.as_ref().map(|b| b.working())
    }

    pub fn relative_adjustment(&self) -> Option<(f64, f64)> {
        self.bounds.as_ref().map(|b| b.relative_adjustment())
    }

    pub fn is_modified(&self) -> bool {
        self.bounds.as_ref().map(|b| b.is_modified()).unwrap_or(false)
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed.iter().filter(|r| **r).count()
    }

    pub fn is_reviewed(&self, index: usize) -> bool {
        self.reviewed.get(index).copied().unwrap_or(false)
    }

    /// True once the last candidate's commit resolved successfully.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut String {
        &mut self.notes
    }

    /// Rebuild working bounds when the authoritative index moved — whether
    /// through `apply`, or behind our back via an externally-owned cell.
    /// In-progress edits are discarded on every transition.
    pub fn sync_selection(&mut self) {
        let current = self.selection.current();
        if current != self.bounds_for {
            self.bounds_for = current;
            self.bounds = current.map(|i| {
                BoundsEditor::new(&self.candidates[i], self.playback.duration())
            });
        } else if let Some(bounds) = self.bounds.as_mut() {
            // Duration can show up after the media finished decoding.
            let duration = self.playback.duration();
            if duration != bounds.duration() {
                bounds.set_duration(duration);
            }
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        let changed = self.selection.select(index);
        if changed {
            self.terminal = false;
        }
        self.sync_selection();
        changed
    }

    /// Resolve an absolute time against the list: the first candidate
    /// containing `t` (with 0.5 s of slack) gets selected; the seek happens
    /// either way, armed as a one-shot position preserve.
    pub fn jump_to_time(&mut self, t: f64) -> Option<usize> {
        let hit = self
            .candidates
            .iter()
            .position(|c| c.contains_with_slack(t, 0.5));
        if let Some(i) = hit {
            self.select(i);
        }
        self.playback.jump_seek(t);
        hit
    }

    /// Single entry point for the normalized command set. Returns the
    /// emitted correction when the command was a commit; the host submits
    /// it and later calls [`ReviewSession::resolve_save`].
    pub fn apply(&mut self, cmd: Command) -> Option<Correction> {
        self.sync_selection();
        if self.candidates.is_empty() {
            return None;
        }
        if self.save_status.is_saving() && !cmd.is_navigation() {
            return None;
        }
        let step = self.options.nudge_step;
        match cmd {
            Command::PlayPause => {
                let bounds = self.working_bounds();
                self.playback.toggle(bounds);
            }
            Command::NudgeStartForward => self.edit_bounds(|b| b.nudge_start(step)),
            Command::NudgeStartBackward => self.edit_bounds(|b| b.nudge_start(-step)),
            Command::NudgeEndForward => self.edit_bounds(|b| b.nudge_end(step)),
            Command::NudgeEndBackward => self.edit_bounds(|b| b.nudge_end(-step)),
            Command::SetStartBound(t) => self.edit_bounds(|b| b.set_start(t)),
            Command::SetEndBound(t) => self.edit_bounds(|b| b.set_end(t)),
            Command::Reset => self.edit_bounds(|b| b.reset()),
            Command::SeekTo(t) => self.playback.seek(t),
            Command::SelectCandidate(i) => {
                self.select(i);
            }
            Command::NextCandidate => {
                if self.selection.next() {
                    self.terminal = false;
                }
                self.sync_selection();
            }
            Command::PreviousCandidate => {
                if self.selection.previous() {
                    self.terminal = false;
                }
                self.sync_selection();
            }
            Command::Save => return self.commit(CommitKind::Save),
            Command::Confirm => return self.commit(CommitKind::Confirm),
            Command::Reject => return self.commit(CommitKind::Reject),
        }
        None
    }

    fn edit_bounds(&mut self, f: impl FnOnce(&mut BoundsEditor)) {
        if let Some(bounds) = self.bounds.as_mut() {
            f(bounds);
        }
    }

    /// Build the correction for the active candidate and move the save
    /// lifecycle to `Saving`. A `save` with untouched bounds degrades to a
    /// plain confirm; an adjust always carries both adjusted bounds.
    pub fn commit(&mut self, kind: CommitKind) -> Option<Correction> {
        self.sync_selection();
        if self.save_status.is_saving() {
            return None;
        }
        let index = self.selection.current()?;
        let bounds = self.bounds.as_ref()?;
        let kind = match kind {
            CommitKind::Confirm => CorrectionKind::Confirm,
            CommitKind::Reject => CorrectionKind::Reject,
            CommitKind::Save if bounds.is_modified() => CorrectionKind::Adjust,
            CommitKind::Save => CorrectionKind::Confirm,
        };
        let working = bounds.working();
        let (adjusted_start, adjusted_end) = match kind {
            CorrectionKind::Adjust => (Some(working.start), Some(working.end)),
            _ => (None, None),
        };
        let notes = {
            let trimmed = self.notes.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        self.notes.clear();
        self.save_status = SaveStatus::Saving;
        self.pending_advance = true;
        Some(Correction {
            kind,
            candidate_index: index,
            original: self.candidates[index].clone(),
            adjusted_start,
            adjusted_end,
            notes,
        })
    }

    /// Feed back the submission result. Success advances to the next
    /// candidate (or the terminal state after the last one); failure stays
    /// put so the reviewer can re-attempt.
    pub fn resolve_save(&mut self, ok: bool) {
        if !self.save_status.is_saving() {
            return;
        }
        let advance = std::mem::take(&mut self.pending_advance);
        if ok {
            self.save_status = SaveStatus::Success;
            if let Some(i) = self.selection.current() {
                if let Some(flag) = self.reviewed.get_mut(i) {
                    *flag = true;
                }
                if advance {
                    if i + 1 < self.candidates.len() {
                        self.selection.select(i + 1);
                    } else {
                        self.terminal = true;
                    }
                }
            }
        } else {
            self.save_status = SaveStatus::Error;
        }
        self.sync_selection();
    }

    /// Host acknowledgment: back to idle after the success/error window.
    pub fn acknowledge_save(&mut self) {
        if matches!(self.save_status, SaveStatus::Success | SaveStatus::Error) {
            self.save_status = SaveStatus::Idle;
        }
    }
}
