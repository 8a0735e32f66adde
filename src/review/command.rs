/// Everything the editor can be asked to do, regardless of which input
/// surface asked. Keyboard, pointer and touch all normalize into this set;
/// the session applies commands strictly in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    PlayPause,
    NudgeStartForward,
    NudgeStartBackward,
    NudgeEndForward,
    NudgeEndBackward,
    Save,
    Reset,
    Confirm,
    Reject,
    SelectCandidate(usize),
    NextCandidate,
    PreviousCandidate,
    SeekTo(f64),
    SetStartBound(f64),
    SetEndBound(f64),
}

impl Command {
    /// Navigation stays live while a save is in flight; everything else is
    /// gated off.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Command::SelectCandidate(_)
                | Command::NextCandidate
                | Command::PreviousCandidate
                | Command::SeekTo(_)
        )
    }
}

/// The shortcut keys the editor reacts to. The host translates its own key
/// event type into this before mapping so the table stays testable without
/// a GUI. Chords with Ctrl/Alt/Cmd never reach the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey {
    Space,
    J,
    K,
    Enter,
    Escape,
    C,
    X,
}

pub fn map_key(key: EditorKey, shift: bool) -> Command {
    match (key, shift) {
        (EditorKey::Space, _) => Command::PlayPause,
        (EditorKey::J, false) => Command::NudgeEndBackward,
        (EditorKey::J, true) => Command::NudgeStartBackward,
        (EditorKey::K, false) => Command::NudgeEndForward,
        (EditorKey::K, true) => Command::NudgeStartForward,
        (EditorKey::Enter, _) => Command::Save,
        (EditorKey::Escape, _) => Command::Reset,
        (EditorKey::C, _) => Command::Confirm,
        (EditorKey::X, _) => Command::Reject,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub command: bool,
}

/// Pointer click on a transcript segment: plain click seeks to the segment
/// start, Shift adopts its end as the ad end, Alt/Ctrl/Cmd adopts its start
/// as the ad start.
pub fn map_segment_click(seg_start: f64, seg_end: f64, mods: ClickModifiers) -> Command {
    if mods.alt || mods.ctrl || mods.command {
        Command::SetStartBound(seg_start)
    } else if mods.shift {
        Command::SetEndBound(seg_end)
    } else {
        Command::SeekTo(seg_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_map_matches_review_shortcuts() {
        assert_eq!(map_key(EditorKey::Space, false), Command::PlayPause);
        assert_eq!(map_key(EditorKey::J, false), Command::NudgeEndBackward);
        assert_eq!(map_key(EditorKey::J, true), Command::NudgeStartBackward);
        assert_eq!(map_key(EditorKey::K, false), Command::NudgeEndForward);
        assert_eq!(map_key(EditorKey::K, true), Command::NudgeStartForward);
        assert_eq!(map_key(EditorKey::Enter, false), Command::Save);
        assert_eq!(map_key(EditorKey::Escape, false), Command::Reset);
        assert_eq!(map_key(EditorKey::C, false), Command::Confirm);
        assert_eq!(map_key(EditorKey::X, false), Command::Reject);
    }

    #[test]
    fn segment_click_modifier_precedence() {
        let plain = ClickModifiers::default();
        assert_eq!(map_segment_click(4.0, 9.0, plain), Command::SeekTo(4.0));
        let shift = ClickModifiers { shift: true, ..plain };
        assert_eq!(map_segment_click(4.0, 9.0, shift), Command::SetEndBound(9.0));
        let alt = ClickModifiers { alt: true, ..plain };
        assert_eq!(map_segment_click(4.0, 9.0, alt), Command::SetStartBound(4.0));
        // Alt+Shift resolves to the start-bound action.
        let both = ClickModifiers { alt: true, shift: true, ..plain };
        assert_eq!(map_segment_click(4.0, 9.0, both), Command::SetStartBound(4.0));
    }

    #[test]
    fn navigation_commands_survive_save_gating() {
        assert!(Command::SeekTo(1.0).is_navigation());
        assert!(Command::SelectCandidate(2).is_navigation());
        assert!(Command::NextCandidate.is_navigation());
        assert!(!Command::Save.is_navigation());
        assert!(!Command::PlayPause.is_navigation());
        assert!(!Command::NudgeEndForward.is_navigation());
    }
}
