use egui::{Key, Modifiers, TouchPhase};

use crate::review::{map_key, EditorKey, SegmentSpan};

impl super::AdScrub {
    /// Review shortcuts, consumed with exact modifiers so chords with
    /// Ctrl/Alt/Cmd fall through to the platform. Everything is ignored
    /// while a text field (notes, jump box) owns the keyboard.
    pub(super) fn handle_global_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let plain: [(Key, EditorKey); 7] = [
            (Key::Space, EditorKey::Space),
            (Key::J, EditorKey::J),
            (Key::K, EditorKey::K),
            (Key::Enter, EditorKey::Enter),
            (Key::Escape, EditorKey::Escape),
            (Key::C, EditorKey::C),
            (Key::X, EditorKey::X),
        ];
        for (key, editor_key) in plain {
            if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, key)) {
                self.dispatch(map_key(editor_key, false));
            }
        }
        for (key, editor_key) in [(Key::J, EditorKey::J), (Key::K, EditorKey::K)] {
            if ctx.input_mut(|i| i.consume_key(Modifiers::SHIFT, key)) {
                self.dispatch(map_key(editor_key, true));
            }
        }
    }

    /// Feed raw touch phases over the transcript area into the gesture
    /// classifier and drive its deadlines.
    pub(super) fn poll_gestures(&mut self, ctx: &egui::Context) {
        if !self.options.supports_touch {
            return;
        }
        let now = ctx.input(|i| i.time);
        let events: Vec<egui::Event> = ctx.input(|i| i.events.clone());
        for event in events {
            let egui::Event::Touch { phase, pos, .. } = event else {
                continue;
            };
            self.touch_seen = true;
            match phase {
                TouchPhase::Start => {
                    let inside = self
                        .transcript_area
                        .map(|r| r.contains(pos))
                        .unwrap_or(false);
                    if inside {
                        let seg = self.segment_at(pos);
                        if let Some(cmd) = self.gestures.touch_begin(now, (pos.x, pos.y), seg) {
                            self.dispatch(cmd);
                        }
                    }
                }
                TouchPhase::Move => self.gestures.touch_move((pos.x, pos.y)),
                TouchPhase::End => {
                    if let Some(cmd) = self.gestures.touch_end(now, (pos.x, pos.y)) {
                        self.dispatch(cmd);
                    }
                }
                TouchPhase::Cancel => self.gestures.touch_cancel(),
            }
        }
        if let Some(cmd) = self.gestures.poll(now) {
            self.dispatch(cmd);
        }
        if self.gestures.needs_poll() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn segment_at(&self, pos: egui::Pos2) -> Option<SegmentSpan> {
        self.segment_hits
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, span)| *span)
    }
}
