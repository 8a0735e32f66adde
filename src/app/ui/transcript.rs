use egui::{Color32, RichText, Sense};

use crate::review::{map_segment_click, ClickModifiers, SegmentSpan, TouchTapMode};
use crate::transcript::format_timestamp;

impl crate::app::AdScrub {
    /// The transcript is the pointer/touch surface of the editor: plain
    /// click seeks, Shift adopts a segment end, Alt/Ctrl/Cmd adopts a
    /// segment start, and on touch the gesture classifier takes over.
    pub(in crate::app) fn ui_transcript(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("transcript")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Transcript");
                    if self.options.supports_touch {
                        let mut mode = self.gestures.mode();
                        egui::ComboBox::from_id_salt("touch_tap_mode")
                            .selected_text(mode.label())
                            .show_ui(ui, |ui| {
                                for candidate_mode in [
                                    TouchTapMode::Seek,
                                    TouchTapMode::SetStart,
                                    TouchTapMode::SetEnd,
                                ] {
                                    ui.selectable_value(
                                        &mut mode,
                                        candidate_mode,
                                        candidate_mode.label(),
                                    );
                                }
                            });
                        if mode != self.gestures.mode() {
                            self.gestures.set_mode(mode);
                        }
                    }
                });
                if self.options.supports_swipe {
                    ui.label(
                        RichText::new("swipe left/right for next/previous candidate")
                            .weak()
                            .small(),
                    );
                }
                ui.separator();

                self.segment_hits.clear();
                self.transcript_area = Some(ui.max_rect());

                if self.transcript.is_empty() {
                    ui.label("No transcript for this episode.");
                    return;
                }

                let bounds = self.session.working_bounds();
                let touch_seen = self.touch_seen;
                let mut dispatch: Option<crate::review::Command> = None;
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for seg in &self.transcript.segments {
                        let in_working = bounds
                            .map(|b| seg.end > b.start && seg.start < b.end)
                            .unwrap_or(false);
                        let span = SegmentSpan {
                            start: seg.start,
                            end: seg.end,
                        };
                        let row = ui.horizontal(|ui| {
                            ui.monospace(
                                RichText::new(format_timestamp(seg.start))
                                    .weak()
                                    .small(),
                            );
                            let mut text = RichText::new(seg.text.as_str());
                            if in_working {
                                text = text.color(Color32::from_rgb(230, 190, 120));
                            }
                            let resp = ui.add(egui::Label::new(text).wrap().sense(Sense::click()));
                            if resp.clicked() && !touch_seen {
                                let mods = ui.input(|i| i.modifiers);
                                dispatch = Some(map_segment_click(
                                    seg.start,
                                    seg.end,
                                    ClickModifiers {
                                        shift: mods.shift,
                                        alt: mods.alt,
                                        ctrl: mods.ctrl,
                                        command: mods.mac_cmd,
                                    },
                                ));
                            }
                        });
                        self.segment_hits.push((row.response.rect, span));
                    }
                });
                if let Some(cmd) = dispatch {
                    self.dispatch(cmd);
                }
            });
    }
}
