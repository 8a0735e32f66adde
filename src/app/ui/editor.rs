use egui::{pos2, Color32, RichText, Sense, Stroke};

use crate::review::Command;
use crate::transcript::format_timestamp;

impl crate::app::AdScrub {
    pub(in crate::app) fn ui_editor(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.candidates().is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("No candidates to review in this episode.");
                });
                return;
            }
            if self.session.is_terminal() {
                ui.label(
                    RichText::new("All candidates reviewed.")
                        .color(Color32::LIGHT_GREEN)
                        .strong(),
                );
                ui.separator();
            }
            let Some(candidate) = self.session.selected_candidate().cloned() else {
                ui.label("Select a candidate on the left to start reviewing.");
                return;
            };
            let index = self.session.selected_index().unwrap_or(0);
            let saving = self.session.save_status().is_saving();

            ui.horizontal(|ui| {
                ui.heading(format!(
                    "Candidate {} of {}",
                    index + 1,
                    self.session.candidates().len()
                ));
                ui.label(
                    RichText::new(candidate.detection_stage.short_label())
                        .background_color(Color32::from_rgb(40, 52, 70))
                        .monospace(),
                );
                if let Some(scope) = candidate.scope {
                    ui.label(
                        RichText::new(scope.short_label())
                            .background_color(Color32::from_rgb(46, 42, 66))
                            .monospace(),
                    );
                }
                ui.label(format!("{:.0}%", candidate.confidence * 100.0));
                if self.options.show_sponsor_badge {
                    if let Some(sponsor) = &candidate.sponsor {
                        ui.label(
                            RichText::new(sponsor)
                                .color(Color32::BLACK)
                                .background_color(Color32::from_rgb(220, 180, 90)),
                        );
                    }
                }
            });
            ui.label(RichText::new(&candidate.reason).weak());
            ui.add_space(8.0);

            self.ui_bounds_row(ui, saving);
            ui.add_space(8.0);
            self.ui_progress_bar(ui);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!saving, egui::Button::new("Confirm (C)"))
                    .clicked()
                {
                    self.dispatch(Command::Confirm);
                }
                if ui
                    .add_enabled(!saving, egui::Button::new("Reject (X)"))
                    .clicked()
                {
                    self.dispatch(Command::Reject);
                }
                let save_label = if self.session.is_modified() {
                    "Save adjustment (Enter)"
                } else {
                    "Save (Enter)"
                };
                if ui
                    .add_enabled(!saving, egui::Button::new(save_label))
                    .clicked()
                {
                    self.dispatch(Command::Save);
                }
                if ui
                    .add_enabled(!saving, egui::Button::new("Reset (Esc)"))
                    .clicked()
                {
                    self.dispatch(Command::Reset);
                }
            });
            ui.add_space(4.0);
            ui.add_enabled(
                !saving,
                egui::TextEdit::singleline(self.session.notes_mut())
                    .hint_text("notes attached to the next save")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(4.0);
            ui.label(
                RichText::new(
                    "Space play/pause · J/K nudge end · Shift+J/K nudge start · Enter save",
                )
                .weak()
                .small(),
            );
        });
    }

    fn ui_bounds_row(&mut self, ui: &mut egui::Ui, saving: bool) {
        let Some(working) = self.session.working_bounds() else {
            return;
        };
        let (adj_start, adj_end) = self.session.relative_adjustment().unwrap_or((0.0, 0.0));
        let step = self.options.nudge_step;
        ui.horizontal(|ui| {
            ui.label("Start");
            if ui
                .add_enabled(!saving, egui::Button::new(format!("−{step:.1} s")))
                .clicked()
            {
                self.dispatch(Command::NudgeStartBackward);
            }
            ui.monospace(format!(
                "{} ({:.2}s)",
                format_timestamp(working.start),
                working.start
            ));
            if ui
                .add_enabled(!saving, egui::Button::new(format!("+{step:.1} s")))
                .clicked()
            {
                self.dispatch(Command::NudgeStartForward);
            }
            ui.label(adjustment_text(adj_start));

            ui.separator();

            ui.label("End");
            if ui
                .add_enabled(!saving, egui::Button::new(format!("−{step:.1} s")))
                .clicked()
            {
                self.dispatch(Command::NudgeEndBackward);
            }
            ui.monospace(format!(
                "{} ({:.2}s)",
                format_timestamp(working.end),
                working.end
            ));
            if ui
                .add_enabled(!saving, egui::Button::new(format!("+{step:.1} s")))
                .clicked()
            {
                self.dispatch(Command::NudgeEndForward);
            }
            ui.label(adjustment_text(adj_end));
        });
    }

    /// Click-to-seek bar with the working range shaded. Touch drags widen
    /// the strip and fire continuous seeks while scrubbing.
    fn ui_progress_bar(&mut self, ui: &mut egui::Ui) {
        let duration = self.session.playback().duration();
        let bar_h = if self.dragging_progress { 26.0 } else { 14.0 };
        let (resp, painter) =
            ui.allocate_painter(egui::vec2(ui.available_width(), bar_h), Sense::click_and_drag());
        let rect = resp.rect;
        painter.rect_filled(rect, 4.0, Color32::from_rgb(28, 28, 32));
        if !duration.is_finite() || duration <= 0.0 {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "media duration unknown",
                egui::FontId::proportional(10.0),
                Color32::GRAY,
            );
            self.dragging_progress = false;
            return;
        }
        let x_of = |t: f64| {
            rect.left() + ((t / duration).clamp(0.0, 1.0) as f32) * rect.width()
        };
        if let Some(bounds) = self.session.working_bounds() {
            let region = egui::Rect::from_min_max(
                pos2(x_of(bounds.start), rect.top()),
                pos2(x_of(bounds.end), rect.bottom()),
            );
            painter.rect_filled(region, 0.0, Color32::from_rgb(96, 64, 26));
        }
        let x = x_of(self.session.playback().position());
        painter.line_segment(
            [pos2(x, rect.top()), pos2(x, rect.bottom())],
            Stroke::new(2.0, Color32::from_rgb(120, 180, 240)),
        );

        self.dragging_progress = resp.is_pointer_button_down_on() || resp.dragged();
        if resp.clicked() || resp.dragged() {
            if let Some(p) = resp.interact_pointer_pos() {
                let frac = ((p.x - rect.left()) / rect.width().max(1.0)).clamp(0.0, 1.0);
                self.dispatch(Command::SeekTo(frac as f64 * duration));
            }
        }
    }
}

fn adjustment_text(delta: f64) -> RichText {
    if delta.abs() < 1e-9 {
        RichText::new("±0.0 s").weak()
    } else {
        RichText::new(format!("{delta:+.1} s")).color(Color32::from_rgb(230, 190, 120))
    }
}
