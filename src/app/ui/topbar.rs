use egui::{Color32, RichText};

use crate::review::{Command, SaveStatus};
use crate::transcript::format_timestamp;

impl crate::app::AdScrub {
    pub(in crate::app) fn ui_topbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    self.open_episode_dialog();
                }
                ui.separator();
                ui.strong(self.episode_title.clone());

                ui.separator();
                let playing = self.session.playback().is_playing();
                let play_label = if playing { "⏸" } else { "⏵" };
                if ui.button(play_label).clicked() {
                    self.dispatch(Command::PlayPause);
                }
                let pos = self.session.playback().position();
                let duration = self.session.playback().duration();
                let duration_text = if duration.is_finite() {
                    format_timestamp(duration)
                } else {
                    "?:??".to_string()
                };
                ui.monospace(format!("{} / {}", format_timestamp(pos), duration_text));

                ui.separator();
                let vol = ui.add(
                    egui::Slider::new(&mut self.volume_db, -60.0..=6.0)
                        .text("dB")
                        .show_value(false),
                );
                if vol.changed() {
                    self.apply_volume();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match self.session.save_status() {
                        SaveStatus::Idle => {}
                        SaveStatus::Saving => {
                            ui.spinner();
                            ui.label(RichText::new("saving…").color(Color32::LIGHT_YELLOW));
                        }
                        SaveStatus::Success => {
                            ui.label(RichText::new("saved").color(Color32::LIGHT_GREEN));
                        }
                        SaveStatus::Error => {
                            ui.label(
                                RichText::new("save failed — try again")
                                    .color(Color32::LIGHT_RED),
                            );
                        }
                    }
                    ui.label(format!(
                        "{}/{} reviewed",
                        self.session.reviewed_count(),
                        self.session.candidates().len()
                    ));
                    if !self.audio_available {
                        ui.label(RichText::new("no audio device").color(Color32::LIGHT_RED));
                    }
                    if self.media_rx.is_some() {
                        ui.spinner();
                        ui.label("loading media…");
                    }
                    if let Some(err) = &self.media_error {
                        ui.label(RichText::new(err).color(Color32::LIGHT_RED));
                    }
                });
            });
        });
    }
}
