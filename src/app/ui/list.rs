use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::review::Command;
use crate::transcript::format_timestamp;

impl crate::app::AdScrub {
    pub(in crate::app) fn ui_candidate_list(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("candidates")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Candidates");
                if self.session.candidates().is_empty() {
                    ui.label("No candidates in this episode.");
                    return;
                }
                let selected = self.session.selected_index();
                let show_sponsor = self.session.options().show_sponsor_badge;
                let mut clicked: Option<usize> = None;

                TableBuilder::new(ui)
                    .striped(true)
                    .sense(egui::Sense::click())
                    .column(Column::auto()) // index
                    .column(Column::auto()) // range
                    .column(Column::auto()) // confidence
                    .column(Column::auto()) // stage
                    .column(Column::remainder()) // sponsor or reason
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("#");
                        });
                        header.col(|ui| {
                            ui.strong("Range");
                        });
                        header.col(|ui| {
                            ui.strong("Conf");
                        });
                        header.col(|ui| {
                            ui.strong("Stage");
                        });
                        header.col(|ui| {
                            ui.strong(if show_sponsor { "Sponsor" } else { "Reason" });
                        });
                    })
                    .body(|body| {
                        let candidates = self.session.candidates();
                        body.rows(22.0, candidates.len(), |mut row| {
                            let i = row.index();
                            let candidate = &candidates[i];
                            row.set_selected(selected == Some(i));
                            row.col(|ui| {
                                if self.session.is_reviewed(i) {
                                    ui.label(RichText::new("✔").color(Color32::LIGHT_GREEN));
                                } else {
                                    ui.label(format!("{}", i + 1));
                                }
                            });
                            row.col(|ui| {
                                ui.monospace(format!(
                                    "{}–{}",
                                    format_timestamp(candidate.start),
                                    format_timestamp(candidate.end)
                                ));
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.0}%", candidate.confidence * 100.0));
                            });
                            row.col(|ui| {
                                ui.label(candidate.detection_stage.short_label());
                            });
                            row.col(|ui| {
                                if show_sponsor {
                                    if let Some(sponsor) = &candidate.sponsor {
                                        ui.label(
                                            RichText::new(sponsor)
                                                .color(Color32::from_rgb(220, 180, 90)),
                                        );
                                    }
                                } else {
                                    ui.label(RichText::new(&candidate.reason).weak());
                                }
                            });
                            if row.response().clicked() {
                                clicked = Some(i);
                            }
                        });
                    });
                if let Some(i) = clicked {
                    self.dispatch(Command::SelectCandidate(i));
                }
            });
    }
}
