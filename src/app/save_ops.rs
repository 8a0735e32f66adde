use std::sync::mpsc;

use crate::review::{Command, Correction, SaveStatus};

use super::types::{SAVE_ACK_ERROR_SECS, SAVE_ACK_SUCCESS_SECS};

impl super::AdScrub {
    /// Single funnel for every input surface. Commands that commit hand
    /// their correction straight to the submitter.
    pub(super) fn dispatch(&mut self, cmd: Command) {
        self.debug_log(format!("command: {cmd:?}"));
        if let Some(correction) = self.session.apply(cmd) {
            self.submit_correction(correction);
        }
    }

    fn submit_correction(&mut self, correction: Correction) {
        self.debug_log(format!(
            "submitting {} for candidate {} ({:.2}..{:.2})",
            correction.kind.wire_name(),
            correction.candidate_index,
            correction.original.start,
            correction.original.end
        ));
        let Some(client) = self.client.clone() else {
            // Dry-run: no API configured, resolve locally so review flow
            // can be exercised offline.
            self.debug_log("dry-run: no api base configured, correction accepted locally");
            self.session.resolve_save(true);
            return;
        };
        let slug = self.podcast_slug.clone();
        let episode_id = self.episode_id;
        let (tx, rx) = mpsc::channel();
        self.save_rx = Some(rx);
        std::thread::spawn(move || {
            let result = client
                .submit(&slug, episode_id, &correction)
                .map_err(|err| format!("{err:#}"));
            let _ = tx.send(result);
        });
    }

    pub(super) fn poll_save_results(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.save_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                let ok = match result {
                    Ok(()) => true,
                    Err(err) => {
                        self.debug_log(format!("correction submit failed: {err}"));
                        false
                    }
                };
                self.save_rx = None;
                self.session.resolve_save(ok);
                self.save_resolved_at = Some(ctx.input(|i| i.time));
                ctx.request_repaint();
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.save_rx = None;
                self.session.resolve_save(false);
                self.save_resolved_at = Some(ctx.input(|i| i.time));
            }
        }
    }

    /// Returns the indicator to idle once the acknowledgment window ends.
    pub(super) fn tick_save_ack(&mut self, ctx: &egui::Context) {
        let Some(resolved_at) = self.save_resolved_at else {
            // Dry-run resolves synchronously; start its window here.
            if matches!(
                self.session.save_status(),
                SaveStatus::Success | SaveStatus::Error
            ) {
                self.save_resolved_at = Some(ctx.input(|i| i.time));
                ctx.request_repaint_after(std::time::Duration::from_millis(200));
            }
            return;
        };
        let window = match self.session.save_status() {
            SaveStatus::Success => SAVE_ACK_SUCCESS_SECS,
            SaveStatus::Error => SAVE_ACK_ERROR_SECS,
            _ => {
                self.save_resolved_at = None;
                return;
            }
        };
        let now = ctx.input(|i| i.time);
        if now - resolved_at >= window {
            self.session.acknowledge_save();
            self.save_resolved_at = None;
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}
