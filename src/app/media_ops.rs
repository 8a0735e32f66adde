use std::sync::mpsc;
use std::sync::Arc;

use crate::media;

impl super::AdScrub {
    /// Decode (and possibly fetch) episode audio off the UI thread; the
    /// result lands in `poll_media` on a later frame.
    pub(super) fn spawn_media_load(&mut self, source: String) {
        let (tx, rx) = mpsc::channel();
        self.media_rx = Some(rx);
        self.debug_log(format!("loading media: {source}"));
        std::thread::spawn(move || {
            let _ = tx.send(media::load_media(&source));
        });
    }

    pub(super) fn poll_media(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.media_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(buffer)) => {
                self.debug_log(format!(
                    "media ready: {:.1}s @ {} Hz",
                    buffer.duration_secs(),
                    buffer.sample_rate
                ));
                self.engine.set_samples(Arc::new(buffer));
                self.media_rx = None;
                // Bounds pick up the real duration ceiling now.
                self.session.sync_selection();
                self.apply_pending_seek();
                ctx.request_repaint();
            }
            Ok(Err(err)) => {
                self.media_error = Some(format!("media load failed: {err:#}"));
                self.debug_log(format!("media load failed: {err:#}"));
                self.media_rx = None;
                // Selection features still work without audio.
                self.apply_pending_seek();
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.media_error = Some("media loader vanished".to_string());
                self.media_rx = None;
            }
        }
    }
}
