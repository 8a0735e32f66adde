use std::sync::Arc;

use crate::audio::AudioEngine;
use crate::review::bounds::WorkingBounds;

/// Binds the editor to the playback engine: plain seeks, candidate-region
/// snap on play, and the one-shot position preserve that follows a
/// caller-directed jump. The engine is shared with the host, which keeps
/// feeding it decoded media and volume changes.
pub struct PlaybackSync {
    engine: Arc<AudioEngine>,
    fallback_duration: Option<f64>,
    preserve_next_play: bool,
}

impl PlaybackSync {
    pub fn new(engine: Arc<AudioEngine>, fallback_duration: Option<f64>) -> Self {
        Self {
            engine,
            fallback_duration: fallback_duration.filter(|d| d.is_finite() && *d > 0.0),
            preserve_next_play: false,
        }
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    /// Media duration in seconds; infinite sentinel while unknown so bound
    /// clamping stays permissive.
    pub fn duration(&self) -> f64 {
        self.engine
            .duration_secs()
            .or(self.fallback_duration)
            .unwrap_or(f64::INFINITY)
    }

    pub fn position(&self) -> f64 {
        self.engine.position_secs()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn seek(&self, t: f64) {
        self.engine.seek_to_secs(t);
    }

    /// Caller-directed jump: seek and arm the one-shot preserve flag so the
    /// next play resumes here instead of snapping to the candidate start.
    pub fn jump_seek(&mut self, t: f64) {
        self.engine.seek_to_secs(t);
        self.preserve_next_play = true;
    }

    pub fn preserve_pending(&self) -> bool {
        self.preserve_next_play
    }

    /// Pause when playing. When paused, snap to the candidate start first if
    /// the position sits outside the working range — pressing play reliably
    /// previews the candidate — unless the preserve flag is armed, which is
    /// consumed by exactly this one resume.
    pub fn toggle(&mut self, bounds: Option<WorkingBounds>) {
        if self.engine.is_playing() {
            self.engine.pause();
            return;
        }
        let preserve = std::mem::take(&mut self.preserve_next_play);
        if !preserve {
            if let Some(b) = bounds {
                if !b.contains(self.position()) {
                    self.engine.seek_to_secs(b.start);
                }
            }
        }
        self.engine.play();
    }
}
