mod debug_ops;
mod input_ops;
mod media_ops;
mod save_ops;
mod types;
mod ui;

use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use anyhow::Result;
use egui::{Color32, FontId, TextStyle, Visuals};

use crate::api::CorrectionClient;
use crate::audio::{AudioBuffer, AudioEngine};
use crate::candidates::{load_episode_scan, EpisodeScan};
use crate::media;
use crate::review::{
    EditorOptions, GestureTracker, PlaybackSync, ReviewSession, SegmentSpan,
};
use crate::transcript::{self, Transcript};

pub use types::StartupConfig;

pub struct AdScrub {
    pub session: ReviewSession,
    pub podcast_slug: String,
    pub episode_id: i64,
    pub episode_title: String,
    pub transcript: Transcript,
    pub volume_db: f32,

    engine: Arc<AudioEngine>,
    audio_available: bool,
    gestures: GestureTracker,
    options: EditorOptions,
    client: Option<Arc<CorrectionClient>>,

    save_rx: Option<Receiver<std::result::Result<(), String>>>,
    save_resolved_at: Option<f64>,

    media_rx: Option<Receiver<Result<AudioBuffer>>>,
    media_error: Option<String>,
    pending_seek: Option<f64>,

    dragging_progress: bool,
    segment_hits: Vec<(egui::Rect, SegmentSpan)>,
    transcript_area: Option<egui::Rect>,
    // A touch was seen this session: segment taps are classified by the
    // gesture tracker, so the synthesized pointer clicks must not also fire.
    touch_seen: bool,

    debug_enabled: bool,
    debug_log_path: Option<std::path::PathBuf>,
}

impl AdScrub {
    pub fn new(cc: &eframe::CreationContext<'_>, startup: StartupConfig) -> Result<Self> {
        let (engine, audio_available) = match AudioEngine::new() {
            Ok(engine) => (Arc::new(engine), true),
            Err(err) => {
                eprintln!("audio device unavailable, playback disabled: {err:#}");
                (Arc::new(AudioEngine::new_for_test()), false)
            }
        };
        Self::with_engine(cc, startup, engine, audio_available)
    }

    /// Deterministic constructor for the GUI harness: never opens a device.
    pub fn new_for_test(cc: &eframe::CreationContext<'_>, startup: StartupConfig) -> Result<Self> {
        Self::with_engine(cc, startup, Arc::new(AudioEngine::new_for_test()), false)
    }

    fn with_engine(
        cc: &eframe::CreationContext<'_>,
        startup: StartupConfig,
        engine: Arc<AudioEngine>,
        audio_available: bool,
    ) -> Result<Self> {
        let mut visuals = Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(20, 20, 23);
        visuals.widgets.inactive.bg_fill = Color32::from_rgb(28, 28, 32);
        visuals.panel_fill = Color32::from_rgb(18, 18, 20);
        cc.egui_ctx.set_visuals(visuals);
        let mut style = (*cc.egui_ctx.style()).clone();
        style
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(15.0));
        style
            .text_styles
            .insert(TextStyle::Monospace, FontId::monospace(13.0));
        cc.egui_ctx.set_style(style);

        let options = EditorOptions {
            supports_touch: !startup.no_touch,
            supports_swipe: !startup.no_swipe,
            show_sponsor_badge: !startup.no_sponsor_badge,
            ..EditorOptions::default()
        };

        let mut app = Self {
            session: ReviewSession::new(
                Vec::new(),
                PlaybackSync::new(engine.clone(), None),
                options,
            ),
            podcast_slug: String::new(),
            episode_id: 0,
            episode_title: "(no episode)".to_string(),
            transcript: Transcript::default(),
            volume_db: -12.0,
            engine,
            audio_available,
            gestures: GestureTracker::new(options.supports_swipe),
            options,
            client: startup
                .api_base
                .as_deref()
                .map(|base| Arc::new(CorrectionClient::new(base))),
            save_rx: None,
            save_resolved_at: None,
            media_rx: None,
            media_error: None,
            pending_seek: startup.initial_seek,
            dragging_progress: false,
            segment_hits: Vec::new(),
            transcript_area: None,
            touch_seen: false,
            debug_enabled: startup.debug,
            debug_log_path: startup.debug_log.clone(),
        };
        app.apply_volume();

        if let Some(count) = startup.dummy_candidates {
            app.install_scan(EpisodeScan::dummy(count), None, true);
        } else if let Some(path) = &startup.episode_path {
            match load_episode_scan(path) {
                Ok(scan) => app.install_scan(scan, startup.audio_source.clone(), false),
                Err(err) => {
                    app.media_error = Some(format!("episode load failed: {err:#}"));
                    app.debug_log(format!("episode load failed: {err:#}"));
                }
            }
        } else if let Some(source) = startup.audio_source.clone() {
            // Audio without a scan still gives a listenable empty station.
            let scan = EpisodeScan {
                podcast_slug: "unknown".to_string(),
                episode_id: 0,
                title: None,
                audio_url: Some(source),
                duration_secs: None,
                candidates: Vec::new(),
                transcript: Vec::new(),
            };
            app.install_scan(scan, None, false);
        }
        Ok(app)
    }

    /// Swap in an episode: rebuild the session around the shared engine,
    /// pick up the transcript, and kick off the media load. With
    /// `synth_fallback` a scan without media gets a synthetic tone so the
    /// playback controls stay live.
    pub(crate) fn install_scan(
        &mut self,
        mut scan: EpisodeScan,
        audio_override: Option<String>,
        synth_fallback: bool,
    ) {
        self.engine.clear_samples();
        let dropped = scan.sanitize();
        if dropped > 0 {
            self.debug_log(format!("dropped {dropped} malformed candidate rows"));
        }

        let audio_source = audio_override.or_else(|| scan.audio_url.clone());
        self.transcript = if !scan.transcript.is_empty() {
            Transcript::from_segments(scan.transcript.clone())
        } else {
            audio_source
                .as_deref()
                .filter(|s| !s.starts_with("http://") && !s.starts_with("https://"))
                .and_then(|s| transcript::srt_path_for_audio(Path::new(s)))
                .filter(|p| p.is_file())
                .and_then(|p| transcript::load_srt(&p))
                .unwrap_or_default()
        };

        self.podcast_slug = scan.podcast_slug.clone();
        self.episode_id = scan.episode_id;
        self.episode_title = scan
            .title
            .clone()
            .unwrap_or_else(|| format!("{} / episode {}", scan.podcast_slug, scan.episode_id));

        let playback = PlaybackSync::new(self.engine.clone(), scan.duration_secs);
        self.session = ReviewSession::new(scan.candidates.clone(), playback, self.options);
        self.gestures = GestureTracker::new(self.options.supports_swipe);
        self.save_rx = None;
        self.save_resolved_at = None;
        self.media_error = None;

        match audio_source {
            Some(source) => self.spawn_media_load(source),
            None if synth_fallback => {
                let secs = scan.duration_secs.unwrap_or(300.0);
                self.engine
                    .set_samples(Arc::new(media::synth_tone(secs, 8_000)));
                self.media_rx = None;
                self.apply_pending_seek();
            }
            None => {
                self.media_rx = None;
                self.apply_pending_seek();
            }
        }
        self.debug_log(format!(
            "installed episode {}/{} with {} candidates",
            self.podcast_slug,
            self.episode_id,
            self.session.candidates().len()
        ));
    }

    pub(crate) fn apply_pending_seek(&mut self) {
        if let Some(t) = self.pending_seek.take() {
            let hit = self.session.jump_to_time(t);
            self.debug_log(format!("initial jump to {t:.2}s, candidate hit: {hit:?}"));
        }
    }

    pub(crate) fn apply_volume(&self) {
        let linear = 10.0f32.powf(self.volume_db / 20.0);
        self.engine.set_volume(linear);
    }

    fn open_episode_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("episode scan", &["json"])
            .pick_file()
        {
            match load_episode_scan(&path) {
                Ok(scan) => self.install_scan(scan, None, false),
                Err(err) => {
                    self.media_error = Some(format!("episode load failed: {err:#}"));
                    self.debug_log(format!("episode load failed: {err:#}"));
                }
            }
        }
    }
}

impl eframe::App for AdScrub {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_media(ctx);
        self.poll_save_results(ctx);
        self.tick_save_ack(ctx);
        self.session.sync_selection();
        self.handle_global_shortcuts(ctx);
        self.poll_gestures(ctx);

        self.ui_topbar(ctx);
        self.ui_candidate_list(ctx);
        self.ui_transcript(ctx);
        self.ui_editor(ctx);

        if self.session.playback().is_playing()
            || self.session.save_status().is_saving()
            || self.media_rx.is_some()
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
