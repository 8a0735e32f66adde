use std::path::PathBuf;

/// How long a resolved save stays on screen before the status returns to
/// idle. Errors linger longer so the reviewer notices the failed attempt.
pub const SAVE_ACK_SUCCESS_SECS: f64 = 2.5;
pub const SAVE_ACK_ERROR_SECS: f64 = 4.0;

/// Everything the launcher can hand the app. Parsed by hand in `main.rs`;
/// defaults give a usable empty station.
#[derive(Clone, Debug, Default)]
pub struct StartupConfig {
    pub episode_path: Option<PathBuf>,
    /// Overrides the scan's `audio_url`; local path or http(s) URL.
    pub audio_source: Option<String>,
    /// Correction API root. Absent means dry-run: commits resolve locally.
    pub api_base: Option<String>,
    /// Caller-directed jump applied once media is ready.
    pub initial_seek: Option<f64>,
    /// Synthesize an episode with this many candidates instead of loading one.
    pub dummy_candidates: Option<usize>,
    pub no_touch: bool,
    pub no_swipe: bool,
    pub no_sponsor_badge: bool,
    pub debug: bool,
    pub debug_log: Option<PathBuf>,
}
