use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptSegment;

/// Pipeline phase that produced a candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionStage {
    FirstPass,
    Verification,
    Fingerprint,
    TextPattern,
    Language,
    #[default]
    Unspecified,
}

impl DetectionStage {
    pub fn short_label(self) -> &'static str {
        match self {
            DetectionStage::FirstPass => "1st",
            DetectionStage::Verification => "verify",
            DetectionStage::Fingerprint => "fp",
            DetectionStage::TextPattern => "text",
            DetectionStage::Language => "lang",
            DetectionStage::Unspecified => "-",
        }
    }
}

/// Applicability level of the pattern that matched. Read-only in the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternScope {
    Global,
    Network,
    Podcast,
}

impl PatternScope {
    pub fn short_label(self) -> &'static str {
        match self {
            PatternScope::Global => "global",
            PatternScope::Network => "network",
            PatternScope::Podcast => "podcast",
        }
    }
}

/// A machine-detected ad range awaiting human review. Immutable once loaded;
/// edits happen on the session's working bounds, never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub detection_stage: DetectionStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<PatternScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<i64>,
}

impl Candidate {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// True when `t` falls inside the range, or within `slack` seconds of it.
    pub fn contains_with_slack(&self, t: f64, slack: f64) -> bool {
        t >= self.start - slack && t <= self.end + slack
    }
}

/// One episode's scan output as written by the detection pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeScan {
    pub podcast_slug: String,
    pub episode_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transcript: Vec<TranscriptSegment>,
}

impl EpisodeScan {
    /// Drop rows the editor cannot represent and order the rest by start
    /// time. Returns how many rows were dropped so the caller can log it.
    pub fn sanitize(&mut self) -> usize {
        let before = self.candidates.len();
        self.candidates
            .retain(|c| c.start.is_finite() && c.end.is_finite() && c.start >= 0.0 && c.start < c.end);
        for c in &mut self.candidates {
            c.confidence = c.confidence.clamp(0.0, 1.0);
        }
        self.candidates
            .sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));
        before - self.candidates.len()
    }

    /// Deterministic synthetic episode for running the station with no
    /// pipeline output at hand (`--dummy-candidates`).
    pub fn dummy(count: usize) -> Self {
        let mut candidates = Vec::with_capacity(count);
        let mut transcript = Vec::new();
        for i in 0..count {
            let start = 30.0 + i as f64 * 90.0;
            let end = start + 28.0 + (i % 3) as f64;
            candidates.push(Candidate {
                start,
                end,
                confidence: 0.55 + 0.1 * (i % 5) as f64,
                reason: format!("matched sponsor read #{}", i + 1),
                sponsor: if i % 2 == 0 {
                    Some(format!("Sponsor {}", i / 2 + 1))
                } else {
                    None
                },
                detection_stage: match i % 4 {
                    0 => DetectionStage::FirstPass,
                    1 => DetectionStage::Verification,
                    2 => DetectionStage::TextPattern,
                    _ => DetectionStage::Fingerprint,
                },
                scope: Some(PatternScope::Global),
                pattern_id: Some(1000 + i as i64),
            });
            for k in 0..8 {
                let s = start - 10.0 + k as f64 * 6.0;
                transcript.push(TranscriptSegment {
                    start: s.max(0.0),
                    end: s.max(0.0) + 5.5,
                    text: format!("segment {k} around candidate {}", i + 1),
                });
            }
        }
        Self {
            podcast_slug: "dummy-cast".to_string(),
            episode_id: 1,
            title: Some("Synthetic review episode".to_string()),
            audio_url: None,
            duration_secs: Some(30.0 + count as f64 * 90.0 + 60.0),
            candidates,
            transcript,
        }
    }
}

pub fn load_episode_scan(path: &Path) -> Result<EpisodeScan> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read episode scan: {}", path.display()))?;
    let scan: EpisodeScan = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse episode scan: {}", path.display()))?;
    Ok(scan)
}
