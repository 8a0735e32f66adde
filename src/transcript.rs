use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One transcript line with its time range in seconds. These are the click
/// and gesture targets of the review editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn from_segments(mut segments: Vec<TranscriptSegment>) -> Self {
        segments.retain(|s| s.end > s.start);
        segments.sort_by(|a, b| {
            a.start
                .partial_cmp(&b.start)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

pub fn srt_path_for_audio(audio_path: &Path) -> Option<PathBuf> {
    let stem = audio_path.file_stem()?.to_string_lossy();
    let parent = audio_path.parent()?;
    Some(parent.join(format!("{}.srt", stem)))
}

pub fn load_srt(path: &Path) -> Option<Transcript> {
    let text = std::fs::read_to_string(path).ok()?;
    Some(parse_srt(&text))
}

pub fn parse_srt(text: &str) -> Transcript {
    let mut segments = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Optional index line before the timing line.
        let timing = if line.chars().all(|c| c.is_ascii_digit()) {
            match lines.next() {
                Some(t) => t,
                None => break,
            }
        } else {
            line
        };
        let Some((start, end)) = parse_timing_line(timing) else {
            continue;
        };
        let mut text_lines = Vec::new();
        while let Some(t) = lines.peek() {
            if t.trim().is_empty() {
                lines.next();
                break;
            }
            text_lines.push(lines.next().unwrap_or_default());
        }
        segments.push(TranscriptSegment {
            start,
            end,
            text: text_lines.join(" "),
        });
    }
    Transcript::from_segments(segments)
}

fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let mut parts = line.split("-->");
    let start = parse_timestamp_secs(parts.next()?)?;
    let end = parse_timestamp_secs(parts.next()?)?;
    (end > start).then_some((start, end))
}

fn parse_timestamp_secs(s: &str) -> Option<f64> {
    let s = s.trim().replace(',', ".");
    let mut parts = s.split(':');
    let h = parts.next()?.trim().parse::<u64>().ok()?;
    let m = parts.next()?.trim().parse::<u64>().ok()?;
    let sec = parts.next()?.trim().parse::<f64>().ok()?;
    Some((h * 3600 + m * 60) as f64 + sec)
}

pub fn format_timestamp(secs: f64) -> String {
    let secs = secs.max(0.0);
    let total = secs as u64;
    let m = total / 60;
    let s = total % 60;
    let tenths = ((secs - total as f64) * 10.0).round() as u64;
    if tenths >= 10 {
        format!("{}:{:02}.0", m + (s + 1) / 60, (s + 1) % 60)
    } else {
        format!("{m}:{s:02}.{tenths}")
    }
}
