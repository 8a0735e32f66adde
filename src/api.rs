use anyhow::{Context, Result};
use serde::Serialize;

use crate::review::Correction;

/// Wire body for `POST /episodes/{podcast_slug}/{episode_id}/corrections`.
#[derive(Debug, Serialize)]
pub struct CorrectionBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub original_ad: OriginalAd,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OriginalAd {
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
}

impl CorrectionBody {
    pub fn from_correction(correction: &Correction) -> Self {
        let original = &correction.original;
        Self {
            kind: correction.kind.wire_name(),
            original_ad: OriginalAd {
                start: original.start,
                end: original.end,
                pattern_id: original.pattern_id,
                confidence: Some(original.confidence),
                reason: Some(original.reason.clone()),
                sponsor: original.sponsor.clone(),
            },
            adjusted_start: correction.adjusted_start,
            adjusted_end: correction.adjusted_end,
            notes: correction.notes.clone(),
        }
    }
}

/// Blocking submission client, called from a worker thread so the UI never
/// waits on the network. The editor only ever sees the success/failure
/// signal reflected back into its save status.
pub struct CorrectionClient {
    base: String,
    agent: ureq::Agent,
}

impl CorrectionClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    pub fn submit(
        &self,
        podcast_slug: &str,
        episode_id: i64,
        correction: &Correction,
    ) -> Result<()> {
        let url = format!(
            "{}/episodes/{}/{}/corrections",
            self.base, podcast_slug, episode_id
        );
        let body = CorrectionBody::from_correction(correction);
        self.agent
            .post(&url)
            .send_json(&body)
            .with_context(|| format!("submit correction: {url}"))?;
        Ok(())
    }
}
