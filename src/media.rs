use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use crate::audio::AudioBuffer;

pub const SUPPORTED_EXTS: &[&str] = &["wav", "mp3", "m4a", "aac", "ogg"];

/// Load episode audio from a local path or an http(s) URL and decode it to
/// a mono buffer. The transport is opaque to the editor; the station only
/// needs a seekable in-memory buffer.
pub fn load_media(source: &str) -> Result<AudioBuffer> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let bytes = fetch_bytes(source)?;
        decode_bytes(bytes, ext_of(source))
    } else {
        let path = Path::new(source);
        let bytes = std::fs::read(path)
            .with_context(|| format!("read audio file: {}", path.display()))?;
        decode_bytes(bytes, ext_of(source))
    }
}

fn ext_of(source: &str) -> Option<&str> {
    let tail = source.rsplit('/').next().unwrap_or(source);
    let tail = tail.split('?').next().unwrap_or(tail);
    let (_, ext) = tail.rsplit_once('.')?;
    SUPPORTED_EXTS
        .iter()
        .find(|e| ext.eq_ignore_ascii_case(e))
        .copied()
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = ureq::get(url)
        .call()
        .with_context(|| format!("fetch audio: {url}"))?;
    let mut bytes = Vec::new();
    resp.into_body()
        .into_reader()
        .read_to_end(&mut bytes)
        .with_context(|| format!("read audio body: {url}"))?;
    Ok(bytes)
}

pub fn decode_bytes(bytes: Vec<u8>, ext_hint: Option<&str>) -> Result<AudioBuffer> {
    let mss = MediaSourceStream::new(Box::new(std::io::Cursor::new(bytes)), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = ext_hint {
        hint.with_extension(ext);
    }
    let probed = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("probe audio container")?;
    let mut format = probed.format;
    let track = format.default_track().context("no default track")?.clone();
    let mut decoder = get_codecs().make(&track.codec_params, &DecoderOptions::default())?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);

    let mut mono: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(err) => return Err(err.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }
        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if sample_rate == 0 {
            sample_rate = decoded.spec().rate;
        }
        let channels = decoded.spec().channels.count().max(1);
        let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
        buf.copy_interleaved_ref(decoded);
        for frame in buf.samples().chunks(channels) {
            let mut acc = 0.0f32;
            for &v in frame {
                acc += v;
            }
            mono.push(acc / channels as f32);
        }
    }
    if sample_rate == 0 {
        anyhow::bail!("unknown sample rate");
    }
    Ok(AudioBuffer::new(mono, sample_rate))
}

/// Quiet synthetic tone used by the dummy episode so playback controls work
/// with no media on disk.
pub fn synth_tone(duration_secs: f64, sample_rate: u32) -> AudioBuffer {
    let sr = sample_rate.max(1);
    let frames = (duration_secs.max(0.0) * sr as f64) as usize;
    let mut samples = Vec::with_capacity(frames);
    for i in 0..frames {
        let t = i as f32 / sr as f32;
        samples.push((t * 220.0 * std::f32::consts::TAU).sin() * 0.15);
    }
    AudioBuffer::new(samples, sr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ext_hint_parses_urls_and_paths() {
        assert_eq!(ext_of("https://cdn.example/ep/123.mp3?sig=abc"), Some("mp3"));
        assert_eq!(ext_of("/tmp/show.WAV"), Some("wav"));
        assert_eq!(ext_of("no-extension"), None);
        assert_eq!(ext_of("weird.xyz"), None);
    }

    #[test]
    fn synth_tone_length_matches_duration() {
        let buf = synth_tone(2.0, 8_000);
        assert_eq!(buf.len(), 16_000);
        assert!((buf.duration_secs() - 2.0).abs() < 1e-9);
    }
}
