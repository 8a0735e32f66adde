use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwapOption;
use atomic_float::AtomicF32;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Decoded episode audio. Podcast review only needs a mono mixdown; the
/// buffer keeps its source rate and the output callback steps through it
/// fractionally to match the device rate.
#[derive(Debug)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

pub struct SharedAudio {
    pub samples: ArcSwapOption<AudioBuffer>,
    pub vol: AtomicF32, // 0.0..1.0 linear gain
    pub playing: AtomicBool,
    pub play_pos: AtomicUsize, // buffer-sample units
    pub play_pos_f: AtomicF32, // fractional position for resampling
    pub out_sample_rate: u32,
}

pub struct AudioEngine {
    _stream: Option<cpal::Stream>,
    pub shared: Arc<SharedAudio>,
}

impl AudioEngine {
    fn new_shared(out_sample_rate: u32) -> Arc<SharedAudio> {
        Arc::new(SharedAudio {
            samples: ArcSwapOption::from(None),
            vol: AtomicF32::new(1.0),
            playing: AtomicBool::new(false),
            play_pos: AtomicUsize::new(0),
            play_pos_f: AtomicF32::new(0.0),
            out_sample_rate,
        })
    }

    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("No default output device")?;
        let cfg = device
            .default_output_config()
            .context("No default output config")?;

        let shared = Self::new_shared(cfg.sample_rate());

        let stream = match cfg.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &cfg.into(), shared.clone())?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &cfg.into(), shared.clone())?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &cfg.into(), shared.clone())?
            }
            _ => anyhow::bail!("Unsupported sample format"),
        };

        Ok(Self {
            _stream: Some(stream),
            shared,
        })
    }

    /// Same shared state with no device stream. Position only moves through
    /// seeks, which is what the headless tests need.
    pub fn new_for_test() -> Self {
        Self {
            _stream: None,
            shared: Self::new_shared(48_000),
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        cfg: &cpal::StreamConfig,
        shared: Arc<SharedAudio>,
    ) -> Result<cpal::Stream>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        let channels = cfg.channels as usize;
        let out_rate = shared.out_sample_rate.max(1) as f32;
        let err_fn = |e| eprintln!("cpal stream error: {e}");
        let stream = device.build_output_stream(
            cfg,
            move |data: &mut [T], _| {
                let silence = |data: &mut [T]| {
                    for s in data.iter_mut() {
                        *s = T::from_sample(0.0);
                    }
                };
                let maybe_samples = shared.samples.load();
                if !shared.playing.load(Ordering::Relaxed) {
                    silence(data);
                    return;
                }
                let Some(buf) = maybe_samples.as_ref() else {
                    silence(data);
                    return;
                };
                let len = buf.len();
                if len == 0 {
                    silence(data);
                    return;
                }
                let vol = shared.vol.load(Ordering::Relaxed);
                let step = buf.sample_rate as f32 / out_rate;
                let mut pos_f = shared.play_pos_f.load(Ordering::Relaxed);
                if !pos_f.is_finite() || pos_f < 0.0 {
                    pos_f = 0.0;
                }
                for frame in data.chunks_mut(channels) {
                    let pos = pos_f.floor() as usize;
                    if pos >= len {
                        shared.playing.store(false, Ordering::Relaxed);
                        for ch in frame.iter_mut() {
                            *ch = T::from_sample(0.0);
                        }
                        continue;
                    }
                    let i1 = (pos + 1).min(len - 1);
                    let t = (pos_f - pos as f32).clamp(0.0, 1.0);
                    let s_lin = buf.samples[pos] * (1.0 - t) + buf.samples[i1] * t;
                    let s = (s_lin * vol).clamp(-1.0, 1.0);
                    for ch in frame.iter_mut() {
                        *ch = T::from_sample(s);
                    }
                    pos_f += step;
                }
                shared
                    .play_pos
                    .store(pos_f.floor() as usize, Ordering::Relaxed);
                shared.play_pos_f.store(pos_f, Ordering::Relaxed);
            },
            err_fn,
            None,
        )?;
        stream.play()?;
        Ok(stream)
    }

    pub fn set_samples(&self, samples: Arc<AudioBuffer>) {
        self.shared.samples.store(Some(samples));
        self.shared.play_pos.store(0, Ordering::Relaxed);
        self.shared.play_pos_f.store(0.0, Ordering::Relaxed);
    }

    /// Drop the loaded media and stop playback, e.g. when the station
    /// switches episodes before the next buffer is ready.
    pub fn clear_samples(&self) {
        self.shared.playing.store(false, Ordering::Relaxed);
        self.shared.samples.store(None);
        self.shared.play_pos.store(0, Ordering::Relaxed);
        self.shared.play_pos_f.store(0.0, Ordering::Relaxed);
    }

    pub fn set_volume(&self, v: f32) {
        self.shared.vol.store(v.clamp(0.0, 1.0), Ordering::Relaxed);
    }

    pub fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Relaxed)
    }

    pub fn play(&self) {
        let Some(buf) = self.shared.samples.load().as_ref().cloned() else {
            return;
        };
        // Play from the end rewinds so the button always does something.
        let pos = self.shared.play_pos.load(Ordering::Relaxed);
        if pos >= buf.len() {
            self.shared.play_pos.store(0, Ordering::Relaxed);
            self.shared.play_pos_f.store(0.0, Ordering::Relaxed);
        }
        self.shared.playing.store(true, Ordering::Relaxed);
    }

    pub fn pause(&self) {
        self.shared.playing.store(false, Ordering::Relaxed);
    }

    /// Duration of the loaded buffer; `None` while nothing is loaded.
    pub fn duration_secs(&self) -> Option<f64> {
        self.shared
            .samples
            .load()
            .as_ref()
            .map(|b| b.duration_secs())
    }

    pub fn position_secs(&self) -> f64 {
        let sr = self
            .shared
            .samples
            .load()
            .as_ref()
            .map(|b| b.sample_rate)
            .unwrap_or(self.shared.out_sample_rate)
            .max(1);
        self.shared.play_pos_f.load(Ordering::Relaxed) as f64 / sr as f64
    }

    pub fn seek_to_secs(&self, t: f64) {
        let Some(buf) = self.shared.samples.load().as_ref().cloned() else {
            return;
        };
        let sr = buf.sample_rate.max(1) as f64;
        let pos = ((t.max(0.0) * sr) as usize).min(buf.len());
        self.shared.play_pos.store(pos, Ordering::Relaxed);
        self.shared.play_pos_f.store(pos as f32, Ordering::Relaxed);
    }
}
