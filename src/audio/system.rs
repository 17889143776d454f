//! Audio system: WAV decoding, playback and the analyser tap.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::analyser::Analyser;
use crate::error::{Error, Result};
use crate::params::AnalyserConfig;

/// Mono samples most recently sent to the output device
pub type SampleTap = Arc<Mutex<Vec<f32>>>;

/// Decoded audio file (interleaved samples in [-1, 1])
#[derive(Debug, Clone)]
pub struct Track {
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl Track {
    /// Decode a WAV file (integer or float samples, any channel count)
    pub fn from_wav(path: &Path) -> Result<Self> {
        let audio_err = |source| Error::AudioFile {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = hound::WavReader::open(path).map_err(audio_err)?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(audio_err)?,
            hound::SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(audio_err)?
            }
        };

        if samples.is_empty() {
            return Err(Error::EmptyAudio(path.to_path_buf()));
        }

        Ok(Self {
            samples,
            channels: spec.channels.max(1) as usize,
            sample_rate: spec.sample_rate,
        })
    }

    /// Number of sample frames (one sample per channel each)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate.max(1) as f32
    }
}

/// Play-once cursor over a track, resampled to the device rate
pub struct Playback {
    track: Track,
    cursor: f64,
    step: f64,
}

impl Playback {
    pub fn new(track: Track, device_rate: u32) -> Self {
        let step = track.sample_rate as f64 / device_rate.max(1) as f64;
        Self {
            track,
            cursor: 0.0,
            step,
        }
    }

    pub fn finished(&self) -> bool {
        self.cursor as usize >= self.track.frames()
    }

    /// Fill an interleaved output buffer, appending the mono mixdown to `mono`.
    ///
    /// Output channels beyond the track's reuse its last channel. After the
    /// end of the track everything is silence.
    pub fn fill(&mut self, data: &mut [f32], out_channels: usize, mono: &mut Vec<f32>) {
        let out_channels = out_channels.max(1);
        let channels = self.track.channels;
        let frames = self.track.frames();

        for frame in data.chunks_mut(out_channels) {
            let index = self.cursor as usize;
            if index >= frames {
                frame.fill(0.0);
                mono.push(0.0);
                continue;
            }

            let source = &self.track.samples[index * channels..(index + 1) * channels];
            for (c, out) in frame.iter_mut().enumerate() {
                *out = source[c.min(channels - 1)];
            }
            mono.push(source.iter().sum::<f32>() / channels as f32);

            self.cursor += self.step;
        }
    }
}

/// Keep only the newest `capacity` samples
fn trim_tap(samples: &mut Vec<f32>, capacity: usize) {
    if samples.len() > capacity {
        let excess = samples.len() - capacity;
        samples.drain(..excess);
    }
}

/// Audio system managing playback and spectrum analysis
pub struct AudioSystem {
    /// Mono tap written by the output callback
    tap: SampleTap,

    analyser: Analyser,

    /// Latest byte spectrum
    spectrum: Vec<u8>,

    /// Local copy of the tap, reused every frame
    scratch: Vec<f32>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Decode `path` and start playing it on the default output device
    pub fn load(path: impl Into<PathBuf>, analyser_config: AnalyserConfig) -> Result<Self> {
        let path = path.into();
        let analyser = Analyser::new(analyser_config)?;
        let track = Track::from_wav(&path)?;

        log::info!(
            "Audio file: {} ({} Hz, {} ch, {:.1}s)",
            path.display(),
            track.sample_rate,
            track.channels,
            track.duration_secs()
        );

        // Setup audio output device
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
        let config = device.default_output_config()?;
        let out_channels = config.channels() as usize;
        let device_rate = config.sample_rate().0;

        log::info!(
            "Audio: {} @ {}Hz, {} ch",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            device_rate,
            out_channels
        );

        let tap: SampleTap = Arc::new(Mutex::new(Vec::new()));
        let tap_callback = Arc::clone(&tap);
        let capacity = analyser.config().fft_size * 4;
        let mut playback = Playback::new(track, device_rate);
        let mut mono = Vec::new();
        let mut logged_end = false;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                mono.clear();
                playback.fill(data, out_channels, &mut mono);

                if playback.finished() && !logged_end {
                    log::info!("Audio playback finished");
                    logged_end = true;
                }

                let mut tap = tap_callback.lock().unwrap_or_else(PoisonError::into_inner);
                tap.extend_from_slice(&mono);
                trim_tap(&mut tap, capacity);
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        let bins = analyser.frequency_bin_count();
        Ok(Self {
            tap,
            analyser,
            spectrum: vec![0; bins],
            scratch: Vec::with_capacity(capacity),
            _stream: stream,
        })
    }

    /// Analyse the latest played samples.
    ///
    /// Returns `None` until the device has consumed any audio.
    pub fn spectrum(&mut self) -> Option<&[u8]> {
        {
            let tap = self.tap.lock().unwrap_or_else(PoisonError::into_inner);
            if tap.is_empty() {
                return None;
            }
            self.scratch.clear();
            self.scratch.extend_from_slice(&tap);
        }

        self.analyser.process(&self.scratch, &mut self.spectrum);
        Some(self.spectrum.as_slice())
    }
}
