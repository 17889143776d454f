//! Byte frequency analyser (windowed FFT, smoothing, decibel mapping).

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::error::{Error, Result};
use crate::params::AnalyserConfig;

/// Converts the latest time-domain window into one byte per frequency bin
pub struct Analyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl Analyser {
    /// Create analyser, validating the configuration
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidAnalyser)?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| blackman_window(i, config.fft_size))
            .collect();

        Ok(Self {
            buffer: vec![Complex::new(0.0, 0.0); config.fft_size],
            smoothed: vec![0.0; config.frequency_bin_count()],
            fft,
            window,
            config,
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Number of bytes produced per frame
    pub fn frequency_bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    /// Analyse the most recent `fft_size` samples of `samples` into `out`.
    ///
    /// Shorter histories are zero-padded at the front. Writes
    /// `min(out.len(), frequency_bin_count())` bytes.
    pub fn process(&mut self, samples: &[f32], out: &mut [u8]) {
        let size = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(size)..];
        let pad = size - recent.len();

        // Apply window
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let db_range = self.config.max_db - self.config.min_db;
        let norm = 1.0 / size as f32;

        for (bin, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.buffer[bin].norm() * norm;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
        }

        for (byte, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            *byte = to_byte(magnitude, self.config.min_db, db_range);
        }
    }
}

/// Map a linear magnitude onto 0..=255 through the decibel window
fn to_byte(magnitude: f32, min_db: f32, db_range: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_db) / db_range;
    scaled.floor().clamp(0.0, 255.0) as u8
}

/// Blackman window function for FFT analysis
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}
