//! Spectrum analyser configuration.

/// Analyser settings mirroring a browser-style byte frequency analyser
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size (must be power of 2)
    /// Yields fft_size / 2 frequency bins
    pub fft_size: usize,

    /// Exponential smoothing between frames (0 = none, 1 = frozen)
    pub smoothing: f32,

    /// Decibel value mapped to byte 0
    pub min_db: f32,

    /// Decibel value mapped to byte 255
    pub max_db: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 512,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins produced per frame
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(format!(
                "FFT size must be a power of 2 in 32..=32768, got {}",
                self.fft_size
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(format!(
                "Smoothing must be within [0, 1], got {}",
                self.smoothing
            ));
        }
        if self.min_db >= self.max_db {
            return Err(format!(
                "min_db ({}) must be below max_db ({})",
                self.min_db, self.max_db
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalyserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frequency_bin_count(), 256);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AnalyserConfig::default();
        config.fft_size = 500;
        assert!(config.validate().is_err());

        let mut config = AnalyserConfig::default();
        config.smoothing = 1.5;
        assert!(config.validate().is_err());

        let mut config = AnalyserConfig::default();
        config.min_db = -20.0;
        assert!(config.validate().is_err());
    }
}
