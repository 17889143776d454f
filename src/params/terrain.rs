//! Noise displacement parameters.

/// Constants for the audio-reactive noise displacement
#[derive(Debug, Clone)]
pub struct DisplacementParams {
    /// Time-scale of the noise drift along x (per millisecond)
    pub kx: f64,

    /// Time-scale of the noise drift along y (per millisecond)
    pub ky: f64,

    /// Noise scale when the upper band fraction is 0
    pub scale_out_min: f32,

    /// Noise scale when the upper band fraction is 1 (exceeded above 1)
    pub scale_out_max: f32,

    /// Amplitude before any audio has been analysed (flat surfaces)
    pub idle_amplitude: f32,

    /// Simplex noise seed
    pub noise_seed: u32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            kx: 0.0003,
            ky: 0.0001,
            scale_out_min: 0.5,
            scale_out_max: 4.0,
            idle_amplitude: 0.0,
            noise_seed: 42,
        }
    }
}
