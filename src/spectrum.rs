//! Band statistics over a byte spectrum.
//!
//! A spectrum sample is split into a lower and an upper half. Each half's mean
//! magnitude is normalised by the half's length, giving two small scalars that
//! drive the terrain amplitude and the noise scale.

/// Per-frame statistics derived from one spectrum sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandStats {
    /// Mean of the lower half divided by the lower half's length
    pub lower_avg_fraction: f32,

    /// Mean of the upper half divided by the upper half's length
    pub upper_avg_fraction: f32,

    /// Peak of the lower half divided by the lower half's length
    pub lower_peak_fraction: f32,

    /// Peak of the upper half divided by the upper half's length
    pub upper_peak_fraction: f32,
}

/// Split a spectrum into its lower and upper halves.
///
/// With `n = sample.len()` and `split = n / 2 - 1`, the halves are
/// `sample[..split]` and `sample[split..n - 1]`. The final bin is never part
/// of either half. Returns `None` when either half would be empty (n < 3).
pub fn split_halves(sample: &[u8]) -> Option<(&[u8], &[u8])> {
    let n = sample.len();
    let split = (n / 2).checked_sub(1)?;
    let end = n.checked_sub(1)?;

    let lower = &sample[..split];
    let upper = &sample[split..end];
    if lower.is_empty() || upper.is_empty() {
        return None;
    }
    Some((lower, upper))
}

/// Compute band statistics for one spectrum sample.
///
/// Returns `None` for degenerate samples (fewer than 3 bins); callers treat
/// that as "skip this frame".
pub fn band_statistics(sample: &[u8]) -> Option<BandStats> {
    let (lower, upper) = split_halves(sample)?;

    let lower_len = lower.len() as f32;
    let upper_len = upper.len() as f32;

    Some(BandStats {
        lower_avg_fraction: mean(lower)? / lower_len,
        upper_avg_fraction: mean(upper)? / upper_len,
        lower_peak_fraction: peak(lower)? as f32 / lower_len,
        upper_peak_fraction: peak(upper)? as f32 / upper_len,
    })
}

/// Arithmetic mean of a byte slice (`None` when empty)
pub fn mean(values: &[u8]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    Some(sum as f32 / values.len() as f32)
}

/// Largest value of a byte slice (`None` when empty)
pub fn peak(values: &[u8]) -> Option<u8> {
    values.iter().copied().max()
}

/// Position of `value` within `[in_min, in_max]` as a fraction (unclamped)
pub fn fractionate(value: f32, in_min: f32, in_max: f32) -> f32 {
    (value - in_min) / (in_max - in_min)
}

/// Linearly remap `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping: inputs outside the source range extrapolate.
pub fn modulate(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + fractionate(value, in_min, in_max) * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_halves_lengths() {
        let sample = vec![0u8; 512];
        let (lower, upper) = split_halves(&sample).unwrap();

        // Last bin is dropped, split sits one below the midpoint
        assert_eq!(lower.len(), 255);
        assert_eq!(upper.len(), 256);
    }

    #[test]
    fn test_uniform_spectrum() {
        for &n in &[4usize, 16, 256, 512] {
            let k = 37u8;
            let sample = vec![k; n];
            let stats = band_statistics(&sample).unwrap();

            let lower_len = (n / 2 - 1) as f32;
            let upper_len = (n / 2) as f32;
            assert!((stats.lower_avg_fraction - k as f32 / lower_len).abs() < 1e-6);
            assert!((stats.upper_avg_fraction - k as f32 / upper_len).abs() < 1e-6);
            assert_eq!(stats.lower_peak_fraction, stats.lower_avg_fraction);
        }
    }

    #[test]
    fn test_silence() {
        let stats = band_statistics(&[0u8; 256]).unwrap();
        assert_eq!(stats.lower_avg_fraction, 0.0);
        assert_eq!(stats.upper_avg_fraction, 0.0);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(band_statistics(&[]).is_none());
        assert!(band_statistics(&[200]).is_none());
        assert!(band_statistics(&[200, 10]).is_none());
        // Smallest usable sample: one bin per half
        let stats = band_statistics(&[10, 20, 30, 40]).unwrap();
        assert_eq!(stats.lower_avg_fraction, 10.0);
        assert!((stats.upper_avg_fraction - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_halves_are_independent() {
        let mut sample = vec![0u8; 64];
        for v in &mut sample[31..63] {
            *v = 255;
        }
        let stats = band_statistics(&sample).unwrap();
        assert_eq!(stats.lower_avg_fraction, 0.0);
        assert!((stats.upper_avg_fraction - 255.0 / 32.0).abs() < 1e-5);
    }

    #[test]
    fn test_reference_scenario() {
        let sample = vec![100u8; 512];
        let stats = band_statistics(&sample).unwrap();
        assert!((stats.lower_avg_fraction - 0.392_156_9).abs() < 1e-5);

        let amplitude = stats.lower_avg_fraction * 10.0;
        assert!((amplitude - 3.922).abs() < 1e-3);
    }

    #[test]
    fn test_modulate_points() {
        assert!((modulate(0.0, 0.0, 1.0, 0.5, 4.0) - 0.5).abs() < 1e-6);
        assert!((modulate(1.0, 0.0, 1.0, 0.5, 4.0) - 4.0).abs() < 1e-6);
        assert!((modulate(0.5, 0.0, 1.0, 0.5, 4.0) - 2.25).abs() < 1e-6);
        assert!((modulate(0.3922, 0.0, 1.0, 0.5, 4.0) - 1.8727).abs() < 1e-3);
    }

    #[test]
    fn test_modulate_is_unclamped() {
        assert!((modulate(2.0, 0.0, 1.0, 0.5, 4.0) - 7.5).abs() < 1e-6);
        assert!((modulate(-1.0, 0.0, 1.0, 0.5, 4.0) + 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_and_peak() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1, 2, 3]), Some(2.0));
        assert_eq!(peak(&[]), None);
        assert_eq!(peak(&[4, 9, 2]), Some(9));
    }
}
