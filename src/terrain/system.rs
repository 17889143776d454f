//! Per-frame terrain state: drive mode, amplitude and object scale.

use super::displace::{noise_scale, NoiseField};
use crate::params::{DisplacementParams, VisualConfig};
use crate::scene::Scene;
use crate::spectrum::{band_statistics, BandStats};

/// Whether audio drives the terrain yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// No audio loaded: amplitude holds its idle value
    #[default]
    Idle,
    /// Audio loaded: amplitude follows the spectrum
    Driven,
}

/// Outcome of one update step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// Idle mode, nothing analysed
    Idle,
    /// Driven but the analyser had nothing to offer; previous values kept
    Held,
    /// Spectrum too short for statistics; frame skipped
    Skipped,
    /// Statistics applied
    Applied(BandStats),
}

/// Audio-reactive terrain state shared by the update and displacement steps
pub struct TerrainSystem {
    pub params: DisplacementParams,
    field: NoiseField,
    mode: DriveMode,
    amplitude: f32,
    upper_avg_fraction: f32,
    object_scale: f32,
}

impl TerrainSystem {
    /// Create new terrain system in idle mode
    pub fn new(params: DisplacementParams) -> Self {
        let field = NoiseField::new(&params);
        Self {
            amplitude: params.idle_amplitude,
            upper_avg_fraction: 0.0,
            object_scale: 1.0,
            mode: DriveMode::Idle,
            field,
            params,
        }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Current displacement amplitude
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Upper band fraction from the latest applied spectrum
    pub fn upper_avg_fraction(&self) -> f32 {
        self.upper_avg_fraction
    }

    /// Object scale computed by the latest update
    pub fn object_scale(&self) -> f32 {
        self.object_scale
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    /// Switch to audio-driven mode (one way; repeated calls are no-ops)
    pub fn drive(&mut self) {
        if self.mode == DriveMode::Idle {
            log::info!("Terrain now driven by audio");
            self.mode = DriveMode::Driven;
        }
    }

    /// Update step: derive amplitude and object scale from this frame's spectrum.
    ///
    /// `spectrum` is `None` when the analyser is not ready yet.
    pub fn update(&mut self, spectrum: Option<&[u8]>, config: &VisualConfig) -> UpdateOutcome {
        let config = config.clamped();

        if self.mode == DriveMode::Idle {
            self.object_scale = config.object_scale;
            return UpdateOutcome::Idle;
        }

        let Some(sample) = spectrum else {
            return UpdateOutcome::Held;
        };

        let Some(stats) = band_statistics(sample) else {
            log::trace!("Skipping degenerate spectrum of {} bins", sample.len());
            return UpdateOutcome::Skipped;
        };

        self.amplitude = stats.lower_avg_fraction * config.multi;
        self.upper_avg_fraction = stats.upper_avg_fraction;
        self.object_scale = stats.lower_avg_fraction * config.object_scale;

        UpdateOutcome::Applied(stats)
    }

    /// Noise scale for the current upper band fraction
    pub fn noise_scale(&self) -> f32 {
        noise_scale(self.upper_avg_fraction, &self.params)
    }

    /// Displacement step: rewrite every displaced surface for this frame.
    ///
    /// In idle mode the resting pose is kept, so nothing is rewritten.
    pub fn displace(&self, scene: &mut Scene, phase_ms: f64) {
        if self.mode == DriveMode::Idle {
            return;
        }
        let scale = self.noise_scale();
        for surface in scene.displaced_surfaces_mut() {
            self.field
                .displace_dynamic(&mut surface.buffer, phase_ms, scale, self.amplitude);
        }
    }

    /// Static pass: put every displaced surface in its resting pose
    pub fn rest(&self, scene: &mut Scene) {
        for surface in scene.displaced_surfaces_mut() {
            self.field
                .displace_static(&mut surface.buffer, self.params.idle_amplitude);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneDescriptor;

    fn system() -> TerrainSystem {
        TerrainSystem::new(DisplacementParams::default())
    }

    #[test]
    fn test_idle_mode_ignores_spectrum() {
        let mut terrain = system();
        let config = VisualConfig::default();

        let outcome = terrain.update(Some(&[255u8; 256][..]), &config);
        assert_eq!(outcome, UpdateOutcome::Idle);
        assert_eq!(terrain.amplitude(), 0.0);
        assert_eq!(terrain.object_scale(), config.object_scale);
    }

    #[test]
    fn test_drive_is_one_way() {
        let mut terrain = system();
        assert_eq!(terrain.mode(), DriveMode::Idle);
        terrain.drive();
        terrain.drive();
        assert_eq!(terrain.mode(), DriveMode::Driven);
    }

    #[test]
    fn test_amplitude_update() {
        let mut terrain = system();
        terrain.drive();
        let config = VisualConfig::default();

        let outcome = terrain.update(Some(vec![100u8; 512].as_slice()), &config);
        let UpdateOutcome::Applied(stats) = outcome else {
            panic!("expected statistics, got {:?}", outcome);
        };

        assert!((terrain.amplitude() - stats.lower_avg_fraction * 10.0).abs() < 1e-6);
        assert!((terrain.amplitude() - 3.922).abs() < 1e-3);
        assert!((terrain.object_scale() - stats.lower_avg_fraction * 10.0).abs() < 1e-6);
        assert!((terrain.noise_scale() - (0.5 + stats.upper_avg_fraction * 3.5)).abs() < 1e-6);
    }

    #[test]
    fn test_silence_flattens() {
        let mut terrain = system();
        terrain.drive();
        terrain.update(Some(&[100u8; 64][..]), &VisualConfig::default());
        assert!(terrain.amplitude() > 0.0);

        terrain.update(Some(&[0u8; 64][..]), &VisualConfig::default());
        assert_eq!(terrain.amplitude(), 0.0);
    }

    #[test]
    fn test_missing_and_degenerate_spectra_hold_state() {
        let mut terrain = system();
        terrain.drive();
        let config = VisualConfig::default();
        terrain.update(Some(&[50u8; 128][..]), &config);
        let amplitude = terrain.amplitude();

        assert_eq!(terrain.update(None, &config), UpdateOutcome::Held);
        assert_eq!(terrain.update(Some(&[][..]), &config), UpdateOutcome::Skipped);
        assert_eq!(terrain.update(Some(&[9][..]), &config), UpdateOutcome::Skipped);
        assert_eq!(terrain.amplitude(), amplitude);
    }

    #[test]
    fn test_multiplier_is_clamped() {
        let mut terrain = system();
        terrain.drive();
        let config = VisualConfig {
            multi: 100.0,
            ..VisualConfig::default()
        };
        let outcome = terrain.update(Some(&[10u8; 8][..]), &config);
        let UpdateOutcome::Applied(stats) = outcome else {
            panic!("expected statistics");
        };
        assert!((terrain.amplitude() - stats.lower_avg_fraction * 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_displace_keeps_shared_surfaces_in_sync() {
        let mut terrain = system();
        let mut a = crate::scene::Scene::build(&SceneDescriptor::arena(), &VisualConfig::default())
            .unwrap();
        let mut b = crate::scene::Scene::build(&SceneDescriptor::arena(), &VisualConfig::default())
            .unwrap();

        terrain.rest(&mut a);
        assert!(a.surfaces[1].buffer.vertices.iter().all(|v| v.position[2] == 0.0));

        terrain.drive();
        terrain.update(Some(&[180u8; 256][..]), &VisualConfig::default());
        terrain.displace(&mut a, 42_000.0);
        terrain.displace(&mut b, 42_000.0);

        for (sa, sb) in a.surfaces.iter().zip(&b.surfaces) {
            for (va, vb) in sa.buffer.vertices.iter().zip(&sb.buffer.vertices) {
                assert_eq!(va.position[2].to_bits(), vb.position[2].to_bits());
            }
        }
        assert!(a.surfaces[1]
            .buffer
            .vertices
            .iter()
            .any(|v| v.position[2] != 0.0));
        // Object surface is never displaced
        assert!(a.surfaces[0]
            .buffer
            .vertices
            .iter()
            .zip(&SceneDescriptor::arena().surfaces[0].geometry.build().vertices)
            .all(|(v, orig)| v == orig));
    }

    #[test]
    fn test_idle_displace_is_noop() {
        let terrain = system();
        let mut scene = crate::scene::Scene::build(&SceneDescriptor::orb(), &VisualConfig::orb())
            .unwrap();
        terrain.rest(&mut scene);
        for surface in &mut scene.surfaces {
            surface.buffer.take_dirty();
        }

        terrain.displace(&mut scene, 1_000.0);
        assert!(scene.surfaces.iter().all(|s| !s.buffer.is_dirty()));
    }
}
