//! Audio-reactive noise displacement.
//!
//! The animated surface is a stateless function of (position, time,
//! amplitude): wall-clock time scrolls the sample point through a continuous
//! simplex field, so consecutive frames stay coherent without any per-vertex
//! history.

use noise::{NoiseFn, Simplex};

use super::mesh::VertexBuffer;
use crate::params::DisplacementParams;
use crate::spectrum::modulate;

/// Seeded 2D simplex noise field
pub struct NoiseField {
    simplex: Simplex,
    kx: f64,
    ky: f64,
}

impl NoiseField {
    /// Create new noise field from displacement parameters
    pub fn new(params: &DisplacementParams) -> Self {
        Self {
            simplex: Simplex::new(params.noise_seed),
            kx: params.kx,
            ky: params.ky,
        }
    }

    /// Sample 2D simplex noise at position
    ///
    /// Returns value in range [-1, 1]
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        (self.simplex.get([x, y]) as f32).clamp(-1.0, 1.0)
    }

    /// Out-of-plane offset for one vertex.
    ///
    /// `z = noise(x + phase * kx, y + phase * ky) * scale * amplitude`
    pub fn displacement_z(&self, x: f32, y: f32, phase_ms: f64, scale: f32, amplitude: f32) -> f32 {
        let raw = self.sample(x as f64 + phase_ms * self.kx, y as f64 + phase_ms * self.ky);
        raw * scale * amplitude
    }

    /// Rewrite z of every vertex for the current frame and mark the buffer dirty
    pub fn displace_dynamic(
        &self,
        buffer: &mut VertexBuffer,
        phase_ms: f64,
        scale: f32,
        amplitude: f32,
    ) {
        for vertex in buffer.vertices.iter_mut() {
            let [x, y, _] = vertex.position;
            vertex.position[2] = self.displacement_z(x, y, phase_ms, scale, amplitude);
        }
        buffer.mark_dirty();
    }

    /// Resting pose: no time term and unit scale
    pub fn displace_static(&self, buffer: &mut VertexBuffer, amplitude: f32) {
        self.displace_dynamic(buffer, 0.0, 1.0, amplitude);
    }
}

/// Noise scale for an upper band fraction (linear, unclamped)
pub fn noise_scale(upper_avg_fraction: f32, params: &DisplacementParams) -> f32 {
    modulate(
        upper_avg_fraction,
        0.0,
        1.0,
        params.scale_out_min,
        params.scale_out_max,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::mesh::Geometry;

    fn field() -> NoiseField {
        NoiseField::new(&DisplacementParams::default())
    }

    fn plane_buffer() -> VertexBuffer {
        VertexBuffer::new(Geometry::plane(2000.0, 2000.0, 20, 20).vertices)
    }

    #[test]
    fn test_noise_range() {
        let field = field();
        for i in 0..500 {
            let v = field.sample(i as f64 * 0.37 - 90.0, i as f64 * 1.13 + 4.0);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_displacement_is_deterministic() {
        let a = field();
        let b = field();
        let phase = 1_700_000_000_000.0;

        for &(x, y) in &[(0.0, 0.0), (-980.0, 420.0), (13.5, -7.25)] {
            let za = a.displacement_z(x, y, phase, 1.87, 3.92);
            let zb = b.displacement_z(x, y, phase, 1.87, 3.92);
            assert_eq!(za.to_bits(), zb.to_bits());
        }
    }

    #[test]
    fn test_shared_grid_stays_synchronized() {
        let field = field();
        let mut floor = plane_buffer();
        let mut ceiling = plane_buffer();
        let phase = 123_456.0;

        field.displace_dynamic(&mut floor, phase, 2.25, 5.0);
        field.displace_dynamic(&mut ceiling, phase, 2.25, 5.0);

        for (f, c) in floor.vertices.iter().zip(&ceiling.vertices) {
            assert_eq!(f.position[2].to_bits(), c.position[2].to_bits());
        }
    }

    #[test]
    fn test_displacement_only_touches_z() {
        let field = field();
        let mut buffer = plane_buffer();
        let before = buffer.vertices.clone();
        buffer.take_dirty();

        field.displace_dynamic(&mut buffer, 5_000.0, 4.0, 10.0);

        assert!(buffer.is_dirty());
        for (old, new) in before.iter().zip(&buffer.vertices) {
            assert_eq!(old.position[0], new.position[0]);
            assert_eq!(old.position[1], new.position[1]);
            assert!(new.position[2].abs() <= 40.0);
        }
    }

    #[test]
    fn test_static_pass_with_idle_amplitude_is_flat() {
        let field = field();
        let mut buffer = plane_buffer();

        field.displace_static(&mut buffer, 0.0);
        assert!(buffer.vertices.iter().all(|v| v.position[2] == 0.0));

        field.displace_static(&mut buffer, 1.0);
        for v in &buffer.vertices {
            let [x, y, z] = v.position;
            assert_eq!(z, field.sample(x as f64, y as f64));
        }
    }

    #[test]
    fn test_zero_amplitude_flattens() {
        let field = field();
        let mut buffer = plane_buffer();
        field.displace_dynamic(&mut buffer, 99_999.0, 4.0, 0.0);
        assert!(buffer.vertices.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn test_reference_scenario_at_origin() {
        let params = DisplacementParams::default();
        let field = NoiseField::new(&params);

        let fraction = 100.0 / 255.0;
        let amplitude = fraction * 10.0;
        let scale = noise_scale(fraction, &params);
        assert!((scale - 1.8725).abs() < 1e-3);

        let z = field.displacement_z(0.0, 0.0, 0.0, scale, amplitude);
        let expected = field.sample(0.0, 0.0) * scale * amplitude;
        assert_eq!(z, expected);
        assert!(z.abs() <= scale * amplitude);
    }

    #[test]
    fn test_phase_scrolls_the_field() {
        let field = field();
        // Advancing the phase by dt shifts the sample point by (dt*kx, dt*ky)
        let dt = 10_000.0;
        let shifted = field.displacement_z(0.0, 0.0, dt, 1.0, 1.0);
        let direct = field.sample(dt * 0.0003, dt * 0.0001);
        assert_eq!(shifted, direct);
    }
}
