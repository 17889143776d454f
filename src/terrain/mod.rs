//! Audio-reactive terrain: geometry, noise displacement and per-frame state.

mod displace;
mod mesh;
mod system;

// Re-export public types
pub use displace::{noise_scale, NoiseField};
pub use mesh::{Geometry, Vertex, VertexBuffer};
pub use system::{DriveMode, TerrainSystem, UpdateOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DisplacementParams;
    use crate::scene::{Scene, SceneDescriptor};

    #[test]
    fn test_frame_loop_end_to_end() {
        let descriptor = SceneDescriptor::arena();
        let config = descriptor.default_config();
        let mut scene = Scene::build(&descriptor, &config).unwrap();
        let mut terrain = TerrainSystem::new(DisplacementParams::default());
        terrain.rest(&mut scene);

        let spectrum = vec![100u8; 512];
        terrain.drive();
        terrain.update(Some(spectrum.as_slice()), &config);
        scene.set_object_scale(terrain.object_scale());
        terrain.displace(&mut scene, 0.0);

        // At phase 0 the floor vertex at the origin samples noise(0, 0)
        let floor = &scene.surfaces[1];
        let centre = floor
            .buffer
            .vertices
            .iter()
            .find(|v| v.position[0] == 0.0 && v.position[1] == 0.0)
            .unwrap();
        let expected =
            terrain.field().sample(0.0, 0.0) * terrain.noise_scale() * terrain.amplitude();
        assert_eq!(centre.position[2], expected);
        assert!(floor.buffer.is_dirty());

        let bound = terrain.noise_scale() * terrain.amplitude();
        assert!(floor.buffer.vertices.iter().all(|v| v.position[2].abs() <= bound));
        assert_eq!(scene.object().unwrap().scale, terrain.object_scale());
    }
}
