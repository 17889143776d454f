//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{DisplacementParams, Rgb, VisualConfig};
use crate::scene::SceneDescriptor;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "audioscape")]
#[command(about = "Audio-reactive wireframe terrain visualizer", long_about = None)]
pub struct Args {
    /// WAV file to play; the terrain follows its spectrum
    #[arg(long, value_name = "WAV")]
    pub audio: Option<PathBuf>,

    /// Scene preset: arena (default), orb
    #[arg(long, value_name = "PRESET", default_value = "arena")]
    pub scene: String,

    /// Noise seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Displacement multiplier (0-20)
    #[arg(long, value_name = "MULTI")]
    pub multi: Option<f32>,

    /// Object scale multiplier (1-10)
    #[arg(long, value_name = "SCALE")]
    pub object_scale: Option<f32>,

    /// Object wireframe color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub object_color: Option<Rgb>,

    /// Plane wireframe color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub plane_color: Option<Rgb>,

    /// Floor rotation about X (degrees, 0-360)
    #[arg(long, value_name = "DEGREES")]
    pub plane_rotation: Option<f32>,
}

impl Args {
    /// Parse scene preset from command-line arguments
    pub fn scene_descriptor(&self) -> SceneDescriptor {
        match SceneDescriptor::by_name(&self.scene) {
            Some(descriptor) => {
                log::info!("Scene: {}", descriptor.name);
                descriptor
            }
            None => {
                log::warn!("Unknown scene preset '{}', using arena", self.scene);
                SceneDescriptor::arena()
            }
        }
    }

    /// Preset defaults with command-line overrides, clamped to range
    pub fn visual_config(&self, descriptor: &SceneDescriptor) -> VisualConfig {
        let mut config = descriptor.default_config();
        if let Some(multi) = self.multi {
            config.multi = multi;
        }
        if let Some(scale) = self.object_scale {
            config.object_scale = scale;
        }
        if let Some(color) = self.object_color {
            config.object_color = color;
        }
        if let Some(color) = self.plane_color {
            config.plane_color = color;
        }
        if let Some(degrees) = self.plane_rotation {
            config.plane_rotation_deg = degrees;
        }

        let clamped = config.clamped();
        if clamped != config {
            log::warn!("Out-of-range parameters clamped: {:?}", clamped);
        }
        clamped
    }

    pub fn displacement_params(&self) -> DisplacementParams {
        let mut params = DisplacementParams::default();
        if let Some(seed) = self.seed {
            params.noise_seed = seed;
        }
        params
    }
}
