//! audioscape library - audio-reactive noise-displaced wireframe scenes

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod spectrum;
pub mod terrain;

pub use error::{Error, Result};
