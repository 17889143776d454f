//! Parameter definitions with documented ranges and semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (milliseconds, degrees, world units)
//! - Documented ranges and defaults
//! - Clamping instead of failure for user-facing values

mod audio;
mod render;
mod terrain;
mod visual;

// Re-export all types
pub use audio::AnalyserConfig;
pub use render::{OrbitCamera, RenderConfig};
pub use terrain::DisplacementParams;
pub use visual::{
    Rgb, VisualConfig, MULTI_RANGE, OBJECT_SCALE_RANGE, PLANE_ROTATION_RANGE,
};
