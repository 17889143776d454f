//! Audio playback and spectrum analysis.
//!
//! Plays a decoded WAV file through cpal while tapping the mono mixdown, and
//! turns the latest tapped window into a byte spectrum on demand.

mod analyser;
mod system;

// Re-export public types
pub use analyser::{blackman_window, Analyser};
pub use system::{AudioSystem, Playback, SampleTap, Track};
