//! Library error type.

use std::path::PathBuf;

/// Errors surfaced by audio setup, scene building and GPU initialisation.
///
/// Per-frame work never fails: degenerate spectra and out-of-range
/// parameters are handled in place.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode audio file {path}: {source}")]
    AudioFile {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("audio file {0} contains no samples")]
    EmptyAudio(PathBuf),

    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to query audio output config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("invalid analyser config: {0}")]
    InvalidAnalyser(String),

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("gpu initialisation failed: {0}")]
    Gpu(String),
}

pub type Result<T> = std::result::Result<T, Error>;
