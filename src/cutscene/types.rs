//! Core types for the cutscene subsystem

use thiserror::Error;

/// Error type for cutscene configuration and data loading.
///
/// Construction fails fast; anomalies during playback are recovered
/// internally and never surfaced through this type.
#[derive(Debug, Error)]
pub enum CutsceneError {
    /// No animation clip was supplied
    #[error("cutscene configuration is missing the animation clip")]
    MissingClip,
    /// No audio player was supplied
    #[error("cutscene configuration is missing the audio player")]
    MissingAudioPlayer,
    /// Design dimensions must be positive and finite
    #[error("invalid design size {width}x{height}")]
    InvalidDesignSize { width: f64, height: f64 },
    /// Caption data failed to parse
    #[error("invalid caption data: {0}")]
    InvalidCaptionData(#[from] serde_json::Error),
}

/// Result type for cutscene operations.
pub type CutsceneResult<T> = Result<T, CutsceneError>;

/// Events emitted by a `Cutscene` over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutsceneEvent {
    /// Playback finished and the completion contract ran
    Complete,
    /// The cutscene was torn down
    Destroy,
}
