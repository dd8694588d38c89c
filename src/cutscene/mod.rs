//! Cutscene playback
//!
//! Drives an animation timeline in lock-step with scheduled audio tracks.
//! Tracks flagged as synced act as the authoritative clock while they
//! play; the rest play independently. Captions follow the synced track,
//! and a completion callback fires once the animation and all of its
//! audio have finished.

pub mod controller;
pub mod cue;
pub mod timeline;
pub mod tracker;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Cutscene, CutsceneConfig};
pub use cue::{AudioCue, CueTable};
pub use timeline::{TickOutcome, TimelineDriver};
pub use tracker::{AudioTracker, PollOutcome, TrackedAudio};
pub use types::{CutsceneError, CutsceneEvent, CutsceneResult};
