// stagecue library
// Cutscene playback: audio-synced animation timelines with captions

pub mod audio;
pub mod captions;
pub mod cutscene;
pub mod display;

pub use audio::{AudioHandle, AudioPlayer, PlayOptions};
pub use captions::{CaptionLine, CaptionPlayer, CaptionSink, NullCaptions};
pub use cutscene::{
    AudioCue, Cutscene, CutsceneConfig, CutsceneError, CutsceneEvent, CutsceneResult,
};
pub use display::{AnimatableTimeline, FrameTimeline, StageLayout};
