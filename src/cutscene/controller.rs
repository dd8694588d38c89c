//! Cutscene lifecycle and public API
//!
//! `Cutscene` owns the timeline driver and the injected collaborators, and
//! exposes the host-facing contract: start, per-frame update, stop,
//! resize, destroy.

use crate::audio::AudioPlayer;
use crate::captions::{CaptionSink, NullCaptions};
use crate::display::{AnimatableTimeline, StageLayout};

use super::cue::AudioCue;
use super::timeline::{TickOutcome, TimelineDriver};
use super::types::{CutsceneError, CutsceneEvent, CutsceneResult};

/// Construction options for a cutscene.
///
/// The clip, the audio player, and the design dimensions are required;
/// captions are optional. Collaborators are injected here so hosts and
/// tests supply their own implementations.
#[derive(Default)]
pub struct CutsceneConfig {
    /// The animation to drive.
    pub clip: Option<Box<dyn AnimatableTimeline>>,
    /// Audio backend the cues play through.
    pub audio: Option<Box<dyn AudioPlayer>>,
    /// Caption renderer, if captions should display.
    pub captions: Option<Box<dyn CaptionSink>>,
    /// Designed stage width in pixels.
    pub design_width: f64,
    /// Designed stage height in pixels.
    pub design_height: f64,
    /// Audio events to schedule, in any order.
    pub audio_cues: Vec<AudioCue>,
}

/// A cutscene: one animation timeline played in lock-step with scheduled
/// audio, captions following the synced track, and a completion callback
/// fired once when both the animation and its audio have finished.
pub struct Cutscene {
    driver: TimelineDriver,
    clip: Option<Box<dyn AnimatableTimeline>>,
    audio: Option<Box<dyn AudioPlayer>>,
    captions: Option<Box<dyn CaptionSink>>,
    design_width: f64,
    design_height: f64,
    layout: StageLayout,
    on_complete: Option<Box<dyn FnOnce()>>,
    events: Option<Box<dyn FnMut(CutsceneEvent)>>,
    ticking: bool,
}

impl std::fmt::Debug for Cutscene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cutscene")
            .field("design_width", &self.design_width)
            .field("design_height", &self.design_height)
            .field("ticking", &self.ticking)
            .finish_non_exhaustive()
    }
}

impl Cutscene {
    /// Validate `config` and build the controller.
    ///
    /// Fails fast on missing collaborators or bad dimensions; a controller
    /// that constructs successfully cannot fail at `start`.
    pub fn new(config: CutsceneConfig) -> CutsceneResult<Self> {
        let clip = config.clip.ok_or(CutsceneError::MissingClip)?;
        let audio = config.audio.ok_or(CutsceneError::MissingAudioPlayer)?;
        let (width, height) = (config.design_width, config.design_height);
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(CutsceneError::InvalidDesignSize { width, height });
        }
        let captions = config
            .captions
            .unwrap_or_else(|| Box::new(NullCaptions));
        Ok(Self {
            driver: TimelineDriver::new(config.audio_cues),
            clip: Some(clip),
            audio: Some(audio),
            captions: Some(captions),
            design_width: width,
            design_height: height,
            layout: StageLayout {
                scale: 1.0,
                x: 0.0,
                y: 0.0,
            },
            on_complete: None,
            events: None,
            ticking: false,
        })
    }

    /// Observe `Complete` and `Destroy` events.
    pub fn set_event_handler(&mut self, handler: impl FnMut(CutsceneEvent) + 'static) {
        self.events = Some(Box::new(handler));
    }

    /// Begin playback. `on_complete` runs exactly once, when the animation
    /// and all of its audio have finished (or an explicit `stop(true)`).
    ///
    /// Restarting replays the cue table from the top.
    pub fn start(&mut self, on_complete: impl FnOnce() + 'static) {
        let (Some(audio), Some(captions)) =
            (self.audio.as_deref_mut(), self.captions.as_deref_mut())
        else {
            log::warn!("start called on a destroyed cutscene");
            return;
        };
        log::debug!("cutscene start");
        self.on_complete = Some(Box::new(on_complete));
        self.driver.begin(audio, captions);
        self.ticking = true;
    }

    /// Per-frame update; `delta_ms` is wall-clock time since the last
    /// call. No-op unless playback is running.
    pub fn update(&mut self, delta_ms: f64) {
        if !self.ticking {
            return;
        }
        let (Some(clip), Some(audio), Some(captions)) = (
            self.clip.as_deref_mut(),
            self.audio.as_deref_mut(),
            self.captions.as_deref_mut(),
        ) else {
            return;
        };
        if self.driver.tick(delta_ms, clip, audio, captions) == TickOutcome::Complete {
            self.stop(true);
        }
    }

    /// Stop playback and tear down all tracked audio. With `do_callback`,
    /// emit `Complete` and run the stored completion callback; the
    /// callback is cleared, so repeated calls cannot run it twice.
    pub fn stop(&mut self, do_callback: bool) {
        self.ticking = false;
        self.driver.halt();
        if let Some(captions) = self.captions.as_deref_mut() {
            captions.stop();
        }
        if do_callback {
            log::debug!("cutscene complete");
            self.emit(CutsceneEvent::Complete);
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
        }
    }

    /// Fit the stage to a new viewport size and push the placement to the
    /// clip.
    pub fn resize(&mut self, width: f64, height: f64) {
        let Some(clip) = self.clip.as_deref_mut() else {
            return;
        };
        self.layout = StageLayout::fit(self.design_width, self.design_height, width, height);
        clip.set_placement(self.layout.scale, self.layout.x, self.layout.y);
    }

    /// Tear down: stop playback without the completion callback, emit
    /// `Destroy`, and release every collaborator. Safe to call at any
    /// time, repeatedly, and before `start`.
    pub fn destroy(&mut self) {
        self.stop(false);
        self.emit(CutsceneEvent::Destroy);
        self.clip = None;
        self.audio = None;
        self.captions = None;
        self.on_complete = None;
        self.events = None;
    }

    /// Whether playback is running.
    pub fn is_active(&self) -> bool {
        self.ticking
    }

    /// Cutscene time in seconds.
    pub fn elapsed_time(&self) -> f64 {
        self.driver.elapsed_time()
    }

    /// Stage placement from the last `resize`.
    pub fn layout(&self) -> StageLayout {
        self.layout
    }

    fn emit(&mut self, event: CutsceneEvent) {
        if let Some(handler) = self.events.as_mut() {
            handler(event);
        }
    }
}
