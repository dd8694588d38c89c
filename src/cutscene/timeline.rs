//! Per-tick timeline engine
//!
//! Each host frame the driver folds in audio completions, elects the clock
//! source (wall clock while no synced track plays, otherwise the front of
//! the sync stack), dispatches newly due cues, keeps captions on the synced
//! position, and advances the animation clip, watching for the dual
//! completion (animation finished AND audio finished) that ends playback.

use crate::audio::AudioPlayer;
use crate::captions::CaptionSink;
use crate::display::AnimatableTimeline;

use super::cue::{AudioCue, CueTable};
use super::tracker::AudioTracker;

/// What a tick concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Playback continues.
    Running,
    /// Animation and audio have both finished; the controller must stop.
    Complete,
}

/// Tick-driven playback engine owning the cutscene clock and cue state.
pub struct TimelineDriver {
    cues: CueTable,
    tracker: AudioTracker,
    /// Cutscene time in seconds.
    elapsed: f64,
    /// True until the first tick after `begin` has run; gates the
    /// spurious-position guard.
    first_tick: bool,
    anim_finished: bool,
    audio_finished: bool,
}

impl TimelineDriver {
    /// Build the driver around its cue table. Playback state starts reset;
    /// `begin` must run before the first `tick`.
    pub fn new(cues: Vec<AudioCue>) -> Self {
        let cues = CueTable::new(cues);
        let audio_finished = cues.is_empty();
        Self {
            cues,
            tracker: AudioTracker::new(),
            elapsed: 0.0,
            first_tick: true,
            anim_finished: false,
            audio_finished,
        }
    }

    /// Reset playback state and dispatch the cues scheduled at time zero.
    pub fn begin(&mut self, player: &mut dyn AudioPlayer, captions: &mut dyn CaptionSink) {
        self.tracker.stop_all();
        self.cues.rewind();
        self.elapsed = 0.0;
        self.first_tick = true;
        self.anim_finished = false;
        self.audio_finished = self.cues.is_empty();
        self.dispatch_due(player, captions);
    }

    /// Advance one host frame. `delta_ms` is wall-clock time since the
    /// previous tick.
    pub fn tick(
        &mut self,
        delta_ms: f64,
        clip: &mut dyn AnimatableTimeline,
        player: &mut dyn AudioPlayer,
        captions: &mut dyn CaptionSink,
    ) -> TickOutcome {
        // Completions land between host frames; fold them in before the
        // clock update so an emptied stack falls back to wall time this
        // same tick.
        if self.tracker.poll_completions(captions).sync_exhausted {
            self.audio_finished = true;
        }

        if self.anim_finished {
            return if self.audio_finished {
                TickOutcome::Complete
            } else {
                TickOutcome::Running
            };
        }

        // Wall time only while no synced track is playing.
        if !self.tracker.has_sync() {
            self.elapsed += delta_ms * 0.001;
        }

        self.dispatch_due(player, captions);

        // Re-derive elapsed time from the clock source's own position so
        // the animation cannot drift from the audio.
        if let (Some(origin), Some(front)) = (self.tracker.sync_origin(), self.tracker.sync_front())
        {
            let position_ms = front.handle.position_ms();
            if self.first_tick && self.elapsed == 0.0 && position_ms > delta_ms * 2.0 {
                // first poll after start can report garbage on some
                // platforms; skip this one sample
                log::debug!("ignoring spurious first position read: {}ms", position_ms);
            } else {
                self.elapsed = origin + position_ms * 0.001;
            }
        }
        self.first_tick = false;

        if self.tracker.sync_origin().is_some() {
            if let Some(front) = self.tracker.sync_front() {
                captions.seek(front.handle.position_ms());
            }
        }

        let (current, total) = advance_clip(clip, self.elapsed);
        if total.is_some_and(|frames| current == frames) {
            self.anim_finished = true;
            if self.audio_finished {
                return TickOutcome::Complete;
            }
        }

        TickOutcome::Running
    }

    /// Launch every cue whose start time has been reached.
    fn dispatch_due(&mut self, player: &mut dyn AudioPlayer, captions: &mut dyn CaptionSink) {
        while let Some(cue) = self.cues.pop_due(self.elapsed) {
            if cue.sync {
                self.audio_finished = false;
            }
            let offset_ms = if cue.sync {
                0.0
            } else {
                (self.elapsed - cue.start) * 1000.0
            };
            self.tracker.launch(player, captions, cue, offset_ms);
        }
    }

    /// Stop all tracked audio. The controller handles captions and events.
    pub fn halt(&mut self) {
        self.tracker.stop_all();
    }

    /// Cutscene time in seconds.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    pub fn animation_finished(&self) -> bool {
        self.anim_finished
    }

    pub fn audio_finished(&self) -> bool {
        self.audio_finished
    }

    /// Live handle count, sync and independent.
    pub fn active_audio(&self) -> usize {
        self.tracker.active_count()
    }
}

/// Scrub the clip to `seconds` and report `(current_frame, timeline_frames)`
/// of the timeline actually driven.
///
/// A container whose own timeline is absent or one frame long is a wrapper;
/// the real timeline is its single child.
fn advance_clip(clip: &mut dyn AnimatableTimeline, seconds: f64) -> (u32, Option<u32>) {
    let wrapper = clip.timeline_frames().map_or(true, |frames| frames == 1);
    if wrapper {
        if let Some(child) = clip.child() {
            child.set_elapsed(seconds);
            return (child.current_frame(), child.timeline_frames());
        }
    }
    clip.set_elapsed(seconds);
    (clip.current_frame(), clip.timeline_frames())
}
