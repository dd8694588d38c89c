//! Live audio tracking
//!
//! Splits playing handles into the sync stack (whose front entry drives the
//! animation clock) and the independent set (no clock influence), and keeps
//! that split correct as handles finish out of order.

use crate::audio::{AudioHandle, AudioPlayer, PlayOptions};
use crate::captions::CaptionSink;

use super::cue::AudioCue;

/// A playing track together with the cue that scheduled it.
pub struct TrackedAudio {
    /// Originating cue; its `start` re-bases the clock on promotion.
    pub cue: AudioCue,
    /// Live handle from the audio collaborator.
    pub handle: Box<dyn AudioHandle>,
}

/// Result of draining finished handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// The sync stack was non-empty and this drain emptied it.
    pub sync_exhausted: bool,
}

/// Bookkeeping for every handle the cutscene has started.
#[derive(Default)]
pub struct AudioTracker {
    /// Most recently started sync track first; index 0 is the clock source.
    sync_stack: Vec<TrackedAudio>,
    independent: Vec<TrackedAudio>,
    /// Cutscene time corresponding to position 0 of the clock source.
    sync_origin: Option<f64>,
}

impl AudioTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playback for `cue` and track the resulting handle.
    ///
    /// Sync cues always start at the top of their track and take over the
    /// clock immediately; independent cues may start `offset_ms` in, to
    /// catch up with a start time that is already in the past.
    pub fn launch(
        &mut self,
        player: &mut dyn AudioPlayer,
        captions: &mut dyn CaptionSink,
        cue: AudioCue,
        offset_ms: f64,
    ) {
        if cue.sync {
            log::debug!("sync cue '{}' at {}s takes the clock", cue.alias, cue.start);
            let handle = player.play(&cue.alias, PlayOptions::default());
            self.sync_origin = Some(cue.start);
            captions.play(&cue.alias);
            self.sync_stack.insert(0, TrackedAudio { cue, handle });
        } else {
            log::debug!(
                "independent cue '{}' at {}s (offset {}ms)",
                cue.alias,
                cue.start,
                offset_ms
            );
            let handle = player.play(&cue.alias, PlayOptions { offset_ms });
            self.independent.push(TrackedAudio { cue, handle });
        }
    }

    /// Remove every finished handle, re-electing the clock source as the
    /// stack shrinks.
    ///
    /// Removal is a linear scan: a later-started track can finish first, so
    /// the finished entry is not necessarily the front. Every sync removal
    /// re-promotes the current front (the stack is most-recent-wins, not a
    /// priority queue), restarting captions for its cue even when the front
    /// did not change.
    pub fn poll_completions(&mut self, captions: &mut dyn CaptionSink) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        while let Some(index) = self
            .sync_stack
            .iter()
            .position(|tracked| tracked.handle.is_finished())
        {
            let done = self.sync_stack.remove(index);
            log::debug!("sync track '{}' finished", done.cue.alias);
            if let Some(front) = self.sync_stack.first() {
                self.sync_origin = Some(front.cue.start);
                captions.play(&front.cue.alias);
            } else {
                self.sync_origin = None;
                captions.stop();
                outcome.sync_exhausted = true;
            }
        }

        self.independent
            .retain(|tracked| !tracked.handle.is_finished());
        outcome
    }

    /// Stop and forget every tracked handle.
    pub fn stop_all(&mut self) {
        for tracked in self
            .sync_stack
            .iter_mut()
            .chain(self.independent.iter_mut())
        {
            tracked.handle.stop();
        }
        self.sync_stack.clear();
        self.independent.clear();
        self.sync_origin = None;
    }

    /// Whether a sync track currently drives the clock.
    pub fn has_sync(&self) -> bool {
        !self.sync_stack.is_empty()
    }

    /// The clock-driving track, if any.
    pub fn sync_front(&self) -> Option<&TrackedAudio> {
        self.sync_stack.first()
    }

    /// Cutscene time corresponding to position 0 of the clock source.
    pub fn sync_origin(&self) -> Option<f64> {
        self.sync_origin
    }

    /// Number of live handles, sync and independent.
    pub fn active_count(&self) -> usize {
        self.sync_stack.len() + self.independent.len()
    }
}
