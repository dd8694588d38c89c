//! Scheduled audio cues
//!
//! The cue table is built once at cutscene start: a time-ordered list of
//! audio events consumed front to back as the timeline advances.

use std::cmp::Ordering;

/// A scheduled audio playback event.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCue {
    /// Name the audio collaborator resolves to a track.
    pub alias: String,
    /// Cutscene time at which the track starts, in seconds.
    pub start: f64,
    /// Whether this track drives the animation clock while it plays.
    pub sync: bool,
}

impl AudioCue {
    /// Create an independent (non-clock-driving) cue.
    pub fn new(alias: impl Into<String>, start: f64) -> Self {
        Self {
            alias: alias.into(),
            start,
            sync: false,
        }
    }

    /// Create a synced cue: the track drives the animation clock while it
    /// plays.
    pub fn synced(alias: impl Into<String>, start: f64) -> Self {
        Self {
            alias: alias.into(),
            start,
            sync: true,
        }
    }
}

/// Time-ordered cue list with a consumption cursor.
///
/// Sorting is stable: cues sharing a start time keep their input order.
/// The table is read-only after construction; only the cursor moves.
#[derive(Debug, Default)]
pub struct CueTable {
    cues: Vec<AudioCue>,
    cursor: usize,
}

impl CueTable {
    /// Build the table from the caller's cue list, in any order.
    pub fn new(mut cues: Vec<AudioCue>) -> Self {
        cues.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));
        Self { cues, cursor: 0 }
    }

    /// Take the next cue due at time `t` (seconds), advancing the cursor.
    ///
    /// Returns `None` once every cue with `start <= t` has been consumed.
    pub fn pop_due(&mut self, t: f64) -> Option<AudioCue> {
        let cue = self.cues.get(self.cursor)?;
        if cue.start <= t {
            self.cursor += 1;
            Some(cue.clone())
        } else {
            None
        }
    }

    /// Reset the cursor so the table can be consumed again.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Number of cues not yet dispatched.
    pub fn remaining(&self) -> usize {
        self.cues.len() - self.cursor
    }

    /// The sorted cue list.
    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }
}
