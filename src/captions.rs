//! Caption display and synchronization
//!
//! `CaptionSink` is the renderer-facing contract the cutscene engine
//! drives: play the caption track belonging to an audio cue, follow the
//! audio position, stop. `CaptionPlayer` is a data-driven implementation
//! that resolves the active caption line from a time-ordered track; hosts
//! render whatever `current_text` returns.

use std::collections::HashMap;

use serde::Deserialize;

use crate::cutscene::CutsceneResult;

/// Caption renderer contract driven by the cutscene engine.
pub trait CaptionSink {
    /// Begin displaying the caption track registered under `alias`.
    fn play(&mut self, alias: &str);

    /// Follow the synced audio to `position_ms` into the current track.
    fn seek(&mut self, position_ms: f64);

    /// Stop displaying captions.
    fn stop(&mut self);
}

/// Caption sink that displays nothing.
///
/// Stands in when a cutscene is configured without captions so playback
/// code never special-cases their absence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCaptions;

impl CaptionSink for NullCaptions {
    fn play(&mut self, _alias: &str) {}
    fn seek(&mut self, _position_ms: f64) {}
    fn stop(&mut self) {}
}

/// A single timed caption line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptionLine {
    /// Start of the line, milliseconds into the track.
    pub start: u32,
    /// End of the line, milliseconds into the track.
    pub end: u32,
    /// Text to display.
    pub content: String,
}

impl CaptionLine {
    /// Create a line spanning `[start, end)` milliseconds.
    pub fn new(start: u32, end: u32, content: &str) -> Self {
        Self {
            start,
            end,
            content: content.to_string(),
        }
    }

    /// Check if this line is visible at `position_ms`.
    pub fn is_active_at(&self, position_ms: f64) -> bool {
        position_ms >= self.start as f64 && position_ms < self.end as f64
    }
}

/// Data-driven caption sink.
///
/// Holds one caption track per audio alias. While a track is playing,
/// `seek` moves the playback position and `current_text` resolves which
/// line, if any, should be on screen.
#[derive(Debug, Default)]
pub struct CaptionPlayer {
    tracks: HashMap<String, Vec<CaptionLine>>,
    active: Option<String>,
    position_ms: f64,
}

impl CaptionPlayer {
    /// Create an empty caption player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load caption tracks from JSON: a map of audio alias to a list of
    /// `{ "start", "end", "content" }` lines.
    pub fn from_json(data: &str) -> CutsceneResult<Self> {
        let tracks: HashMap<String, Vec<CaptionLine>> = serde_json::from_str(data)?;
        let mut player = Self::new();
        for (alias, lines) in tracks {
            player.add_track(alias, lines);
        }
        Ok(player)
    }

    /// Register a caption track for an audio alias. Lines are kept sorted
    /// by start time.
    pub fn add_track(&mut self, alias: impl Into<String>, mut lines: Vec<CaptionLine>) {
        lines.sort_by_key(|line| line.start);
        self.tracks.insert(alias.into(), lines);
    }

    /// Whether a track exists for `alias`.
    pub fn has_track(&self, alias: &str) -> bool {
        self.tracks.contains_key(alias)
    }

    /// The alias of the playing track, if any.
    pub fn active_alias(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Current position into the playing track, in milliseconds.
    pub fn position_ms(&self) -> f64 {
        self.position_ms
    }

    /// The line the renderer should currently display.
    pub fn current_text(&self) -> Option<&str> {
        let alias = self.active.as_deref()?;
        let lines = self.tracks.get(alias)?;
        lines
            .iter()
            .find(|line| line.is_active_at(self.position_ms))
            .map(|line| line.content.as_str())
    }
}

impl CaptionSink for CaptionPlayer {
    fn play(&mut self, alias: &str) {
        self.position_ms = 0.0;
        if self.tracks.contains_key(alias) {
            self.active = Some(alias.to_string());
        } else {
            log::warn!("no caption track for audio alias '{}'", alias);
            self.active = None;
        }
    }

    fn seek(&mut self, position_ms: f64) {
        self.position_ms = position_ms;
    }

    fn stop(&mut self) {
        self.active = None;
        self.position_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player() -> CaptionPlayer {
        let mut player = CaptionPlayer::new();
        player.add_track(
            "intro",
            vec![
                CaptionLine::new(0, 2000, "Hello there"),
                CaptionLine::new(2500, 4000, "Still me"),
            ],
        );
        player
    }

    #[test]
    fn test_line_active_at_boundaries() {
        let line = CaptionLine::new(1000, 2000, "Text");
        assert!(!line.is_active_at(999.0));
        assert!(line.is_active_at(1000.0));
        assert!(line.is_active_at(1999.0));
        assert!(!line.is_active_at(2000.0));
    }

    #[test]
    fn test_play_selects_track() {
        let mut player = sample_player();
        player.play("intro");
        assert_eq!(player.active_alias(), Some("intro"));
        assert_eq!(player.current_text(), Some("Hello there"));
    }

    #[test]
    fn test_play_unknown_alias_shows_nothing() {
        let mut player = sample_player();
        player.play("missing");
        assert_eq!(player.active_alias(), None);
        assert_eq!(player.current_text(), None);
    }

    #[test]
    fn test_seek_resolves_line() {
        let mut player = sample_player();
        player.play("intro");

        player.seek(3000.0);
        assert_eq!(player.current_text(), Some("Still me"));

        // gap between lines
        player.seek(2200.0);
        assert_eq!(player.current_text(), None);

        // past the last line
        player.seek(5000.0);
        assert_eq!(player.current_text(), None);
    }

    #[test]
    fn test_stop_clears_active_track() {
        let mut player = sample_player();
        player.play("intro");
        player.seek(500.0);

        player.stop();

        assert_eq!(player.active_alias(), None);
        assert_eq!(player.current_text(), None);
        assert_eq!(player.position_ms(), 0.0);
    }

    #[test]
    fn test_add_track_sorts_lines() {
        let mut player = CaptionPlayer::new();
        player.add_track(
            "scene",
            vec![
                CaptionLine::new(3000, 4000, "Third"),
                CaptionLine::new(0, 1000, "First"),
                CaptionLine::new(1500, 2500, "Second"),
            ],
        );
        player.play("scene");
        assert_eq!(player.current_text(), Some("First"));
        player.seek(1600.0);
        assert_eq!(player.current_text(), Some("Second"));
    }

    #[test]
    fn test_from_json() {
        let data = r#"{
            "intro": [
                { "start": 0, "end": 1200, "content": "Welcome" },
                { "start": 1200, "end": 2400, "content": "To the show" }
            ]
        }"#;
        let mut player = CaptionPlayer::from_json(data).unwrap();
        assert!(player.has_track("intro"));

        player.play("intro");
        player.seek(1300.0);
        assert_eq!(player.current_text(), Some("To the show"));
    }

    #[test]
    fn test_from_json_rejects_bad_data() {
        assert!(CaptionPlayer::from_json("not json").is_err());
        assert!(CaptionPlayer::from_json(r#"{"a": [{"start": "x"}]}"#).is_err());
    }

    #[test]
    fn test_null_captions_ignore_everything() {
        let mut sink = NullCaptions;
        sink.play("anything");
        sink.seek(123.0);
        sink.stop();
    }
}
