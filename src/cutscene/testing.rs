//! Scripted collaborator doubles shared by the cutscene test modules.
//!
//! The doubles record every call they receive and let tests drive handle
//! positions and completions explicitly, so each tick's behavior can be
//! asserted deterministically.

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{AudioHandle, AudioPlayer, PlayOptions};
use crate::captions::CaptionSink;
use crate::display::AnimatableTimeline;

/// Mutable state shared between a test and the handle it controls.
#[derive(Debug, Default)]
pub struct HandleState {
    pub position_ms: f64,
    pub finished: bool,
    pub stopped: bool,
}

/// Handle whose position and completion the test scripts directly.
pub struct ScriptedHandle {
    state: Rc<RefCell<HandleState>>,
}

impl AudioHandle for ScriptedHandle {
    fn position_ms(&self) -> f64 {
        self.state.borrow().position_ms
    }

    fn is_finished(&self) -> bool {
        self.state.borrow().finished
    }

    fn stop(&mut self) {
        self.state.borrow_mut().stopped = true;
    }
}

/// Record of one `play` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub alias: String,
    pub offset_ms: f64,
}

/// Shared view onto every handle a `ScriptedPlayer` has produced.
#[derive(Clone, Default)]
pub struct HandleRegistry {
    entries: Rc<RefCell<Vec<(String, Rc<RefCell<HandleState>>)>>>,
}

impl HandleRegistry {
    fn register(&self, alias: &str, state: Rc<RefCell<HandleState>>) {
        self.entries.borrow_mut().push((alias.to_string(), state));
    }

    /// State of the most recent handle for `alias`.
    pub fn state(&self, alias: &str) -> Rc<RefCell<HandleState>> {
        let entries = self.entries.borrow();
        let (_, state) = entries
            .iter()
            .rev()
            .find(|(name, _)| name == alias)
            .unwrap_or_else(|| panic!("no handle launched for alias '{}'", alias));
        Rc::clone(state)
    }

    pub fn set_position(&self, alias: &str, position_ms: f64) {
        self.state(alias).borrow_mut().position_ms = position_ms;
    }

    pub fn finish(&self, alias: &str) {
        self.state(alias).borrow_mut().finished = true;
    }

    pub fn stopped(&self, alias: &str) -> bool {
        self.state(alias).borrow().stopped
    }
}

/// Player that hands out scripted handles and records every launch.
#[derive(Clone, Default)]
pub struct ScriptedPlayer {
    launches: Rc<RefCell<Vec<Launch>>>,
    handles: HandleRegistry,
}

impl ScriptedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every `play` call so far.
    pub fn launches(&self) -> Vec<Launch> {
        self.launches.borrow().clone()
    }

    /// Aliases launched, in order.
    pub fn launched_aliases(&self) -> Vec<String> {
        self.launches.borrow().iter().map(|l| l.alias.clone()).collect()
    }

    /// Shared view onto the produced handles; clones stay connected.
    pub fn handles(&self) -> HandleRegistry {
        self.handles.clone()
    }
}

impl AudioPlayer for ScriptedPlayer {
    fn play(&mut self, alias: &str, options: PlayOptions) -> Box<dyn AudioHandle> {
        let state = Rc::new(RefCell::new(HandleState {
            position_ms: options.offset_ms,
            ..HandleState::default()
        }));
        self.launches.borrow_mut().push(Launch {
            alias: alias.to_string(),
            offset_ms: options.offset_ms,
        });
        self.handles.register(alias, Rc::clone(&state));
        Box::new(ScriptedHandle { state })
    }
}

/// One call received by a `RecordingCaptions`.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionCall {
    Play(String),
    Seek(f64),
    Stop,
}

/// Caption sink that records the calls it receives; clones stay connected.
#[derive(Clone, Default)]
pub struct RecordingCaptions {
    calls: Rc<RefCell<Vec<CaptionCall>>>,
}

impl RecordingCaptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CaptionCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl CaptionSink for RecordingCaptions {
    fn play(&mut self, alias: &str) {
        self.calls.borrow_mut().push(CaptionCall::Play(alias.to_string()));
    }

    fn seek(&mut self, position_ms: f64) {
        self.calls.borrow_mut().push(CaptionCall::Seek(position_ms));
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push(CaptionCall::Stop);
    }
}

/// Observable state of a `SharedClip`.
#[derive(Debug)]
pub struct ClipState {
    pub fps: f64,
    pub frames: u32,
    pub current: u32,
    pub elapsed: f64,
    pub placement: Option<(f64, f64, f64)>,
}

/// Clip double whose state stays inspectable after the clip is boxed and
/// handed to a controller.
#[derive(Clone)]
pub struct SharedClip {
    state: Rc<RefCell<ClipState>>,
}

impl SharedClip {
    pub fn new(frames: u32, fps: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClipState {
                fps,
                frames,
                current: 0,
                elapsed: 0.0,
                placement: None,
            })),
        }
    }

    pub fn state(&self) -> Rc<RefCell<ClipState>> {
        Rc::clone(&self.state)
    }
}

impl AnimatableTimeline for SharedClip {
    fn set_elapsed(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.elapsed = seconds;
        state.current = ((seconds.max(0.0) * state.fps) as u32).min(state.frames);
    }

    fn current_frame(&self) -> u32 {
        self.state.borrow().current
    }

    fn timeline_frames(&self) -> Option<u32> {
        Some(self.state.borrow().frames)
    }

    fn child(&mut self) -> Option<&mut dyn AnimatableTimeline> {
        None
    }

    fn set_placement(&mut self, scale: f64, x: f64, y: f64) {
        self.state.borrow_mut().placement = Some((scale, x, y));
    }
}
