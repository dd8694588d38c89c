//! Animation timeline contract and stage layout
//!
//! `AnimatableTimeline` is the frame-scrubbing contract the cutscene engine
//! drives. `FrameTimeline` is a concrete frame-grid implementation, and
//! `StageLayout` computes the uniform letterbox fit of the designed stage
//! into the host viewport.

/// A scrubable animation timeline.
///
/// The engine never "plays" the clip. Each tick it sets the playhead to the
/// cutscene's elapsed time and the clip recomputes its visible frame.
pub trait AnimatableTimeline {
    /// Scrub the playhead to an absolute time in seconds and recompute the
    /// visible frame.
    fn set_elapsed(&mut self, seconds: f64);

    /// Frame index of the playhead.
    ///
    /// Implementations clamp this to the frame count (not the last frame
    /// index), so a timeline that has played through reports
    /// `current_frame() == timeline_frames()`.
    fn current_frame(&self) -> u32;

    /// Length of this object's own timeline in frames; `None` when it has
    /// no timeline of its own.
    fn timeline_frames(&self) -> Option<u32>;

    /// The single nested timeline, when this object is a plain wrapper
    /// around one.
    fn child(&mut self) -> Option<&mut dyn AnimatableTimeline>;

    /// Apply the stage placement computed on resize. Display objects that
    /// are positioned externally can ignore this.
    fn set_placement(&mut self, _scale: f64, _x: f64, _y: f64) {}
}

/// Uniform scale and centering offsets that fit the designed stage into a
/// viewport, letterboxed or pillarboxed along the non-fitted axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageLayout {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl StageLayout {
    /// Fit a stage designed at `design_w` x `design_h` into a viewport of
    /// `width` x `height`, preserving aspect ratio and centering along the
    /// axis that does not bind.
    pub fn fit(design_w: f64, design_h: f64, width: f64, height: f64) -> Self {
        let designed_ratio = design_w / design_h;
        let current_ratio = width / height;
        if designed_ratio > current_ratio {
            // viewport narrower than the design: fit to width
            let scale = width / design_w;
            Self {
                scale,
                x: 0.0,
                y: (height - design_h * scale) * 0.5,
            }
        } else {
            let scale = height / design_h;
            Self {
                scale,
                x: (width - design_w * scale) * 0.5,
                y: 0.0,
            }
        }
    }
}

/// Frame-grid timeline: a fixed number of frames advanced at a fixed rate.
///
/// The playhead is derived from elapsed time and clamped to the frame
/// count. A 1-frame instance built with `wrapper` forwards scrubbing to its
/// nested child, matching the export convention of a 1-frame container
/// whose only child holds the real timeline.
#[derive(Debug)]
pub struct FrameTimeline {
    fps: f64,
    frames: u32,
    current: u32,
    elapsed: f64,
    placement: StageLayout,
    child: Option<Box<FrameTimeline>>,
}

impl FrameTimeline {
    /// Create a timeline of `frames` frames at `fps`.
    pub fn new(frames: u32, fps: f64) -> Self {
        Self {
            fps,
            frames,
            current: 0,
            elapsed: 0.0,
            placement: StageLayout::default(),
            child: None,
        }
    }

    /// Create a 1-frame wrapper around `child`.
    pub fn wrapper(child: FrameTimeline) -> Self {
        let mut clip = Self::new(1, child.fps);
        clip.child = Some(Box::new(child));
        clip
    }

    /// Elapsed seconds last scrubbed to.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.frames as f64 / self.fps
    }

    /// Placement last applied through `set_placement`.
    pub fn placement(&self) -> StageLayout {
        self.placement
    }
}

impl AnimatableTimeline for FrameTimeline {
    fn set_elapsed(&mut self, seconds: f64) {
        self.elapsed = seconds.max(0.0);
        self.current = ((self.elapsed * self.fps) as u32).min(self.frames);
    }

    fn current_frame(&self) -> u32 {
        self.current
    }

    fn timeline_frames(&self) -> Option<u32> {
        Some(self.frames)
    }

    fn child(&mut self) -> Option<&mut dyn AnimatableTimeline> {
        self.child
            .as_deref_mut()
            .map(|child| child as &mut dyn AnimatableTimeline)
    }

    fn set_placement(&mut self, scale: f64, x: f64, y: f64) {
        self.placement = StageLayout { scale, x, y };
    }
}
