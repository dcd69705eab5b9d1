//! Frame driver: owns the per-frame context and dispatches lifecycle hooks to
//! the members of the scene before each frame is rendered.

use crate::frame::FrameParams;

/// Time advance per rendered frame.
pub const DEFAULT_TIME_STEP: f32 = 0.03;

pub trait Lifecycle {
    fn on_start(&mut self, frame: &mut FrameParams);
    fn on_update(&mut self, frame: &mut FrameParams);
}

/// Advances the animation clock by a fixed step on every update.
#[derive(Clone, Copy, Debug)]
pub struct TimeAnimator {
    pub start: f32,
    pub step: f32,
}

impl Lifecycle for TimeAnimator {
    fn on_start(&mut self, frame: &mut FrameParams) {
        frame.time = self.start;
    }

    fn on_update(&mut self, frame: &mut FrameParams) {
        frame.time += self.step;
    }
}

#[derive(Clone, Copy, Debug)]
pub enum SceneMember {
    Animator(TimeAnimator),
    /// A member without hooks, such as the camera or the nut itself.
    Static,
}

impl Lifecycle for SceneMember {
    fn on_start(&mut self, frame: &mut FrameParams) {
        match self {
            Self::Animator(animator) => animator.on_start(frame),
            Self::Static => {}
        }
    }

    fn on_update(&mut self, frame: &mut FrameParams) {
        match self {
            Self::Animator(animator) => animator.on_update(frame),
            Self::Static => {}
        }
    }
}

/// Built once at startup and refreshed by the caller once per frame.
#[derive(Clone, Debug)]
pub struct Engine {
    frame: FrameParams,
    members: Vec<SceneMember>,
}

impl Engine {
    pub fn new(frame: FrameParams, members: Vec<SceneMember>) -> Self {
        Self { frame, members }
    }

    /// Engine for the nut scene: one animated clock starting at `time_start`.
    pub fn nut(frame: FrameParams, time_start: f32, time_step: f32) -> Self {
        Self::new(
            frame,
            vec![
                SceneMember::Static,
                SceneMember::Animator(TimeAnimator {
                    start: time_start,
                    step: time_step,
                }),
            ],
        )
    }

    pub fn start(&mut self) {
        for member in &mut self.members {
            member.on_start(&mut self.frame);
        }
    }

    /// Runs every member's update and returns the snapshot to render.
    pub fn update(&mut self) -> FrameParams {
        for member in &mut self.members {
            member.on_update(&mut self.frame);
        }
        self.frame
    }

    pub fn frame(&self) -> FrameParams {
        self.frame
    }
}
