use crate::math::Vec2;

/// Per-frame animation inputs. Supplied by the driver and left untouched
/// while the frame's samples are evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub time: f32,
    pub ball_speed: f32,
    pub hole_speed: f32,
    pub resolution: Vec2,
}

impl FrameParams {
    pub fn new(time: f32, ball_speed: f32, hole_speed: f32, width: u32, height: u32) -> Self {
        Self {
            time,
            ball_speed,
            hole_speed,
            resolution: Vec2::new(width as f32, height as f32),
        }
    }
}
