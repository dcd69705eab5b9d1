use crate::math::{Ray, Vec3};
use crate::sdf::DistanceField;

pub const MAX_MARCH_STEPS: u32 = 255;
pub const EPSILON: f32 = 0.0001;
pub const MARCH_START: f32 = 0.0;
pub const MARCH_END: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarchResult {
    Hit(f32),
    Miss,
}

impl MarchResult {
    /// Distance travelled along the ray; a miss reports the far bound.
    pub fn travel(self, end: f32) -> f32 {
        match self {
            Self::Hit(t) => t,
            Self::Miss => end,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

pub fn ray_march<F: DistanceField>(field: &F, ray: Ray) -> MarchResult {
    ray_march_between(field, ray, MARCH_START, MARCH_END)
}

/// Sphere tracing between `start` and `end`. Each step advances by the field
/// value, which never overshoots the zero set while the field is a lower bound
/// on the true distance.
pub fn ray_march_between<F: DistanceField>(
    field: &F,
    ray: Ray,
    start: f32,
    end: f32,
) -> MarchResult {
    let mut step = start;
    for _ in 0..MAX_MARCH_STEPS {
        let dist = field.distance(ray.at(step));
        if dist < EPSILON {
            return MarchResult::Hit(step);
        }

        step += dist;
        if step >= end {
            return MarchResult::Miss;
        }
    }
    MarchResult::Miss
}

/// Central-difference gradient of the field, normalized.
///
/// `p` must not sit where the gradient vanishes.
pub fn estimate_normal<F: DistanceField>(field: &F, p: Vec3) -> Vec3 {
    let e = EPSILON;
    let dx =
        field.distance(p + Vec3::new(e, 0.0, 0.0)) - field.distance(p - Vec3::new(e, 0.0, 0.0));
    let dy =
        field.distance(p + Vec3::new(0.0, e, 0.0)) - field.distance(p - Vec3::new(0.0, e, 0.0));
    let dz =
        field.distance(p + Vec3::new(0.0, 0.0, e)) - field.distance(p - Vec3::new(0.0, 0.0, e));
    Vec3::new(dx, dy, dz).normalize()
}
