use std::f32::consts::FRAC_PI_2;

use crate::frame::FrameParams;
use crate::math::{Mat3, Vec3};
use crate::sdf::{
    op_difference, op_intersect, op_union, sd_box, sd_cylinder, sd_sphere, DistanceField,
};

const CUBE_SIZE: f32 = 1.8;
const SPHERE_RADIUS: f32 = 1.2;
const BORE_HEIGHT: f32 = 2.0;
const BORE_MIN_RADIUS: f32 = 0.4;
const BORE_MAX_RADIUS: f32 = 1.0;
const BALL_BASE_OFFSET: f32 = 0.4 + 1.0;
const BALL_RADIUS: f32 = 0.3;

/// The animated nut: a cube-sphere intersection drilled by three orthogonal
/// bores, orbited by six balls. Values are fixed for one frame.
#[derive(Clone, Copy, Debug)]
pub struct NutScene {
    pub time: f32,
    pub ball_speed: f32,
    pub hole_speed: f32,
}

impl NutScene {
    pub fn new(time: f32, ball_speed: f32, hole_speed: f32) -> Self {
        Self {
            time,
            ball_speed,
            hole_speed,
        }
    }

    pub fn from_frame(frame: &FrameParams) -> Self {
        Self::new(frame.time, frame.ball_speed, frame.hole_speed)
    }

    /// Oscillates in `[0.4, 1.0]`.
    pub fn cylinder_radius(self) -> f32 {
        let wave = (1.0 + (self.hole_speed * self.time).sin()) / 2.0;
        BORE_MIN_RADIUS + ((BORE_MAX_RADIUS - BORE_MIN_RADIUS) * wave)
    }

    pub fn ball_offset(self) -> f32 {
        BALL_BASE_OFFSET + (self.ball_speed * self.time).sin()
    }

    /// Ball centers in the spinning frame, in `+x, -x, +y, -y, +z, -z` order.
    pub fn ball_centers(self) -> [Vec3; 6] {
        let offset = self.ball_offset();
        [
            Vec3::X * offset,
            Vec3::X * -offset,
            Vec3::Y * offset,
            Vec3::Y * -offset,
            Vec3::Z * offset,
            Vec3::Z * -offset,
        ]
    }

    pub fn spin(self) -> Mat3 {
        Mat3::rotate_y(self.time / 2.0)
    }

    fn bores(self, p: Vec3) -> f32 {
        let radius = self.cylinder_radius();
        let along_z = sd_cylinder(p, BORE_HEIGHT, radius);
        let along_y = sd_cylinder(
            Mat3::rotate_x(FRAC_PI_2).inverse_rotate(p),
            BORE_HEIGHT,
            radius,
        );
        let along_x = sd_cylinder(
            Mat3::rotate_y(FRAC_PI_2).inverse_rotate(p),
            BORE_HEIGHT,
            radius,
        );
        op_union(along_z, op_union(along_y, along_x))
    }

    fn nut(self, p: Vec3) -> f32 {
        let cube = sd_box(p, Vec3::splat(CUBE_SIZE));
        let sphere = sd_sphere(p, SPHERE_RADIUS);
        op_difference(op_intersect(cube, sphere), self.bores(p))
    }

    fn balls(self, p: Vec3) -> f32 {
        self.ball_centers()
            .iter()
            .map(|center| sd_sphere(p - *center, BALL_RADIUS))
            .fold(f32::INFINITY, op_union)
    }
}

impl DistanceField for NutScene {
    fn distance(&self, p: Vec3) -> f32 {
        let local = self.spin().inverse_rotate(p);
        op_union(self.balls(local), self.nut(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1.0e-5;

    fn still() -> NutScene {
        NutScene::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn bore_radius_starts_mid_range() {
        assert!((still().cylinder_radius() - 0.7).abs() < TOLERANCE);
    }

    #[test]
    fn bore_radius_stays_in_range() {
        for i in 0..200 {
            let scene = NutScene::new(i as f32 * 0.1, 0.0, 1.7);
            let radius = scene.cylinder_radius();
            assert!((0.4 - TOLERANCE..=1.0 + TOLERANCE).contains(&radius));
        }
    }

    #[test]
    fn balls_start_on_the_axes() {
        let scene = still();
        assert!((scene.ball_offset() - 1.4).abs() < TOLERANCE);
        let expected = [
            Vec3::new(1.4, 0.0, 0.0),
            Vec3::new(-1.4, 0.0, 0.0),
            Vec3::new(0.0, 1.4, 0.0),
            Vec3::new(0.0, -1.4, 0.0),
            Vec3::new(0.0, 0.0, 1.4),
            Vec3::new(0.0, 0.0, -1.4),
        ];
        for (center, expected) in scene.ball_centers().iter().zip(expected) {
            assert!((*center - expected).length() < TOLERANCE);
        }
    }

    #[test]
    fn center_is_drilled_out() {
        // Inside the bores: the nut reports the distance out of the hole.
        assert!((still().distance(Vec3::ZERO) - 0.7).abs() < TOLERANCE);
    }

    #[test]
    fn ball_centers_are_inside() {
        let scene = still();
        for center in scene.ball_centers() {
            assert!((scene.distance(center) + 0.3).abs() < TOLERANCE);
        }
    }

    #[test]
    fn solid_between_the_bores() {
        // Along the diagonal, past the bore radius but within the sphere.
        let p = Vec3::splat(1.0).normalize() * 1.1;
        assert!(still().distance(p) < 0.0);
    }

    #[test]
    fn spin_rotates_the_whole_shape() {
        let scene = NutScene::new(std::f32::consts::PI, 0.0, 0.0);
        // A quarter turn about Y carries the +x ball onto the -z axis.
        let spun = scene.spin() * scene.ball_centers()[0];
        assert!((scene.distance(spun) + 0.3).abs() < 1.0e-4);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let scene = NutScene::new(3.21, 1.3, 0.7);
        let p = Vec3::new(0.4, -1.1, 0.9);
        assert_eq!(scene.distance(p).to_bits(), scene.distance(p).to_bits());
    }
}
