use crate::math::{Mat3, Ray, Vec2, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct View {
    pub origin: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub vertical_fov_deg: f32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            origin: Vec3::new(8.0, 5.0, 7.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            vertical_fov_deg: 45.0,
        }
    }
}

impl View {
    /// Rotation taking view-space directions (camera looking down -Z) into
    /// world space. `origin` must differ from `target`, and the viewing
    /// direction must not be parallel to `up`.
    pub fn view_to_world(&self) -> Mat3 {
        let forward = (self.target - self.origin).normalize();
        let side = forward.cross(self.up).normalize();
        let up = side.cross(forward);
        Mat3::from_cols(side, up, -forward)
    }

    pub fn ray(&self, frag: Vec2, resolution: Vec2) -> Ray {
        let view_dir = ray_direction(self.vertical_fov_deg, resolution, frag);
        Ray {
            origin: self.origin,
            direction: self.view_to_world() * view_dir,
        }
    }
}

/// View-space direction through `frag`, an offset in pixels from the
/// viewport center with +Y up.
pub fn ray_direction(fov_deg: f32, resolution: Vec2, frag: Vec2) -> Vec3 {
    let z = resolution.y / (fov_deg.to_radians() / 2.0).tan();
    Vec3::new(frag.x, frag.y, -z).normalize()
}

/// Center of pixel `(x, y)` (rows counted downward) as an offset from the
/// viewport center.
pub fn pixel_offset(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) - (width as f32 / 2.0),
        (height as f32 / 2.0) - (y as f32 + 0.5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal() {
        let m = View::default().view_to_world().transpose();
        let [side, up, back] = m.rows;
        for axis in [side, up, back] {
            assert!((axis.length() - 1.0).abs() < 1.0e-5);
        }
        assert!(side.dot(up).abs() < 1.0e-5);
        assert!(side.dot(back).abs() < 1.0e-5);
        assert!(up.dot(back).abs() < 1.0e-5);
        // Right-handed: side x up = back.
        assert!((side.cross(up) - back).length() < 1.0e-5);
    }

    #[test]
    fn center_ray_looks_at_target() {
        let view = View::default();
        let ray = view.ray(Vec2::new(0.0, 0.0), Vec2::new(640.0, 480.0));
        let expected = (view.target - view.origin).normalize();
        assert!((ray.direction - expected).length() < 1.0e-5);
        assert_eq!(ray.origin, view.origin);
    }

    #[test]
    fn upper_pixels_tilt_up() {
        let view = View::default();
        let resolution = Vec2::new(64.0, 64.0);
        let center = view.ray(Vec2::new(0.0, 0.0), resolution);
        let above = view.ray(Vec2::new(0.0, 20.0), resolution);
        assert!(above.direction.y > center.direction.y);
        assert!((above.direction.length() - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn pixel_offsets_are_centered() {
        assert_eq!(pixel_offset(0, 0, 4, 2), Vec2::new(-1.5, 0.5));
        assert_eq!(pixel_offset(3, 1, 4, 2), Vec2::new(1.5, -0.5));
    }
}
