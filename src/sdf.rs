//! Signed distance primitives and CSG combinators.
//!
//! Primitives are exact for their parameterizations. The combinators only
//! bound the true distance near the seams where two operands meet, which is
//! enough for sphere tracing to stay conservative.

use crate::math::{Vec2, Vec3};

/// A scalar field `point -> signed distance`.
pub trait DistanceField {
    fn distance(&self, p: Vec3) -> f32;
}

impl<F> DistanceField for F
where
    F: Fn(Vec3) -> f32,
{
    fn distance(&self, p: Vec3) -> f32 {
        self(p)
    }
}

pub fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Axis-aligned box centered at the origin with full edge lengths `size`.
pub fn sd_box(p: Vec3, size: Vec3) -> f32 {
    let d = p.abs() - (size / 2.0);
    let inside = d.max_component().min(0.0);
    let outside = d.max(Vec3::ZERO).length();
    inside + outside
}

/// Capped cylinder along the local Z axis, centered at the origin.
pub fn sd_cylinder(p: Vec3, height: f32, radius: f32) -> f32 {
    let d = Vec2::new(p.xy().length() - radius, p.z.abs() - (height / 2.0));
    let inside = d.max_component().min(0.0);
    let outside = d.max(Vec2::new(0.0, 0.0)).length();
    inside + outside
}

pub fn op_union(a: f32, b: f32) -> f32 {
    a.min(b)
}

pub fn op_intersect(a: f32, b: f32) -> f32 {
    a.max(b)
}

pub fn op_difference(a: f32, b: f32) -> f32 {
    a.max(-b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1.0e-5;

    #[test]
    fn sphere_surface_is_zero() {
        let directions = [
            Vec3::X,
            Vec3::new(-0.3, 0.8, 0.2),
            Vec3::new(0.5, -0.5, -0.7),
        ];
        for radius in [0.0, 0.3, 1.2, 7.5] {
            for dir in directions {
                let p = dir.normalize() * radius;
                assert!(sd_sphere(p, radius).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn sphere_is_negative_inside() {
        assert!((sd_sphere(Vec3::ZERO, 1.2) + 1.2).abs() < TOLERANCE);
        assert!((sd_sphere(Vec3::new(0.0, 3.0, 0.0), 1.0) - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn box_distances_are_exact() {
        let size = Vec3::splat(1.8);
        assert!((sd_box(Vec3::ZERO, size) + 0.9).abs() < TOLERANCE);
        assert!(sd_box(Vec3::new(0.9, 0.2, -0.1), size).abs() < TOLERANCE);
        assert!((sd_box(Vec3::new(2.0, 0.0, 0.0), size) - 1.1).abs() < TOLERANCE);
        // Nearest feature is the corner.
        let corner = sd_box(Vec3::new(1.9, 1.9, 0.0), size);
        assert!((corner - 2.0_f32.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn cylinder_combines_radial_and_axial_terms() {
        assert!((sd_cylinder(Vec3::ZERO, 2.0, 0.7) + 0.7).abs() < TOLERANCE);
        assert!(sd_cylinder(Vec3::new(0.7, 0.0, 0.5), 2.0, 0.7).abs() < TOLERANCE);
        assert!((sd_cylinder(Vec3::new(0.0, 0.0, 1.5), 2.0, 0.7) - 0.5).abs() < TOLERANCE);
        // Beyond both the rim and the cap.
        let rim = sd_cylinder(Vec3::new(1.0, 0.0, 1.4), 2.0, 0.7);
        assert!((rim - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn combinators_match_min_max_identities() {
        let values = [-2.5, -0.1, 0.0, 0.4, 3.0];
        for a in values {
            for b in values {
                assert_eq!(op_union(a, b), a.min(b));
                assert_eq!(op_intersect(a, b), a.max(b));
                assert_eq!(op_difference(a, b), a.max(-b));
            }
        }
    }

    #[test]
    fn closures_act_as_fields() {
        let field = |p: Vec3| sd_sphere(p, 1.0);
        assert!((field.distance(Vec3::new(0.0, 0.0, 4.0)) - 3.0).abs() < TOLERANCE);
    }
}
