use crate::math::Vec3;

/// Phong coefficients, one per RGB channel.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub name: &'static str,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

pub const NUT_MATERIAL: Material = Material {
    name: "nut_red",
    ambient: Vec3::splat(0.2),
    diffuse: Vec3::new(0.7, 0.2, 0.2),
    specular: Vec3::splat(1.0),
    shininess: 100.0,
};
