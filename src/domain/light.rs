use crate::math::Vec3;

/// Plane a light circles in. The remaining axis stays at a fixed coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitPlane {
    /// `(r sin a, height, r cos a)`
    Xz { height: f32 },
    /// `(r sin a, r cos a, depth)`
    Xy { depth: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub name: &'static str,
    pub plane: OrbitPlane,
    pub radius: f32,
    /// Angular rate in radians per unit of animation time.
    pub rate: f32,
    pub intensity: Vec3,
}

impl Light {
    pub fn position(&self, time: f32) -> Vec3 {
        let (s, c) = (self.rate * time).sin_cos();
        match self.plane {
            OrbitPlane::Xz { height } => Vec3::new(self.radius * s, height, self.radius * c),
            OrbitPlane::Xy { depth } => Vec3::new(self.radius * s, self.radius * c, depth),
        }
    }
}

pub const KEY_LIGHT: Light = Light {
    name: "key_orbit",
    plane: OrbitPlane::Xz { height: 2.0 },
    radius: 4.0,
    rate: 1.0,
    intensity: Vec3::splat(0.6),
};

pub const FILL_LIGHT: Light = Light {
    name: "fill_orbit",
    plane: OrbitPlane::Xy { depth: 2.0 },
    radius: 2.0,
    rate: 0.37,
    intensity: Vec3::splat(0.6),
};

pub const SCENE_LIGHTS: [Light; 2] = [KEY_LIGHT, FILL_LIGHT];
