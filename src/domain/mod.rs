pub mod light;
pub mod material;

pub use light::{Light, OrbitPlane, FILL_LIGHT, KEY_LIGHT, SCENE_LIGHTS};
pub use material::{Material, NUT_MATERIAL};
