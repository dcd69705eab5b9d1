//! Animated CSG "nut" rendered by sphere tracing a signed distance field.
//!
//! The kernel (`sdf`, `scene`, `march`, `shading`, `render::view`, `cpu`) is a
//! set of pure functions of the per-frame [`frame::FrameParams`]; `gpu` runs
//! the same algorithm as a wgpu compute shader.

pub mod config;
pub mod cpu;
pub mod domain;
pub mod driver;
pub mod frame;
pub mod gpu;
pub mod march;
pub mod math;
pub mod render;
pub mod scene;
pub mod sdf;
pub mod shading;
