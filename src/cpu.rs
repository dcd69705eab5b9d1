use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::domain::{NUT_MATERIAL, SCENE_LIGHTS};
use crate::frame::FrameParams;
use crate::march::{estimate_normal, ray_march, MarchResult};
use crate::math::{Vec2, Vec3};
use crate::render::view::pixel_offset;
use crate::render::{RenderSettings, View};
use crate::scene::NutScene;
use crate::shading::phong_illumination;

/// Linear color with coverage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub rgb: Vec3,
    pub alpha: f32,
}

impl Color {
    /// Miss sentinel: blue, fully transparent.
    pub const BACKGROUND: Self = Self {
        rgb: Vec3::new(0.0, 0.0, 1.0),
        alpha: 0.0,
    };

    pub const fn opaque(rgb: Vec3) -> Self {
        Self { rgb, alpha: 1.0 }
    }
}

/// Shades one screen sample. `frag` is the offset in pixels from the
/// viewport center, +Y up.
pub fn shade_sample(frame: &FrameParams, view: &View, frag: Vec2) -> Color {
    let scene = NutScene::from_frame(frame);
    let ray = view.ray(frag, frame.resolution);

    match ray_march(&scene, ray) {
        MarchResult::Miss => Color::BACKGROUND,
        MarchResult::Hit(t) => {
            let p = ray.at(t);
            let normal = estimate_normal(&scene, p);
            let rgb = phong_illumination(
                &NUT_MATERIAL,
                &SCENE_LIGHTS,
                frame.time,
                p,
                normal,
                view.origin,
            );
            Color::opaque(rgb)
        }
    }
}

pub fn render_cpu(settings: &RenderSettings, frame: &FrameParams, view: &View) -> RgbaImage {
    let width = settings.width as usize;
    let mut color_buffer = vec![Color::BACKGROUND; width * settings.height as usize];

    color_buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                let frag = pixel_offset(x as u32, y as u32, settings.width, settings.height);
                *slot = shade_sample(frame, view, frag);
            }
        });

    let mut image = RgbaImage::new(settings.width, settings.height);
    for (index, color) in color_buffer.iter().enumerate() {
        let x = (index % width) as u32;
        let y = (index / width) as u32;
        image.put_pixel(x, y, to_rgba(*color));
    }
    image
}

fn to_rgba(color: Color) -> Rgba<u8> {
    let rgb = color.rgb.clamp01();
    let quantize = |v: f32| (v * 255.999) as u8;
    Rgba([
        quantize(rgb.x),
        quantize(rgb.y),
        quantize(rgb.z),
        quantize(color.alpha.clamp(0.0, 1.0)),
    ])
}
