use crate::march::{EPSILON, MARCH_END, MARCH_START, MAX_MARCH_STEPS};

pub fn build_gpu_shader_wgsl() -> String {
    GPU_SHADER_WGSL_TEMPLATE
        .replace("__MAX_STEPS__", &format!("{MAX_MARCH_STEPS}u"))
        .replace("__EPSILON__", &wgsl_float(EPSILON))
        .replace("__START__", &wgsl_float(MARCH_START))
        .replace("__END__", &wgsl_float(MARCH_END))
}

/// Decimal literal that WGSL reads as a float, never an integer.
fn wgsl_float(value: f32) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

const GPU_SHADER_WGSL_TEMPLATE: &str = include_str!("../shaders/nut.wgsl");
