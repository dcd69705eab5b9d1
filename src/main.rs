use std::io::{self, Read};
use std::time::Instant;

use anyhow::{Context, Result};
use csg_nut::config::{EnvOverrides, IncomingConfig, RenderMode};
use csg_nut::cpu::render_cpu;
use csg_nut::gpu::GpuRenderer;
use csg_nut::render::{plan_frames, View};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    let incoming: IncomingConfig =
        serde_json::from_str(&raw).context("failed to parse job configuration")?;

    let overrides = EnvOverrides::from_env()?;
    if let Some(threads) = overrides.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to size the render thread pool")?;
    }

    let jobs = plan_frames(incoming)?;

    let view = View::default();
    let total = jobs.len();
    let mut gpu_renderer: Option<GpuRenderer> = None;
    let mut gpu_unavailable = false;

    for (index, job) in jobs.into_iter().enumerate() {
        let settings = job.settings.with_mode_override(overrides.renderer_mode);
        tracing::debug!(
            time = job.params.time,
            ball_speed = job.params.ball_speed,
            hole_speed = job.params.hole_speed,
            "frame parameters"
        );

        let mut mode = settings.mode;
        if mode == RenderMode::Gpu && gpu_renderer.is_none() && !gpu_unavailable {
            match pollster::block_on(GpuRenderer::new()) {
                Ok(renderer) => gpu_renderer = Some(renderer),
                Err(error) => {
                    tracing::warn!("GPU initialization failed, falling back to CPU: {error}");
                    gpu_unavailable = true;
                }
            }
        }

        let started = Instant::now();
        let image = match gpu_renderer.as_mut() {
            Some(renderer) if mode == RenderMode::Gpu => renderer
                .render_frame(&settings, &job.params, &view)
                .context("GPU render failed")?,
            _ => {
                mode = RenderMode::Cpu;
                render_cpu(&settings, &job.params, &view)
            }
        };
        let elapsed_ms = started.elapsed().as_millis();
        image
            .save(&settings.output_path)
            .with_context(|| format!("failed to write {}", settings.output_path))?;

        tracing::info!(
            "[{}/{}] Rendered t={:.2} [{}] in {} ms: {}",
            index + 1,
            total,
            job.params.time,
            mode.as_str(),
            elapsed_ms,
            settings.output_path
        );
    }

    // In this CLI workflow the renderer lifetime matches the process lifetime.
    // Some GPU/driver stacks can crash while tearing down WGPU objects on drop.
    std::mem::forget(gpu_renderer);

    Ok(())
}
