use std::path::Path;

use crate::config::{
    validate_animation, validate_config, AnimationConfig, ConfigError, IncomingConfig,
    RenderFrameConfig, RenderMode,
};
use crate::driver::Engine;
use crate::frame::FrameParams;

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    pub mode: RenderMode,
}

impl RenderSettings {
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            output_path: frame.output_path.clone(),
            mode: RenderMode::parse(&frame.renderer_mode),
        }
    }

    pub fn with_mode_override(mut self, mode: Option<RenderMode>) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self
    }
}

/// One frame to render: where it goes and the animation snapshot it shows.
#[derive(Clone, Debug)]
pub struct FrameJob {
    pub settings: RenderSettings,
    pub params: FrameParams,
}

/// Validates the job document and expands it into frames in render order.
pub fn plan_frames(incoming: IncomingConfig) -> Result<Vec<FrameJob>, ConfigError> {
    match incoming {
        IncomingConfig::Single(frame) => Ok(vec![single_job(&frame)?]),
        IncomingConfig::Batch(batch) => {
            if batch.frames.is_empty() {
                return Err(ConfigError::NoFrames);
            }
            batch.frames.iter().map(single_job).collect()
        }
        IncomingConfig::Animation(animation) => animation_jobs(&animation),
    }
}

fn single_job(frame: &RenderFrameConfig) -> Result<FrameJob, ConfigError> {
    validate_config(frame)?;
    Ok(FrameJob {
        settings: RenderSettings::from_frame(frame),
        params: FrameParams::new(
            frame.time,
            frame.ball_speed,
            frame.hole_speed,
            frame.width,
            frame.height,
        ),
    })
}

fn animation_jobs(animation: &AnimationConfig) -> Result<Vec<FrameJob>, ConfigError> {
    validate_animation(animation)?;

    let initial = FrameParams::new(
        animation.time_start,
        animation.ball_speed,
        animation.hole_speed,
        animation.width,
        animation.height,
    );
    let mut engine = Engine::nut(initial, animation.time_start, animation.time_step);
    engine.start();

    let mode = RenderMode::parse(&animation.renderer_mode);
    let dir = Path::new(&animation.output_dir);
    Ok((0..animation.frame_count)
        .map(|index| FrameJob {
            settings: RenderSettings {
                width: animation.width,
                height: animation.height,
                output_path: dir
                    .join(format!("frame_{index:05}.png"))
                    .to_string_lossy()
                    .into_owned(),
                mode,
            },
            params: engine.update(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderBatchConfig;

    fn frame(time: f32) -> RenderFrameConfig {
        RenderFrameConfig {
            width: 20,
            height: 10,
            output_path: "out.png".into(),
            time,
            ball_speed: 2.0,
            hole_speed: 3.0,
            renderer_mode: "gpu".into(),
        }
    }

    #[test]
    fn single_frame_keeps_its_parameters() {
        let jobs = plan_frames(IncomingConfig::Single(frame(4.0))).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].params, FrameParams::new(4.0, 2.0, 3.0, 20, 10));
        assert_eq!(jobs[0].settings.mode, RenderMode::Gpu);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let batch = IncomingConfig::Batch(RenderBatchConfig { frames: Vec::new() });
        assert!(matches!(plan_frames(batch), Err(ConfigError::NoFrames)));
    }

    #[test]
    fn animation_expands_through_the_engine() {
        let dir = std::env::temp_dir();
        let animation = AnimationConfig {
            width: 8,
            height: 8,
            output_dir: dir.to_string_lossy().into_owned(),
            frame_count: 3,
            time_start: 1.0,
            time_step: 0.5,
            ball_speed: 1.0,
            hole_speed: 1.0,
            renderer_mode: "cpu".into(),
        };
        let jobs = plan_frames(IncomingConfig::Animation(animation)).unwrap();
        let times: Vec<f32> = jobs.iter().map(|job| job.params.time).collect();
        assert_eq!(times, vec![1.5, 2.0, 2.5]);
        assert!(jobs[2].settings.output_path.ends_with("frame_00002.png"));
    }

    #[test]
    fn override_replaces_mode() {
        let settings = RenderSettings::from_frame(&frame(0.0));
        assert_eq!(settings.clone().with_mode_override(None).mode, RenderMode::Gpu);
        assert_eq!(
            settings.with_mode_override(Some(RenderMode::Cpu)).mode,
            RenderMode::Cpu
        );
    }
}
