use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::driver::DEFAULT_TIME_STEP;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("width and height must be positive")]
    EmptyViewport,
    #[error("outputPath must include a parent directory: {0}")]
    MissingParent(String),
    #[error("output directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("{0} must be finite, got {1}")]
    NonFinite(&'static str, f32),
    #[error("frames array must not be empty")]
    NoFrames,
    #[error("frameCount must be at least 1")]
    ZeroFrameCount,
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    #[serde(default)]
    pub time: f32,
    pub ball_speed: f32,
    pub hole_speed: f32,
    #[serde(default = "default_renderer_mode")]
    pub renderer_mode: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<RenderFrameConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub output_dir: String,
    pub frame_count: u32,
    #[serde(default)]
    pub time_start: f32,
    #[serde(default = "default_time_step")]
    pub time_step: f32,
    pub ball_speed: f32,
    pub hole_speed: f32,
    #[serde(default = "default_renderer_mode")]
    pub renderer_mode: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RenderFrameConfig),
    Batch(RenderBatchConfig),
    Animation(AnimationConfig),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Cpu,
    Gpu,
}

impl RenderMode {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("gpu") {
            Self::Gpu
        } else {
            Self::Cpu
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
        }
    }
}

/// Process environment overrides applied on top of the job document.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvOverrides {
    pub renderer_mode: Option<RenderMode>,
    pub threads: Option<usize>,
}

impl EnvOverrides {
    pub const RENDERER_MODE_VAR: &'static str = "CSGNUT_RENDERER_MODE";
    pub const THREADS_VAR: &'static str = "CSGNUT_THREADS";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let renderer_mode = lookup(Self::RENDERER_MODE_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| RenderMode::parse(&raw));
        let threads = lookup(Self::THREADS_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|threads| *threads > 0)
                    .ok_or(ConfigError::InvalidEnv {
                        name: Self::THREADS_VAR,
                        value: raw,
                    })
            })
            .transpose()?;

        Ok(Self {
            renderer_mode,
            threads,
        })
    }
}

fn default_renderer_mode() -> String {
    "cpu".to_string()
}

const fn default_time_step() -> f32 {
    DEFAULT_TIME_STEP
}

pub fn validate_config(config: &RenderFrameConfig) -> Result<(), ConfigError> {
    if config.width == 0 || config.height == 0 {
        return Err(ConfigError::EmptyViewport);
    }

    let output_parent = Path::new(&config.output_path)
        .parent()
        .ok_or_else(|| ConfigError::MissingParent(config.output_path.clone()))?;
    // A bare file name has an empty parent: the working directory.
    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(ConfigError::MissingDirectory(output_parent.to_path_buf()));
    }

    validate_finite("time", config.time)?;
    validate_finite("ballSpeed", config.ball_speed)?;
    validate_finite("holeSpeed", config.hole_speed)?;
    Ok(())
}

pub fn validate_animation(config: &AnimationConfig) -> Result<(), ConfigError> {
    if config.width == 0 || config.height == 0 {
        return Err(ConfigError::EmptyViewport);
    }
    if config.frame_count == 0 {
        return Err(ConfigError::ZeroFrameCount);
    }
    let dir = Path::new(&config.output_dir);
    if !dir.is_dir() {
        return Err(ConfigError::MissingDirectory(dir.to_path_buf()));
    }

    validate_finite("timeStart", config.time_start)?;
    validate_finite("timeStep", config.time_step)?;
    validate_finite("ballSpeed", config.ball_speed)?;
    validate_finite("holeSpeed", config.hole_speed)?;
    Ok(())
}

fn validate_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(field, value))
    }
}
