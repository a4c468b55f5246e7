use std::str::FromStr;

use anyhow::{bail, Context};
use glam::Vec3;

/// Which articulated model the demo builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoModel {
    /// Textured body with head, eyes and two flapping wings.
    #[default]
    Bird,
    /// Spherical body with eyes and two shoulder/elbow/arm chains.
    Robot,
}

impl FromStr for DemoModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "bird" => Ok(DemoModel::Bird),
            "robot" => Ok(DemoModel::Robot),
            other => bail!("Unknown model '{other}', expected 'bird' or 'robot'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub model: DemoModel,
    pub frames: u32,
    /// Seconds of animation time per frame, before `time_scale`.
    pub time_step: f32,
    pub time_scale: f32,
    pub display_surface: bool,
    pub display_wireframe: bool,
    pub wireframe_color: Vec3,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            model: DemoModel::default(),
            frames: 120,
            time_step: 1.0 / 60.0,
            time_scale: 1.0,
            display_surface: true,
            display_wireframe: false,
            wireframe_color: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

impl DemoConfig {
    /// Parses `--key=value` arguments on top of the defaults.
    pub fn from_args<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Self::default();

        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .strip_prefix("--")
                .and_then(|arg| arg.split_once('='))
                .with_context(|| format!("Expected --key=value, got '{arg}'"))?;

            match key {
                "model" => config.model = value.parse()?,
                "frames" => config.frames = parse_value(key, value)?,
                "time-step" => config.time_step = parse_value(key, value)?,
                "time-scale" => config.time_scale = parse_value(key, value)?,
                "surface" => config.display_surface = parse_value(key, value)?,
                "wireframe" => config.display_wireframe = parse_value(key, value)?,
                _ => bail!("Unknown option '--{key}'"),
            }
        }

        if config.time_step <= 0.0 {
            bail!("--time-step must be positive, got {}", config.time_step);
        }

        Ok(config)
    }
}

fn parse_value<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid value '{value}' for --{key}"))
}
