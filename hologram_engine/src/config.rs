//! Env-driven engine configuration and its validation bounds.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use bevy::prelude::Resource;

use crate::data::DisplayVolume;
use crate::render::ColorMode;

const MIN_RADIUS: f32 = 1.0;
const MIN_PARTICLE_SIZE: f32 = 0.5;
const MAX_PARTICLE_SIZE: f32 = 2.0;

/// Scalar knobs the command/config layer feeds the engine. Values arrive
/// validated; [`HologramConfig::from_env`] is the demo's way of filling them.
#[derive(Resource, Clone, Debug)]
pub struct HologramConfig {
    /// Scan radius used when a start request doesn't carry its own.
    pub default_radius: f32,
    /// Hard ceiling on any requested radius; the scan is O(radius²).
    pub max_radius: f32,
    pub particle_size: f32,
    /// How often a displaying session re-emits its points.
    pub refresh_interval: Duration,
    /// How often a session re-scans its region; `None` keeps the one-shot
    /// scan behavior.
    pub rescan_interval: Option<Duration>,
    pub color_mode: ColorMode,
    pub display_volume: DisplayVolume,
}

impl Default for HologramConfig {
    fn default() -> Self {
        Self {
            default_radius: 30.0,
            max_radius: 50.0,
            particle_size: 0.8,
            refresh_interval: Duration::from_millis(50),
            rescan_interval: None,
            color_mode: ColorMode::default(),
            display_volume: DisplayVolume::default(),
        }
    }
}

impl HologramConfig {
    /// Read overrides from `HOLOTOPO_*` environment variables. Unset vars
    /// keep their defaults; unparsable values warn on stderr and fall back.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max_radius) = parse_var::<f32>("HOLOTOPO_MAX_RADIUS") {
            config.max_radius = max_radius.max(MIN_RADIUS);
        }
        if let Some(radius) = parse_var::<f32>("HOLOTOPO_RADIUS") {
            config.default_radius = config.clamp_radius(radius);
            if config.default_radius != radius {
                eprintln!(
                    "holotopo: HOLOTOPO_RADIUS {radius} out of bounds, using {}",
                    config.default_radius
                );
            }
        }
        if let Some(size) = parse_var::<f32>("HOLOTOPO_PARTICLE_SIZE") {
            config.particle_size = size.clamp(MIN_PARTICLE_SIZE, MAX_PARTICLE_SIZE);
            if config.particle_size != size {
                eprintln!(
                    "holotopo: HOLOTOPO_PARTICLE_SIZE {size} out of bounds, using {}",
                    config.particle_size
                );
            }
        }
        if let Some(millis) = parse_var::<u64>("HOLOTOPO_REFRESH_MS") {
            config.refresh_interval = Duration::from_millis(millis);
        }
        if let Some(secs) = parse_var::<f32>("HOLOTOPO_RESCAN_SECS") {
            config.rescan_interval =
                (secs > 0.0).then(|| Duration::from_secs_f32(secs));
        }
        if let Ok(raw) = std::env::var("HOLOTOPO_COLOR_MODE") {
            match raw.to_lowercase().as_str() {
                "material" => config.color_mode = ColorMode::Material,
                "height" => config.color_mode = ColorMode::Height,
                _ => eprintln!("holotopo: unknown HOLOTOPO_COLOR_MODE {raw:?}, using material"),
            }
        }

        config
    }

    /// Clamp a requested radius into the configured bounds.
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        radius.clamp(MIN_RADIUS, self.max_radius.max(MIN_RADIUS))
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("holotopo: invalid {key}: {raw:?} ({err})");
            None
        }
    }
}
