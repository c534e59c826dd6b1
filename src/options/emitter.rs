use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::particle::EmitterConfig;

/// Serializable mirror of [`EmitterConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Emitter", inline)]
#[serde(default)]
pub struct EmitterOptions {
    /// Pool capacity.
    #[schemars(title = "Max Particles", range(min = 1))]
    pub max_particles: u32,
    /// Particles released per tick.
    #[schemars(title = "Release Count")]
    pub num_to_release: u32,
    /// Seconds between ticks.
    #[schemars(title = "Release Interval", range(min = 0.0))]
    pub release_interval: f32,
    /// Particle lifetime in seconds.
    #[schemars(title = "Life Cycle", range(min = 0.0))]
    pub life_cycle: f32,
    /// Release point.
    pub position: [f32; 3],
    /// Base release velocity.
    pub velocity: [f32; 3],
    /// Constant acceleration.
    pub gravity: [f32; 3],
    /// Air-resistance target velocity.
    pub wind: [f32; 3],
    /// Relax velocity toward `wind` each step.
    #[schemars(title = "Air Resistance")]
    pub air_resistance: bool,
    /// Random spread added to the release velocity.
    #[schemars(title = "Velocity Scale", range(min = 0.0, max = 50.0), extend("step" = 0.1))]
    pub velocity_scale: f32,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self::from(&EmitterConfig::default())
    }
}

impl EmitterOptions {
    /// Engine configuration described by these options.
    #[must_use]
    pub fn to_config(&self) -> EmitterConfig {
        EmitterConfig {
            max_particles: self.max_particles,
            num_to_release: self.num_to_release,
            release_interval: self.release_interval,
            life_cycle: self.life_cycle,
            position: Vec3::from_array(self.position),
            velocity: Vec3::from_array(self.velocity),
            gravity: Vec3::from_array(self.gravity),
            wind: Vec3::from_array(self.wind),
            air_resistance: self.air_resistance,
            velocity_scale: self.velocity_scale,
        }
    }
}

impl From<&EmitterConfig> for EmitterOptions {
    fn from(config: &EmitterConfig) -> Self {
        Self {
            max_particles: config.max_particles,
            num_to_release: config.num_to_release,
            release_interval: config.release_interval,
            life_cycle: config.life_cycle,
            position: config.position.to_array(),
            velocity: config.velocity.to_array(),
            gravity: config.gravity.to_array(),
            wind: config.wind.to_array(),
            air_resistance: config.air_resistance,
            velocity_scale: config.velocity_scale,
        }
    }
}
