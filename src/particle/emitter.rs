//! Emitter configuration.

use glam::Vec3;

use crate::error::FlurryError;

/// How and where an engine releases particles, and the forces acting on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterConfig {
    /// Pool capacity. Fixed once the engine is initialized.
    pub max_particles: u32,
    /// Particles released per release tick.
    pub num_to_release: u32,
    /// Seconds between release ticks. Zero releases on every update.
    pub release_interval: f32,
    /// Seconds a particle lives.
    pub life_cycle: f32,
    /// Where particles are released.
    pub position: Vec3,
    /// Base release velocity.
    pub velocity: Vec3,
    /// Constant acceleration.
    pub gravity: Vec3,
    /// Velocity that air resistance relaxes particles toward.
    pub wind: Vec3,
    /// Whether particles relax toward [`Self::wind`] each step.
    pub air_resistance: bool,
    /// Magnitude of the random unit-sphere direction added to the release
    /// velocity. Zero releases every particle with exactly [`Self::velocity`].
    pub velocity_scale: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_particles: 1,
            num_to_release: 1,
            release_interval: 1.0,
            life_cycle: 1.0,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            gravity: Vec3::ZERO,
            wind: Vec3::ZERO,
            air_resistance: true,
            velocity_scale: 1.0,
        }
    }
}

impl EmitterConfig {
    /// Check every field against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`FlurryError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), FlurryError> {
        if self.max_particles == 0 {
            return Err(invalid("max_particles must be greater than zero"));
        }
        if !self.release_interval.is_finite() || self.release_interval < 0.0 {
            return Err(invalid(
                "release_interval must be finite and non-negative",
            ));
        }
        if !self.life_cycle.is_finite() || self.life_cycle <= 0.0 {
            return Err(invalid("life_cycle must be finite and positive"));
        }
        if !self.velocity_scale.is_finite() {
            return Err(invalid("velocity_scale must be finite"));
        }
        let vectors = [
            ("position", self.position),
            ("velocity", self.velocity),
            ("gravity", self.gravity),
            ("wind", self.wind),
        ];
        if let Some((name, _)) = vectors.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(&format!("{name} must be finite")));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> FlurryError {
    FlurryError::InvalidConfig(msg.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(EmitterConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_interval_is_accepted() {
        let config = EmitterConfig {
            release_interval: 0.0,
            ..EmitterConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad = [
            EmitterConfig {
                max_particles: 0,
                ..EmitterConfig::default()
            },
            EmitterConfig {
                release_interval: -0.1,
                ..EmitterConfig::default()
            },
            EmitterConfig {
                life_cycle: 0.0,
                ..EmitterConfig::default()
            },
            EmitterConfig {
                life_cycle: f32::INFINITY,
                ..EmitterConfig::default()
            },
            EmitterConfig {
                velocity_scale: f32::NAN,
                ..EmitterConfig::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(FlurryError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn names_the_non_finite_vector() {
        let config = EmitterConfig {
            gravity: Vec3::new(0.0, f32::NAN, 0.0),
            ..EmitterConfig::default()
        };
        let Err(FlurryError::InvalidConfig(msg)) = config.validate() else {
            panic!("expected InvalidConfig");
        };
        assert!(msg.contains("gravity"));
    }
}
