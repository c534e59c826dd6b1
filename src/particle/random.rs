//! Per-engine random source for release directions and colors.

use std::f32::consts::PI;

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Random generator owned by one engine.
///
/// Engines never share generator state, so independent emitters stay
/// independent and a test can pin one down with [`ParticleRng::seeded`].
#[derive(Debug, Clone)]
pub struct ParticleRng {
    rng: StdRng,
}

impl ParticleRng {
    /// Generator seeded from the thread-local OS-backed generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic generator for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform point on the unit sphere.
    ///
    /// Picks `z` uniformly in `[-1, 1]` and an azimuth uniformly in
    /// `[-π, π]`; by Archimedes' hat-box theorem this is uniform over the
    /// sphere's surface.
    pub fn unit_vector(&mut self) -> Vec3 {
        let z: f32 = self.rng.random_range(-1.0..=1.0);
        let radius = (1.0 - z * z).max(0.0).sqrt();
        let theta: f32 = self.rng.random_range(-PI..=PI);
        Vec3::new(theta.cos() * radius, theta.sin() * radius, z)
    }

    /// RGB color with each channel uniform in `[0, 1]`.
    pub fn color(&mut self) -> Vec3 {
        Vec3::new(
            self.rng.random_range(0.0..=1.0),
            self.rng.random_range(0.0..=1.0),
            self.rng.random_range(0.0..=1.0),
        )
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_vectors_have_unit_length() {
        let mut rng = ParticleRng::seeded(7);
        for _ in 0..1000 {
            let v = rng.unit_vector();
            assert!((v.length() - 1.0).abs() < 1e-5, "{v:?}");
        }
    }

    #[test]
    fn unit_vectors_cover_both_hemispheres() {
        let mut rng = ParticleRng::seeded(11);
        let mean = (0..4000).map(|_| rng.unit_vector()).sum::<Vec3>() / 4000.0;
        assert!(mean.length() < 0.1, "mean direction drifted: {mean:?}");
    }

    #[test]
    fn colors_stay_in_unit_cube() {
        let mut rng = ParticleRng::seeded(3);
        for _ in 0..1000 {
            let c = rng.color();
            assert!(c.cmpge(Vec3::ZERO).all() && c.cmple(Vec3::ONE).all());
        }
    }

    #[test]
    fn equal_seeds_repeat_sequences() {
        let mut a = ParticleRng::seeded(42);
        let mut b = ParticleRng::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.unit_vector(), b.unit_vector());
            assert_eq!(a.color(), b.color());
        }
    }
}
