//! CPU particle simulation.
//!
//! [`ParticleEngine`] owns a fixed-capacity [`pool::ParticlePool`], releases
//! particles on a cadence set by its [`EmitterConfig`], integrates gravity
//! and air resistance, resolves [`CollisionPlane`] contacts, and exports the
//! survivors as a vertex stream.

pub mod collision;
pub mod emitter;
pub mod engine;
pub mod pool;
pub mod random;

pub use collision::{CollisionPlane, CollisionResult, PlaneSide, PLANE_EPSILON};
pub use emitter::EmitterConfig;
pub use engine::{ParticleEngine, ParticleStats};
pub use pool::ParticlePool;
pub use random::ParticleRng;

use glam::Vec3;

/// One point particle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// World-space velocity.
    pub velocity: Vec3,
    /// RGB tint picked at release.
    pub color: Vec3,
    /// Simulation time of release. Age is `current_time - start_time`.
    pub start_time: f32,
}

impl Particle {
    /// Seconds since release at simulation time `now`.
    #[inline]
    #[must_use]
    pub fn age(&self, now: f32) -> f32 {
        now - self.start_time
    }
}
