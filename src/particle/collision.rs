//! Infinite collision planes and their response policies.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Particle;

/// Half-width of the band around a plane that classifies as
/// [`PlaneSide::OnPlane`].
pub const PLANE_EPSILON: f32 = 0.001;

/// What happens to a particle that ends a step behind a plane.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResult {
    /// Restore the pre-step position and reflect the normal velocity,
    /// scaled by the plane's bounce factor.
    #[default]
    Bounce,
    /// Restore the pre-step position and stop dead.
    Stick,
    /// Age the particle by one full life cycle so the next retirement pass
    /// frees it. Position and velocity are left alone.
    Recycle,
}

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// On the side the normal points toward.
    Front,
    /// On the far side of the plane.
    Back,
    /// Within [`PLANE_EPSILON`] of the plane.
    OnPlane,
}

/// An infinite plane that particles collide with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPlane {
    /// Plane normal. Expected to be unit length; not normalized here.
    pub normal: Vec3,
    /// Any point on the plane.
    pub point: Vec3,
    /// Restitution applied to the normal velocity on [`CollisionResult::Bounce`].
    pub bounce_factor: f32,
    /// Response policy.
    pub result: CollisionResult,
}

impl CollisionPlane {
    /// Fully elastic bouncing plane.
    #[must_use]
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            point,
            bounce_factor: 1.0,
            result: CollisionResult::Bounce,
        }
    }

    /// Same plane with a different restitution coefficient.
    #[must_use]
    pub fn with_bounce_factor(mut self, bounce_factor: f32) -> Self {
        self.bounce_factor = bounce_factor;
        self
    }

    /// Same plane with a different response policy.
    #[must_use]
    pub fn with_result(mut self, result: CollisionResult) -> Self {
        self.result = result;
        self
    }

    /// Classify `position` by the signed distance `(point - position) · normal`.
    #[inline]
    #[must_use]
    pub fn classify(&self, position: Vec3) -> PlaneSide {
        let distance = (self.point - position).dot(self.normal);
        if distance < -PLANE_EPSILON {
            PlaneSide::Front
        } else if distance > PLANE_EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Apply this plane's response if `moved_to` lies behind it.
    ///
    /// `moved_from` and `moved_to` are the particle's position before and
    /// after this step's move. The test uses `moved_to` rather than the
    /// particle's current position, so an earlier plane restoring the
    /// position does not hide the crossing from later planes.
    /// Returns whether the particle collided.
    pub fn respond(
        &self,
        particle: &mut Particle,
        moved_from: Vec3,
        moved_to: Vec3,
        life_cycle: f32,
    ) -> bool {
        if self.classify(moved_to) != PlaneSide::Back {
            return false;
        }
        match self.result {
            CollisionResult::Bounce => {
                particle.position = moved_from;
                let normal_velocity =
                    self.normal.dot(particle.velocity) * self.normal;
                let tangent_velocity = particle.velocity - normal_velocity;
                particle.velocity =
                    tangent_velocity - self.bounce_factor * normal_velocity;
            }
            CollisionResult::Stick => {
                particle.position = moved_from;
                particle.velocity = Vec3::ZERO;
            }
            CollisionResult::Recycle => {
                particle.start_time -= life_cycle;
            }
        }
        true
    }
}
