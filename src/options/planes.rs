use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::FlurryError,
    particle::{CollisionPlane, CollisionResult},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Plane", inline)]
#[serde(default)]
/// One collision plane.
pub struct PlaneOptions {
    /// Plane normal. Should be unit length.
    pub normal: [f32; 3],
    /// Any point on the plane.
    pub point: [f32; 3],
    /// Restitution for `bounce` planes.
    #[schemars(title = "Bounce Factor", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub bounce_factor: f32,
    /// Response policy.
    pub result: CollisionResult,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            normal: [0.0, 1.0, 0.0],
            point: [0.0; 3],
            bounce_factor: 1.0,
            result: CollisionResult::Bounce,
        }
    }
}

impl TryFrom<&PlaneOptions> for CollisionPlane {
    type Error = FlurryError;

    fn try_from(options: &PlaneOptions) -> Result<Self, Self::Error> {
        let normal = Vec3::from_array(options.normal);
        let point = Vec3::from_array(options.point);
        if !normal.is_finite() || normal.length_squared() == 0.0 {
            return Err(FlurryError::InvalidConfig(
                "plane normal must be finite and non-zero".to_owned(),
            ));
        }
        if !point.is_finite() || !options.bounce_factor.is_finite() {
            return Err(FlurryError::InvalidConfig(
                "plane point and bounce_factor must be finite".to_owned(),
            ));
        }
        Ok(CollisionPlane::new(normal, point)
            .with_bounce_factor(options.bounce_factor)
            .with_result(options.result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_plane() {
        let options = PlaneOptions {
            bounce_factor: 0.4,
            result: CollisionResult::Recycle,
            ..PlaneOptions::default()
        };
        let plane = CollisionPlane::try_from(&options).unwrap();
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.bounce_factor, 0.4);
        assert_eq!(plane.result, CollisionResult::Recycle);
    }

    #[test]
    fn rejects_degenerate_normal() {
        let options = PlaneOptions {
            normal: [0.0; 3],
            ..PlaneOptions::default()
        };
        assert!(CollisionPlane::try_from(&options).is_err());
    }
}
