//! Projected per-frame output.
//!
//! The engine hands the display layer finished 2D data: every body sample
//! and the target already carried through the current orientation and the
//! manifold's display projection, plus (hyperbolic sessions only) the
//! geodesic outline of every tessellation tile. Actual pixel work happens
//! outside the engine.

use serde::{Deserialize, Serialize};
use serpentine_core::Vec3;

use crate::geodesic::GeodesicPath;

/// Which side of the projection plane a sample lies on.
///
/// Back samples are drawn first so the front of the manifold occludes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepthSide {
    /// z ≥ 0 after orientation: the near side.
    Front,
    /// z < 0 after orientation: the far side.
    Back,
}

impl DepthSide {
    /// Classify a point by the sign of its oriented z coordinate.
    #[must_use]
    pub fn from_z(z: f64) -> Self {
        if z >= 0.0 {
            Self::Front
        } else {
            Self::Back
        }
    }
}

/// A display-ready sample: projected position plus its depth tag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyPoint {
    /// Position after orientation and display projection (z is residual
    /// depth for the flat/spherical identity projections, 0 on the disk).
    pub position: Vec3,
    /// Side of the projection plane before projection.
    pub side: DepthSide,
}

/// Everything the display layer needs for one frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Body samples, head first.
    pub body: Vec<BodyPoint>,
    /// The target point.
    pub target: BodyPoint,
    /// Geodesic outlines of the tessellation tiles, one list per tile.
    /// Empty on flat and spherical manifolds.
    pub tiles: Vec<Vec<GeodesicPath>>,
}

impl RenderFrame {
    /// Body samples on the far side, drawn first.
    pub fn back_body(&self) -> impl Iterator<Item = &BodyPoint> {
        self.body.iter().filter(|p| p.side == DepthSide::Back)
    }

    /// Body samples on the near side, drawn last.
    pub fn front_body(&self) -> impl Iterator<Item = &BodyPoint> {
        self.body.iter().filter(|p| p.side == DepthSide::Front)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_side_from_z() {
        assert_eq!(DepthSide::from_z(0.5), DepthSide::Front);
        assert_eq!(DepthSide::from_z(0.0), DepthSide::Front);
        assert_eq!(DepthSide::from_z(-0.1), DepthSide::Back);
    }

    #[test]
    fn test_depth_partition() {
        let frame = RenderFrame {
            body: vec![
                BodyPoint {
                    position: Vec3::zero(),
                    side: DepthSide::Front,
                },
                BodyPoint {
                    position: Vec3::new(1.0, 0.0, 0.0),
                    side: DepthSide::Back,
                },
            ],
            target: BodyPoint {
                position: Vec3::zero(),
                side: DepthSide::Front,
            },
            tiles: Vec::new(),
        };
        assert_eq!(frame.back_body().count(), 1);
        assert_eq!(frame.front_body().count(), 1);
    }
}
