//! Manifold selection.

use serde::{Deserialize, Serialize};
use serpentine_core::Vec3;

/// The curvature model in effect.
///
/// Selects which isometry family the session composes (rotations or boosts),
/// which canonical base point the head is pinned to, and which display
/// projection applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manifold {
    /// Zero curvature: the Euclidean plane, direct coordinate motion.
    Flat,
    /// Positive curvature: the unit sphere, motion by rotation.
    Spherical,
    /// Negative curvature: the upper hyperboloid sheet, motion by boost.
    Hyperbolic,
}

impl Manifold {
    /// The canonical base point the moving frame is anchored to.
    ///
    /// The plane origin for [`Manifold::Flat`]; the pole (0, 0, 1) for the
    /// curved manifolds.
    #[must_use]
    pub const fn base_point(&self) -> Vec3 {
        match self {
            Self::Flat => Vec3::zero(),
            Self::Spherical | Self::Hyperbolic => Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Whether motion is realized through the orientation pair rather than
    /// by direct coordinate translation.
    #[must_use]
    pub const fn is_curved(&self) -> bool {
        !matches!(self, Self::Flat)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Spherical => "spherical",
            Self::Hyperbolic => "hyperbolic",
        }
    }
}
