//! Embedding-space vectors.
//!
//! A [`Vec3`] is a point or direction in the 3-real-coordinate ambient space.
//! How the coordinates are read depends on the active manifold: Cartesian
//! coordinates on the flat plane, a point of the unit sphere, or a point of
//! the upper hyperboloid sheet x²+y²−z² = −1. The arithmetic here is plain
//! vector algebra either way; geometric motion is expressed through matrices.

use core::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::matrix::Matrix;

/// A 3D vector in the ambient embedding space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Squared Euclidean norm.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        libm::sqrt(self.norm_squared())
    }

    /// Dot product with another vector.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Normalize to a unit vector; returns zero for degenerate input.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if n > 1e-12 {
            *self / n
        } else {
            Self::zero()
        }
    }

    /// Euclidean distance to another vector.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// Distance to another vector in the xy plane, ignoring z.
    ///
    /// The disk model lives in the z = 0 plane, so geodesic and inversion
    /// work measures lengths this way.
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrt(dx * dx + dy * dy)
    }

    /// Norm of the xy projection.
    #[must_use]
    pub fn planar_norm(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y)
    }

    /// Offset the vector radially along its own direction by `delta`.
    ///
    /// The direction is preserved; the length becomes `norm + delta`.
    #[must_use]
    pub fn extended(&self, delta: f64) -> Self {
        let n = self.norm();
        *self / n * (n + delta)
    }

    /// View this vector as a 1×3 row matrix.
    ///
    /// This is the bridge used by every transform application: a point is
    /// carried through an isometry as `row × matrix`.
    #[must_use]
    pub fn as_row_matrix(&self) -> Matrix {
        Matrix::from_row([self.x, self.y, self.z])
    }

    /// Reconstruct a vector from a 1×3 row matrix.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotARowVector`] if the matrix is not 1×3.
    pub fn from_row_matrix(m: &Matrix) -> Result<Self, CoreError> {
        if m.rows() != 1 || m.cols() != 3 {
            return Err(CoreError::NotARowVector {
                rows: m.rows(),
                cols: m.cols(),
            });
        }
        Ok(Self::new(m.get(0, 0), m.get(0, 1), m.get(0, 2)))
    }

    /// Apply a 3×3 transform to this vector as a row: `self × m`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if `m` does not have 3 rows.
    pub fn transformed(&self, m: &Matrix) -> Result<Self, CoreError> {
        Self::from_row_matrix(&self.as_row_matrix().matmul(m)?)
    }

    /// Rotate about the x axis by `ax`, then about the y axis by `ay`.
    ///
    /// Component form of the corresponding row-matrix products; infallible.
    #[must_use]
    pub fn rotated(&self, ax: f64, ay: f64) -> Self {
        let (sx, cx) = (libm::sin(ax), libm::cos(ax));
        let v = Self::new(self.x, self.y * cx + self.z * sx, -self.y * sx + self.z * cx);
        let (sy, cy) = (libm::sin(ay), libm::cos(ay));
        Self::new(v.x * cy - v.z * sy, v.y, v.x * sy + v.z * cy)
    }

    /// Boost along the x family by `wx`, then the y family by `wy`.
    ///
    /// Component form of the corresponding row-matrix products; keeps
    /// upper-sheet hyperboloid points on the sheet.
    #[must_use]
    pub fn boosted(&self, wx: f64, wy: f64) -> Self {
        let (sx, cx) = (libm::sinh(wx), libm::cosh(wx));
        let v = Self::new(self.x, self.y * cx + self.z * sx, self.y * sx + self.z * cx);
        let (sy, cy) = (libm::sinh(wy), libm::cosh(wy));
        Self::new(v.x * cy + v.z * sy, v.y, v.x * sy + v.z * cy)
    }

    /// Convert to nalgebra `Vector3`.
    #[must_use]
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Create from nalgebra `Vector3`.
    #[must_use]
    pub fn from_vector3(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
