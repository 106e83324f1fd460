//! Dynamically shaped real matrices and the rotation/boost constructors.
//!
//! Products are shape-checked: multiplying incompatible shapes is a
//! programming error in the caller and surfaces as
//! [`CoreError::DimensionMismatch`] instead of silently truncating.
//!
//! The specialized constructors produce the two families of isometries the
//! engine composes: ordinary trigonometric rotations about the x/y axes, and
//! hyperbolic "boosts" built from sinh/cosh, which realize translations along
//! geodesics of the hyperboloid model. Both reduce to the identity at
//! parameter zero.

use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A rectangular matrix of `f64`, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero matrix of the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create the n×n identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Create a 1×3 row matrix.
    #[must_use]
    pub fn from_row(row: [f64; 3]) -> Self {
        Self {
            rows: 1,
            cols: 3,
            data: row.to_vec(),
        }
    }

    /// Create a 3×3 matrix from rows.
    #[must_use]
    pub fn from_rows_3x3(rows: [[f64; 3]; 3]) -> Self {
        let mut data = Vec::with_capacity(9);
        for row in &rows {
            data.extend_from_slice(row);
        }
        Self {
            rows: 3,
            cols: 3,
            data,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read the element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics on out-of-bounds indices.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Write the element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics on out-of-bounds indices.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Matrix product `self × other`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] unless
    /// `self.cols() == other.rows()`.
    pub fn matmul(&self, other: &Self) -> Result<Self, CoreError> {
        if self.cols != other.rows {
            return Err(CoreError::DimensionMismatch {
                left: (self.rows, self.cols),
                right: (other.rows, other.cols),
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.get(r, k) * other.get(k, c);
                }
                out.set(r, c, acc);
            }
        }
        Ok(out)
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }

    /// Rotation about the x axis by `angle` radians.
    #[must_use]
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = (libm::sin(angle), libm::cos(angle));
        Self::from_rows_3x3([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Rotation about the y axis by `angle` radians.
    #[must_use]
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = (libm::sin(angle), libm::cos(angle));
        Self::from_rows_3x3([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Hyperbolic rotation (boost) fixing the x axis.
    ///
    /// Translates along a geodesic of the hyperboloid model; satisfies the
    /// Lorentz orthogonality relation `Bᵀ η B = η` with η = diag(1, 1, −1).
    #[must_use]
    pub fn boost_x(rapidity: f64) -> Self {
        let (s, c) = (libm::sinh(rapidity), libm::cosh(rapidity));
        Self::from_rows_3x3([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, s, c]])
    }

    /// Hyperbolic rotation (boost) fixing the y axis.
    #[must_use]
    pub fn boost_y(rapidity: f64) -> Self {
        let (s, c) = (libm::sinh(rapidity), libm::cosh(rapidity));
        Self::from_rows_3x3([[c, 0.0, s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Whether this is square and within `tol` of the identity, element-wise.
    #[must_use]
    pub fn is_identity(&self, tol: f64) -> bool {
        if self.rows != self.cols {
            return false;
        }
        for r in 0..self.rows {
            for c in 0..self.cols {
                let expected = if r == c { 1.0 } else { 0.0 };
                if libm::fabs(self.get(r, c) - expected) > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Element-wise comparison within `tol`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| libm::fabs(a - b) <= tol)
    }
}
