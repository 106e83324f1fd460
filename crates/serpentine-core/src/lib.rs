//! Serpentine Core - linear algebra and manifold math primitives
//!
//! This crate provides the foundational value types for the Serpentine
//! curved-space navigation engine. Everything here is plain vector/matrix
//! algebra and the maps between the two models of the hyperbolic plane; the
//! movement and tiling logic built on top lives in `serpentine-engine`.
//!
//! # Modules
//!
//! - [`vector`]: 3-component embedding-space vectors
//! - [`matrix`]: dynamically shaped matrices, rotation and boost constructors
//! - [`projection`]: hyperboloid sheet ⇄ Poincaré disk conversions
//! - [`error`]: error types for shape-checked operations
//!
//! # Features
//!
//! - `std`: Standard library support (default)
//!
//! # Example
//!
//! ```rust
//! use serpentine_core::{Matrix, Vec3};
//!
//! // Rotating the pole a quarter turn about the x axis lands on the y axis.
//! let pole = Vec3::new(0.0, 0.0, 1.0);
//! let rot = Matrix::rotation_x(core::f64::consts::FRAC_PI_2);
//! let moved = pole.transformed(&rot).unwrap();
//! assert!((moved.y.abs() - 1.0).abs() < 1e-12);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

pub mod error;
pub mod matrix;
pub mod projection;
pub mod vector;

pub use error::CoreError;
pub use matrix::Matrix;
pub use projection::{hyperbolic_to_poincare, poincare_to_hyperbolic};
pub use vector::Vec3;

/// Tolerance used for identity / orthogonality invariant checks.
pub const DEFAULT_TOL: f64 = 1e-9;
