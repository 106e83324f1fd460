//! Serpentine Engine - movement on curved manifolds
//!
//! The engine drives a segmented body across a manifold of selectable
//! curvature (flat, spherical, hyperbolic), computes the geodesic arcs used
//! to draw between disk-model points, and generates the {p,q} hyperbolic
//! tessellation by circle inversion. Rendering and input remain external:
//! the engine only accepts movement commands and hands back fully projected
//! 2D frame data.
//!
//! # Modules
//!
//! - [`manifold`]: the curvature tag and its canonical base points
//! - [`body`]: the ordered segment list (front = head)
//! - [`session`]: the per-manifold game state and its operations
//! - [`geodesic`]: orthogonal-circle geodesics in the Poincaré disk
//! - [`tiling`]: {p,q} tessellation by circle inversion
//! - [`render`]: projected per-frame output types
//!
//! # Example
//!
//! ```rust
//! use serpentine_engine::{Manifold, Session};
//!
//! let mut session = Session::with_seed(Manifold::Hyperbolic, 7)?;
//! session.move_forward(1.0)?;
//! session.grow()?;
//! let frame = session.render_frame()?;
//! assert_eq!(frame.body.len(), 2);
//! # Ok::<(), serpentine_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod body;
pub mod error;
pub mod geodesic;
pub mod manifold;
pub mod render;
pub mod session;
pub mod tiling;

pub use body::Body;
pub use error::EngineError;
pub use geodesic::{GeodesicArc, GeodesicPath, GeodesicSegment};
pub use manifold::Manifold;
pub use render::{BodyPoint, DepthSide, RenderFrame};
pub use session::{Session, SessionConfig};
pub use tiling::{Tile, Tiling};
