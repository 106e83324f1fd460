//! Engine error type.

use serpentine_core::CoreError;
use thiserror::Error;

/// Errors from session, geodesic and tiling operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Growth was requested on an empty body.
    ///
    /// The session lifecycle keeps at least one segment alive at all times,
    /// so hitting this indicates a caller bypassed the session.
    #[error("cannot grow an empty body")]
    EmptyBody,

    /// The requested Schläfli pair does not describe a hyperbolic tiling.
    #[error("{{{p},{q}}} is not hyperbolic: (p-2)(q-2) must exceed 4")]
    NotHyperbolic {
        /// Polygon vertex count.
        p: usize,
        /// Polygons meeting at each vertex.
        q: usize,
    },

    /// Shape violation in the underlying algebra.
    #[error(transparent)]
    Core(#[from] CoreError),
}
