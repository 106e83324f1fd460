//! Geodesics between Poincaré-disk points.
//!
//! A hyperbolic geodesic appears in the disk model as the arc of the unique
//! circle through both endpoints that meets the unit circle at right angles.
//! When the endpoints are collinear with the disk center that circle
//! degenerates into a diameter, and the path is a straight chord. The solver
//! only emits descriptors; rasterization belongs to the display layer.

use serde::{Deserialize, Serialize};
use serpentine_core::Vec3;

use std::f64::consts::PI;

/// Tolerance on twice the signed area of (origin, p, q) below which the
/// three points are treated as collinear.
pub const COLLINEARITY_EPS: f64 = 0.01;

/// An arc of the circle orthogonal to the disk boundary.
///
/// Angles are `atan2(dy, dx)` of the endpoint offsets from the center. When
/// `end_angle < start_angle` the arc wraps through ±π; either way it covers
/// the minor angular interval between the endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodesicArc {
    /// Circle center (z = 0, outside the unit disk).
    pub center: Vec3,
    /// Circle radius.
    pub radius: f64,
    /// Angle of the first endpoint.
    pub start_angle: f64,
    /// Angle of the second endpoint.
    pub end_angle: f64,
}

impl GeodesicArc {
    /// Angular extent of the arc, accounting for the ±π wrap.
    #[must_use]
    pub fn angular_span(&self) -> f64 {
        if self.end_angle >= self.start_angle {
            self.end_angle - self.start_angle
        } else {
            2.0 * PI - (self.start_angle - self.end_angle)
        }
    }
}

/// The straight chord used when the geodesic degenerates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodesicSegment {
    /// First endpoint.
    pub from: Vec3,
    /// Second endpoint.
    pub to: Vec3,
}

/// A drawable geodesic between two disk-model points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GeodesicPath {
    /// The generic case: a circular arc orthogonal to the disk boundary.
    Arc(GeodesicArc),
    /// The degenerate collinear case.
    Segment(GeodesicSegment),
}

/// Center of the circle through `p` and `q` orthogonal to the unit circle.
///
/// Returns `None` only when `p`, `q` and the origin are genuinely collinear
/// (the supporting circle degenerates to a line through the origin). Near
/// degeneracy still yields a center, just a very distant one; whether that
/// is worth drawing as an arc is the caller's call via
/// [`COLLINEARITY_EPS`].
#[must_use]
pub fn circle_center(p: Vec3, q: Vec3) -> Option<Vec3> {
    let denom = 2.0 * (p.x * q.y - p.y * q.x);
    if denom.abs() < 1e-12 {
        return None;
    }
    let psum = p.x * p.x + p.y * p.y;
    let qsum = q.x * q.x + q.y * q.y;
    let x0 = (q.y * (psum + 1.0) - p.y * (qsum + 1.0)) / denom;
    let y0 = (-q.x * (psum + 1.0) + p.x * (qsum + 1.0)) / denom;
    Some(Vec3::new(x0, y0, 0.0))
}

/// The geodesic between two disk-model points.
///
/// Emits a straight [`GeodesicSegment`] in the degenerate collinear case,
/// otherwise the minor [`GeodesicArc`] of the orthogonal circle. Never fails.
#[must_use]
pub fn geodesic_between(p: Vec3, q: Vec3) -> GeodesicPath {
    let signed_area_x2 = 2.0 * (p.x * q.y - p.y * q.x);
    let center = if signed_area_x2.abs() <= COLLINEARITY_EPS {
        None
    } else {
        circle_center(p, q)
    };
    let Some(center) = center else {
        return GeodesicPath::Segment(GeodesicSegment { from: p, to: q });
    };

    let radius = (center.x * center.x + center.y * center.y - 1.0).sqrt();
    let mut start = (p.y - center.y).atan2(p.x - center.x);
    let mut end = (q.y - center.y).atan2(q.x - center.x);

    // atan2 does not order the short vs. long way around; pick the minor arc.
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    if end - start > PI {
        std::mem::swap(&mut start, &mut end);
    }

    GeodesicPath::Arc(GeodesicArc {
        center,
        radius,
        start_angle: start,
        end_angle: end,
    })
}
