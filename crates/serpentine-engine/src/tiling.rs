//! {p,q} hyperbolic tessellation by circle inversion.
//!
//! The base tile is the regular p-gon centered at the pole, q tiles meeting
//! at each vertex. Every further tile is the mirror image of an existing tile
//! across one of its edges: the edge's supporting circle (the geodesic) is
//! taken from the solver and every vertex of the parent is inverted through
//! it. Vertices are stored in the hyperboloid embedding; the inversion work
//! happens in the disk model.

use serde::{Deserialize, Serialize};
use serpentine_core::{hyperbolic_to_poincare, poincare_to_hyperbolic, Vec3};

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::EngineError;
use crate::geodesic::circle_center;

/// Disk-model centroid tolerance under which two tiles are the same tile.
const DEDUP_EPS: f64 = 1e-6;

/// A closed polygon of hyperboloid-embedded vertices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tile {
    vertices: Vec<Vec3>,
}

impl Tile {
    /// The vertices, in winding order.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Number of vertices (p for every tile of a {p,q} tiling).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The two endpoints of edge `side` (wrapping at the last vertex).
    ///
    /// # Panics
    ///
    /// Panics if `side` is not a valid edge index.
    #[must_use]
    pub fn edge(&self, side: usize) -> (Vec3, Vec3) {
        assert!(side < self.vertices.len(), "edge index out of bounds");
        let next = (side + 1) % self.vertices.len();
        (self.vertices[side], self.vertices[next])
    }

    /// Average of the disk-projected vertices; the dedup signature.
    fn disk_centroid(&self) -> Vec3 {
        let mut acc = Vec3::zero();
        for v in &self.vertices {
            acc = acc + hyperbolic_to_poincare(*v);
        }
        acc / self.vertices.len() as f64
    }
}

/// Euclidean circumradius of the {p,q} base polygon in the disk model.
///
/// `d = sqrt((tan(π/2−π/q) − tan(π/p)) / (tan(π/2−π/q) + tan(π/p)))`
#[must_use]
pub fn circumradius(p: usize, q: usize) -> f64 {
    let a = (FRAC_PI_2 - PI / q as f64).tan();
    let b = (PI / p as f64).tan();
    ((a - b) / (a + b)).sqrt()
}

/// An insertion-ordered {p,q} tessellation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tiling {
    p: usize,
    q: usize,
    tiles: Vec<Tile>,
}

impl Tiling {
    /// Create a tessellation holding only the base tile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotHyperbolic`] unless `(p−2)(q−2) > 4`.
    pub fn new(p: usize, q: usize) -> Result<Self, EngineError> {
        if p < 3 || q < 3 || (p - 2) * (q - 2) <= 4 {
            return Err(EngineError::NotHyperbolic { p, q });
        }

        let d = circumradius(p, q);
        let step = 2.0 * PI / p as f64;
        let vertices = (0..p)
            .map(|i| {
                let angle = i as f64 * step;
                poincare_to_hyperbolic(Vec3::new(d * angle.cos(), d * angle.sin(), 0.0))
            })
            .collect();

        Ok(Self {
            p,
            q,
            tiles: vec![Tile { vertices }],
        })
    }

    /// Create the base tile plus `rings` rings of neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotHyperbolic`] unless `(p−2)(q−2) > 4`.
    pub fn with_rings(p: usize, q: usize, rings: usize) -> Result<Self, EngineError> {
        let mut tiling = Self::new(p, q)?;
        tiling.expand(rings);
        Ok(tiling)
    }

    /// Polygon vertex count.
    #[must_use]
    pub fn p(&self) -> usize {
        self.p
    }

    /// Polygons meeting at each vertex.
    #[must_use]
    pub fn q(&self) -> usize {
        self.q
    }

    /// Number of generated tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tiles have been generated (never true after construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The generated tiles in insertion order; the base tile is first.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The mirror image of `tile` across edge `side`.
    ///
    /// Projects the edge endpoints into the disk, takes the supporting
    /// circle of their geodesic, and inverts every vertex through it
    /// (`A' = O + (A−O)·R²/|A−O|²`). When the edge is collinear with the
    /// disk center the supporting circle is a diameter and the inversion
    /// becomes a reflection across that line.
    #[must_use]
    pub fn neighbor(&self, tile: &Tile, side: usize) -> Tile {
        let (e1, e2) = tile.edge(side);
        let p1 = hyperbolic_to_poincare(e1);
        let p2 = hyperbolic_to_poincare(e2);

        let vertices = match circle_center(p1, p2) {
            Some(center) => {
                let radius = center.planar_distance(&p1);
                tile.vertices
                    .iter()
                    .map(|v| {
                        let a = hyperbolic_to_poincare(*v);
                        let offset = a - center;
                        let dist_sq = offset.norm_squared();
                        let image = center + offset * (radius * radius / dist_sq);
                        poincare_to_hyperbolic(image)
                    })
                    .collect()
            }
            None => {
                let axis = (p2 - p1).normalized();
                tile.vertices
                    .iter()
                    .map(|v| {
                        let a = hyperbolic_to_poincare(*v);
                        let image = axis * (2.0 * a.dot(&axis)) - a;
                        poincare_to_hyperbolic(image)
                    })
                    .collect()
            }
        };

        Tile { vertices }
    }

    /// Generate `rings` further rings of neighbors, breadth-first,
    /// skipping tiles that are already present.
    pub fn expand(&mut self, rings: usize) {
        let mut centroids: Vec<Vec3> = self.tiles.iter().map(Tile::disk_centroid).collect();
        let mut frontier: Vec<usize> = (0..self.tiles.len()).collect();

        for _ in 0..rings {
            let mut next_frontier = Vec::new();
            for &index in &frontier {
                for side in 0..self.p {
                    let candidate = self.neighbor(&self.tiles[index], side);
                    let centroid = candidate.disk_centroid();
                    let seen = centroids
                        .iter()
                        .any(|c| c.planar_distance(&centroid) < DEDUP_EPS);
                    if !seen {
                        next_frontier.push(self.tiles.len());
                        centroids.push(centroid);
                        self.tiles.push(candidate);
                    }
                }
            }
            frontier = next_frontier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpentine_core::projection::hyperboloid_residual;

    #[test]
    fn test_circumradius_heptagonal() {
        // Value of the closed form for {7,3}; equals tanh(r/2) of the true
        // hyperbolic circumradius r = arccosh(cot(π/7)·cot(π/3)).
        assert!((circumradius(7, 3) - 0.300_742_618_746_378_9).abs() < 1e-12);
    }

    #[test]
    fn test_base_tile_vertices_on_hyperboloid() {
        let tiling = Tiling::new(7, 3).unwrap();
        let base = &tiling.tiles()[0];
        assert_eq!(base.vertex_count(), 7);
        for v in base.vertices() {
            assert!(hyperboloid_residual(*v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejects_non_hyperbolic_pairs() {
        // {4,4} is Euclidean, {3,5} is spherical.
        assert!(matches!(
            Tiling::new(4, 4),
            Err(EngineError::NotHyperbolic { p: 4, q: 4 })
        ));
        assert!(Tiling::new(3, 5).is_err());
        assert!(Tiling::new(2, 9).is_err());
    }

    #[test]
    fn test_one_ring_of_heptagons() {
        let tiling = Tiling::with_rings(7, 3, 1).unwrap();
        assert_eq!(tiling.len(), 8);
    }

    #[test]
    fn test_neighbor_shares_one_edge_with_parent() {
        let tiling = Tiling::new(7, 3).unwrap();
        let base = &tiling.tiles()[0];
        for side in 0..7 {
            let child = tiling.neighbor(base, side);
            let shared = child
                .vertices()
                .iter()
                .filter(|cv| {
                    base.vertices()
                        .iter()
                        .any(|bv| hyperbolic_to_poincare(**cv)
                            .planar_distance(&hyperbolic_to_poincare(*bv))
                            < 1e-9)
                })
                .count();
            assert_eq!(shared, 2, "side {side}");
        }
    }

    #[test]
    fn test_neighbor_vertices_stay_on_hyperboloid() {
        let tiling = Tiling::new(7, 3).unwrap();
        let child = tiling.neighbor(&tiling.tiles()[0], 3);
        for v in child.vertices() {
            assert!(hyperboloid_residual(*v).abs() < 1e-6);
        }
    }

    #[test]
    fn test_expand_deduplicates() {
        let mut tiling = Tiling::with_rings(7, 3, 1).unwrap();
        let count = tiling.len();
        // Expanding by zero rings, then re-expanding the same frontier
        // through a fresh ring must not re-add the ring-1 tiles.
        tiling.expand(0);
        assert_eq!(tiling.len(), count);

        tiling.expand(1);
        let centroids: Vec<_> = tiling.tiles().iter().map(Tile::disk_centroid).collect();
        for (i, a) in centroids.iter().enumerate() {
            for b in centroids.iter().skip(i + 1) {
                assert!(a.planar_distance(b) >= DEDUP_EPS);
            }
        }
    }
}
