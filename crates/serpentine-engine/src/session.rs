//! The per-manifold game session.
//!
//! A [`Session`] owns everything that makes up one run on one manifold: the
//! body, the orientation pair, the target, the random source, and (for
//! hyperbolic runs) the tessellation. Switching manifolds means constructing
//! a fresh session; nothing carries across.
//!
//! # Movement model
//!
//! On the flat manifold the head coordinate moves directly and the body
//! slides along. On the curved manifolds the head is conceptually pinned to
//! the manifold's base point and the *world* moves instead: each step folds
//! an incremental rotation/boost into the `forward` transform (and its
//! algebraic inverse into `inverse`), then records the base point carried
//! through the updated `forward` as the new head sample. The only state that
//! matters is the accumulated isometry between the head's local frame and
//! world space, which composes stably step after step; no curved "absolute
//! position" is ever computed. The invariant `forward × inverse ≈ identity`
//! holds after every update.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serpentine_core::{hyperbolic_to_poincare, Matrix, Vec3};

use crate::body::Body;
use crate::error::EngineError;
use crate::geodesic::geodesic_between;
use crate::manifold::Manifold;
use crate::render::{BodyPoint, DepthSide, RenderFrame};
use crate::tiling::Tiling;

/// Tunable session parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Divisor turning a movement amount into an incremental angle or
    /// rapidity on the curved manifolds.
    pub step_scale: f64,
    /// Half-range of flat-manifold target coordinates.
    pub target_spread: i32,
    /// Display-space distance below which the target counts as eaten.
    pub eat_distance: f64,
    /// Tessellation polygon vertex count.
    pub tiling_p: usize,
    /// Tessellation polygons per vertex.
    pub tiling_q: usize,
    /// Rings of tiles generated around the base tile.
    pub tiling_rings: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_scale: 100.0,
            target_spread: 100,
            eat_distance: 0.05,
            tiling_p: 7,
            tiling_q: 3,
            tiling_rings: 1,
        }
    }
}

impl SessionConfig {
    /// Set the movement step divisor.
    #[must_use]
    pub fn with_step_scale(mut self, step_scale: f64) -> Self {
        self.step_scale = step_scale;
        self
    }

    /// Set the flat-manifold target half-range.
    #[must_use]
    pub fn with_target_spread(mut self, target_spread: i32) -> Self {
        self.target_spread = target_spread;
        self
    }

    /// Set the eat threshold in display units.
    #[must_use]
    pub fn with_eat_distance(mut self, eat_distance: f64) -> Self {
        self.eat_distance = eat_distance;
        self
    }

    /// Set the tessellation shape and depth.
    #[must_use]
    pub fn with_tiling(mut self, p: usize, q: usize, rings: usize) -> Self {
        self.tiling_p = p;
        self.tiling_q = q;
        self.tiling_rings = rings;
        self
    }
}

/// State of one run on one manifold.
#[derive(Debug)]
pub struct Session {
    manifold: Manifold,
    config: SessionConfig,
    body: Body,
    forward: Matrix,
    inverse: Matrix,
    target: Vec3,
    tiling: Option<Tiling>,
    rng: StdRng,
}

impl Session {
    /// Start a session with default configuration and entropy seeding.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotHyperbolic`] if the configured tiling shape
    /// is invalid for a hyperbolic session.
    pub fn new(manifold: Manifold) -> Result<Self, EngineError> {
        Self::build(manifold, SessionConfig::default(), StdRng::from_entropy())
    }

    /// Start a session with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotHyperbolic`] if the configured tiling shape
    /// is invalid for a hyperbolic session.
    pub fn with_config(manifold: Manifold, config: SessionConfig) -> Result<Self, EngineError> {
        Self::build(manifold, config, StdRng::from_entropy())
    }

    /// Start a deterministic session (default configuration, fixed seed).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotHyperbolic`] if the configured tiling shape
    /// is invalid for a hyperbolic session.
    pub fn with_seed(manifold: Manifold, seed: u64) -> Result<Self, EngineError> {
        Self::build(manifold, SessionConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn build(manifold: Manifold, config: SessionConfig, rng: StdRng) -> Result<Self, EngineError> {
        let tiling = match manifold {
            Manifold::Hyperbolic => Some(Tiling::with_rings(
                config.tiling_p,
                config.tiling_q,
                config.tiling_rings,
            )?),
            Manifold::Flat | Manifold::Spherical => None,
        };

        let mut session = Self {
            manifold,
            config,
            body: Body::new(manifold.base_point()),
            forward: Matrix::identity(3),
            inverse: Matrix::identity(3),
            target: manifold.base_point(),
            tiling,
            rng,
        };
        session.pick_target();
        Ok(session)
    }

    /// The active manifold.
    #[must_use]
    pub fn manifold(&self) -> Manifold {
        self.manifold
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The body, head first.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The current target point, in embedding coordinates.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// The tessellation; present only on hyperbolic sessions.
    #[must_use]
    pub fn tiling(&self) -> Option<&Tiling> {
        self.tiling.as_ref()
    }

    /// `forward × inverse`; ≈ identity after every well-formed update.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the pair was corrupted externally.
    pub fn orientation_product(&self) -> Result<Matrix, EngineError> {
        Ok(self.forward.matmul(&self.inverse)?)
    }

    /// Advance the head forward by a signed `amount`.
    ///
    /// # Errors
    ///
    /// Only shape violations in the algebra layer, which well-formed
    /// sessions never produce.
    pub fn move_forward(&mut self, amount: f64) -> Result<(), EngineError> {
        if !self.can_move(0.0, amount) {
            return Ok(());
        }
        let theta = amount / self.config.step_scale;
        match self.manifold {
            Manifold::Flat => {
                self.flat_step(0.0, amount);
                Ok(())
            }
            Manifold::Spherical => {
                self.curved_step(Matrix::rotation_x(-theta), Matrix::rotation_x(theta))
            }
            Manifold::Hyperbolic => {
                self.curved_step(Matrix::boost_x(-theta), Matrix::boost_x(theta))
            }
        }
    }

    /// Advance the head sideways by a signed `amount`.
    ///
    /// # Errors
    ///
    /// Only shape violations in the algebra layer, which well-formed
    /// sessions never produce.
    pub fn move_lateral(&mut self, amount: f64) -> Result<(), EngineError> {
        if !self.can_move(amount, 0.0) {
            return Ok(());
        }
        let theta = amount / self.config.step_scale;
        match self.manifold {
            Manifold::Flat => {
                self.flat_step(amount, 0.0);
                Ok(())
            }
            Manifold::Spherical => {
                self.curved_step(Matrix::rotation_y(theta), Matrix::rotation_y(-theta))
            }
            Manifold::Hyperbolic => {
                self.curved_step(Matrix::boost_y(-theta), Matrix::boost_y(theta))
            }
        }
    }

    /// Append one segment by duplicating the tail.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyBody`] if the body is empty, which the
    /// session lifecycle rules out.
    pub fn grow(&mut self) -> Result<(), EngineError> {
        self.body.grow()
    }

    /// Whether a step of the given intent is admissible.
    ///
    /// Always true on all three manifolds; this is the hook for future
    /// manifold-specific boundary constraints.
    #[must_use]
    pub fn can_move(&self, _dx: f64, _dy: f64) -> bool {
        true
    }

    /// Draw a fresh target uniformly at random for the active manifold.
    pub fn pick_target(&mut self) {
        let spread = self.config.target_spread;
        self.target = match self.manifold {
            Manifold::Flat => {
                let x = self.rng.gen_range(0..=2 * spread) - spread;
                let y = self.rng.gen_range(0..=2 * spread) - spread;
                Vec3::new(f64::from(x), f64::from(y), 0.0)
            }
            Manifold::Spherical => {
                let (a, b) = self.random_angle_pair();
                self.manifold.base_point().rotated(a, b)
            }
            Manifold::Hyperbolic => {
                let (a, b) = self.random_angle_pair();
                self.manifold.base_point().boosted(a, b)
            }
        };
    }

    /// Map an embedding point into the 2D display model.
    ///
    /// Identity for the flat plane and the sphere (both already project
    /// orthogonally); the Poincaré disk map for the hyperboloid.
    #[must_use]
    pub fn project_to_display(&self, point: Vec3) -> Vec3 {
        match self.manifold {
            Manifold::Flat | Manifold::Spherical => point,
            Manifold::Hyperbolic => hyperbolic_to_poincare(point),
        }
    }

    /// Reset the body to a single segment at the base point, keeping the
    /// orientation, target and tessellation.
    pub fn reset_body(&mut self) {
        self.body.reset(self.manifold.base_point());
    }

    /// Whether the oriented head is within eating range of the target,
    /// measured in the display model.
    ///
    /// # Errors
    ///
    /// Only shape violations in the algebra layer.
    pub fn target_reached(&self) -> Result<bool, EngineError> {
        let Some(head) = self.body.head() else {
            return Ok(false);
        };
        let head = self.project_to_display(head.transformed(&self.inverse)?);
        let target = self.project_to_display(self.target.transformed(&self.inverse)?);
        Ok(head.planar_distance(&target) <= self.config.eat_distance)
    }

    /// Eat the target if the head has reached it: grow one segment and
    /// respawn the target. Returns whether eating happened.
    ///
    /// # Errors
    ///
    /// Only shape violations in the algebra layer.
    pub fn try_consume_target(&mut self) -> Result<bool, EngineError> {
        if !self.target_reached()? {
            return Ok(false);
        }
        self.grow()?;
        self.pick_target();
        Ok(true)
    }

    /// Build the display-ready frame: oriented, depth-tagged, projected
    /// body and target, plus tile outlines on hyperbolic sessions.
    ///
    /// Every stored sample is carried through the *current* `inverse`
    /// orientation, so the newest head sample always lands on the base
    /// point and the trail flows past it.
    ///
    /// # Errors
    ///
    /// Only shape violations in the algebra layer.
    pub fn render_frame(&self) -> Result<RenderFrame, EngineError> {
        let mut body = Vec::with_capacity(self.body.len());
        for sample in self.body.iter() {
            body.push(self.display_point(*sample)?);
        }
        let target = self.display_point(self.target)?;

        let tiles = self
            .projected_tiles()?
            .into_iter()
            .map(|disk| {
                (0..disk.len())
                    .map(|i| geodesic_between(disk[i], disk[(i + 1) % disk.len()]))
                    .collect()
            })
            .collect();

        Ok(RenderFrame {
            body,
            target,
            tiles,
        })
    }

    /// Tile vertices carried through the current orientation and projected
    /// to the disk, one vertex list per tile. Empty on flat and spherical
    /// sessions.
    ///
    /// # Errors
    ///
    /// Only shape violations in the algebra layer.
    pub fn projected_tiles(&self) -> Result<Vec<Vec<Vec3>>, EngineError> {
        let Some(tiling) = &self.tiling else {
            return Ok(Vec::new());
        };
        let mut tiles = Vec::with_capacity(tiling.len());
        for tile in tiling.tiles() {
            let mut disk = Vec::with_capacity(tile.vertex_count());
            for v in tile.vertices() {
                disk.push(hyperbolic_to_poincare(v.transformed(&self.inverse)?));
            }
            tiles.push(disk);
        }
        Ok(tiles)
    }

    fn display_point(&self, point: Vec3) -> Result<BodyPoint, EngineError> {
        let oriented = point.transformed(&self.inverse)?;
        Ok(BodyPoint {
            position: self.project_to_display(oriented),
            side: DepthSide::from_z(oriented.z),
        })
    }

    fn flat_step(&mut self, dx: f64, dy: f64) {
        if let Some(mut head) = self.body.head() {
            head.x -= dx;
            head.y -= dy;
            self.body.slide(head);
        }
    }

    fn curved_step(&mut self, step: Matrix, inverse_step: Matrix) -> Result<(), EngineError> {
        self.forward = step.matmul(&self.forward)?;
        self.inverse = self.inverse.matmul(&inverse_step)?;
        let head = self.manifold.base_point().transformed(&self.forward)?;
        self.body.slide(head);
        Ok(())
    }

    fn random_angle_pair(&mut self) -> (f64, f64) {
        let a = f64::from(self.rng.gen_range(0..=360)).to_radians();
        let b = f64::from(self.rng.gen_range(0..=360)).to_radians();
        (a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpentine_core::projection::hyperboloid_residual;
    use serpentine_core::DEFAULT_TOL;

    fn walk(session: &mut Session) {
        for i in 0..50 {
            session.move_forward(1.0).unwrap();
            if i % 3 == 0 {
                session.move_lateral(-1.0).unwrap();
            }
            if i % 7 == 0 {
                session.grow().unwrap();
            }
        }
    }

    #[test]
    fn test_new_session_state() {
        let session = Session::with_seed(Manifold::Flat, 1).unwrap();
        assert_eq!(session.body().len(), 1);
        assert_eq!(session.body().head(), Some(Vec3::zero()));
        assert!(session.orientation_product().unwrap().is_identity(DEFAULT_TOL));
        assert!(session.tiling().is_none());
    }

    #[test]
    fn test_flat_grow_then_move_scenario() {
        // One segment, three grows, one forward step of 1: length 4, the
        // head shifted one unit, the rest still at the old position.
        let mut session = Session::with_seed(Manifold::Flat, 2).unwrap();
        for _ in 0..3 {
            session.grow().unwrap();
        }
        session.move_forward(1.0).unwrap();

        let samples: Vec<Vec3> = session.body().iter().copied().collect();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], Vec3::new(0.0, -1.0, 0.0));
        for s in &samples[1..] {
            assert_eq!(*s, Vec3::zero());
        }
    }

    #[test]
    fn test_flat_length_invariant_under_movement() {
        let mut session = Session::with_seed(Manifold::Flat, 3).unwrap();
        session.grow().unwrap();
        session.grow().unwrap();
        let len = session.body().len();
        for _ in 0..25 {
            session.move_forward(1.0).unwrap();
            session.move_lateral(0.5).unwrap();
        }
        assert_eq!(session.body().len(), len);
    }

    #[test]
    fn test_orientation_invariant_spherical() {
        let mut session = Session::with_seed(Manifold::Spherical, 4).unwrap();
        for _ in 0..40 {
            session.move_forward(1.0).unwrap();
            assert!(session
                .orientation_product()
                .unwrap()
                .is_identity(DEFAULT_TOL));
            session.move_lateral(-2.0).unwrap();
            assert!(session
                .orientation_product()
                .unwrap()
                .is_identity(DEFAULT_TOL));
        }
    }

    #[test]
    fn test_orientation_invariant_hyperbolic() {
        let mut session = Session::with_seed(Manifold::Hyperbolic, 5).unwrap();
        walk(&mut session);
        assert!(session
            .orientation_product()
            .unwrap()
            .is_identity(DEFAULT_TOL));
    }

    #[test]
    fn test_curved_head_renders_pinned_at_base() {
        let mut session = Session::with_seed(Manifold::Spherical, 6).unwrap();
        walk(&mut session);
        let frame = session.render_frame().unwrap();
        let base = session.manifold().base_point();
        assert!(frame.body[0].position.distance(&base) < 1e-9);

        let mut session = Session::with_seed(Manifold::Hyperbolic, 6).unwrap();
        walk(&mut session);
        let frame = session.render_frame().unwrap();
        // Hyperbolic display projection sends the pinned pole to the disk
        // origin.
        assert!(frame.body[0].position.planar_norm() < 1e-9);
    }

    #[test]
    fn test_hyperbolic_samples_stay_on_sheet() {
        let mut session = Session::with_seed(Manifold::Hyperbolic, 7).unwrap();
        walk(&mut session);
        for s in session.body().iter() {
            assert!(hyperboloid_residual(*s).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spherical_samples_stay_on_sphere() {
        let mut session = Session::with_seed(Manifold::Spherical, 8).unwrap();
        walk(&mut session);
        for s in session.body().iter() {
            assert!((s.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_targets_lie_on_their_manifolds() {
        let mut session = Session::with_seed(Manifold::Spherical, 9).unwrap();
        for _ in 0..20 {
            session.pick_target();
            assert!((session.target().norm() - 1.0).abs() < 1e-9);
        }

        let mut session = Session::with_seed(Manifold::Hyperbolic, 9).unwrap();
        for _ in 0..20 {
            session.pick_target();
            // Large rapidities push z toward 1e5, where the constraint's
            // squares cancel; tolerance scales with the magnitude.
            let t = session.target();
            assert!(hyperboloid_residual(t).abs() < 1e-9 * (1.0 + t.norm_squared()));
        }

        let mut session = Session::with_seed(Manifold::Flat, 9).unwrap();
        for _ in 0..20 {
            session.pick_target();
            let t = session.target();
            assert!(t.x.abs() <= 100.0 && t.y.abs() <= 100.0);
            assert_eq!(t.z, 0.0);
        }
    }

    #[test]
    fn test_seeded_targets_reproducible() {
        let a = Session::with_seed(Manifold::Spherical, 42).unwrap();
        let b = Session::with_seed(Manifold::Spherical, 42).unwrap();
        assert_eq!(a.target(), b.target());
    }

    #[test]
    fn test_hyperbolic_session_builds_default_ring() {
        let session = Session::with_seed(Manifold::Hyperbolic, 10).unwrap();
        let tiling = session.tiling().unwrap();
        assert_eq!(tiling.len(), 8);
        assert_eq!(tiling.p(), 7);
    }

    #[test]
    fn test_invalid_tiling_config_rejected() {
        let config = SessionConfig::default().with_tiling(4, 4, 1);
        let err = Session::with_config(Manifold::Hyperbolic, config).unwrap_err();
        assert!(matches!(err, EngineError::NotHyperbolic { p: 4, q: 4 }));

        // Flat sessions never build a tiling, so the same config is fine.
        assert!(Session::with_config(Manifold::Flat, config).is_ok());
    }

    #[test]
    fn test_eat_grows_and_respawns() {
        let mut session = Session::with_seed(Manifold::Flat, 11).unwrap();
        let target = session.target();
        assert!(!session.target_reached().unwrap() || target.planar_norm() <= 0.05);

        // Walk the head exactly onto the target.
        session.move_lateral(-target.x).unwrap();
        session.move_forward(-target.y).unwrap();
        assert!(session.target_reached().unwrap());

        assert!(session.try_consume_target().unwrap());
        assert_eq!(session.body().len(), 2);
    }

    #[test]
    fn test_reset_body() {
        let mut session = Session::with_seed(Manifold::Hyperbolic, 12).unwrap();
        walk(&mut session);
        session.reset_body();
        assert_eq!(session.body().len(), 1);
        assert_eq!(session.body().head(), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_can_move_always_admits() {
        let session = Session::with_seed(Manifold::Spherical, 13).unwrap();
        assert!(session.can_move(1.0, 0.0));
        assert!(session.can_move(-3.0, 2.0));
    }

    #[test]
    fn test_render_frame_tile_outlines() {
        let session = Session::with_seed(Manifold::Hyperbolic, 14).unwrap();
        let frame = session.render_frame().unwrap();
        assert_eq!(frame.tiles.len(), 8);
        for edges in &frame.tiles {
            assert_eq!(edges.len(), 7);
        }
    }
}
