//! The segmented body.
//!
//! An ordered sequence of embedded sample points, front = head. Movement
//! only ever touches the two ends: a new head sample is pushed on the front
//! while the tail is dropped (the sliding window that keeps length constant),
//! and growth duplicates the tail.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serpentine_core::Vec3;

use crate::error::EngineError;

/// Ordered body samples, front = head.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Body {
    points: VecDeque<Vec3>,
}

impl Body {
    /// Create a one-segment body at `base`.
    #[must_use]
    pub fn new(base: Vec3) -> Self {
        let mut points = VecDeque::new();
        points.push_back(base);
        Self { points }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The head sample, if any.
    #[must_use]
    pub fn head(&self) -> Option<Vec3> {
        self.points.front().copied()
    }

    /// The tail sample, if any.
    #[must_use]
    pub fn tail(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    /// Push a new head and drop the tail, keeping length constant.
    pub fn slide(&mut self, new_head: Vec3) {
        self.points.push_front(new_head);
        self.points.pop_back();
    }

    /// Append a copy of the tail.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyBody`] if there is no tail to copy.
    pub fn grow(&mut self) -> Result<(), EngineError> {
        let tail = self.tail().ok_or(EngineError::EmptyBody)?;
        self.points.push_back(tail);
        Ok(())
    }

    /// Discard all segments and re-seed a single one at `base`.
    pub fn reset(&mut self, base: Vec3) {
        self.points.clear();
        self.points.push_back(base);
    }

    /// Iterate over the samples from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }
}
