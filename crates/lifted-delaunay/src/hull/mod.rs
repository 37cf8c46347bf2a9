//! Lower convex hulls of lifted point sets.
//!
//! Purpose
//! - Isolate the 3-D hull computation behind `LowerHull` so the lifting and
//!   filtering in `triangulation` stay independent of the hull algorithm.
//!
//! Conventions
//! - Input is a height field: `(x, y)` are parameter coordinates, `z` the
//!   height. Points are expected in a frame of size O(1).
//! - Facet normals point out of the hull; a facet is lower iff `n.z < -eps_lower`
//!   and its projection has `orient2d > eps_area` (near-vertical slivers are
//!   dropped; the caller's certificate then rejects the hole they leave).
//! - Returned facets list their vertices so the projected triangle is CCW in
//!   the xy-plane (clockwise seen from below, i.e. from outside).
//!
//! Backends
//! - `IncrementalHull`: beneath-beyond with outside sets, O(n log n) expected.
//! - `BruteForceHull`: triple enumeration, O(n⁴); general position only.

mod brute;
mod incremental;

pub use brute::BruteForceHull;
pub use incremental::IncrementalHull;

use std::fmt;

use nalgebra::Vector3;

use crate::cfg::DelaunayCfg;

/// A lower facet: vertex ids (CCW in projection) and its outward plane `n·x = c`.
#[derive(Clone, Copy, Debug)]
pub struct Facet3 {
    pub v: [usize; 3],
    pub n: Vector3<f64>,
    pub c: f64,
}

impl Facet3 {
    /// Signed distance of `p` above the facet's outside (positive = beyond).
    #[inline]
    pub fn distance(&self, p: Vector3<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }
}

/// Errors from hull backends.
#[derive(Clone, Debug, PartialEq)]
pub enum HullError {
    /// Fewer than three points.
    TooFewPoints { got: usize },
    /// No non-degenerate starting triangle (all points coincide or are collinear).
    Flat,
    /// The facet structure became inconsistent (open horizon, repeated edge).
    Topology { reason: String },
}

impl HullError {
    pub(crate) fn topology(reason: impl Into<String>) -> Self {
        Self::Topology {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { got } => write!(f, "hull needs at least 3 points, got {got}"),
            Self::Flat => write!(f, "points are coincident or collinear (no 2-D extent)"),
            Self::Topology { reason } => write!(f, "hull topology broken: {reason}"),
        }
    }
}

impl std::error::Error for HullError {}

/// Source of lower hull facets for a lifted point set.
pub trait LowerHull {
    fn lower_facets(
        &self,
        lifted: &[Vector3<f64>],
        cfg: &DelaunayCfg,
    ) -> Result<Vec<Facet3>, HullError>;
}
