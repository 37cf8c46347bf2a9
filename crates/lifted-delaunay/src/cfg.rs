//! Tolerances for the lifted construction.
//!
//! - `DelaunayCfg`: caller-facing tolerances, all measured in the normalised
//!   frame (coordinates in `[-1, 1]`, lifted heights in `[0, 2]`).
//! - Fixed internal constants below; adjustments are rare.

/// Triangulation configuration (tolerances + frame policy).
#[derive(Clone, Copy, Debug)]
pub struct DelaunayCfg {
    /// Signed plane distance a point must exceed to count as beyond a hull facet.
    pub eps_plane: f64,
    /// A facet is lower iff its outward unit normal has `n.z < -eps_lower`.
    pub eps_lower: f64,
    /// Minimum distance from the extreme-point line for the input to be 2-D.
    pub eps_collinear: f64,
    /// Lower facets whose projected `orient2d` is at most this are dropped.
    pub eps_area: f64,
    /// Recentre and rescale to the unit box before lifting.
    pub normalize: bool,
}

impl Default for DelaunayCfg {
    fn default() -> Self {
        Self {
            eps_plane: 1e-12,
            eps_lower: 1e-12,
            eps_collinear: 1e-10,
            eps_area: 1e-12,
            normalize: true,
        }
    }
}

/// Smallest unnormalised facet normal accepted as a real plane.
pub(crate) const NORMAL_EPS: f64 = 1e-14;
/// Relative slack of the post-hull certificate for covered area and the
/// local empty-circle test; scaled by the frame extent squared and to the fourth.
pub(crate) const CERTIFY_EPS: f64 = 1e-10;
/// Default relative slack for `in_circle` during validation.
pub const VALIDATE_EPS: f64 = 1e-9;
