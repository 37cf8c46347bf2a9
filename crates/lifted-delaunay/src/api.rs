//! Curated internal API (UNSTABLE).
//!
//! Convenience surface for the CLI, benches and demos. Breaking changes are
//! allowed; prefer these re-exports for consistency across callers.

// Triangulation
pub use crate::cfg::{DelaunayCfg, VALIDATE_EPS};
pub use crate::error::TriangulationError;
pub use crate::triangulation::{
    compute_delaunay_triangulation_2d, triangulate, triangulate_with, Point2, Triangle,
    Triangulation,
};
// Hull backends
pub use crate::hull::{BruteForceHull, Facet3, HullError, IncrementalHull, LowerHull};
// Planar predicates
pub use crate::lift::{lift, lift_point, Frame};
pub use crate::predicates::{
    circumcenter, circumradius2, convex_hull_2d, in_circle, orient2d, polygon_area, triangle_area,
};
// Checks and inputs
pub use crate::rand::{jittered_grid, on_circle, uniform_in_box, PointSetKind, ReplayToken};
pub use crate::validate::{same_triangles, validate, ValidationError, ValidationReport};
