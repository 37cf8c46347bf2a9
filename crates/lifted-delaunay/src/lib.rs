//! Planar Delaunay triangulation via the lifted lower convex hull.
//!
//! Lift each input point `(x, y)` onto the paraboloid `z = x² + y²`; the
//! downward-facing facets of the 3-D convex hull of the lifted points project
//! to the Delaunay triangles of the input.
//!
//! Layout
//! - `triangulation`: entry points (`compute_delaunay_triangulation_2d`,
//!   `triangulate`, `triangulate_with`) and the `Triangle`/`Triangulation` types.
//! - `hull`: the `LowerHull` seam with an incremental and a brute-force backend.
//! - `lift`, `predicates`, `cfg`: normalising frame, planar predicates, tolerances.
//! - `validate`: certificate checks (empty circumcircle, area, adjacency).
//! - `rand`: reproducible point sets for tests, benches and the CLI.
//!
//! API Policy
//! - Project-internal; prefer the re-exports in `api` or `prelude`.

pub mod api;
pub mod cfg;
pub mod error;
pub mod hull;
pub mod lift;
pub mod predicates;
pub mod rand;
pub mod triangulation;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::DelaunayCfg;
pub use error::TriangulationError;
pub use triangulation::{
    compute_delaunay_triangulation_2d, triangulate, triangulate_with, Point2, Triangle,
    Triangulation,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::DelaunayCfg;
    pub use crate::error::TriangulationError;
    pub use crate::hull::{BruteForceHull, IncrementalHull, LowerHull};
    pub use crate::rand::{PointSetKind, ReplayToken};
    pub use crate::triangulation::{
        compute_delaunay_triangulation_2d, triangulate, triangulate_with, Point2, Triangle,
        Triangulation,
    };
    pub use crate::validate::{same_triangles, validate};
    pub use nalgebra::Vector2 as Vec2;
}

#[cfg(test)]
mod tests;
