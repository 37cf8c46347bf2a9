//! Delaunay triangulation by lifting onto a paraboloid.
//!
//! Pipeline
//! 1. Reject `< 3` points and non-finite coordinates.
//! 2. Normalise to the unit box (`Frame`) and reject collinear input.
//! 3. Lift `(x, y) ↦ (x, y, x² + y²)` and ask a `LowerHull` for the lower facets.
//! 4. Each lower facet's vertex ids are a Delaunay triangle of the input.
//!
//! Output is canonical: triangles CCW, smallest index first, sorted. For
//! co-circular subsets any triangulation of the circle's polygon is Delaunay;
//! the one returned is whatever the incremental hull builds. The unit square
//! `[(0,0), (1,0), (0,1), (1,1)]` splits along the 0–3 diagonal.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector2;

use crate::cfg::{DelaunayCfg, CERTIFY_EPS};
use crate::error::TriangulationError;
use crate::hull::{IncrementalHull, LowerHull};
use crate::lift::{lift, Frame};
use crate::predicates::{convex_hull_2d, in_circle, orient2d, polygon_area};

/// Input point; its position in the slice is its vertex id.
pub type Point2 = Vector2<f64>;

/// Three vertex ids of one triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    /// Same cyclic order, rotated so the smallest id comes first.
    pub fn canonical(v: [usize; 3]) -> Self {
        let k = (0..3).min_by_key(|&i| v[i]).unwrap_or(0);
        Self([v[k], v[(k + 1) % 3], v[(k + 2) % 3]])
    }
    #[inline]
    pub fn contains(&self, i: usize) -> bool {
        self.0.contains(&i)
    }
    /// Directed edges `(v0,v1), (v1,v2), (v2,v0)`.
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.0;
        [(a, b), (b, c), (c, a)]
    }
    /// Unordered key for multiset comparisons.
    #[inline]
    pub fn sorted(&self) -> [usize; 3] {
        let mut v = self.0;
        v.sort_unstable();
        v
    }
}

/// Triangles plus adjacency and the boundary loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangulation {
    pub n_points: usize,
    /// CCW triangles, canonical order.
    pub triangles: Vec<Triangle>,
    /// `neighbors[t][i]`: triangle across the edge opposite corner `i` of `t`.
    pub neighbors: Vec<[Option<usize>; 3]>,
    /// Boundary vertex ids, CCW, starting at the smallest id.
    pub hull: Vec<usize>,
}

impl Triangulation {
    /// Build adjacency and boundary for CCW triangles over `n_points` vertices.
    pub fn from_triangles(n_points: usize, mut triangles: Vec<Triangle>) -> Self {
        triangles.sort_unstable();
        let mut by_edge: HashMap<(usize, usize), (usize, usize)> =
            HashMap::with_capacity(3 * triangles.len());
        for (t, tri) in triangles.iter().enumerate() {
            for (k, e) in tri.edges().into_iter().enumerate() {
                // edge k runs opposite corner (k + 2) % 3; a repeated edge keeps
                // its first owner (see `repeated_edges`)
                by_edge.entry(e).or_insert((t, (k + 2) % 3));
            }
        }
        let mut neighbors = vec![[None; 3]; triangles.len()];
        let mut boundary: HashMap<usize, usize> = HashMap::new();
        for (t, tri) in triangles.iter().enumerate() {
            for (k, (u, w)) in tri.edges().into_iter().enumerate() {
                match by_edge.get(&(w, u)) {
                    Some(&(s, _)) => neighbors[t][(k + 2) % 3] = Some(s),
                    None => {
                        boundary.insert(u, w);
                    }
                }
            }
        }
        let hull = boundary_loop(&boundary);
        Self {
            n_points,
            triangles,
            neighbors,
            hull,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Directed edges traversed by more than one triangle; zero for a manifold.
    pub fn repeated_edges(&self) -> usize {
        let mut seen = HashSet::with_capacity(3 * self.triangles.len());
        self.triangles
            .iter()
            .flat_map(|t| t.edges())
            .filter(|e| !seen.insert(*e))
            .count()
    }

    /// Edges with no triangle on the other side.
    pub fn boundary_edges(&self) -> usize {
        self.neighbors.iter().flatten().filter(|n| n.is_none()).count()
    }

    /// Ids that appear in at least one triangle.
    pub fn used_vertices(&self) -> Vec<usize> {
        let mut used = vec![false; self.n_points];
        for t in &self.triangles {
            for &i in &t.0 {
                if i < used.len() {
                    used[i] = true;
                }
            }
        }
        (0..self.n_points).filter(|&i| used[i]).collect()
    }
}

fn boundary_loop(next: &HashMap<usize, usize>) -> Vec<usize> {
    let Some(&start) = next.keys().min() else {
        return Vec::new();
    };
    let mut ring = vec![start];
    let mut u = start;
    while let Some(&w) = next.get(&u) {
        if w == start || ring.len() > next.len() {
            break;
        }
        ring.push(w);
        u = w;
    }
    ring
}

/// Delaunay triangles of `points` (default config, incremental hull).
pub fn compute_delaunay_triangulation_2d(
    points: &[Point2],
) -> Result<Vec<Triangle>, TriangulationError> {
    triangulate(points).map(|t| t.triangles)
}

/// Delaunay triangulation with adjacency (default config, incremental hull).
pub fn triangulate(points: &[Point2]) -> Result<Triangulation, TriangulationError> {
    triangulate_with(points, &DelaunayCfg::default(), &IncrementalHull)
}

/// Delaunay triangulation with explicit tolerances and hull backend.
pub fn triangulate_with<H: LowerHull + ?Sized>(
    points: &[Point2],
    cfg: &DelaunayCfg,
    hull: &H,
) -> Result<Triangulation, TriangulationError> {
    if points.len() < 3 {
        return Err(TriangulationError::InsufficientPoints { got: points.len() });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(TriangulationError::NonFiniteCoordinate { index });
    }
    let frame = if cfg.normalize {
        Frame::fit(points)
            .ok_or_else(|| TriangulationError::degenerate("all points coincide"))?
    } else {
        Frame::identity()
    };
    let planar: Vec<Point2> = points.iter().map(|&p| frame.apply(p)).collect();
    ensure_two_dimensional(&planar, cfg.eps_collinear)?;

    let lifted = lift(&planar);
    if let Some(index) = lifted.iter().position(|q| !q.z.is_finite()) {
        return Err(TriangulationError::degenerate(format!(
            "point {index} overflows when lifted; enable normalisation"
        )));
    }
    let facets = hull.lower_facets(&lifted, cfg)?;
    if facets.is_empty() {
        return Err(TriangulationError::degenerate(
            "hull returned no lower facets",
        ));
    }
    let triangles: Vec<Triangle> = facets.iter().map(|f| Triangle::canonical(f.v)).collect();
    let out = Triangulation::from_triangles(points.len(), triangles);
    certify(&planar, &out, cfg)?;
    tracing::debug!(
        points = points.len(),
        triangles = out.len(),
        hull = out.hull.len(),
        "triangulated"
    );
    Ok(out)
}

/// Fails unless some point is farther than `eps` from the line through the
/// first point and the point farthest from it.
fn ensure_two_dimensional(planar: &[Point2], eps: f64) -> Result<(), TriangulationError> {
    let a = planar[0];
    let b = planar
        .iter()
        .copied()
        .max_by(|p, q| {
            (p - a)
                .norm_squared()
                .partial_cmp(&(q - a).norm_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(a);
    let len = (b - a).norm();
    if !(len > eps) {
        return Err(TriangulationError::degenerate("all points coincide"));
    }
    let spread = planar
        .iter()
        .map(|&p| orient2d(a, b, p).abs() / len)
        .fold(0.0, f64::max);
    if !(spread > eps) {
        return Err(TriangulationError::degenerate("all points are collinear"));
    }
    Ok(())
}

/// Post-hull certificate in the frame the hull saw.
///
/// Near-degenerate input (almost collinear boundary runs, almost co-circular
/// clusters at the tolerance scale) can leave the hull with dropped slivers or
/// a folded surface. Rather than return such output, require:
/// - an edge-manifold surface with one boundary loop;
/// - every distinct point used, and `T = 2V - 2 - h`;
/// - triangles with `orient2d > eps_area` covering the planar convex hull's area;
/// - the empty-circle condition across every interior edge.
fn certify(
    planar: &[Point2],
    t: &Triangulation,
    cfg: &DelaunayCfg,
) -> Result<(), TriangulationError> {
    let extent = planar.iter().map(|p| p.amax()).fold(1.0, f64::max);
    let tol2 = CERTIFY_EPS * extent * extent;
    let tol4 = tol2 * extent * extent;

    let repeated = t.repeated_edges();
    if repeated > 0 {
        return Err(near_degenerate(format!(
            "{repeated} edges are shared by overlapping triangles"
        )));
    }
    if t.hull.len() != t.boundary_edges() {
        return Err(near_degenerate(format!(
            "boundary splits into several loops ({} of {} edges on the first)",
            t.hull.len(),
            t.boundary_edges()
        )));
    }
    let used = t.used_vertices().len();
    let distinct = distinct_count(planar);
    if used != distinct {
        return Err(near_degenerate(format!(
            "{used} of {distinct} distinct points are triangle vertices"
        )));
    }
    if t.len() + 2 + t.hull.len() != 2 * used {
        return Err(near_degenerate(format!(
            "{} triangles for {used} vertices with {} on the boundary",
            t.len(),
            t.hull.len()
        )));
    }

    let mut area = 0.0;
    for (k, Triangle([a, b, c])) in t.triangles.iter().enumerate() {
        let o = orient2d(planar[*a], planar[*b], planar[*c]);
        if !(o > cfg.eps_area) {
            return Err(near_degenerate(format!(
                "triangle {k} is a sliver (orient = {o:e})"
            )));
        }
        area += 0.5 * o;
    }
    let ring: Vec<Point2> = convex_hull_2d(planar)
        .into_iter()
        .map(|i| planar[i])
        .collect();
    let hull_area = polygon_area(&ring);
    if (area - hull_area).abs() > tol2 * hull_area.max(1.0) {
        return Err(near_degenerate(format!(
            "triangles cover {area} of hull area {hull_area}"
        )));
    }

    for (k, tri) in t.triangles.iter().enumerate() {
        let [a, b, c] = tri.0.map(|i| planar[i]);
        for s in t.neighbors[k].iter().flatten().copied().filter(|&s| s > k) {
            let Some(&q) = t.triangles[s].0.iter().find(|&&q| !tri.contains(q)) else {
                return Err(near_degenerate(format!(
                    "triangles {k} and {s} share all vertices"
                )));
            };
            let det = in_circle(a, b, c, planar[q]);
            if det > tol4 {
                return Err(near_degenerate(format!(
                    "point {q} is inside the circumcircle of triangle {k}"
                )));
            }
        }
    }
    Ok(())
}

fn near_degenerate(what: String) -> TriangulationError {
    TriangulationError::degenerate(format!("near-degenerate input: {what}"))
}

/// Number of distinct locations (`-0.0` and `0.0` coincide).
fn distinct_count(planar: &[Point2]) -> usize {
    let mut keys: Vec<(u64, u64)> = planar
        .iter()
        .map(|p| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}
