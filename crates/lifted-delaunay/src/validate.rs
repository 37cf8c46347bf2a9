//! Certificate checks for a computed triangulation.
//!
//! Checks run in the normalised frame (bounding box mapped to `[-1, 1]²`) so
//! `tol` is relative to the extent of the input:
//! 1. every index in bounds, three distinct ids per triangle, no directed
//!    edge used twice;
//! 2. every triangle strictly counter-clockwise;
//! 3. no input point strictly inside any circumcircle (`in_circle > tol`);
//! 4. summed triangle area equals the area of the planar convex hull;
//! 5. `neighbors` is symmetric.
//!
//! Cost is O(T·n) for the empty-circle pass; intended for tests and the CLI's
//! `--validate` flag, not for hot paths.

use std::collections::HashMap;
use std::fmt;

use crate::lift::Frame;
use crate::predicates::{convex_hull_2d, in_circle, orient2d, polygon_area};
use crate::triangulation::{Point2, Triangle, Triangulation};

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    IndexOutOfBounds { triangle: usize, index: usize },
    RepeatedVertex { triangle: usize },
    RepeatedEdge { count: usize },
    NotCounterClockwise { triangle: usize, orient: f64 },
    EmptyCircleViolated { triangle: usize, point: usize, det: f64 },
    AreaMismatch { triangles: f64, hull: f64 },
    NeighborAsymmetry { triangle: usize, neighbor: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { triangle, index } => {
                write!(f, "triangle {triangle} references missing point {index}")
            }
            Self::RepeatedVertex { triangle } => {
                write!(f, "triangle {triangle} repeats a vertex")
            }
            Self::RepeatedEdge { count } => {
                write!(f, "{count} directed edges belong to more than one triangle")
            }
            Self::NotCounterClockwise { triangle, orient } => {
                write!(f, "triangle {triangle} is not CCW (orient = {orient:e})")
            }
            Self::EmptyCircleViolated {
                triangle,
                point,
                det,
            } => write!(
                f,
                "point {point} lies inside the circumcircle of triangle {triangle} (det = {det:e})"
            ),
            Self::AreaMismatch { triangles, hull } => write!(
                f,
                "triangles cover area {triangles} but the convex hull has area {hull}"
            ),
            Self::NeighborAsymmetry { triangle, neighbor } => write!(
                f,
                "triangle {triangle} lists {neighbor} as neighbour but not vice versa"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Summary of a passing triangulation (normalised-frame measures).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationReport {
    pub triangles: usize,
    pub boundary: usize,
    /// Summed triangle area in the normalised frame.
    pub area: f64,
    /// Largest `in_circle` value seen over non-vertex points (≤ `tol`).
    pub max_in_circle: f64,
}

pub fn validate(
    points: &[Point2],
    tri: &Triangulation,
    tol: f64,
) -> Result<ValidationReport, ValidationError> {
    let n = points.len();
    for (t, Triangle(v)) in tri.triangles.iter().enumerate() {
        if let Some(&index) = v.iter().find(|&&i| i >= n) {
            return Err(ValidationError::IndexOutOfBounds { triangle: t, index });
        }
        if v[0] == v[1] || v[1] == v[2] || v[0] == v[2] {
            return Err(ValidationError::RepeatedVertex { triangle: t });
        }
    }
    let count = tri.repeated_edges();
    if count > 0 {
        return Err(ValidationError::RepeatedEdge { count });
    }

    let frame = Frame::fit(points).unwrap_or_else(Frame::identity);
    let planar: Vec<Point2> = points.iter().map(|&p| frame.apply(p)).collect();

    let mut area = 0.0;
    for (t, Triangle([a, b, c])) in tri.triangles.iter().enumerate() {
        let orient = orient2d(planar[*a], planar[*b], planar[*c]);
        if !(orient > 0.0) {
            return Err(ValidationError::NotCounterClockwise {
                triangle: t,
                orient,
            });
        }
        area += 0.5 * orient;
    }

    let mut max_in_circle = f64::NEG_INFINITY;
    for (t, tr) in tri.triangles.iter().enumerate() {
        let [a, b, c] = tr.0;
        for (p, &q) in planar.iter().enumerate() {
            if tr.contains(p) {
                continue;
            }
            let det = in_circle(planar[a], planar[b], planar[c], q);
            if det > tol {
                return Err(ValidationError::EmptyCircleViolated {
                    triangle: t,
                    point: p,
                    det,
                });
            }
            max_in_circle = max_in_circle.max(det);
        }
    }

    let ring: Vec<Point2> = convex_hull_2d(&planar)
        .into_iter()
        .map(|i| planar[i])
        .collect();
    let hull = polygon_area(&ring);
    if (area - hull).abs() > tol * hull.abs().max(1.0) {
        return Err(ValidationError::AreaMismatch {
            triangles: area,
            hull,
        });
    }

    for (t, adj) in tri.neighbors.iter().enumerate() {
        for &s in adj.iter().flatten() {
            let back = tri.neighbors.get(s).is_some_and(|b| b.contains(&Some(t)));
            if !back {
                return Err(ValidationError::NeighborAsymmetry {
                    triangle: t,
                    neighbor: s,
                });
            }
        }
    }

    Ok(ValidationReport {
        triangles: tri.triangles.len(),
        boundary: tri.hull.len(),
        area,
        max_in_circle,
    })
}

/// Equal as multisets of unordered vertex triples.
pub fn same_triangles(a: &[Triangle], b: &[Triangle]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts: HashMap<[usize; 3], isize> = HashMap::with_capacity(a.len());
    for t in a {
        *counts.entry(t.sorted()).or_default() += 1;
    }
    for t in b {
        *counts.entry(t.sorted()).or_default() -= 1;
    }
    counts.values().all(|&c| c == 0)
}
