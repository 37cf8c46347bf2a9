//! Planar predicates and measures (`f64`, no exact arithmetic).
//!
//! Sign conventions
//! - `orient2d > 0` iff `a, b, c` turn counter-clockwise.
//! - `in_circle > 0` iff `p` is strictly inside the circumcircle of the CCW
//!   triangle `abc`. It equals the orientation of the lifted points
//!   `(x, y, x²+y²)`, which is why lower facets of the lifted hull are Delaunay.

use std::cmp::Ordering;

use nalgebra::{Matrix3, Vector2};

/// Twice the signed area of `abc`.
#[inline]
pub fn orient2d(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Lifted 3×3 determinant; positive iff `p` is inside circle(`abc`) for CCW `abc`.
pub fn in_circle(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, p: Vector2<f64>) -> f64 {
    let d = a - p;
    let e = b - p;
    let f = c - p;
    let m = Matrix3::new(
        d.x, d.y, d.norm_squared(), //
        e.x, e.y, e.norm_squared(), //
        f.x, f.y, f.norm_squared(),
    );
    m.determinant()
}

/// Offset from `a` to the circumcenter of `abc`; `None` for collinear input.
fn circumdelta(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Option<Vector2<f64>> {
    let d = b - a;
    let e = c - a;
    let den = d.x * e.y - d.y * e.x;
    if den == 0.0 || !den.is_finite() {
        return None;
    }
    let bl = d.norm_squared();
    let cl = e.norm_squared();
    let s = 0.5 / den;
    Some(Vector2::new((e.y * bl - d.y * cl) * s, (d.x * cl - e.x * bl) * s))
}

#[inline]
pub fn circumcenter(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Option<Vector2<f64>> {
    circumdelta(a, b, c).map(|delta| a + delta)
}

#[inline]
pub fn circumradius2(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Option<f64> {
    circumdelta(a, b, c).map(|delta| delta.norm_squared())
}

/// Unsigned triangle area.
#[inline]
pub fn triangle_area(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    0.5 * orient2d(a, b, c).abs()
}

/// Shoelace area of a closed polygon; positive for CCW vertex order.
pub fn polygon_area(verts: &[Vector2<f64>]) -> f64 {
    if verts.len() < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..verts.len() {
        let p = verts[i];
        let q = verts[(i + 1) % verts.len()];
        a += p.x * q.y - q.x * p.y;
    }
    0.5 * a
}

/// Andrew's monotone chain; returns hull vertex indices in CCW order.
///
/// Collinear boundary points and duplicates are dropped. Fewer than three
/// distinct non-collinear points give a hull of length `< 3`.
pub fn convex_hull_2d(points: &[Vector2<f64>]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..points.len()).collect();
    idx.sort_by(|&i, &j| {
        let (a, b) = (points[i], points[j]);
        match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
            o => o,
        }
    });
    idx.dedup_by(|i, j| points[*i] == points[*j]);
    if idx.len() < 3 {
        return idx;
    }
    let mut lower: Vec<usize> = Vec::with_capacity(idx.len());
    for &i in &idx {
        while lower.len() >= 2
            && orient2d(
                points[lower[lower.len() - 2]],
                points[lower[lower.len() - 1]],
                points[i],
            ) <= 0.0
        {
            lower.pop();
        }
        lower.push(i);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(idx.len());
    for &i in idx.iter().rev() {
        while upper.len() >= 2
            && orient2d(
                points[upper[upper.len() - 2]],
                points[upper[upper.len() - 1]],
                points[i],
            ) <= 0.0
        {
            upper.pop();
        }
        upper.push(i);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
