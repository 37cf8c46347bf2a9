//! Beneath-beyond 3-D hull with outside sets and a symbolic apex.
//!
//! Algorithm
//! - Seed a prism: the base triangle spanned by the first point, the point
//!   farthest from it, and the point of widest area with those two, closed
//!   upward by three vertical facets through the apex.
//! - Every other point joins the outside set of the first facet it lies
//!   beyond (distance `> eps`); points beyond no facet are dropped.
//! - Pop a facet with a non-empty outside set, take its farthest point (the
//!   eye), collect the visible region by BFS over edge twins, cut it out along
//!   its horizon, cone the horizon to the eye, and hand the orphaned points to
//!   the new facets.
//!
//! The apex is the point at infinity in `+z`. A facet through it is the
//! vertical plane spanned by its finite edge and `+z`, so planar lifts
//! (co-circular inputs) still give a closed, full-dimensional hull. Points
//! coplanar with a lower facet are never beyond it; they enter through a
//! vertical facet and stay on the lower hull as extra triangles.

use std::collections::{HashMap, HashSet, VecDeque};

use nalgebra::Vector3;

use super::{Facet3, HullError, LowerHull};
use crate::cfg::{DelaunayCfg, NORMAL_EPS};
use crate::predicates::orient2d;

/// Vertex id of the point at infinity above the height field.
const APEX: usize = usize::MAX;

/// Default backend: incremental lower hull.
#[derive(Clone, Copy, Debug, Default)]
pub struct IncrementalHull;

impl LowerHull for IncrementalHull {
    fn lower_facets(
        &self,
        lifted: &[Vector3<f64>],
        cfg: &DelaunayCfg,
    ) -> Result<Vec<Facet3>, HullError> {
        let mut hull = Hull::seed(lifted, cfg.eps_plane)?;
        hull.grow()?;
        Ok(hull.lower(cfg))
    }
}

/// All live facets of the closed hull (apex included), outward CCW order.
#[cfg(test)]
pub(super) fn closed_faces(
    lifted: &[Vector3<f64>],
    eps: f64,
) -> Result<Vec<[usize; 3]>, HullError> {
    let mut hull = Hull::seed(lifted, eps)?;
    hull.grow()?;
    Ok(hull.faces.iter().filter(|f| f.alive).map(|f| f.v).collect())
}

#[derive(Clone, Debug)]
struct Face {
    v: [usize; 3],
    n: Vector3<f64>,
    c: f64,
    alive: bool,
    outside: Vec<usize>,
}

struct Hull<'a> {
    pts: &'a [Vector3<f64>],
    eps: f64,
    faces: Vec<Face>,
    /// Directed edge `(u, w)` → facet that traverses it in that direction.
    edges: HashMap<(usize, usize), usize>,
    pending: Vec<usize>,
}

impl<'a> Hull<'a> {
    fn seed(pts: &'a [Vector3<f64>], eps: f64) -> Result<Self, HullError> {
        if pts.len() < 3 {
            return Err(HullError::TooFewPoints { got: pts.len() });
        }
        let a = 0;
        let b = farthest_xy(pts, a);
        let len = (pts[b].xy() - pts[a].xy()).norm();
        if !(len > eps) {
            return Err(HullError::Flat);
        }
        let (c, area2) = widest_xy(pts, a, b);
        if !(area2.abs() / len > eps) {
            return Err(HullError::Flat);
        }
        let (b, c) = if area2 > 0.0 { (b, c) } else { (c, b) };

        let mut hull = Self {
            pts,
            eps,
            faces: Vec::with_capacity(4 * pts.len()),
            edges: HashMap::with_capacity(6 * pts.len()),
            pending: Vec::new(),
        };
        // a, b, c are CCW in the plane; the base faces down.
        let seeds = [
            hull.add_face([a, c, b])?,
            hull.add_face([a, b, APEX])?,
            hull.add_face([b, c, APEX])?,
            hull.add_face([c, a, APEX])?,
        ];
        for p in 0..pts.len() {
            if p != a && p != b && p != c {
                hull.assign(p, &seeds);
            }
        }
        for &f in seeds.iter().rev() {
            if !hull.faces[f].outside.is_empty() {
                hull.pending.push(f);
            }
        }
        Ok(hull)
    }

    fn grow(&mut self) -> Result<(), HullError> {
        while let Some(f) = self.pending.pop() {
            if !self.faces[f].alive || self.faces[f].outside.is_empty() {
                continue;
            }
            let eye = self.farthest_outside(f);
            let visible = self.visible_from(f, eye)?;
            let horizon = self.horizon(&visible)?;

            let mut orphans = Vec::new();
            for &g in &visible {
                let face = &mut self.faces[g];
                face.alive = false;
                orphans.append(&mut face.outside);
                let v = face.v;
                for k in 0..3 {
                    self.edges.remove(&(v[k], v[(k + 1) % 3]));
                }
            }
            orphans.retain(|&q| q != eye);

            let mut cone = Vec::with_capacity(horizon.len());
            for (u, w) in horizon {
                cone.push(self.add_face([u, w, eye])?);
            }
            for q in orphans {
                self.assign(q, &cone);
            }
            for &g in cone.iter().rev() {
                if !self.faces[g].outside.is_empty() {
                    self.pending.push(g);
                }
            }
        }
        Ok(())
    }

    /// Finite downward facets; slivers with projected `orient2d <= eps_area` are dropped.
    fn lower(&self, cfg: &DelaunayCfg) -> Vec<Facet3> {
        self.faces
            .iter()
            .filter(|f| f.alive && !f.v.contains(&APEX) && f.n.z < -cfg.eps_lower)
            .filter_map(|f| {
                // outward CCW seen from below → CCW in the plane
                let v = [f.v[0], f.v[2], f.v[1]];
                let [pa, pb, pc] = v.map(|i| self.pts[i].xy());
                let area2 = orient2d(pa, pb, pc);
                (area2 > cfg.eps_area).then_some(Facet3 { v, n: f.n, c: f.c })
            })
            .collect()
    }

    /// Outward unit normal and offset; the apex contributes the `+z` direction.
    fn plane(&self, v: [usize; 3]) -> Option<(Vector3<f64>, f64)> {
        let (a, b, third) = match v.iter().position(|&i| i == APEX) {
            None => (v[0], v[1], Some(v[2])),
            Some(0) => (v[1], v[2], None),
            Some(1) => (v[2], v[0], None),
            Some(_) => (v[0], v[1], None),
        };
        if a == APEX || b == APEX {
            return None;
        }
        let pa = self.pts[a];
        let w = match third {
            Some(c) => self.pts[c] - pa,
            None => Vector3::z(),
        };
        let n = (self.pts[b] - pa).cross(&w);
        let norm = n.norm();
        if !norm.is_finite() || norm <= NORMAL_EPS {
            return None;
        }
        let n = n / norm;
        Some((n, n.dot(&pa)))
    }

    fn add_face(&mut self, v: [usize; 3]) -> Result<usize, HullError> {
        let (n, c) = self
            .plane(v)
            .ok_or_else(|| HullError::topology(format!("degenerate facet {v:?}")))?;
        let id = self.faces.len();
        for k in 0..3 {
            let e = (v[k], v[(k + 1) % 3]);
            if self.edges.insert(e, id).is_some() {
                return Err(HullError::topology(format!("edge {e:?} used twice")));
            }
        }
        self.faces.push(Face {
            v,
            n,
            c,
            alive: true,
            outside: Vec::new(),
        });
        Ok(id)
    }

    #[inline]
    fn distance(&self, f: usize, p: usize) -> f64 {
        let face = &self.faces[f];
        face.n.dot(&self.pts[p]) - face.c
    }

    /// Put `p` in the outside set of the first candidate it lies beyond.
    fn assign(&mut self, p: usize, candidates: &[usize]) {
        for &f in candidates {
            if self.faces[f].alive && self.distance(f, p) > self.eps {
                self.faces[f].outside.push(p);
                return;
            }
        }
    }

    fn farthest_outside(&self, f: usize) -> usize {
        let face = &self.faces[f];
        let mut best = face.outside[0];
        let mut best_d = f64::NEG_INFINITY;
        for &p in &face.outside {
            let d = face.n.dot(&self.pts[p]) - face.c;
            if d > best_d {
                best = p;
                best_d = d;
            }
        }
        best
    }

    fn twin(&self, u: usize, w: usize) -> Result<usize, HullError> {
        self.edges
            .get(&(w, u))
            .copied()
            .ok_or_else(|| HullError::topology(format!("edge ({u}, {w}) has no twin")))
    }

    fn visible_from(&self, start: usize, eye: usize) -> Result<Vec<usize>, HullError> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut visible = Vec::new();
        while let Some(f) = queue.pop_front() {
            visible.push(f);
            let v = self.faces[f].v;
            for k in 0..3 {
                let g = self.twin(v[k], v[(k + 1) % 3])?;
                if seen.insert(g) && self.distance(g, eye) > self.eps {
                    queue.push_back(g);
                }
            }
        }
        Ok(visible)
    }

    /// Boundary of the visible region as one closed loop of directed edges.
    fn horizon(&self, visible: &[usize]) -> Result<Vec<(usize, usize)>, HullError> {
        let region: HashSet<usize> = visible.iter().copied().collect();
        let mut next: HashMap<usize, usize> = HashMap::new();
        let mut start = None;
        for &f in visible {
            let v = self.faces[f].v;
            for k in 0..3 {
                let (u, w) = (v[k], v[(k + 1) % 3]);
                if !region.contains(&self.twin(u, w)?) {
                    if next.insert(u, w).is_some() {
                        return Err(HullError::topology("horizon touches itself"));
                    }
                    start.get_or_insert(u);
                }
            }
        }
        let start = start.ok_or_else(|| HullError::topology("eye sees every facet"))?;
        let mut ring = Vec::with_capacity(next.len());
        let mut u = start;
        loop {
            let w = *next
                .get(&u)
                .ok_or_else(|| HullError::topology("horizon is open"))?;
            ring.push((u, w));
            u = w;
            if u == start {
                break;
            }
            if ring.len() > next.len() {
                return Err(HullError::topology("horizon does not close"));
            }
        }
        if ring.len() != next.len() {
            return Err(HullError::topology("horizon splits into several loops"));
        }
        Ok(ring)
    }
}

fn farthest_xy(pts: &[Vector3<f64>], a: usize) -> usize {
    let mut best = a;
    let mut best_d = 0.0;
    for (i, p) in pts.iter().enumerate() {
        let d = (p.xy() - pts[a].xy()).norm_squared();
        if d > best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

/// Point maximising `|orient2d(a, b, ·)|`, with its signed value.
fn widest_xy(pts: &[Vector3<f64>], a: usize, b: usize) -> (usize, f64) {
    let (pa, pb) = (pts[a].xy(), pts[b].xy());
    let mut best = a;
    let mut best_area = 0.0_f64;
    for (i, p) in pts.iter().enumerate() {
        let area = orient2d(pa, pb, p.xy());
        if area.abs() > best_area.abs() {
            best = i;
            best_area = area;
        }
    }
    (best, best_area)
}
