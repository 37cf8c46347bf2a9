//! Reference backend: enumerate every triple and keep supporting lower planes.
//!
//! Complexity O(n⁴). Requires general position: four coplanar lifted points
//! (a co-circular quadruple) support no strict facet, and that region stays
//! uncovered.

use nalgebra::Vector3;

use super::{Facet3, HullError, LowerHull};
use crate::cfg::{DelaunayCfg, NORMAL_EPS};
use crate::predicates::orient2d;

#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForceHull;

impl LowerHull for BruteForceHull {
    fn lower_facets(
        &self,
        lifted: &[Vector3<f64>],
        cfg: &DelaunayCfg,
    ) -> Result<Vec<Facet3>, HullError> {
        let n = lifted.len();
        if n < 3 {
            return Err(HullError::TooFewPoints { got: n });
        }
        let mut out = Vec::new();
        let mut spans_plane = false;
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    let pi = lifted[i];
                    let raw = (lifted[j] - pi).cross(&(lifted[k] - pi));
                    let norm = raw.norm();
                    if !(norm > NORMAL_EPS) {
                        continue;
                    }
                    // raw.z is the planar orientation of (i, j, k); the lower
                    // facet's outward normal points down.
                    let (v, nrm) = if raw.z > 0.0 {
                        ([i, j, k], -raw / norm)
                    } else {
                        ([i, k, j], raw / norm)
                    };
                    if !(nrm.z < -cfg.eps_lower) {
                        continue;
                    }
                    spans_plane = true;
                    let c = nrm.dot(&pi);
                    let supporting = (0..n)
                        .filter(|&m| m != i && m != j && m != k)
                        .all(|m| nrm.dot(&lifted[m]) - c < -cfg.eps_plane);
                    let [va, vb, vc] = v;
                    let area2 = orient2d(lifted[va].xy(), lifted[vb].xy(), lifted[vc].xy());
                    if supporting && area2 > cfg.eps_area {
                        out.push(Facet3 { v, n: nrm, c });
                    }
                }
            }
        }
        if !spans_plane {
            return Err(HullError::Flat);
        }
        Ok(out)
    }
}
