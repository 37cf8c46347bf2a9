//! Normalising frame and paraboloid lift.
//!
//! `Frame` maps the bounding box of the input onto `[-1, 1]²` (centre to the
//! origin, largest half-extent to 1) so hull tolerances are scale-free. The
//! lift is `(x, y) ↦ (x, y, x² + y²)`, a paraboloid opening upward.

use nalgebra::{Vector2, Vector3};

/// Affine normalisation `p ↦ (p - center) / scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub center: Vector2<f64>,
    pub scale: f64,
}

impl Frame {
    #[inline]
    pub fn identity() -> Self {
        Self {
            center: Vector2::zeros(),
            scale: 1.0,
        }
    }

    /// Bounding-box frame; `None` if empty or all points coincide.
    pub fn fit(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (mut lo, mut hi) = (*first, *first);
        for p in points {
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        // halve before subtracting; `hi - lo` overflows for extents near f64::MAX
        let half = hi * 0.5 - lo * 0.5;
        let scale = half.x.max(half.y);
        if !(scale > 0.0) || !scale.is_finite() {
            return None;
        }
        Some(Self {
            center: lo * 0.5 + hi * 0.5,
            scale,
        })
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        (p - self.center) / self.scale
    }
}

/// Lift onto the upward paraboloid.
#[inline]
pub fn lift_point(p: Vector2<f64>) -> Vector3<f64> {
    Vector3::new(p.x, p.y, p.norm_squared())
}

pub fn lift(points: &[Vector2<f64>]) -> Vec<Vector3<f64>> {
    points.iter().map(|&p| lift_point(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn frame_maps_bbox_to_unit_box() {
        let pts = vec![vector![2.0, 10.0], vector![6.0, 11.0], vector![4.0, 12.0]];
        let f = Frame::fit(&pts).unwrap();
        assert_eq!(f.center, vector![4.0, 11.0]);
        assert_eq!(f.scale, 2.0);
        assert_eq!(f.apply(pts[0]), vector![-1.0, -0.5]);
        assert_eq!(f.apply(pts[1]), vector![1.0, 0.0]);
    }

    #[test]
    fn frame_rejects_single_location() {
        let pts = vec![vector![1.0, 1.0], vector![1.0, 1.0]];
        assert!(Frame::fit(&pts).is_none());
        assert!(Frame::fit(&[]).is_none());
    }

    #[test]
    fn frame_fits_extents_near_f64_max() {
        let pts = vec![vector![1e308, 0.0], vector![-1e308, 0.0], vector![0.0, 1e308]];
        let f = Frame::fit(&pts).unwrap();
        assert_eq!(f.scale, 1e308);
        assert_eq!(f.center, vector![0.0, 5e307]);
        assert_eq!(f.apply(pts[0]), vector![1.0, -0.5]);
        assert_eq!(f.apply(pts[2]), vector![0.0, 0.5]);
    }

    #[test]
    fn lift_is_upward_paraboloid() {
        let q = lift_point(vector![-1.0, 2.0]);
        assert_eq!(q, vector![-1.0, 2.0, 5.0]);
        assert_eq!(Frame::identity().apply(vector![3.0, 4.0]), vector![3.0, 4.0]);
    }
}
