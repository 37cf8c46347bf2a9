//! Deterministic planar point sets (replay tokens).
//!
//! Purpose
//! - Reproducible inputs for tests, benches and the CLI `generate` command.
//!   The same `(seed, index)` always yields the same points on every platform
//!   `StdRng` is stable on.
//!
//! Families
//! - `uniform_in_box`: i.i.d. uniform in `[-h, h]²`; general position with
//!   probability one.
//! - `on_circle`: random angles on one circle; every lifted point lies on a
//!   single plane, the fully co-circular stress case.
//! - `jittered_grid`: `nx × ny` lattice with bounded per-point jitter; zero
//!   jitter gives many co-circular quadruples and collinear boundary rows.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finaliser
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Which family to draw from; the CLI maps `--kind` onto this.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointSetKind {
    Uniform { n: usize, half_width: f64 },
    Circle { n: usize, radius: f64 },
    Grid { nx: usize, ny: usize, jitter: f64 },
}

impl PointSetKind {
    pub fn draw(self, tok: ReplayToken) -> Vec<Vector2<f64>> {
        match self {
            Self::Uniform { n, half_width } => uniform_in_box(n, half_width, tok),
            Self::Circle { n, radius } => on_circle(n, radius, tok),
            Self::Grid { nx, ny, jitter } => jittered_grid(nx, ny, jitter, tok),
        }
    }

    pub fn point_count(self) -> usize {
        match self {
            Self::Uniform { n, .. } | Self::Circle { n, .. } => n,
            Self::Grid { nx, ny, .. } => nx * ny,
        }
    }
}

pub fn uniform_in_box(n: usize, half_width: f64, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let h = half_width.abs();
    (0..n)
        .map(|_| {
            Vector2::new(
                (rng.gen::<f64>() * 2.0 - 1.0) * h,
                (rng.gen::<f64>() * 2.0 - 1.0) * h,
            )
        })
        .collect()
}

/// Angles are drawn i.i.d. and sorted, so ids run counter-clockwise.
pub fn on_circle(n: usize, radius: f64, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let mut angles: Vec<f64> = (0..n)
        .map(|_| rng.gen::<f64>() * std::f64::consts::TAU)
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles
        .into_iter()
        .map(|th| Vector2::new(th.cos() * radius, th.sin() * radius))
        .collect()
}

/// Unit-spaced lattice, row-major from the origin; jitter is clamped to `[0, 0.49]`.
pub fn jittered_grid(nx: usize, ny: usize, jitter: f64, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let j = jitter.clamp(0.0, 0.49);
    let mut pts = Vec::with_capacity(nx * ny);
    for iy in 0..ny {
        for ix in 0..nx {
            let mut p = Vector2::new(ix as f64, iy as f64);
            if j > 0.0 {
                p.x += (rng.gen::<f64>() * 2.0 - 1.0) * j;
                p.y += (rng.gen::<f64>() * 2.0 - 1.0) * j;
            }
            pts.push(p);
        }
    }
    pts
}
