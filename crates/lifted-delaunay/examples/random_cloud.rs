//! Triangulate random point sets and print counts against 2n − 2 − h.
//!
//! Usage:
//!   cargo run -p lifted-delaunay --example random_cloud -- [n] [seed]

use lifted_delaunay::api::{triangulate, validate, PointSetKind, ReplayToken, VALIDATE_EPS};

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(200);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let kinds = [
        PointSetKind::Uniform { n, half_width: 1.0 },
        PointSetKind::Circle { n, radius: 1.0 },
        PointSetKind::Grid {
            nx: (n as f64).sqrt().ceil() as usize,
            ny: (n as f64).sqrt().ceil() as usize,
            jitter: 0.0,
        },
    ];
    for (i, kind) in kinds.into_iter().enumerate() {
        let pts = kind.draw(ReplayToken::new(seed, i as u64));
        match triangulate(&pts) {
            Ok(t) => {
                let expect = 2 * pts.len() - 2 - t.hull.len();
                let valid = validate(&pts, &t, VALIDATE_EPS).map(|r| r.area);
                println!(
                    "{kind:?}: n={} T={} h={} 2n-2-h={expect} validate={valid:?}",
                    pts.len(),
                    t.len(),
                    t.hull.len()
                );
            }
            Err(e) => println!("{kind:?}: error: {e}"),
        }
    }
}
