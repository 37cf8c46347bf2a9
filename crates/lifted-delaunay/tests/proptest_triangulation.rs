//! Property tests over random point clouds.
//!
//! Inputs are drawn on a coarse lattice with a random sub-cell offset so that
//! exact co-circularity is rare but not excluded; every property below holds
//! for degenerate configurations too. `tiny_jitter_lattice` perturbs a unit
//! lattice at the scale of the hull tolerances, where the only acceptable
//! answers are a valid triangulation or `DegenerateInput`.

use lifted_delaunay::api::{
    convex_hull_2d, jittered_grid, same_triangles, triangulate, validate, Point2, ReplayToken,
    TriangulationError, VALIDATE_EPS,
};
use nalgebra::Vector2;
use proptest::prelude::*;

fn cloud(max_len: usize) -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((-1000i32..1000, -1000i32..1000, 0.0f64..1e-3), 3..max_len).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(x, y, d)| Vector2::new(x as f64 * 1e-2 + d, y as f64 * 1e-2 - d))
                .collect()
        },
    )
}

fn tiny_jitter_lattice() -> impl Strategy<Value = Vec<Point2>> {
    (3usize..10, 3usize..10, -14i32..-7, any::<u64>()).prop_map(|(nx, ny, e, seed)| {
        jittered_grid(nx, ny, 10f64.powi(e), ReplayToken::new(seed, 0))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_is_a_delaunay_triangulation(pts in cloud(60)) {
        match triangulate(&pts) {
            Ok(t) => {
                prop_assert!(!t.is_empty());
                for tri in &t.triangles {
                    prop_assert!(tri.0.iter().all(|&i| i < pts.len()));
                }
                let rep = validate(&pts, &t, VALIDATE_EPS);
                prop_assert!(rep.is_ok(), "{:?}", rep);
            }
            Err(TriangulationError::DegenerateInput { .. }) => {
                prop_assert!(convex_hull_2d(&pts).len() < 3);
            }
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }

    #[test]
    fn repeated_calls_give_the_same_triangles(pts in cloud(40)) {
        prop_assume!(convex_hull_2d(&pts).len() >= 3);
        let a = triangulate(&pts).unwrap();
        let b = triangulate(&pts).unwrap();
        prop_assert!(same_triangles(&a.triangles, &b.triangles));
    }

    #[test]
    fn boundary_matches_planar_hull(pts in cloud(50)) {
        let ring = convex_hull_2d(&pts);
        prop_assume!(ring.len() >= 3);
        let t = triangulate(&pts).unwrap();
        // collinear boundary points may sit on the loop but corners must all appear
        for i in ring {
            let on_loop = t.hull.contains(&i)
                || (0..pts.len()).any(|j| pts[j] == pts[i] && t.hull.contains(&j));
            prop_assert!(on_loop, "corner {} missing from {:?}", i, t.hull);
        }
    }

    #[test]
    fn tiny_jitter_lattices_are_valid_or_rejected(pts in tiny_jitter_lattice()) {
        match triangulate(&pts) {
            Ok(t) => {
                let rep = validate(&pts, &t, VALIDATE_EPS);
                prop_assert!(rep.is_ok(), "{:?}", rep);
                prop_assert_eq!(t.used_vertices().len(), pts.len());
                prop_assert_eq!(t.len() + 2 + t.hull.len(), 2 * pts.len());
            }
            Err(TriangulationError::DegenerateInput { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }
}
