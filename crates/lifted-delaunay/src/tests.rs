use super::*;
use crate::cfg::VALIDATE_EPS;
use crate::hull::{BruteForceHull, IncrementalHull};
use crate::predicates::convex_hull_2d;
use crate::rand::{jittered_grid, on_circle, uniform_in_box, ReplayToken};
use crate::validate::{same_triangles, validate};
use nalgebra::vector;

fn unit_square() -> Vec<Point2> {
    vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
        vector![1.0, 1.0],
    ]
}

fn regular_polygon(n: usize) -> Vec<Point2> {
    (0..n)
        .map(|k| {
            let th = std::f64::consts::TAU * k as f64 / n as f64;
            vector![th.cos(), th.sin()]
        })
        .collect()
}

#[test]
fn unit_square_splits_along_first_diagonal() {
    let tris = compute_delaunay_triangulation_2d(&unit_square()).unwrap();
    assert_eq!(tris, vec![Triangle([0, 1, 3]), Triangle([0, 3, 2])]);

    let t = triangulate(&unit_square()).unwrap();
    assert_eq!(t.n_points, 4);
    assert_eq!(t.hull, vec![0, 1, 3, 2]);
    assert_eq!(t.neighbors, vec![[None, Some(1), None], [None, None, Some(0)]]);
}

#[test]
fn three_points_give_one_ccw_triangle() {
    // clockwise input order
    let pts = vec![vector![0.0, 0.0], vector![0.0, 1.0], vector![1.0, 0.0]];
    let tris = compute_delaunay_triangulation_2d(&pts).unwrap();
    assert_eq!(tris, vec![Triangle([0, 2, 1])]);
}

#[test]
fn too_few_points() {
    let two = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
    assert_eq!(
        compute_delaunay_triangulation_2d(&two),
        Err(TriangulationError::InsufficientPoints { got: 2 })
    );
    assert_eq!(
        triangulate(&[]).unwrap_err(),
        TriangulationError::InsufficientPoints { got: 0 }
    );
}

#[test]
fn collinear_and_coincident_inputs_are_degenerate() {
    let line: Vec<Point2> = (0..6).map(|k| vector![k as f64, 2.0 * k as f64 - 1.0]).collect();
    assert!(matches!(
        triangulate(&line),
        Err(TriangulationError::DegenerateInput { .. })
    ));
    let same = vec![vector![3.0, 3.0]; 4];
    assert!(matches!(
        triangulate(&same),
        Err(TriangulationError::DegenerateInput { .. })
    ));
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let mut pts = unit_square();
    pts[2].y = f64::NAN;
    assert_eq!(
        triangulate(&pts).unwrap_err(),
        TriangulationError::NonFiniteCoordinate { index: 2 }
    );
    pts[2].y = 1.0;
    pts[3].x = f64::INFINITY;
    assert_eq!(
        triangulate(&pts).unwrap_err(),
        TriangulationError::NonFiniteCoordinate { index: 3 }
    );
}

#[test]
fn regular_polygons_triangulate_into_n_minus_two() {
    for n in 3..=16 {
        let pts = regular_polygon(n);
        let t = triangulate(&pts).unwrap();
        assert_eq!(t.len(), n - 2, "n = {n}");
        assert_eq!(t.hull.len(), n);
        validate(&pts, &t, VALIDATE_EPS).unwrap();
    }
}

#[test]
fn triangle_count_matches_euler_formula() {
    for index in 0..6 {
        let pts = uniform_in_box(80, 5.0, ReplayToken::new(77, index));
        let t = triangulate(&pts).unwrap();
        let h = convex_hull_2d(&pts).len();
        assert_eq!(t.hull.len(), h);
        assert_eq!(t.len(), 2 * pts.len() - 2 - h);
        assert_eq!(t.used_vertices().len(), pts.len());
        validate(&pts, &t, VALIDATE_EPS).unwrap();
    }
}

#[test]
fn lattice_and_circle_inputs_validate() {
    let grid = jittered_grid(4, 4, 0.0, ReplayToken::new(0, 0));
    let t = triangulate(&grid).unwrap();
    assert_eq!(t.len(), 18);
    assert_eq!(t.hull.len(), 12);
    validate(&grid, &t, VALIDATE_EPS).unwrap();

    let jittered = jittered_grid(6, 5, 0.3, ReplayToken::new(4, 2));
    let t = triangulate(&jittered).unwrap();
    validate(&jittered, &t, VALIDATE_EPS).unwrap();

    let circle = on_circle(24, 10.0, ReplayToken::new(8, 0));
    let t = triangulate(&circle).unwrap();
    assert_eq!(t.len(), 22);
    validate(&circle, &t, VALIDATE_EPS).unwrap();
}

#[test]
fn duplicates_are_left_out() {
    let mut pts = unit_square();
    pts.push(vector![0.25, 0.4]);
    pts.push(vector![1.0, 0.0]);
    let t = triangulate(&pts).unwrap();
    assert!(t.triangles.iter().all(|tr| !tr.contains(5)));
    assert_eq!(t.len(), 4);
    validate(&pts, &t, VALIDATE_EPS).unwrap();
}

#[test]
fn repeated_calls_agree() {
    let pts = uniform_in_box(50, 1.0, ReplayToken::new(1, 1));
    let a = compute_delaunay_triangulation_2d(&pts).unwrap();
    let b = compute_delaunay_triangulation_2d(&pts).unwrap();
    assert_eq!(a, b);
    assert!(same_triangles(&a, &b));
}

#[test]
fn result_is_invariant_under_translation_and_scale() {
    let pts = uniform_in_box(40, 1.0, ReplayToken::new(6, 3));
    let moved: Vec<Point2> = pts
        .iter()
        .map(|p| p * 1e6 + vector![-3.5e7, 2.0e6])
        .collect();
    let a = compute_delaunay_triangulation_2d(&pts).unwrap();
    let b = compute_delaunay_triangulation_2d(&moved).unwrap();
    assert!(same_triangles(&a, &b));
}

#[test]
fn backends_agree_through_the_wrapper() {
    let cfg = DelaunayCfg::default();
    for index in 0..4 {
        let pts = uniform_in_box(20, 2.0, ReplayToken::new(99, index));
        let fast = triangulate_with(&pts, &cfg, &IncrementalHull).unwrap();
        let slow = triangulate_with(&pts, &cfg, &BruteForceHull).unwrap();
        assert_eq!(fast.triangles, slow.triangles);
        assert_eq!(fast.hull, slow.hull);
    }
}

#[test]
fn brute_force_reports_co_circular_gap() {
    let err = triangulate_with(&unit_square(), &DelaunayCfg::default(), &BruteForceHull)
        .unwrap_err();
    assert!(matches!(err, TriangulationError::DegenerateInput { .. }));
}

#[test]
fn unnormalised_frame_still_works_near_unit_scale() {
    let cfg = DelaunayCfg {
        normalize: false,
        ..DelaunayCfg::default()
    };
    let t = triangulate_with(&unit_square(), &cfg, &IncrementalHull).unwrap();
    assert_eq!(t.len(), 2);
    validate(&unit_square(), &t, VALIDATE_EPS).unwrap();
}

fn assert_valid_or_degenerate(pts: &[Point2], what: &str) {
    match triangulate(pts) {
        Ok(t) => {
            if let Err(e) = validate(pts, &t, VALIDATE_EPS) {
                panic!("{what}: returned an invalid triangulation: {e}");
            }
        }
        Err(TriangulationError::DegenerateInput { .. }) => {}
        Err(e) => panic!("{what}: unexpected error {e}"),
    }
}

#[test]
fn tiny_jitter_grid_is_valid_or_rejected() {
    let pts = jittered_grid(15, 15, 1e-11, ReplayToken::new(0, 1));
    assert_valid_or_degenerate(&pts, "15x15 grid, jitter 1e-11");
    for seed in 1..40 {
        let pts = jittered_grid(15, 15, 1e-11, ReplayToken::new(seed, 1));
        assert_valid_or_degenerate(&pts, &format!("15x15 grid, jitter 1e-11, seed {seed}"));
    }
}

#[test]
fn grid_jitter_sweep_is_valid_or_rejected() {
    for jitter in [0.0, 1e-14, 1e-13, 1e-12, 1e-11, 1e-10, 1e-9, 1e-7, 1e-4] {
        for seed in 0..4 {
            let pts = jittered_grid(12, 12, jitter, ReplayToken::new(seed, 7));
            assert_valid_or_degenerate(&pts, &format!("jitter {jitter:e}, seed {seed}"));
        }
    }
    // exact lattice stays accepted
    let t = triangulate(&jittered_grid(12, 12, 0.0, ReplayToken::new(0, 0))).unwrap();
    assert_eq!(t.len(), 2 * 144 - 2 - 44);
}

#[test]
fn stacked_triangles_are_counted_not_merged() {
    let t = Triangulation::from_triangles(4, vec![Triangle([0, 1, 3]), Triangle([0, 1, 3])]);
    assert_eq!(t.repeated_edges(), 3);
    assert_eq!(t.boundary_edges(), 6);
    assert_eq!(t.hull.len(), 3);

    let ok = triangulate(&unit_square()).unwrap();
    assert_eq!(ok.repeated_edges(), 0);
    assert_eq!(ok.boundary_edges(), ok.hull.len());
}

#[test]
fn extents_near_f64_max_triangulate() {
    let pts = vec![vector![1e308, 0.0], vector![-1e308, 0.0], vector![0.0, 1e308]];
    let t = triangulate(&pts).unwrap();
    assert_eq!(t.triangles, vec![Triangle([0, 2, 1])]);
    assert_eq!(t.hull, vec![0, 2, 1]);

    let raw = DelaunayCfg {
        normalize: false,
        ..DelaunayCfg::default()
    };
    assert!(matches!(
        triangulate_with(&pts, &raw, &IncrementalHull),
        Err(TriangulationError::DegenerateInput { .. })
    ));
}
