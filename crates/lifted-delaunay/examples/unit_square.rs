//! Triangulate the unit square and a few small shapes; print triangles and boundary.
//!
//! Usage:
//!   cargo run -p lifted-delaunay --example unit_square

use lifted_delaunay::api::{triangulate, validate, Point2, VALIDATE_EPS};
use nalgebra::vector;

fn show(name: &str, pts: &[Point2]) {
    match triangulate(pts) {
        Ok(t) => {
            let ok = validate(pts, &t, VALIDATE_EPS).is_ok();
            let tris: Vec<[usize; 3]> = t.triangles.iter().map(|tr| tr.0).collect();
            println!("{name}: triangles={tris:?} hull={:?} valid={ok}", t.hull);
        }
        Err(e) => println!("{name}: error: {e}"),
    }
}

fn main() {
    show(
        "unit square",
        &[
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
        ],
    );
    show(
        "triangle",
        &[vector![0.0, 0.0], vector![2.0, 0.0], vector![0.5, 1.5]],
    );
    show(
        "square + center",
        &[
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
            vector![0.5, 0.5],
        ],
    );
    show(
        "collinear",
        &[vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]],
    );
}
