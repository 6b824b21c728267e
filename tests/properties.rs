// Copyright 2025 Lars Brubaker
// Randomized checks over star-shaped polygons with a hole and free points.

mod helpers;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sweep_cdt::{triangulate, Point, Triangulation};

use helpers::{all_edges, constrained_edge_set, key, random_star, ring_edge_set};

struct Case {
    boundary: Vec<Point>,
    hole: Vec<Point>,
    steiner: Vec<Point>,
}

/// Boundary with radius 5..10 around the origin, a small triangular hole
/// near the center and free points in an annulus that stays clear of both.
fn random_case(rng: &mut StdRng) -> Case {
    let n = rng.random_range(5..40);
    let mut boundary = random_star(rng, n, Point::new(0.0, 0.0), 5.0, 10.0);
    if rng.random_bool(0.5) {
        boundary.reverse();
    }
    let hole: Vec<Point> = [0.1f64, 2.2, 4.0]
        .iter()
        .map(|a| Point::new(0.3 * a.cos() + 0.2, 0.3 * a.sin()))
        .collect();
    let count = rng.random_range(0..20);
    let steiner = (0..count)
        .map(|_| Point::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)))
        .filter(|p| (1.0..1.8).contains(&p.x.hypot(p.y)))
        .collect();
    Case { boundary, hole, steiner }
}

fn run(case: &Case) -> Triangulation {
    triangulate(&case.boundary, &[case.hole.clone()], &case.steiner).unwrap()
}

#[test]
fn triangle_count_law() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let case = random_case(&mut rng);
        let out = run(&case);
        // V + 2H - 2 + 2S over ring vertices V, holes H and interior free points S.
        let expected = case.boundary.len() + case.hole.len() + 2 - 2 + 2 * case.steiner.len();
        assert_eq!(out.element_count(), expected);
    }
}

#[test]
fn area_is_preserved() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..200 {
        let case = random_case(&mut rng);
        let out = run(&case);
        let expected = helpers::ring_area(&case.boundary) - helpers::ring_area(&case.hole);
        let got = helpers::total_area(&out);
        assert!((got - expected).abs() < 1e-9 * expected.max(1.0), "area {} vs {}", got, expected);
    }
}

#[test]
fn output_is_constrained_delaunay() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let case = random_case(&mut rng);
        let out = run(&case);
        helpers::verify_valid_output(&out);
        assert!(out.is_constrained_delaunay());
        assert_eq!(
            constrained_edge_set(&out),
            ring_edge_set(&[&case.boundary, &case.hole])
        );
    }
}

#[test]
fn ring_rotation_keeps_edge_set() {
    let mut rng = StdRng::seed_from_u64(14);
    for _ in 0..50 {
        let case = random_case(&mut rng);
        let out = run(&case);
        let n = case.boundary.len() as u32;

        let shift = rng.random_range(1..n);
        let mut rotated = case.boundary.clone();
        rotated.rotate_left(shift as usize);
        let other = triangulate(&rotated, &[case.hole.clone()], &case.steiner).unwrap();
        assert_eq!(other.element_count(), out.element_count());

        // Rotated boundary id i is original id i + shift; the rest keep theirs.
        let back = |v: u32| if v < n { (v + shift) % n } else { v };
        let remap = |set: HashSet<(u32, u32)>| -> HashSet<(u32, u32)> {
            set.into_iter().map(|(a, b)| key(back(a), back(b))).collect()
        };
        assert_eq!(remap(constrained_edge_set(&other)), constrained_edge_set(&out));
        assert_eq!(remap(all_edges(&other)), all_edges(&out));
    }
}

#[test]
fn ring_edges_border_one_interior_triangle() {
    let mut rng = StdRng::seed_from_u64(16);
    for _ in 0..100 {
        let case = random_case(&mut rng);
        let out = run(&case);
        for (a, b) in ring_edge_set(&[&case.boundary, &case.hole]) {
            let sides: Vec<_> = out
                .map()
                .iter()
                .filter(|t| t.vertices.contains(&a) && t.vertices.contains(&b))
                .collect();
            assert!((1..=2).contains(&sides.len()), "edge ({}, {}) in {} triangles", a, b, sides.len());
            assert_eq!(sides.iter().filter(|t| t.interior).count(), 1);
            for t in &sides {
                let i = (0..3).find(|&i| t.vertices[i] != a && t.vertices[i] != b).unwrap();
                assert!(t.constrained[i], "edge ({}, {}) not flagged on {:?}", a, b, t.vertices);
            }
        }
    }
}

#[test]
fn free_points_outside_are_ignored() {
    let mut rng = StdRng::seed_from_u64(15);
    for _ in 0..50 {
        let case = random_case(&mut rng);
        let base = run(&case).element_count();
        let mut steiner = case.steiner.clone();
        for _ in 0..rng.random_range(1..6) {
            let a = rng.random_range(0.0..std::f64::consts::TAU);
            let r = rng.random_range(11.0..20.0);
            steiner.push(Point::new(r * a.cos(), r * a.sin()));
        }
        let out = triangulate(&case.boundary, &[case.hole.clone()], &steiner).unwrap();
        assert_eq!(out.element_count(), base);
    }
}
