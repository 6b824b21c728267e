// Copyright 2025 Lars Brubaker
// Shared test utilities for sweep-cdt tests.

#![allow(dead_code)]

use std::collections::HashSet;

use rand::Rng;
use sweep_cdt::{Point, Triangulation};

pub fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

pub fn square(size: f64) -> Vec<Point> {
    pts(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)])
}

/// Signed area of a triangle given 3 vertices.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
}

/// Absolute area enclosed by a ring (shoelace).
pub fn ring_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    (area * 0.5).abs()
}

/// Sum of triangle areas computed from the flat output buffers.
pub fn total_area(out: &Triangulation) -> f64 {
    let verts = out.vertices();
    let v = |i: u32| Point::new(verts[i as usize * 2], verts[i as usize * 2 + 1]);
    out.elements()
        .chunks(3)
        .map(|t| triangle_area(v(t[0]), v(t[1]), v(t[2])))
        .sum()
}

/// Check the invariants every successful triangulation must satisfy: ids in
/// range, counter-clockwise non-degenerate triangles and mutual neighbor
/// links.
pub fn verify_valid_output(out: &Triangulation) {
    let n = out.vertex_count() as u32;
    assert_eq!(out.elements().len(), out.element_count() * 3);
    for (i, t) in out.triangles().enumerate() {
        for &v in &t.vertices {
            assert!(v < n, "triangle {} uses vertex {} out of range (count {})", i, v, n);
        }
        let [a, b, c] = out.triangle_points(t);
        let area = triangle_area(a, b, c);
        assert!(area > 0.0, "triangle {} is not counter-clockwise (area={})", i, area);
    }
    for (id, t) in out.map().iter().enumerate() {
        for n in t.neighbors.iter().flatten() {
            assert!(
                out.map()[*n].neighbors.contains(&Some(id)),
                "triangle {} links to {} but not back",
                id,
                n
            );
        }
    }
}

/// Undirected edge as a sorted id pair.
pub fn key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Edges of the closed rings, numbered the way the triangulator numbers
/// vertices: boundary first, then each hole.
pub fn ring_edge_set(rings: &[&[Point]]) -> HashSet<(u32, u32)> {
    let mut set = HashSet::new();
    let mut offset = 0u32;
    for ring in rings {
        let n = ring.len() as u32;
        for i in 0..n {
            set.insert(key(offset + i, offset + (i + 1) % n));
        }
        offset += n;
    }
    set
}

/// Edges flagged as constrained on the interior triangles.
pub fn constrained_edge_set(out: &Triangulation) -> HashSet<(u32, u32)> {
    let mut set = HashSet::new();
    for t in out.triangles() {
        for i in 0..3 {
            if t.constrained[i] {
                set.insert(key(t.vertices[(i + 1) % 3], t.vertices[(i + 2) % 3]));
            }
        }
    }
    set
}

/// Every edge of every interior triangle.
pub fn all_edges(out: &Triangulation) -> HashSet<(u32, u32)> {
    let mut set = HashSet::new();
    for t in out.triangles() {
        for i in 0..3 {
            set.insert(key(t.vertices[i], t.vertices[(i + 1) % 3]));
        }
    }
    set
}

/// A simple star-shaped polygon around `center`: one vertex per angular
/// sector, each at its own radius.
pub fn random_star<R: Rng>(rng: &mut R, n: usize, center: Point, rmin: f64, rmax: f64) -> Vec<Point> {
    (0..n)
        .map(|k| {
            let a = std::f64::consts::TAU * (k as f64 + rng.random_range(0.05..0.95)) / n as f64;
            let r = rng.random_range(rmin..rmax);
            Point::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
        .collect()
}
