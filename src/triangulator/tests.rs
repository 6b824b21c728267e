// Copyright 2025 Lars Brubaker
// Unit tests for the triangulator front end.

use super::*;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

fn square() -> Vec<Point> {
    pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
}

#[test]
fn single_triangle() {
    let tri = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let out = Triangulator::new(tri).triangulate().unwrap();
    assert_eq!(out.element_count(), 1);
    assert_eq!(out.vertex_count(), 3);
    let mut ids = out.elements().to_vec();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!((out.area() - 0.5).abs() < 1e-12);
    let t = out.triangles().next().unwrap();
    assert_eq!(t.constrained, [true; 3]);
}

#[test]
fn l_shape() {
    let l = pts(&[(0.0, 0.0), (6.0, 0.0), (6.0, 2.0), (2.0, 2.0), (2.0, 6.0), (0.0, 6.0)]);
    let out = Triangulator::new(l).triangulate().unwrap();
    assert_eq!(out.element_count(), 4);
    assert!((out.area() - 20.0).abs() < 1e-9);
    assert!(out.is_constrained_delaunay());
}

#[test]
fn boundary_orientation_does_not_matter() {
    let mut cw = square();
    cw.reverse();
    let a = Triangulator::new(square()).triangulate().unwrap();
    let b = Triangulator::new(cw).triangulate().unwrap();
    assert_eq!(a.element_count(), b.element_count());
    assert!((a.area() - b.area()).abs() < 1e-9);
    assert!(b.area() > 0.0);
}

#[test]
fn hole_and_free_point_inside_it() {
    let mut t = Triangulator::new(square());
    t.add_hole(pts(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]));
    t.add_steiner_point(Point::new(5.0, 5.0));
    let out = t.triangulate().unwrap();
    assert_eq!(out.element_count(), 8);
    assert!((out.area() - 84.0).abs() < 1e-9);
    // The point inside the hole is part of no output triangle.
    assert!(!out.elements().contains(&8));
    assert_eq!(out.source(8), VertexSource::Steiner(0));
    assert_eq!(out.source(5), VertexSource::Hole { hole: 0, index: 1 });
}

#[test]
fn repeated_triangulate_gives_same_result() {
    let mut t = Triangulator::new(square());
    t.add_steiner_points(vec![Point::new(2.5, 5.0), Point::new(7.5, 5.0)]);
    let a = t.triangulate().unwrap();
    let b = t.triangulate().unwrap();
    assert_eq!(a.elements(), b.elements());
    assert_eq!(a.element_count(), 6);
}

#[test]
fn bound_points_stay_out_of_buffers() {
    let out = Triangulator::new(square()).triangulate().unwrap();
    assert_eq!(out.points().len(), 6);
    assert_eq!(out.vertices().len(), 8);
    assert_eq!(out.source(4), VertexSource::Bound);
    assert_eq!(out.source(5), VertexSource::Bound);
    assert!(out.elements().iter().all(|&v| v < 4));
    // The sweep also built triangles against the bound points.
    assert!(out.map().len() > out.element_count());
    assert!(out.map().iter().any(|t| !t.interior));
}

#[test]
fn interior_neighbors_are_mutual() {
    let mut t = Triangulator::new(square());
    t.add_steiner_point(Point::new(5.0, 5.0));
    let out = t.triangulate().unwrap();
    assert_eq!(out.element_count(), 4);
    for &id in out.interior_ids() {
        let tri = &out.map()[id];
        for n in tri.neighbors.iter().flatten() {
            assert!(out.map()[*n].neighbors.contains(&Some(id)));
        }
        // Exactly one side of each fan triangle is a boundary edge.
        assert_eq!(tri.constrained.iter().filter(|&&c| c).count(), 1);
    }
}

#[test]
fn invalid_padding_falls_back() {
    let mut t = Triangulator::new(square());
    t.set_padding(f64::NAN);
    assert_eq!(t.triangulate().unwrap().element_count(), 2);
    t.set_padding(-1.0);
    assert_eq!(t.triangulate().unwrap().element_count(), 2);
    t.set_padding(2.0);
    let out = t.triangulate().unwrap();
    assert_eq!(out.point(4), Point::new(-20.0, -20.0));
}

#[test]
fn verify_mesh_accepts_good_output() {
    let mut t = Triangulator::new(square());
    t.set_option(TriangulatorOption::VerifyMesh, true);
    t.add_hole(pts(&[(3.0, 3.0), (7.0, 3.0), (5.0, 7.0)]));
    assert!(t.triangulate().is_ok());
}

#[test]
fn validation_errors_come_first() {
    let t = Triangulator::new(pts(&[(0.0, 0.0), (1.0, 0.0)]));
    assert_eq!(
        t.triangulate().unwrap_err(),
        CdtError::TooFewPoints { ring: Ring::Boundary, count: 2 }
    );

    let mut t = Triangulator::new(square());
    t.add_hole(pts(&[(3.0, 3.0), (7.0, 3.0), (5.0, 7.0)]));
    t.add_steiner_point(Point::new(f64::NAN, 1.0));
    match t.triangulate() {
        Err(CdtError::InvalidCoordinate { index, .. }) => assert_eq!(index, 7),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn free_function_matches_builder() {
    let holes = vec![pts(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)])];
    let out = triangulate(&square(), &holes, &[]).unwrap();
    assert_eq!(out.element_count(), 8);
}
