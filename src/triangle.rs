// Copyright 2025 Lars Brubaker
// License: MIT
//
// A single cell of the sweep mesh.
//
// Vertices, neighbors and edge flags are stored in parallel 3-slot arrays.
// Slot i of `neighbors`, `constrained_edge` and `delaunay_edge` refers to the
// edge opposite `points[i]`. All lookups are by point identity (PointIdx), so
// two distinct input points with the same coordinates are different vertices.
//
// Passing a point that is not a vertex of the triangle is a broken invariant
// in the sweep and panics.

use crate::mesh::{PointIdx, TriIdx, INVALID};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub points: [PointIdx; 3],
    pub neighbors: [TriIdx; 3],
    /// Edge must survive flipping (polygon boundary or hole edge).
    pub constrained_edge: [bool; 3],
    /// Edge already passed the in-circle test in the current legalization.
    pub delaunay_edge: [bool; 3],
    /// Set by the final mesh clean for triangles inside the polygon.
    pub interior: bool,
}

impl Triangle {
    pub fn new(a: PointIdx, b: PointIdx, c: PointIdx) -> Self {
        Triangle {
            points: [a, b, c],
            neighbors: [INVALID; 3],
            constrained_edge: [false; 3],
            delaunay_edge: [false; 3],
            interior: false,
        }
    }

    #[inline]
    pub fn contains(&self, p: PointIdx) -> bool {
        p == self.points[0] || p == self.points[1] || p == self.points[2]
    }

    #[inline]
    pub fn contains_edge(&self, p: PointIdx, q: PointIdx) -> bool {
        self.contains(p) && self.contains(q)
    }

    /// Slot of `p` in this triangle.
    pub fn index(&self, p: PointIdx) -> usize {
        if p == self.points[0] {
            0
        } else if p == self.points[1] {
            1
        } else if p == self.points[2] {
            2
        } else {
            panic!("Triangle::index: invalid call, point {} not in {:?}", p, self.points);
        }
    }

    /// Slot of the edge (p1, p2), in either direction.
    pub fn edge_index(&self, p1: PointIdx, p2: PointIdx) -> Option<usize> {
        let [a, b, c] = self.points;
        if a == p1 {
            if b == p2 {
                return Some(2);
            } else if c == p2 {
                return Some(1);
            }
        } else if b == p1 {
            if c == p2 {
                return Some(0);
            } else if a == p2 {
                return Some(2);
            }
        } else if c == p1 {
            if a == p2 {
                return Some(1);
            } else if b == p2 {
                return Some(0);
            }
        }
        None
    }

    /// Record `t` as the neighbor across the edge (p1, p2). One side only.
    pub fn mark_neighbor_edge(&mut self, p1: PointIdx, p2: PointIdx, t: TriIdx) {
        let [a, b, c] = self.points;
        if (p1 == c && p2 == b) || (p1 == b && p2 == c) {
            self.neighbors[0] = t;
        } else if (p1 == a && p2 == c) || (p1 == c && p2 == a) {
            self.neighbors[1] = t;
        } else if (p1 == a && p2 == b) || (p1 == b && p2 == a) {
            self.neighbors[2] = t;
        } else {
            panic!("Triangle::mark_neighbor_edge: invalid call, edge ({}, {}) not in {:?}", p1, p2, self.points);
        }
    }

    pub fn clear_neighbors(&mut self) {
        self.neighbors = [INVALID; 3];
    }

    pub fn clear_delaunay_edges(&mut self) {
        self.delaunay_edge = [false; 3];
    }

    #[inline]
    pub fn mark_constrained_edge_index(&mut self, index: usize) {
        self.constrained_edge[index] = true;
    }

    /// Flag the edge (p, q) as constrained; no-op if it is not an edge here.
    pub fn mark_constrained_edge(&mut self, p: PointIdx, q: PointIdx) {
        if let Some(i) = self.edge_index(p, q) {
            self.constrained_edge[i] = true;
        }
    }

    /// The vertex following `p` in clockwise order.
    pub fn point_cw(&self, p: PointIdx) -> PointIdx {
        self.points[(self.index(p) + 2) % 3]
    }

    /// The vertex following `p` in counter-clockwise order.
    pub fn point_ccw(&self, p: PointIdx) -> PointIdx {
        self.points[(self.index(p) + 1) % 3]
    }

    /// The vertex of `self` across the edge it shares with `t`, where `p` is
    /// the vertex of `t` opposite that edge.
    pub fn opposite_point(&self, t: &Triangle, p: PointIdx) -> PointIdx {
        let cw = t.point_cw(p);
        self.point_cw(cw)
    }

    #[inline]
    pub fn neighbor_across(&self, p: PointIdx) -> TriIdx {
        self.neighbors[self.index(p)]
    }

    /// The triangle reached by turning clockwise around `p`.
    #[inline]
    pub fn neighbor_cw(&self, p: PointIdx) -> TriIdx {
        self.neighbors[(self.index(p) + 1) % 3]
    }

    #[inline]
    pub fn neighbor_ccw(&self, p: PointIdx) -> TriIdx {
        self.neighbors[(self.index(p) + 2) % 3]
    }

    #[inline]
    pub fn constrained_edge_cw(&self, p: PointIdx) -> bool {
        self.constrained_edge[(self.index(p) + 1) % 3]
    }

    #[inline]
    pub fn constrained_edge_ccw(&self, p: PointIdx) -> bool {
        self.constrained_edge[(self.index(p) + 2) % 3]
    }

    pub fn set_constrained_edge_cw(&mut self, p: PointIdx, ce: bool) {
        let i = (self.index(p) + 1) % 3;
        self.constrained_edge[i] = ce;
    }

    pub fn set_constrained_edge_ccw(&mut self, p: PointIdx, ce: bool) {
        let i = (self.index(p) + 2) % 3;
        self.constrained_edge[i] = ce;
    }

    #[inline]
    pub fn delaunay_edge_cw(&self, p: PointIdx) -> bool {
        self.delaunay_edge[(self.index(p) + 1) % 3]
    }

    #[inline]
    pub fn delaunay_edge_ccw(&self, p: PointIdx) -> bool {
        self.delaunay_edge[(self.index(p) + 2) % 3]
    }

    pub fn set_delaunay_edge_cw(&mut self, p: PointIdx, e: bool) {
        let i = (self.index(p) + 1) % 3;
        self.delaunay_edge[i] = e;
    }

    pub fn set_delaunay_edge_ccw(&mut self, p: PointIdx, e: bool) {
        let i = (self.index(p) + 2) % 3;
        self.delaunay_edge[i] = e;
    }

    /// Rotate the vertex array so that `opoint` is replaced by `npoint` and
    /// the remaining vertices shift one slot. Neighbors are not rewired.
    pub fn legalize(&mut self, opoint: PointIdx, npoint: PointIdx) {
        let p = &mut self.points;
        if opoint == p[0] {
            p[1] = p[0];
            p[0] = p[2];
            p[2] = npoint;
        } else if opoint == p[1] {
            p[2] = p[1];
            p[1] = p[0];
            p[0] = npoint;
        } else if opoint == p[2] {
            p[0] = p[2];
            p[2] = p[1];
            p[1] = npoint;
        } else {
            panic!("Triangle::legalize: invalid call, point {} not in {:?}", opoint, p);
        }
    }
}
