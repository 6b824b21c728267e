// Copyright 2025 Lars Brubaker
// Local Delaunay checks over the triangle arena.

use super::{Mesh, TriIdx, INVALID};
use crate::geom::{in_circle, Point};

impl Mesh {
    /// Is the edge of `t` opposite slot `i` locally Delaunay?
    ///
    /// Hull edges and constrained edges always pass.
    pub fn edge_is_locally_delaunay(&self, t: TriIdx, i: usize, points: &[Point]) -> bool {
        let tri = self.tri(t);
        if tri.constrained_edge[i] {
            return true;
        }
        let ot = tri.neighbors[i];
        if ot == INVALID {
            return true;
        }
        let p = tri.points[i];
        let op = self.tri(ot).opposite_point(tri, p);
        !in_circle(
            points[p as usize],
            points[tri.point_ccw(p) as usize],
            points[tri.point_cw(p) as usize],
            points[op as usize],
        )
    }

    /// Collect every (triangle, slot) whose edge fails the in-circle test.
    /// When `interior_only` is set, edges with a non-interior cell on either
    /// side are skipped.
    pub fn illegal_edges(&self, points: &[Point], interior_only: bool) -> Vec<(TriIdx, usize)> {
        let mut result = Vec::new();
        for t in 0..self.triangles.len() as TriIdx {
            let tri = self.tri(t);
            if interior_only && !tri.interior {
                continue;
            }
            for i in 0..3 {
                let ot = tri.neighbors[i];
                if interior_only && ot != INVALID && !self.tri(ot).interior {
                    continue;
                }
                if !self.edge_is_locally_delaunay(t, i, points) {
                    result.push((t, i));
                }
            }
        }
        result
    }
}
