// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangle arena for the sweep.
//
// Triangles are never freed: flips rewrite two cells in place and cells that
// end up outside the polygon simply are not marked interior. All links
// between cells are u32 indices into `triangles`.
//
// Design:
//   - INVALID: u32::MAX  (null link)
//   - neighbors[i] of a triangle is the cell across the edge opposite points[i]
//   - every neighbor link is symmetric: if a.neighbors[i] == b then b has a
//     slot pointing back at a across the same two points

use crate::geom::Point;
use crate::triangle::Triangle;

pub mod delaunay;

pub const INVALID: u32 = u32::MAX;

/// Index into SweepContext::points
pub type PointIdx = u32;
/// Index into Mesh::triangles
pub type TriIdx = u32;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh { triangles: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append a triangle, returning its index.
    pub fn add(&mut self, t: Triangle) -> TriIdx {
        let idx = self.triangles.len() as TriIdx;
        self.triangles.push(t);
        idx
    }

    #[inline]
    pub fn tri(&self, t: TriIdx) -> &Triangle {
        &self.triangles[t as usize]
    }

    #[inline]
    pub fn tri_mut(&mut self, t: TriIdx) -> &mut Triangle {
        &mut self.triangles[t as usize]
    }

    /// Discover the edge shared by `t` and `other` and link both sides.
    /// Does nothing if they share no edge.
    pub fn mark_neighbor(&mut self, t: TriIdx, other: TriIdx) {
        let [a, b, c] = self.triangles[t as usize].points;
        let o = self.triangles[other as usize];
        if o.contains_edge(b, c) {
            self.triangles[t as usize].neighbors[0] = other;
            self.triangles[other as usize].mark_neighbor_edge(b, c, t);
        } else if o.contains_edge(a, c) {
            self.triangles[t as usize].neighbors[1] = other;
            self.triangles[other as usize].mark_neighbor_edge(a, c, t);
        } else if o.contains_edge(a, b) {
            self.triangles[t as usize].neighbors[2] = other;
            self.triangles[other as usize].mark_neighbor_edge(a, b, t);
        }
    }

    /// Flip the edge shared by `t` and `ot`.
    ///
    /// `p` is the vertex of `t` opposite the shared edge and `op` the vertex of
    /// `ot` opposite it. Afterwards the pair shares the edge p-op; the four
    /// outer edges keep their constrained and Delaunay flags and their
    /// neighbors are relinked to whichever of the two cells now owns them.
    ///
    /// ```text
    ///       n2                    n2
    ///  t: p ---- .          t: p ---- .
    ///     | \     \            |     / \
    ///  n1 |  \  ot | n3  =>  n1| ot /t  | n3
    ///     |   \    |           |   /    |
    ///     . ---- op            .  ---- op
    ///       n4                    n4
    /// ```
    pub fn rotate_triangle_pair(&mut self, t: TriIdx, p: PointIdx, ot: TriIdx, op: PointIdx) {
        let tt = self.triangles[t as usize];
        let oo = self.triangles[ot as usize];

        let n1 = tt.neighbor_ccw(p);
        let n2 = tt.neighbor_cw(p);
        let n3 = oo.neighbor_ccw(op);
        let n4 = oo.neighbor_cw(op);

        let ce1 = tt.constrained_edge_ccw(p);
        let ce2 = tt.constrained_edge_cw(p);
        let ce3 = oo.constrained_edge_ccw(op);
        let ce4 = oo.constrained_edge_cw(op);

        let de1 = tt.delaunay_edge_ccw(p);
        let de2 = tt.delaunay_edge_cw(p);
        let de3 = oo.delaunay_edge_ccw(op);
        let de4 = oo.delaunay_edge_cw(op);

        self.tri_mut(t).legalize(p, op);
        self.tri_mut(ot).legalize(op, p);

        {
            let o = self.tri_mut(ot);
            o.set_delaunay_edge_ccw(p, de1);
            o.set_delaunay_edge_cw(op, de4);
            o.set_constrained_edge_ccw(p, ce1);
            o.set_constrained_edge_cw(op, ce4);
            o.clear_neighbors();
        }
        {
            let tm = self.tri_mut(t);
            tm.set_delaunay_edge_cw(p, de2);
            tm.set_delaunay_edge_ccw(op, de3);
            tm.set_constrained_edge_cw(p, ce2);
            tm.set_constrained_edge_ccw(op, ce3);
            tm.clear_neighbors();
        }

        if n1 != INVALID {
            self.mark_neighbor(ot, n1);
        }
        if n2 != INVALID {
            self.mark_neighbor(t, n2);
        }
        if n3 != INVALID {
            self.mark_neighbor(t, n3);
        }
        if n4 != INVALID {
            self.mark_neighbor(ot, n4);
        }
        self.mark_neighbor(t, ot);
    }

    /// Check that every neighbor link is mirrored and crosses a shared edge.
    /// Returns the first offending (triangle, slot), if any.
    pub fn find_broken_link(&self) -> Option<(TriIdx, usize)> {
        for (i, tri) in self.triangles.iter().enumerate() {
            for slot in 0..3 {
                let n = tri.neighbors[slot];
                if n == INVALID {
                    continue;
                }
                let a = tri.points[(slot + 1) % 3];
                let b = tri.points[(slot + 2) % 3];
                let other = &self.triangles[n as usize];
                let back = match other.edge_index(a, b) {
                    Some(k) => other.neighbors[k],
                    None => return Some((i as TriIdx, slot)),
                };
                if back != i as TriIdx {
                    return Some((i as TriIdx, slot));
                }
            }
        }
        None
    }

    /// Twice the signed area of triangle `t`.
    pub fn area2(&self, t: TriIdx, points: &[Point]) -> f64 {
        let [a, b, c] = self.triangles[t as usize].points;
        let (a, b, c) = (points[a as usize], points[b as usize], points[c as usize]);
        (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
    }
}
