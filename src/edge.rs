// Copyright 2025 Lars Brubaker
// Constraint edges built from the input rings.

use crate::error::{CdtError, Ring};
use crate::geom::Point;
use crate::mesh::PointIdx;

/// Index into SweepContext::edges
pub type EdgeIdx = u32;

/// A constraint segment. `q` is always the upper endpoint: q.y > p.y, or
/// q.y == p.y and q.x > p.x. The sweep reaches `p` before `q`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub p: PointIdx,
    pub q: PointIdx,
}

impl Edge {
    /// Orient the segment (p1, p2) so that `q` is the upper point.
    /// Fails when the two points coincide.
    pub fn new(points: &[Point], p1: PointIdx, p2: PointIdx) -> Option<Edge> {
        let a = points[p1 as usize];
        let b = points[p2 as usize];
        if a.y > b.y {
            Some(Edge { p: p2, q: p1 })
        } else if a.y == b.y {
            if a.x > b.x {
                Some(Edge { p: p2, q: p1 })
            } else if a.x == b.x {
                None
            } else {
                Some(Edge { p: p1, q: p2 })
            }
        } else {
            Some(Edge { p: p1, q: p2 })
        }
    }
}

/// Build the closed edge cycle for the ring occupying `points[start..start + len]`.
pub fn ring_edges(points: &[Point], start: usize, len: usize, ring: Ring) -> Result<Vec<Edge>, CdtError> {
    let mut edges = Vec::with_capacity(len);
    for i in 0..len {
        let j = if i + 1 < len { i + 1 } else { 0 };
        let p1 = (start + i) as PointIdx;
        let p2 = (start + j) as PointIdx;
        match Edge::new(points, p1, p2) {
            Some(e) => edges.push(e),
            None => {
                let pt = points[start + j];
                return Err(CdtError::DegenerateInput { ring, index: j, x: pt.x, y: pt.y });
            }
        }
    }
    Ok(edges)
}
