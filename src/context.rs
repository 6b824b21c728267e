// Copyright 2025 Lars Brubaker
// License: MIT
//
// State shared by every step of one triangulation: the point set, the
// constraint edges, the triangle arena, the advancing front and the scratch
// state of the basin fill and the edge event in progress.
//
// A context serves exactly one triangulation. Points keep the index they were
// given when added; the two bound points that seed the front are appended
// after all input points by `init_triangulation`.

use crate::advancing_front::{AdvancingFront, NodeIdx};
use crate::edge::{ring_edges, Edge, EdgeIdx};
use crate::error::{CdtError, Ring};
use crate::geom::{sweep_cmp, Point, Real};
use crate::mesh::{Mesh, PointIdx, TriIdx, INVALID};
use crate::triangle::Triangle;

/// Relative padding of the bound points around the input bounding box.
pub const DEFAULT_PADDING: Real = 0.3;

/// A V-shaped notch in the front, filled bottom-up.
#[derive(Clone, Debug)]
pub struct Basin {
    pub left_node: NodeIdx,
    pub bottom_node: NodeIdx,
    pub right_node: NodeIdx,
    pub width: Real,
    pub left_highest: bool,
}

impl Default for Basin {
    fn default() -> Self {
        Basin {
            left_node: INVALID,
            bottom_node: INVALID,
            right_node: INVALID,
            width: 0.0,
            left_highest: false,
        }
    }
}

/// The constraint currently being enforced. `right` is set when the lower
/// point p lies right of the upper point q.
#[derive(Clone, Debug)]
pub struct EdgeEvent {
    /// Shortened to its lower part when the constraint passes through a
    /// vertex.
    pub constrained_edge: Edge,
    /// The input edge as added, for error reports.
    pub source: Edge,
    pub right: bool,
    /// Flip and scan steps taken for this constraint so far.
    pub flip_steps: usize,
}

impl Default for EdgeEvent {
    fn default() -> Self {
        EdgeEvent {
            constrained_edge: Edge { p: INVALID, q: INVALID },
            source: Edge { p: INVALID, q: INVALID },
            right: false,
            flip_steps: 0,
        }
    }
}

pub struct SweepContext {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    /// For each point, the edges whose upper point it is.
    pub edge_lists: Vec<Vec<EdgeIdx>>,
    /// Input points in sweep order (y, then x).
    pub sorted: Vec<PointIdx>,
    pub mesh: Mesh,
    pub front: AdvancingFront,
    pub basin: Basin,
    pub edge_event: EdgeEvent,
    /// Triangles reached by the final mesh clean, in discovery order.
    pub interior: Vec<TriIdx>,
    pub head: PointIdx,
    pub tail: PointIdx,
    padding: Real,
    input_count: usize,
    /// Number of points in the boundary ring, which is always added first.
    boundary_len: usize,
}

impl SweepContext {
    pub fn new(padding: Real) -> Self {
        SweepContext {
            points: Vec::new(),
            edges: Vec::new(),
            edge_lists: Vec::new(),
            sorted: Vec::new(),
            mesh: Mesh::new(),
            front: AdvancingFront::default(),
            basin: Basin::default(),
            edge_event: EdgeEvent::default(),
            interior: Vec::new(),
            head: INVALID,
            tail: INVALID,
            padding,
            input_count: 0,
            boundary_len: 0,
        }
    }

    /// Add a closed ring (boundary or hole) and its constraint edges.
    pub fn add_polyline(&mut self, polyline: &[Point], ring: Ring) -> Result<(), CdtError> {
        let start = self.points.len();
        if ring == Ring::Boundary {
            self.boundary_len = polyline.len();
        }
        self.points.extend_from_slice(polyline);
        self.edge_lists.resize_with(self.points.len(), Vec::new);
        self.input_count = self.points.len();

        let edges = ring_edges(&self.points, start, polyline.len(), ring)?;
        for edge in edges {
            let idx = self.edges.len() as EdgeIdx;
            self.edge_lists[edge.q as usize].push(idx);
            self.edges.push(edge);
        }
        Ok(())
    }

    /// Add a free (Steiner) point with no constraints attached.
    pub fn add_point(&mut self, point: Point) -> PointIdx {
        let idx = self.points.len() as PointIdx;
        self.points.push(point);
        self.edge_lists.push(Vec::new());
        self.input_count = self.points.len();
        idx
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn boundary_len(&self) -> usize {
        self.boundary_len
    }

    #[inline]
    pub fn point(&self, p: PointIdx) -> Point {
        self.points[p as usize]
    }

    #[inline]
    pub fn node_point(&self, n: NodeIdx) -> Point {
        self.points[self.front.point(n) as usize]
    }

    /// Append the two bound points below the input and sort the input into
    /// sweep order.
    pub fn init_triangulation(&mut self) {
        let first = self.points[0];
        let (mut xmin, mut xmax, mut ymin, mut ymax) = (first.x, first.x, first.y, first.y);
        for p in &self.points[..self.input_count] {
            if p.x > xmax {
                xmax = p.x;
            }
            if p.x < xmin {
                xmin = p.x;
            }
            if p.y > ymax {
                ymax = p.y;
            }
            if p.y < ymin {
                ymin = p.y;
            }
        }

        let dx = self.padding * (xmax - xmin);
        let dy = self.padding * (ymax - ymin);
        self.head = self.points.len() as PointIdx;
        self.points.push(Point::new(xmin - dx, ymin - dy));
        self.tail = self.points.len() as PointIdx;
        self.points.push(Point::new(xmax + dx, ymin - dy));
        self.edge_lists.resize_with(self.points.len(), Vec::new);

        let points = &self.points;
        let mut sorted: Vec<PointIdx> = (0..self.input_count as PointIdx).collect();
        sorted.sort_by(|&a, &b| sweep_cmp(&points[a as usize], &points[b as usize]));
        self.sorted = sorted;
    }

    /// Seed the mesh with the triangle (lowest point, head, tail) and build
    /// the three-node front along its top.
    pub fn create_advancing_front(&mut self) {
        let first = self.sorted[0];
        let t = self.mesh.add(Triangle::new(first, self.head, self.tail));
        let tri = *self.mesh.tri(t);
        let value = |p: PointIdx| self.points[p as usize].x;
        self.front = AdvancingFront::new(
            (tri.points[1], value(tri.points[1])),
            (tri.points[0], value(tri.points[0])),
            (tri.points[2], value(tri.points[2])),
            t,
        );
    }

    pub fn locate_node(&mut self, point: PointIdx) -> Option<NodeIdx> {
        let x = self.points[point as usize].x;
        self.front.locate_node(x)
    }

    /// Point every front node lying on a hull edge of `t` at `t`.
    pub fn map_triangle_to_nodes(&mut self, t: TriIdx) {
        let tri = *self.mesh.tri(t);
        for i in 0..3 {
            if tri.neighbors[i] == INVALID {
                let p = tri.point_cw(tri.points[i]);
                let x = self.points[p as usize].x;
                if let Some(n) = self.front.locate_point(p, x) {
                    self.front.set_triangle(n, t);
                }
            }
        }
    }

    /// Flood the region containing `triangle` without crossing constrained
    /// edges, marking every reached cell interior.
    pub fn mesh_clean(&mut self, triangle: TriIdx) {
        let mut stack: Vec<TriIdx> = vec![triangle];
        while let Some(t) = stack.pop() {
            if t == INVALID || self.mesh.tri(t).interior {
                continue;
            }
            let tri = self.mesh.tri_mut(t);
            tri.interior = true;
            let tri = *tri;
            self.interior.push(t);
            for i in 0..3 {
                if !tri.constrained_edge[i] {
                    stack.push(tri.neighbors[i]);
                }
            }
        }
    }
}
