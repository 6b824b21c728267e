// Copyright 2025 Lars Brubaker
// License: MIT
//
// The sweep: point events, edge events and the fill/flip machinery that keeps
// the advancing front triangulated and the mesh constrained Delaunay.
//
// Points are visited in (y, x) order. Each point event hangs a new triangle
// off the front and fills small holes around it; each edge event then forces
// the constraint ending at that point into the mesh by filling the front
// below it and flipping every edge it crosses. Finalization floods the
// region enclosed by the constraints.
//
// All steps run as methods on SweepContext. A broken mesh invariant panics;
// constraints that cannot be recovered by flipping come back as
// CdtError::IntersectingConstraints.

use tracing::{debug, trace, warn};

use crate::advancing_front::NodeIdx;
use crate::context::SweepContext;
use crate::edge::{Edge, EdgeIdx};
use crate::error::CdtError;
use crate::geom::{
    angle_exceeds_plus_90_degrees_or_is_negative, angle_is_negative, in_circle, in_scan_area, is_angle_obtuse,
    orient2d, sweep_cmp, Orientation, Real, EPSILON, PI_3_DIV_4,
};
use crate::mesh::{PointIdx, TriIdx, INVALID};
use crate::triangle::Triangle;

impl SweepContext {
    /// Run the whole sweep over the points and constraints added so far.
    pub fn triangulate(&mut self) -> Result<(), CdtError> {
        debug!(
            points = self.input_count(),
            constraints = self.edges.len(),
            "starting sweep"
        );
        self.init_triangulation();
        self.create_advancing_front();
        self.sweep_points()?;
        self.finalization_polygon();
        self.restore_delaunay();
        debug!(
            triangles = self.mesh.len(),
            interior = self.interior.len(),
            "sweep finished"
        );
        Ok(())
    }

    fn sweep_points(&mut self) -> Result<(), CdtError> {
        for i in 1..self.sorted.len() {
            let point = self.sorted[i];
            let node = self.point_event(point);
            for k in 0..self.edge_lists[point as usize].len() {
                let e = self.edge_lists[point as usize][k];
                self.edge_event(e, node)?;
            }
        }
        Ok(())
    }

    /// Flood the interior from a triangle known to lie inside the boundary.
    ///
    /// The lowest swept point can be a free point outside the ring, or one
    /// sitting on a boundary edge, so the seed is taken at the lowest
    /// boundary point instead, where the interior side is decided by the
    /// ring itself.
    fn finalization_polygon(&mut self) {
        let t = self.seed_from_lowest_boundary_point();
        if t != INVALID {
            self.mesh_clean(t);
        } else {
            warn!("no interior triangle found next to the boundary; result is empty");
        }
    }

    /// Find the interior triangle resting on the lowest boundary point. That
    /// point is a strictly convex corner of the ring. The seed is the
    /// triangle whose counter-clockwise side from it runs along a boundary
    /// edge, with the other boundary neighbor turning counter-clockwise
    /// from that side.
    fn seed_from_lowest_boundary_point(&self) -> TriIdx {
        let len = self.boundary_len();
        if len < 3 {
            return INVALID;
        }
        let lowest = (0..len as PointIdx)
            .min_by(|&a, &b| sweep_cmp(&self.points[a as usize], &self.points[b as usize]))
            .unwrap_or(0);
        let i = lowest as usize;
        let a = ((i + len - 1) % len) as PointIdx;
        let b = ((i + 1) % len) as PointIdx;
        let p = self.point(lowest);

        for (t, tri) in self.mesh.triangles.iter().enumerate() {
            if !tri.contains(lowest) || !tri.constrained_edge_ccw(lowest) {
                continue;
            }
            let c = self.point(tri.point_ccw(lowest));
            if orient2d(p, c, self.point(a)) == Orientation::Ccw || orient2d(p, c, self.point(b)) == Orientation::Ccw {
                return t as TriIdx;
            }
        }
        INVALID
    }

    /// Flip interior edges that the sweep left failing the in-circle test.
    ///
    /// Flips made while recovering a constraint are not legalized during the
    /// sweep, so a few such edges can survive it. Constrained edges bound the
    /// interior region, so flipping between two interior cells keeps both
    /// interior.
    fn restore_delaunay(&mut self) {
        let limit = 16 * self.mesh.len() + 64;
        let mut flips = 0usize;
        let mut stack: Vec<TriIdx> = self.interior.clone();

        while let Some(t) = stack.pop() {
            for i in 0..3 {
                let tri = *self.mesh.tri(t);
                let ot = tri.neighbors[i];
                if tri.constrained_edge[i] || ot == INVALID || !self.mesh.tri(ot).interior {
                    continue;
                }
                let p = tri.points[i];
                let other = *self.mesh.tri(ot);
                let op = other.opposite_point(&tri, p);
                if other.constrained_edge[other.index(op)] {
                    continue;
                }
                if self.mesh.edge_is_locally_delaunay(t, i, &self.points) {
                    continue;
                }
                if flips >= limit {
                    warn!(flips, "giving up on Delaunay restoration");
                    return;
                }
                flips += 1;
                self.mesh.rotate_triangle_pair(t, p, ot, op);
                stack.push(t);
                stack.push(ot);
                break;
            }
        }

        if flips > 0 {
            debug!(flips, "restored Delaunay edges after the sweep");
        }
    }

    // ---- point events ----

    fn point_event(&mut self, point: PointIdx) -> NodeIdx {
        let node = match self.locate_node(point) {
            Some(n) if self.front.next(n) != INVALID => n,
            _ => panic!("point_event: invalid call, no front node below point {}", point),
        };
        trace!(point, "point event");

        let new_node = self.new_front_triangle(point, node);

        // Only happens at the same x as the located node; the new point
        // would otherwise leave a zero-width sliver behind.
        if self.point(point).x <= self.node_point(node).x + EPSILON {
            self.fill(node);
        }

        self.fill_advancing_front(new_node);
        new_node
    }

    fn new_front_triangle(&mut self, point: PointIdx, node: NodeIdx) -> NodeIdx {
        let next = self.front.next(node);
        let t = self
            .mesh
            .add(Triangle::new(point, self.front.point(node), self.front.point(next)));
        let below = self.front.triangle(node);
        if below != INVALID {
            self.mesh.mark_neighbor(t, below);
        }

        let x = self.point(point).x;
        let new_node = self.front.insert_after(node, point, x);

        if !self.legalize(t) {
            self.map_triangle_to_nodes(t);
        }
        new_node
    }

    /// Close the front at `node` with a triangle over its two neighbors and
    /// drop `node` from the front.
    fn fill(&mut self, node: NodeIdx) {
        let prev = self.front.prev(node);
        let next = self.front.next(node);
        let t = self.mesh.add(Triangle::new(
            self.front.point(prev),
            self.front.point(node),
            self.front.point(next),
        ));

        let prev_tri = self.front.triangle(prev);
        if prev_tri != INVALID {
            self.mesh.mark_neighbor(t, prev_tri);
        }
        let node_tri = self.front.triangle(node);
        if node_tri != INVALID {
            self.mesh.mark_neighbor(t, node_tri);
        }

        self.front.remove(node);

        if !self.legalize(t) {
            self.map_triangle_to_nodes(t);
        }
    }

    fn fill_advancing_front(&mut self, n: NodeIdx) {
        // Fill right holes.
        let mut node = self.front.next(n);
        while node != INVALID && self.front.next(node) != INVALID {
            if self.large_hole_dont_fill(node) {
                break;
            }
            self.fill(node);
            node = self.front.next(node);
        }

        // Fill left holes.
        let mut node = self.front.prev(n);
        while node != INVALID && self.front.prev(node) != INVALID {
            if self.large_hole_dont_fill(node) {
                break;
            }
            self.fill(node);
            node = self.front.prev(node);
        }

        // Fill right basins.
        let next = self.front.next(n);
        if next != INVALID && self.front.next(next) != INVALID && self.basin_angle(n) < PI_3_DIV_4 {
            self.fill_basin(n);
        }
    }

    /// A hole wider than 90 degrees is left open unless one of the nodes
    /// beyond its neighbors closes the angle again.
    fn large_hole_dont_fill(&self, node: NodeIdx) -> bool {
        let next = self.front.next(node);
        let prev = self.front.prev(node);
        let p = self.node_point(node);

        if !is_angle_obtuse(p, self.node_point(next), self.node_point(prev)) {
            return false;
        }
        if angle_is_negative(p, self.node_point(next), self.node_point(prev)) {
            return true;
        }

        let next2 = self.front.next(next);
        if next2 != INVALID
            && !angle_exceeds_plus_90_degrees_or_is_negative(p, self.node_point(next2), self.node_point(prev))
        {
            return false;
        }

        let prev2 = self.front.prev(prev);
        if prev2 != INVALID
            && !angle_exceeds_plus_90_degrees_or_is_negative(p, self.node_point(next), self.node_point(prev2))
        {
            return false;
        }

        true
    }

    fn basin_angle(&self, node: NodeIdx) -> Real {
        let p = self.node_point(node);
        let nn = self.node_point(self.front.next(self.front.next(node)));
        (p.y - nn.y).atan2(p.x - nn.x)
    }

    // ---- basins ----

    fn fill_basin(&mut self, node: NodeIdx) {
        let next = self.front.next(node);
        let next2 = self.front.next(next);
        let left = if orient2d(self.node_point(node), self.node_point(next), self.node_point(next2)) == Orientation::Ccw {
            next2
        } else {
            next
        };

        let mut bottom = left;
        loop {
            let n = self.front.next(bottom);
            if n == INVALID || self.node_point(bottom).y < self.node_point(n).y {
                break;
            }
            bottom = n;
        }
        if bottom == left {
            return;
        }

        let mut right = bottom;
        loop {
            let n = self.front.next(right);
            if n == INVALID || self.node_point(right).y >= self.node_point(n).y {
                break;
            }
            right = n;
        }
        if right == bottom {
            return;
        }

        let (lp, rp) = (self.node_point(left), self.node_point(right));
        self.basin.left_node = left;
        self.basin.bottom_node = bottom;
        self.basin.right_node = right;
        self.basin.width = rp.x - lp.x;
        self.basin.left_highest = lp.y > rp.y;

        self.fill_basin_from(bottom);
    }

    /// Fill the basin bottom-up, always continuing at the lower neighbor,
    /// until the remaining notch is shallow.
    fn fill_basin_from(&mut self, mut node: NodeIdx) {
        loop {
            if self.is_shallow(node) {
                return;
            }

            self.fill(node);

            let prev = self.front.prev(node);
            let next = self.front.next(node);
            if prev == self.basin.left_node && next == self.basin.right_node {
                return;
            } else if prev == self.basin.left_node {
                let next2 = self.front.next(next);
                if orient2d(self.node_point(node), self.node_point(next), self.node_point(next2)) == Orientation::Cw {
                    return;
                }
                node = next;
            } else if next == self.basin.right_node {
                let prev2 = self.front.prev(prev);
                if orient2d(self.node_point(node), self.node_point(prev), self.node_point(prev2)) == Orientation::Ccw {
                    return;
                }
                node = prev;
            } else if self.node_point(prev).y < self.node_point(next).y {
                node = prev;
            } else {
                node = next;
            }
        }
    }

    fn is_shallow(&self, node: NodeIdx) -> bool {
        let top = if self.basin.left_highest {
            self.node_point(self.basin.left_node).y
        } else {
            self.node_point(self.basin.right_node).y
        };
        self.basin.width > top - self.node_point(node).y
    }

    // ---- legalization ----

    /// Flip every edge of `t` that fails the in-circle test, recursively.
    /// Returns true if at least one flip happened; the flipped cells have
    /// then already been mapped onto the front.
    fn legalize(&mut self, t: TriIdx) -> bool {
        for i in 0..3 {
            let tri = *self.mesh.tri(t);
            if tri.delaunay_edge[i] {
                continue;
            }
            let ot = tri.neighbors[i];
            if ot == INVALID {
                continue;
            }

            let p = tri.points[i];
            let other = *self.mesh.tri(ot);
            let op = other.opposite_point(&tri, p);
            let oi = other.index(op);

            // A constrained edge stays; a Delaunay edge was checked already
            // higher up this legalization.
            if other.constrained_edge[oi] || other.delaunay_edge[oi] {
                self.mesh.tri_mut(t).constrained_edge[i] = other.constrained_edge[oi];
                continue;
            }

            let inside = in_circle(
                self.point(p),
                self.point(tri.point_ccw(p)),
                self.point(tri.point_cw(p)),
                self.point(op),
            );
            if inside {
                self.mesh.tri_mut(t).delaunay_edge[i] = true;
                self.mesh.tri_mut(ot).delaunay_edge[oi] = true;

                self.mesh.rotate_triangle_pair(t, p, ot, op);

                if !self.legalize(t) {
                    self.map_triangle_to_nodes(t);
                }
                if !self.legalize(ot) {
                    self.map_triangle_to_nodes(ot);
                }

                // The slots now hold different edges; reset them so the next
                // legalization starts clean.
                self.mesh.tri_mut(t).delaunay_edge[i] = false;
                self.mesh.tri_mut(ot).delaunay_edge[oi] = false;
                return true;
            }
        }
        false
    }

    // ---- edge events ----

    fn edge_event(&mut self, e: EdgeIdx, node: NodeIdx) -> Result<(), CdtError> {
        let edge = self.edges[e as usize];
        trace!(p = edge.p, q = edge.q, "edge event");

        self.edge_event.constrained_edge = edge;
        self.edge_event.source = edge;
        self.edge_event.right = self.point(edge.p).x > self.point(edge.q).x;
        self.edge_event.flip_steps = 0;

        if self.is_edge_side_of_triangle(self.front.triangle(node), edge.p, edge.q) {
            return Ok(());
        }

        self.fill_edge_event(edge, node);
        let t = self.front.triangle(node);
        self.edge_event_by_points(edge.p, edge.q, t, edge.q)
    }

    fn is_edge_side_of_triangle(&mut self, t: TriIdx, ep: PointIdx, eq: PointIdx) -> bool {
        if t == INVALID {
            return false;
        }
        match self.mesh.tri(t).edge_index(ep, eq) {
            Some(i) => {
                self.mesh.tri_mut(t).mark_constrained_edge_index(i);
                let n = self.mesh.tri(t).neighbors[i];
                if n != INVALID {
                    self.mesh.tri_mut(n).mark_constrained_edge(ep, eq);
                }
                true
            }
            None => false,
        }
    }

    fn edge_event_by_points(
        &mut self,
        ep: PointIdx,
        eq: PointIdx,
        t: TriIdx,
        point: PointIdx,
    ) -> Result<(), CdtError> {
        if t == INVALID {
            return Err(self.intersecting(ep, eq));
        }
        if self.is_edge_side_of_triangle(t, ep, eq) {
            return Ok(());
        }

        let tri = *self.mesh.tri(t);

        let p1 = tri.point_ccw(point);
        let o1 = orient2d(self.point(eq), self.point(p1), self.point(ep));
        if o1 == Orientation::Collinear {
            return self.split_at_collinear(ep, eq, t, point, p1);
        }

        let p2 = tri.point_cw(point);
        let o2 = orient2d(self.point(eq), self.point(p2), self.point(ep));
        if o2 == Orientation::Collinear {
            return self.split_at_collinear(ep, eq, t, point, p2);
        }

        if o1 == o2 {
            // The constraint passes on one side of both neighbors; rotate
            // around `point` towards it.
            let next = if o1 == Orientation::Cw {
                tri.neighbor_ccw(point)
            } else {
                tri.neighbor_cw(point)
            };
            self.edge_event_by_points(ep, eq, next, point)
        } else {
            self.flip_edge_event(ep, eq, t, point)
        }
    }

    /// A vertex `pc` of `t` lies on the constraint ep-eq: constrain eq-pc and
    /// continue with the remainder ep-pc.
    fn split_at_collinear(
        &mut self,
        ep: PointIdx,
        eq: PointIdx,
        t: TriIdx,
        point: PointIdx,
        pc: PointIdx,
    ) -> Result<(), CdtError> {
        let tri = *self.mesh.tri(t);
        if !tri.contains_edge(eq, pc) {
            return Err(self.intersecting(ep, eq));
        }
        trace!(ep, eq, split = pc, "constraint passes through a vertex");
        // Both cells along eq-pc take the flag.
        self.is_edge_side_of_triangle(t, eq, pc);
        self.edge_event.constrained_edge.q = pc;
        let across = tri.neighbor_across(point);
        self.edge_event_by_points(ep, pc, across, pc)
    }

    /// Report the input constraint being enforced. The scan recursion works
    /// on sub-edges that may end at a bound point, so `ep` and `eq` only go
    /// to the log.
    fn intersecting(&self, ep: PointIdx, eq: PointIdx) -> CdtError {
        let source = self.edge_event.source;
        trace!(ep, eq, p = source.p, q = source.q, "constraint cannot be recovered");
        let (a, b) = (self.point(source.p), self.point(source.q));
        CdtError::IntersectingConstraints { px: a.x, py: a.y, qx: b.x, qy: b.y }
    }

    fn fill_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        if self.edge_event.right {
            self.fill_right_above_edge_event(edge, node);
        } else {
            self.fill_left_above_edge_event(edge, node);
        }
    }

    fn fill_right_above_edge_event(&mut self, edge: Edge, mut node: NodeIdx) {
        let (p, q) = (self.point(edge.p), self.point(edge.q));
        while self.node_point(self.front.next(node)).x < p.x {
            // Is the next node below the edge?
            if orient2d(q, self.node_point(self.front.next(node)), p) == Orientation::Ccw {
                self.fill_right_below_edge_event(edge, node);
            } else {
                node = self.front.next(node);
            }
        }
    }

    fn fill_right_below_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        if self.node_point(node).x < self.point(edge.p).x {
            let next = self.front.next(node);
            let next2 = self.front.next(next);
            if orient2d(self.node_point(node), self.node_point(next), self.node_point(next2)) == Orientation::Ccw {
                self.fill_right_concave_edge_event(edge, node);
            } else {
                self.fill_right_convex_edge_event(edge, node);
                self.fill_right_below_edge_event(edge, node);
            }
        }
    }

    fn fill_right_concave_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        self.fill(self.front.next(node));
        let next = self.front.next(node);
        if self.front.point(next) != edge.p {
            let (p, q) = (self.point(edge.p), self.point(edge.q));
            if orient2d(q, self.node_point(next), p) == Orientation::Ccw {
                let next2 = self.front.next(next);
                if orient2d(self.node_point(node), self.node_point(next), self.node_point(next2)) == Orientation::Ccw {
                    self.fill_right_concave_edge_event(edge, node);
                }
            }
        }
    }

    fn fill_right_convex_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        let next = self.front.next(node);
        let next2 = self.front.next(next);
        let next3 = self.front.next(next2);
        if orient2d(self.node_point(next), self.node_point(next2), self.node_point(next3)) == Orientation::Ccw {
            self.fill_right_concave_edge_event(edge, next);
        } else if orient2d(self.point(edge.q), self.node_point(next2), self.point(edge.p)) == Orientation::Ccw {
            self.fill_right_convex_edge_event(edge, next);
        }
    }

    fn fill_left_above_edge_event(&mut self, edge: Edge, mut node: NodeIdx) {
        let (p, q) = (self.point(edge.p), self.point(edge.q));
        while self.node_point(self.front.prev(node)).x > p.x {
            // Is the previous node below the edge?
            if orient2d(q, self.node_point(self.front.prev(node)), p) == Orientation::Cw {
                self.fill_left_below_edge_event(edge, node);
            } else {
                node = self.front.prev(node);
            }
        }
    }

    fn fill_left_below_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        if self.node_point(node).x > self.point(edge.p).x {
            let prev = self.front.prev(node);
            let prev2 = self.front.prev(prev);
            if orient2d(self.node_point(node), self.node_point(prev), self.node_point(prev2)) == Orientation::Cw {
                self.fill_left_concave_edge_event(edge, node);
            } else {
                self.fill_left_convex_edge_event(edge, node);
                self.fill_left_below_edge_event(edge, node);
            }
        }
    }

    fn fill_left_concave_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        self.fill(self.front.prev(node));
        let prev = self.front.prev(node);
        if self.front.point(prev) != edge.p {
            let (p, q) = (self.point(edge.p), self.point(edge.q));
            if orient2d(q, self.node_point(prev), p) == Orientation::Cw {
                let prev2 = self.front.prev(prev);
                if orient2d(self.node_point(node), self.node_point(prev), self.node_point(prev2)) == Orientation::Cw {
                    self.fill_left_concave_edge_event(edge, node);
                }
            }
        }
    }

    fn fill_left_convex_edge_event(&mut self, edge: Edge, node: NodeIdx) {
        let prev = self.front.prev(node);
        let prev2 = self.front.prev(prev);
        let prev3 = self.front.prev(prev2);
        if orient2d(self.node_point(prev), self.node_point(prev2), self.node_point(prev3)) == Orientation::Cw {
            self.fill_left_concave_edge_event(edge, prev);
        } else if orient2d(self.point(edge.q), self.node_point(prev2), self.point(edge.p)) == Orientation::Cw {
            self.fill_left_convex_edge_event(edge, prev);
        }
    }

    // ---- flips ----

    /// Crossing constraints can send the flip walk around in circles; a
    /// single constraint never needs more steps than a few per triangle.
    fn count_flip_step(&mut self, ep: PointIdx, eq: PointIdx) -> Result<(), CdtError> {
        self.edge_event.flip_steps += 1;
        if self.edge_event.flip_steps > 4 * self.mesh.len() + 64 {
            warn!(ep, eq, steps = self.edge_event.flip_steps, "flip walk does not terminate");
            return Err(self.intersecting(ep, eq));
        }
        Ok(())
    }

    fn flip_edge_event(&mut self, ep: PointIdx, eq: PointIdx, t: TriIdx, p: PointIdx) -> Result<(), CdtError> {
        self.count_flip_step(ep, eq)?;
        let ot = self.mesh.tri(t).neighbor_across(p);
        if ot == INVALID {
            return Err(self.intersecting(ep, eq));
        }
        let tri = *self.mesh.tri(t);
        let op = self.mesh.tri(ot).opposite_point(&tri, p);

        if in_scan_area(
            self.point(p),
            self.point(tri.point_ccw(p)),
            self.point(tri.point_cw(p)),
            self.point(op),
        ) {
            self.mesh.rotate_triangle_pair(t, p, ot, op);
            self.map_triangle_to_nodes(t);
            self.map_triangle_to_nodes(ot);

            if p == eq && op == ep {
                let c = self.edge_event.constrained_edge;
                if eq == c.q && ep == c.p {
                    self.mesh.tri_mut(t).mark_constrained_edge(ep, eq);
                    self.mesh.tri_mut(ot).mark_constrained_edge(ep, eq);
                    self.legalize(t);
                    self.legalize(ot);
                }
                Ok(())
            } else {
                let o = orient2d(self.point(eq), self.point(op), self.point(ep));
                let t = self.next_flip_triangle(o, t, ot, p, op);
                self.flip_edge_event(ep, eq, t, p)
            }
        } else {
            let new_p = self.next_flip_point(ep, eq, ot, op)?;
            self.flip_scan_edge_event(ep, eq, t, ot, new_p)?;
            self.edge_event_by_points(ep, eq, t, p)
        }
    }

    /// After a flip, legalize the cell that no longer touches the constraint
    /// and return the one that still does.
    fn next_flip_triangle(&mut self, o: Orientation, t: TriIdx, ot: TriIdx, p: PointIdx, op: PointIdx) -> TriIdx {
        let (done, keep) = if o == Orientation::Ccw { (ot, t) } else { (t, ot) };
        if let Some(i) = self.mesh.tri(done).edge_index(p, op) {
            self.mesh.tri_mut(done).delaunay_edge[i] = true;
        }
        self.legalize(done);
        self.mesh.tri_mut(done).clear_delaunay_edges();
        keep
    }

    /// Pick the vertex of `ot` on the far side of the constraint from `op`.
    fn next_flip_point(&self, ep: PointIdx, eq: PointIdx, ot: TriIdx, op: PointIdx) -> Result<PointIdx, CdtError> {
        match orient2d(self.point(eq), self.point(op), self.point(ep)) {
            Orientation::Cw => Ok(self.mesh.tri(ot).point_ccw(op)),
            Orientation::Ccw => Ok(self.mesh.tri(ot).point_cw(op)),
            // The opposing point sits on the constraint.
            Orientation::Collinear => Err(self.intersecting(ep, eq)),
        }
    }

    /// Walk across the triangles cut by the constraint until one can be
    /// flipped against `flip_triangle`.
    fn flip_scan_edge_event(
        &mut self,
        ep: PointIdx,
        eq: PointIdx,
        flip_triangle: TriIdx,
        t: TriIdx,
        p: PointIdx,
    ) -> Result<(), CdtError> {
        self.count_flip_step(ep, eq)?;
        let ot = self.mesh.tri(t).neighbor_across(p);
        if ot == INVALID {
            return Err(self.intersecting(ep, eq));
        }
        let tri = *self.mesh.tri(t);
        let op = self.mesh.tri(ot).opposite_point(&tri, p);

        let flip = *self.mesh.tri(flip_triangle);
        if in_scan_area(
            self.point(eq),
            self.point(flip.point_ccw(eq)),
            self.point(flip.point_cw(eq)),
            self.point(op),
        ) {
            // Flip with the new edge op -> eq.
            self.flip_edge_event(eq, op, ot, op)
        } else {
            let new_p = self.next_flip_point(ep, eq, ot, op)?;
            self.flip_scan_edge_event(ep, eq, flip_triangle, ot, new_p)
        }
    }
}
