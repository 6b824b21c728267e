// Copyright 2025 Lars Brubaker
// License: MIT
//
// Public interface: collect the boundary, holes and free points, run the
// sweep and package the interior triangles.
//
// The builder only stores input. Every call to `triangulate` validates it and
// runs a fresh SweepContext, so a Triangulator can be triangulated repeatedly
// and always gives the same result.

mod geometry;
mod output;
#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::context::{SweepContext, DEFAULT_PADDING};
use crate::error::{CdtError, Ring};
use crate::geom::{Point, Real};

pub use output::{MeshTriangle, Triangulation, VertexSource};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TriangulatorOption {
    /// After the sweep, check neighbor symmetry (panicking on a broken link)
    /// and log interior edges that are not locally Delaunay.
    VerifyMesh,
}

#[derive(Clone, Debug)]
pub struct Triangulator {
    boundary: Vec<Point>,
    holes: Vec<Vec<Point>>,
    steiner: Vec<Point>,
    padding: Real,
    verify_mesh: bool,
}

impl Triangulator {
    /// Start from the outer boundary, a closed ring in either orientation.
    pub fn new(boundary: Vec<Point>) -> Self {
        Triangulator {
            boundary,
            holes: Vec::new(),
            steiner: Vec::new(),
            padding: DEFAULT_PADDING,
            verify_mesh: false,
        }
    }

    pub fn set_option(&mut self, option: TriangulatorOption, value: bool) {
        match option {
            TriangulatorOption::VerifyMesh => self.verify_mesh = value,
        }
    }

    /// Relative distance of the two sweep bound points from the input
    /// bounding box. Non-finite or non-positive values use the default.
    pub fn set_padding(&mut self, padding: Real) {
        self.padding = padding;
    }

    /// Add a hole. It must lie strictly inside the boundary and touch no
    /// other ring.
    pub fn add_hole(&mut self, hole: Vec<Point>) {
        self.holes.push(hole);
    }

    pub fn add_holes(&mut self, holes: impl IntoIterator<Item = Vec<Point>>) {
        self.holes.extend(holes);
    }

    /// Add a free point. Points outside the boundary or inside a hole end up
    /// in no output triangle.
    pub fn add_steiner_point(&mut self, point: Point) {
        self.steiner.push(point);
    }

    pub fn add_steiner_points(&mut self, points: impl IntoIterator<Item = Point>) {
        self.steiner.extend(points);
    }

    pub fn boundary(&self) -> &[Point] {
        &self.boundary
    }

    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    pub fn steiner_points(&self) -> &[Point] {
        &self.steiner
    }

    pub fn triangulate(&self) -> Result<Triangulation, CdtError> {
        geometry::check_ring(&self.boundary, Ring::Boundary, 0)?;
        let mut offset = self.boundary.len();
        for (i, hole) in self.holes.iter().enumerate() {
            geometry::check_ring(hole, Ring::Hole(i), offset)?;
            offset += hole.len();
        }
        geometry::check_points(&self.steiner, offset)?;

        let padding = if self.padding.is_finite() && self.padding > 0.0 {
            self.padding
        } else {
            warn!(padding = self.padding, "ignoring invalid padding");
            DEFAULT_PADDING
        };

        let mut tcx = SweepContext::new(padding);
        tcx.add_polyline(&self.boundary, Ring::Boundary)?;
        for (i, hole) in self.holes.iter().enumerate() {
            tcx.add_polyline(hole, Ring::Hole(i))?;
        }
        for &p in &self.steiner {
            tcx.add_point(p);
        }

        tcx.triangulate()?;

        if self.verify_mesh {
            verify_mesh(&tcx);
        }

        let sources = output::vertex_sources(
            self.boundary.len(),
            self.holes.iter().map(Vec::len),
            self.steiner.len(),
        );
        let result = Triangulation::from_context(&tcx, sources);
        debug!(
            triangles = result.element_count(),
            vertices = result.vertex_count(),
            "triangulation ready"
        );
        Ok(result)
    }
}

fn verify_mesh(tcx: &SweepContext) {
    if let Some((t, slot)) = tcx.mesh.find_broken_link() {
        panic!(
            "verify_mesh: invalid call, triangle {} slot {} has a one-sided neighbor link",
            t, slot
        );
    }
    for (t, slot) in tcx.mesh.illegal_edges(&tcx.points, true) {
        warn!(triangle = t, slot, "interior edge is not locally Delaunay");
    }
}

/// Triangulate a boundary with holes and free points in one call.
pub fn triangulate(boundary: &[Point], holes: &[Vec<Point>], steiner: &[Point]) -> Result<Triangulation, CdtError> {
    let mut t = Triangulator::new(boundary.to_vec());
    t.add_holes(holes.iter().cloned());
    t.add_steiner_points(steiner.iter().copied());
    t.triangulate()
}
