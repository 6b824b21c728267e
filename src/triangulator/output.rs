// Copyright 2025 Lars Brubaker
// The finished triangulation, detached from the sweep state.

use crate::context::SweepContext;
use crate::geom::{in_circle, Point, Real};
use crate::mesh::INVALID;

/// Where a vertex id came from in the caller's input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexSource {
    Boundary(usize),
    Hole { hole: usize, index: usize },
    Steiner(usize),
    /// One of the two helper points placed below the input by the sweep.
    Bound,
}

pub(crate) fn vertex_sources(
    boundary_len: usize,
    hole_lens: impl Iterator<Item = usize>,
    steiner_len: usize,
) -> Vec<VertexSource> {
    let mut sources: Vec<VertexSource> = (0..boundary_len).map(VertexSource::Boundary).collect();
    for (hole, len) in hole_lens.enumerate() {
        sources.extend((0..len).map(|index| VertexSource::Hole { hole, index }));
    }
    sources.extend((0..steiner_len).map(VertexSource::Steiner));
    sources.push(VertexSource::Bound);
    sources.push(VertexSource::Bound);
    sources
}

/// One triangle of the result. Slot i of `constrained` and `neighbors`
/// refers to the edge opposite `vertices[i]`. Vertices are in
/// counter-clockwise order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshTriangle {
    pub vertices: [u32; 3],
    pub constrained: [bool; 3],
    /// Index into `Triangulation::map`.
    pub neighbors: [Option<usize>; 3],
    pub interior: bool,
}

impl MeshTriangle {
    /// The vertex of `self` not on the edge opposite slot `i` of `other`.
    fn vertex_across(&self, other: &MeshTriangle, i: usize) -> Option<u32> {
        let a = other.vertices[(i + 1) % 3];
        let b = other.vertices[(i + 2) % 3];
        self.vertices.iter().copied().find(|&v| v != a && v != b)
    }
}

#[derive(Clone, Debug)]
pub struct Triangulation {
    points: Vec<Point>,
    sources: Vec<VertexSource>,
    input_count: usize,
    map: Vec<MeshTriangle>,
    interior: Vec<usize>,
    out_elements: Vec<u32>,
    out_vertices: Vec<Real>,
}

impl Triangulation {
    pub(crate) fn from_context(tcx: &SweepContext, sources: Vec<VertexSource>) -> Self {
        let map: Vec<MeshTriangle> = tcx
            .mesh
            .triangles
            .iter()
            .map(|t| MeshTriangle {
                vertices: t.points,
                constrained: t.constrained_edge,
                neighbors: t.neighbors.map(|n| if n == INVALID { None } else { Some(n as usize) }),
                interior: t.interior,
            })
            .collect();

        let interior: Vec<usize> = tcx.interior.iter().map(|&t| t as usize).collect();

        let mut out_elements = Vec::with_capacity(interior.len() * 3);
        for &t in &interior {
            out_elements.extend_from_slice(&map[t].vertices);
        }

        let input_count = tcx.input_count();
        let mut out_vertices = Vec::with_capacity(input_count * 2);
        for p in &tcx.points[..input_count] {
            out_vertices.push(p.x);
            out_vertices.push(p.y);
        }

        Triangulation {
            points: tcx.points.clone(),
            sources,
            input_count,
            map,
            interior,
            out_elements,
            out_vertices,
        }
    }

    /// Every point the sweep used: the input followed by the two bound points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, id: u32) -> Point {
        self.points[id as usize]
    }

    pub fn source(&self, id: u32) -> VertexSource {
        self.sources[id as usize]
    }

    /// Number of caller-supplied points (boundary, holes and free points).
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Interior triangles, in the order the final flood reached them.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = &MeshTriangle> + '_ {
        self.interior.iter().map(move |&t| &self.map[t])
    }

    /// Indices into `map()` of the interior triangles.
    pub fn interior_ids(&self) -> &[usize] {
        &self.interior
    }

    /// Every triangle the sweep built, including those outside the boundary
    /// and inside holes.
    pub fn map(&self) -> &[MeshTriangle] {
        &self.map
    }

    pub fn triangle_points(&self, t: &MeshTriangle) -> [Point; 3] {
        t.vertices.map(|v| self.points[v as usize])
    }

    /// Summed area of the interior triangles.
    pub fn area(&self) -> Real {
        self.triangles()
            .map(|t| {
                let [a, b, c] = self.triangle_points(t);
                0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
            })
            .sum()
    }

    pub fn element_count(&self) -> usize {
        self.interior.len()
    }

    /// Vertex ids of the interior triangles, three per triangle.
    pub fn elements(&self) -> &[u32] {
        &self.out_elements
    }

    pub fn vertex_count(&self) -> usize {
        self.input_count
    }

    /// Input coordinates as x, y pairs, indexed by vertex id.
    pub fn vertices(&self) -> &[Real] {
        &self.out_vertices
    }

    /// Does every unconstrained edge between two interior triangles pass the
    /// in-circle test?
    pub fn is_constrained_delaunay(&self) -> bool {
        for t in self.triangles() {
            for i in 0..3 {
                if t.constrained[i] {
                    continue;
                }
                let other = match t.neighbors[i] {
                    Some(n) if self.map[n].interior => &self.map[n],
                    _ => continue,
                };
                let op = match other.vertex_across(t, i) {
                    Some(v) => v,
                    None => return false,
                };
                let p = |k: usize| self.points[t.vertices[(i + k) % 3] as usize];
                if in_circle(p(0), p(1), p(2), self.points[op as usize]) {
                    return false;
                }
            }
        }
        true
    }
}
