// Copyright 2025 Lars Brubaker
// WASM bindings for sweep-cdt

use sweep_cdt::{Point, Triangulation, Triangulator, TriangulatorOption};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

fn to_points(coords: &[f64]) -> Vec<Point> {
    coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}

/// Collects a boundary, holes and free points, then triangulates on demand.
#[wasm_bindgen]
pub struct TriangulatorJs {
    inner: Triangulator,
    result: Option<Triangulation>,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl TriangulatorJs {
    /// Start from a boundary given as a flat [x0,y0, x1,y1, ...] Float64Array.
    #[wasm_bindgen(constructor)]
    pub fn new(boundary: &[f64]) -> TriangulatorJs {
        TriangulatorJs {
            inner: Triangulator::new(to_points(boundary)),
            result: None,
            last_error: None,
        }
    }

    pub fn add_hole(&mut self, hole: &[f64]) {
        self.inner.add_hole(to_points(hole));
    }

    pub fn add_steiner_point(&mut self, x: f64, y: f64) {
        self.inner.add_steiner_point(Point::new(x, y));
    }

    /// Option 0 = VerifyMesh.
    pub fn set_option(&mut self, option: u32, value: bool) {
        if option == 0 {
            self.inner.set_option(TriangulatorOption::VerifyMesh, value);
        }
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.inner.set_padding(padding);
    }

    /// Triangulate and return true on success. On failure `last_error`
    /// describes the problem.
    pub fn triangulate(&mut self) -> bool {
        match self.inner.triangulate() {
            Ok(t) => {
                self.result = Some(t);
                self.last_error = None;
                true
            }
            Err(e) => {
                self.result = None;
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    pub fn element_count(&self) -> u32 {
        self.result.as_ref().map_or(0, |r| r.element_count() as u32)
    }

    pub fn vertex_count(&self) -> u32 {
        self.result.as_ref().map_or(0, |r| r.vertex_count() as u32)
    }

    /// Flat triangle vertex-index triples [i0,i1,i2, ...].
    pub fn get_elements(&self) -> Vec<u32> {
        self.result.as_ref().map_or_else(Vec::new, |r| r.elements().to_vec())
    }

    /// Flat input vertex positions [x0,y0, x1,y1, ...].
    pub fn get_vertices(&self) -> Vec<f64> {
        self.result.as_ref().map_or_else(Vec::new, |r| r.vertices().to_vec())
    }

    /// Per triangle, three flags marking which edges lie on a ring.
    pub fn get_constrained(&self) -> Vec<u8> {
        match &self.result {
            Some(r) => r
                .triangles()
                .flat_map(|t| t.constrained.map(u8::from))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Convenience: triangulate a single boundary and return the element index
/// array, empty on failure.
#[wasm_bindgen]
pub fn triangulate_polygon(boundary: &[f64]) -> Vec<u32> {
    let mut t = TriangulatorJs::new(boundary);
    if !t.triangulate() {
        return Vec::new();
    }
    t.get_elements()
}
