// sweep-cdt: constrained Delaunay triangulation of polygons with holes
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod advancing_front;
pub mod context;
pub mod edge;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod sweep;
pub mod triangle;
pub mod triangulator;

pub use error::{CdtError, Ring};
pub use geom::Point;
pub use triangulator::{triangulate, MeshTriangle, Triangulation, Triangulator, TriangulatorOption, VertexSource};
