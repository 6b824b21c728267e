// Copyright 2025 Lars Brubaker
// Errors reported to callers of the triangulator.

use thiserror::Error;

/// Which input ring a vertex or edge came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ring {
    Boundary,
    Hole(usize),
}

impl std::fmt::Display for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ring::Boundary => write!(f, "boundary"),
            Ring::Hole(i) => write!(f, "hole {}", i),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CdtError {
    /// Two consecutive ring points coincide, giving a zero-length edge.
    #[error("degenerate input: {ring} repeats point ({x}, {y}) at index {index}")]
    DegenerateInput { ring: Ring, index: usize, x: f64, y: f64 },

    /// A constraint edge crosses or overlaps another one and cannot be
    /// recovered by flipping.
    #[error("intersecting constraints near edge ({px}, {py}) -> ({qx}, {qy})")]
    IntersectingConstraints { px: f64, py: f64, qx: f64, qy: f64 },

    #[error("{ring} needs at least 3 points, got {count}")]
    TooFewPoints { ring: Ring, count: usize },

    /// Every point of the ring lies on one line.
    #[error("{ring} encloses no area")]
    ZeroArea { ring: Ring },

    #[error("invalid coordinate ({x}, {y}) at vertex {index}")]
    InvalidCoordinate { index: usize, x: f64, y: f64 },
}
