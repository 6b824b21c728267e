// Copyright 2025 Lars Brubaker
// Input validation for the triangulator.

use crate::error::{CdtError, Ring};
use crate::geom::{ring_area2, Point, Real};

pub(crate) fn is_valid_coord(c: Real) -> bool {
    c.is_finite()
}

/// A ring needs at least three points, all of them finite, and must enclose
/// some area. `offset` is the vertex id of the ring's first point.
pub(crate) fn check_ring(ring: &[Point], which: Ring, offset: usize) -> Result<(), CdtError> {
    if ring.len() < 3 {
        return Err(CdtError::TooFewPoints { ring: which, count: ring.len() });
    }
    check_points(ring, offset)?;
    if ring_area2(ring) == 0.0 {
        return Err(CdtError::ZeroArea { ring: which });
    }
    Ok(())
}

pub(crate) fn check_points(points: &[Point], offset: usize) -> Result<(), CdtError> {
    for (i, p) in points.iter().enumerate() {
        if !is_valid_coord(p.x) || !is_valid_coord(p.y) {
            return Err(CdtError::InvalidCoordinate { index: offset + i, x: p.x, y: p.y });
        }
    }
    Ok(())
}
