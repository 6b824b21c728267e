// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometric primitives and predicates for the sweep.
//
// Every predicate works on plain f64 coordinates with a fixed epsilon band.
// The algebraic form of each test is part of the contract: the sweep makes
// its flip decisions from these signs, so changing the expansion order or the
// epsilon changes the produced mesh on near-degenerate input.

use std::f64::consts::{FRAC_PI_2, PI};

pub type Real = f64;

/// Width of the band around zero that orientation tests treat as collinear.
pub const EPSILON: Real = 1e-12;

/// 3/4 π, the largest basin angle that still triggers a basin fill.
pub const PI_3_DIV_4: Real = 3.0 * PI / 4.0;

/// A 2D input point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point { x, y }
    }
}

impl From<[Real; 2]> for Point {
    fn from([x, y]: [Real; 2]) -> Self {
        Point { x, y }
    }
}

/// Sweep order: by y, then by x.
#[inline]
pub fn sweep_cmp(a: &Point, b: &Point) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    if a.y < b.y {
        Ordering::Less
    } else if a.y == b.y {
        if a.x < b.x {
            Ordering::Less
        } else if a.x == b.x {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    } else {
        Ordering::Greater
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Cw,
    Ccw,
    Collinear,
}

/// Orientation of the turn a -> b -> c.
///
/// Sign of the cross product of (a - c) and (b - c); results inside
/// (-EPSILON, EPSILON) collapse to `Collinear`.
#[inline]
pub fn orient2d(pa: Point, pb: Point, pc: Point) -> Orientation {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let val = detleft - detright;
    if val > -EPSILON && val < EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Ccw
    } else {
        Orientation::Cw
    }
}

/// Returns true if `pd` lies strictly inside the circle through pa, pb, pc.
///
/// pa, pb, pc must be in CCW order. The test bails out early when pd is not
/// on the inner side of the edges pa-pd-pb and pc-pd-pa, which keeps flips
/// away from non-convex quadrilaterals.
pub fn in_circle(pa: Point, pb: Point, pc: Point, pd: Point) -> bool {
    let adx = pa.x - pd.x;
    let ady = pa.y - pd.y;
    let bdx = pb.x - pd.x;
    let bdy = pb.y - pd.y;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let oabd = adxbdy - bdxady;

    if oabd <= 0.0 {
        return false;
    }

    let cdx = pc.x - pd.x;
    let cdy = pc.y - pd.y;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let ocad = cdxady - adxcdy;

    if ocad <= 0.0 {
        return false;
    }

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * ocad + clift * oabd;

    det > 0.0
}

/// Returns true if `pd` falls in the wedge at `pa` spanned by pb and pc.
pub fn in_scan_area(pa: Point, pb: Point, pc: Point, pd: Point) -> bool {
    let oadb = (pa.x - pb.x) * (pd.y - pb.y) - (pd.x - pb.x) * (pa.y - pb.y);
    if oadb >= -EPSILON {
        return false;
    }

    let oadc = (pa.x - pc.x) * (pd.y - pc.y) - (pd.x - pc.x) * (pa.y - pc.y);
    if oadc <= EPSILON {
        return false;
    }
    true
}

/// Returns true if the angle at `pa` between pb and pc exceeds 90 degrees.
#[inline]
pub fn is_angle_obtuse(pa: Point, pb: Point, pc: Point) -> bool {
    let ax = pb.x - pa.x;
    let ay = pb.y - pa.y;
    let bx = pc.x - pa.x;
    let by = pc.y - pa.y;
    (ax * bx + ay * by) < 0.0
}

/// Signed angle at `origin` from pa to pb, in (-π, π].
pub fn angle(origin: Point, pa: Point, pb: Point) -> Real {
    let ax = pa.x - origin.x;
    let ay = pa.y - origin.y;
    let bx = pb.x - origin.x;
    let by = pb.y - origin.y;
    let x = ax * by - ay * bx;
    let y = ax * bx + ay * by;
    x.atan2(y)
}

#[inline]
pub fn angle_is_negative(origin: Point, pa: Point, pb: Point) -> bool {
    angle(origin, pa, pb) < 0.0
}

#[inline]
pub fn angle_exceeds_plus_90_degrees_or_is_negative(origin: Point, pa: Point, pb: Point) -> bool {
    let a = angle(origin, pa, pb);
    a > FRAC_PI_2 || a < 0.0
}

/// Twice the signed area of a closed ring (positive when CCW).
pub fn ring_area2(ring: &[Point]) -> Real {
    let n = ring.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: Real, y: Real) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn orient2d_basic() {
        assert_eq!(orient2d(p(0.0, 0.0), p(1.0, 0.0), p(0.5, 1.0)), Orientation::Ccw);
        assert_eq!(orient2d(p(0.0, 0.0), p(0.5, 1.0), p(1.0, 0.0)), Orientation::Cw);
        assert_eq!(orient2d(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)), Orientation::Collinear);
    }

    #[test]
    fn orient2d_collapses_inside_epsilon_band() {
        // cross product ~ 1e-13, below EPSILON
        let o = orient2d(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 1e-13));
        assert_eq!(o, Orientation::Collinear);
        let o = orient2d(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 1e-9));
        assert_eq!(o, Orientation::Ccw);
    }

    #[test]
    fn in_circle_inside_and_outside() {
        let (a, b, c) = (p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0));
        assert!(in_circle(a, b, c, p(1.5, 1.5)));
        assert!(!in_circle(a, b, c, p(3.0, 3.0)));
    }

    #[test]
    fn in_circle_cocircular_is_false() {
        // All four corners of the unit square lie on one circle.
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0));
        assert!(!in_circle(a, b, c, p(0.0, 1.0)));
    }

    #[test]
    fn in_scan_area_wedge() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 1.0);
        let c = p(-1.0, 1.0);
        assert!(in_scan_area(a, b, c, p(0.0, 2.0)));
        assert!(!in_scan_area(a, b, c, p(3.0, 0.5)));
        assert!(!in_scan_area(a, b, c, p(-3.0, 0.5)));
    }

    #[test]
    fn obtuse_angle() {
        let o = p(0.0, 0.0);
        assert!(is_angle_obtuse(o, p(1.0, 0.0), p(-1.0, 0.1)));
        assert!(!is_angle_obtuse(o, p(1.0, 0.0), p(0.0, 1.0)));
        assert!(!is_angle_obtuse(o, p(1.0, 0.0), p(1.0, 1.0)));
    }

    #[test]
    fn angle_sign_follows_turn() {
        let o = p(0.0, 0.0);
        assert!((angle(o, p(1.0, 0.0), p(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!(angle_is_negative(o, p(0.0, 1.0), p(1.0, 0.0)));
        assert!(angle_exceeds_plus_90_degrees_or_is_negative(o, p(1.0, 0.0), p(-1.0, 1.0)));
        assert!(!angle_exceeds_plus_90_degrees_or_is_negative(o, p(1.0, 0.0), p(1.0, 1.0)));
    }

    #[test]
    fn sweep_order_is_y_then_x() {
        use std::cmp::Ordering;
        assert_eq!(sweep_cmp(&p(5.0, 0.0), &p(0.0, 1.0)), Ordering::Less);
        assert_eq!(sweep_cmp(&p(0.0, 1.0), &p(1.0, 1.0)), Ordering::Less);
        assert_eq!(sweep_cmp(&p(1.0, 1.0), &p(1.0, 1.0)), Ordering::Equal);
    }

    #[test]
    fn ring_area_sign() {
        let ccw = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert_eq!(ring_area2(&ccw), 2.0);
        let cw: Vec<Point> = ccw.iter().rev().copied().collect();
        assert_eq!(ring_area2(&cw), -2.0);
    }
}
