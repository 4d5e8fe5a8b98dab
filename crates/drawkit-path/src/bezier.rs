//! Cubic bezier helpers on top of `lyon::geom`.

use drawkit_core::Point;
use lyon::geom::{point, CubicBezierSegment};

pub(crate) fn to_lyon(p: Point) -> lyon::geom::Point<f64> {
    point(p.x, p.y)
}

pub(crate) fn from_lyon(p: lyon::geom::Point<f64>) -> Point {
    Point::new(p.x, p.y)
}

/// A cubic curve from `from` through the given controls to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl Cubic {
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// A cubic that traces the straight line from `from` to `to`.
    pub fn from_line(from: Point, to: Point) -> Self {
        Self::new(from, from.lerp(to, 1.0 / 3.0), from.lerp(to, 2.0 / 3.0), to)
    }

    fn lyon(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: to_lyon(self.from),
            ctrl1: to_lyon(self.ctrl1),
            ctrl2: to_lyon(self.ctrl2),
            to: to_lyon(self.to),
        }
    }

    fn from_lyon_segment(seg: &CubicBezierSegment<f64>) -> Self {
        Self::new(
            from_lyon(seg.from),
            from_lyon(seg.ctrl1),
            from_lyon(seg.ctrl2),
            from_lyon(seg.to),
        )
    }

    pub fn sample(&self, t: f64) -> Point {
        from_lyon(self.lyon().sample(t))
    }

    pub fn derivative(&self, t: f64) -> Point {
        let d = self.lyon().derivative(t);
        Point::new(d.x, d.y)
    }

    /// De Casteljau split at `t`.
    pub fn split(&self, t: f64) -> (Cubic, Cubic) {
        let (a, b) = self.lyon().split(t);
        (Self::from_lyon_segment(&a), Self::from_lyon_segment(&b))
    }

    /// Flattened polyline including both end points, with each vertex's `t`.
    ///
    /// No vertex strays more than `flatness` from the curve.
    pub fn flatten(&self, flatness: f64) -> Vec<(f64, Point)> {
        let mut out = vec![(0.0, self.from)];
        if flatness <= 0.0 || !flatness.is_finite() {
            out.push((1.0, self.to));
            return out;
        }
        self.lyon()
            .for_each_flattened_with_t(flatness, &mut |line, range| {
                out.push((range.end, from_lyon(line.to)));
            });
        out
    }
}

/// Approximates a circular arc with cubic pieces of at most 90 degrees.
///
/// Returns `(ctrl1, ctrl2, to)` triples continuing from the arc's start point
/// `center + radius * (cos start, sin start)`.
pub fn arc_to_cubics(center: Point, radius: f64, start_angle: f64, sweep: f64) -> Vec<[Point; 3]> {
    if radius <= 0.0 || sweep.abs() <= f64::EPSILON {
        return Vec::new();
    }
    let segment_count = ((sweep.abs() / std::f64::consts::FRAC_PI_2).ceil() as usize).max(1);
    let delta = sweep / segment_count as f64;
    let k = 4.0 / 3.0 * (delta / 4.0).tan();

    let mut cubics = Vec::with_capacity(segment_count);
    let mut theta = start_angle;
    for _ in 0..segment_count {
        let t0 = theta;
        let t1 = theta + delta;
        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();

        let p1 = Point::new(c0 - k * s0, s0 + k * c0);
        let p2 = Point::new(c1 + k * s1, s1 - k * c1);
        let p3 = Point::new(c1, s1);

        cubics.push([
            center + p1 * radius,
            center + p2 * radius,
            center + p3 * radius,
        ]);
        theta = t1;
    }
    cubics
}
