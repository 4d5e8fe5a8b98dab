//! Freehand curve fitting.
//!
//! Raw input points are joined into a polyline which `kurbo` simplifies into
//! the fewest cubic curves whose distance from the input stays within the
//! requested smoothing.

use drawkit_core::Point;
use kurbo::{fit_to_bezpath_opt, simplify::SimplifyBezPath, PathEl};
use tracing::debug;

use crate::metrics::PathMetrics;
use crate::model::{Path, Segment};

/// Smoothing used when the caller has no preference.
pub const DEFAULT_SMOOTHING: f64 = 7.5;

/// Smallest accuracy handed to the fitter.
const MIN_ACCURACY: f64 = 1e-3;

/// Fits `points` with cubic curves whose maximum deviation from the input is
/// at most `smoothing`.
///
/// Consecutive duplicate points are ignored. No points yield an empty path,
/// a single distinct point a lone `MoveTo`, and two a straight line.
pub fn fit_freehand(points: &[Point], smoothing: f64) -> Path {
    let segments = fit_segments(points, smoothing);
    debug!(
        "Fitted {} input points into {} segments",
        points.len(),
        segments.len()
    );
    Path::from_raw(segments)
}

/// Refits every subpath of `path` as a smooth curve chain, keeping closure.
pub fn smooth(path: &Path, smoothing: f64) -> Path {
    let pieces = PathMetrics::default().pieces(path);
    let mut out = Vec::new();
    for sp in path.subpaths() {
        let mut points: Vec<Point> = Vec::new();
        for piece in pieces.iter().filter(|p| sp.contains(p.segment)) {
            if points.is_empty() {
                points.push(piece.from);
            }
            points.push(piece.to);
        }
        if points.is_empty() {
            // Isolated point.
            out.extend_from_slice(&path.segments()[sp.range.clone()]);
            continue;
        }
        out.extend(fit_segments(&points, smoothing));
        if sp.closed {
            out.push(Segment::Close);
        }
    }
    Path::from_raw(out)
}

pub(crate) fn fit_segments(points: &[Point], smoothing: f64) -> Vec<Segment> {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if pts.last().is_none_or(|last| !last.is_coincident(p)) {
            pts.push(*p);
        }
    }

    match pts.as_slice() {
        [] => Vec::new(),
        [only] => vec![Segment::MoveTo { to: *only }],
        [first, last] => vec![Segment::MoveTo { to: *first }, Segment::LineTo { to: *last }],
        [first, .., last] => {
            let polyline = std::iter::once(PathEl::MoveTo(to_kurbo(*first)))
                .chain(pts[1..].iter().map(|p| PathEl::LineTo(to_kurbo(*p))));
            let accuracy = smoothing.max(MIN_ACCURACY);
            let fitted = fit_to_bezpath_opt(&SimplifyBezPath::new(polyline), accuracy);

            let mut out = vec![Segment::MoveTo { to: *first }];
            for el in fitted.elements() {
                match *el {
                    PathEl::LineTo(p) => out.push(Segment::LineTo { to: from_kurbo(p) }),
                    PathEl::QuadTo(c, p) => {
                        let from = out.last().and_then(Segment::end_point).unwrap_or(*first);
                        let (c, to) = (from_kurbo(c), from_kurbo(p));
                        out.push(Segment::CurveTo {
                            ctrl1: from.lerp(c, 2.0 / 3.0),
                            ctrl2: to.lerp(c, 2.0 / 3.0),
                            to,
                        });
                    }
                    PathEl::CurveTo(c1, c2, p) => out.push(Segment::CurveTo {
                        ctrl1: from_kurbo(c1),
                        ctrl2: from_kurbo(c2),
                        to: from_kurbo(p),
                    }),
                    PathEl::MoveTo(_) | PathEl::ClosePath => {}
                }
            }
            // Pin the ends to the exact input samples.
            match out.last_mut() {
                Some(Segment::LineTo { to }) | Some(Segment::CurveTo { to, .. }) => *to = *last,
                _ => out.push(Segment::LineTo { to: *last }),
            }
            out
        }
    }
}

fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

fn from_kurbo(p: kurbo::Point) -> Point {
    Point::new(p.x, p.y)
}
