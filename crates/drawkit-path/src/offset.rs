//! Parallel offset paths.
//!
//! Each subpath is flattened and handed to `cavalier_contours` as a polyline.
//! The raw offset joins convex corners with arcs; those are turned back into
//! a mitred corner, or a bevel when the miter would reach further than
//! [`MITER_LIMIT`] times the offset distance.

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use drawkit_core::Point;
use tracing::{debug, warn};

use crate::fit::fit_segments;
use crate::metrics::PathMetrics;
use crate::model::{Path, Segment};

/// Maximum miter length as a multiple of `|distance|`.
pub const MITER_LIMIT: f64 = 4.0;

/// Deviation allowed when refitting a smoothed offset.
const SMOOTH_TOLERANCE: f64 = 0.5;

/// Builds the path lying `distance` to the side of `path`.
///
/// Positive distances move to the left of the direction of travel in y-up
/// coordinates (downwards on a flipped canvas); negative ones to the right.
/// With `smooth` the offset polyline is refitted as curves. Paths with no
/// usable length give an empty result.
pub fn offset(path: &Path, distance: f64, smooth: bool) -> Path {
    let mut out = Vec::new();
    for (points, closed) in flattened_subpaths(path) {
        for shifted in offset_polyline(&points, closed, distance) {
            push_polyline(&mut out, &shifted, closed, smooth);
        }
    }

    if out.is_empty() {
        warn!("Offset of a degenerate path produced nothing");
    } else {
        debug!("Offset path {} by {:.3}", path.id(), distance);
    }
    Path::from_raw(out)
}

/// Replaces `path` by the outline of a stroke `width` wide drawn along it.
///
/// Open subpaths become one closed loop: the left edge, a butt cap, the
/// right edge walked backwards and a second cap. Closed subpaths become two
/// loops, one per edge, wound in opposite directions so the ring is enclosed
/// under either fill rule.
pub fn outline(path: &Path, width: f64) -> Path {
    let half = width.abs() / 2.0;
    let mut out = Vec::new();
    if half <= f64::EPSILON {
        warn!("Outline of zero width produced nothing");
        return Path::new();
    }

    for (points, closed) in flattened_subpaths(path) {
        let left = offset_polyline(&points, closed, half);
        let right = offset_polyline(&points, closed, -half);
        if closed {
            for ring in &left {
                push_polyline(&mut out, ring, true, false);
            }
            for ring in &right {
                let reversed: Vec<Point> = ring.iter().rev().copied().collect();
                push_polyline(&mut out, &reversed, true, false);
            }
            continue;
        }

        match (left.as_slice(), right.as_slice()) {
            ([l], [r]) => {
                let mut ring = l.clone();
                ring.extend(r.iter().rev());
                push_polyline(&mut out, &ring, true, false);
            }
            _ => {
                // Self-overlapping strokes split into pieces: keep them all.
                for piece in left.iter().chain(&right) {
                    push_polyline(&mut out, piece, false, false);
                }
            }
        }
    }

    if out.is_empty() {
        warn!("Outline of a degenerate path produced nothing");
    } else {
        debug!("Outlined path {} at width {:.3}", path.id(), width);
    }
    Path::from_raw(out)
}

/// Each subpath as a duplicate-free polyline with its closed flag. Closed
/// rings do not repeat their first point.
pub(crate) fn flattened_subpaths(path: &Path) -> Vec<(Vec<Point>, bool)> {
    let pieces = PathMetrics::default().pieces(path);
    let mut result = Vec::new();
    for sp in path.subpaths() {
        let mut points: Vec<Point> = Vec::new();
        for piece in pieces.iter().filter(|p| sp.contains(p.segment)) {
            if points.is_empty() {
                points.push(piece.from);
            }
            if points.last().is_none_or(|last| !last.is_coincident(&piece.to)) {
                points.push(piece.to);
            }
        }
        if sp.closed && points.len() > 1 && points[0].is_coincident(&points[points.len() - 1]) {
            points.pop();
        }
        let min_points = if sp.closed { 3 } else { 2 };
        if points.len() >= min_points {
            result.push((points, sp.closed));
        }
    }
    result
}

/// Offsets one polyline, returning every resulting piece as points.
fn offset_polyline(points: &[Point], closed: bool, distance: f64) -> Vec<Vec<Point>> {
    let mut pline = Polyline::new();
    for p in points {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(closed);

    pline
        .parallel_offset(distance)
        .iter()
        .map(mitred_points)
        .filter(|pts| pts.len() >= if closed { 3 } else { 2 })
        .collect()
}

/// Vertices of an offset result with each arc and its two end points
/// replaced by the miter apex. Arcs beyond the miter limit become bevels.
fn mitred_points(pline: &Polyline) -> Vec<Point> {
    let vertices = &pline.vertex_data;
    let count = vertices.len();
    let closed = pline.is_closed();
    let at = |i: usize| Point::new(vertices[i].x, vertices[i].y);

    let starts_arc =
        |i: usize| vertices[i].bulge.abs() > f64::EPSILON && (closed || i + 1 < count);
    // The apex of the arc starting at each vertex, when it is mitred.
    let apexes: Vec<Option<Point>> = (0..count)
        .map(|i| {
            if starts_arc(i) {
                miter_apex(at(i), at((i + 1) % count), vertices[i].bulge)
            } else {
                None
            }
        })
        .collect();

    let mut points: Vec<Point> = Vec::with_capacity(count);
    for i in 0..count {
        let ends_mitred_arc = if i == 0 {
            closed && apexes[count - 1].is_some()
        } else {
            apexes[i - 1].is_some()
        };
        let here = match apexes[i] {
            Some(apex) => apex,
            None if ends_mitred_arc && !starts_arc(i) => continue,
            None => at(i),
        };
        if points.last().is_none_or(|last| !last.is_coincident(&here)) {
            points.push(here);
        }
    }
    if closed && points.len() > 1 && points[0].is_coincident(&points[points.len() - 1]) {
        points.pop();
    }
    points
}

/// Where the tangents at both ends of an arc meet, if that corner stays
/// within the miter limit.
fn miter_apex(from: Point, to: Point, bulge: f64) -> Option<Point> {
    let sweep = 4.0 * bulge.atan();
    let half_cos = (sweep / 2.0).cos();
    if half_cos <= 1.0 / MITER_LIMIT {
        return None;
    }
    let chord = to - from;
    let dir = chord.normalize()?;
    let right = Point::new(dir.y, -dir.x);
    let rise = chord.length() / 2.0 * (sweep / 2.0).tan();
    Some(from.lerp(to, 0.5) + right * rise)
}

fn push_polyline(out: &mut Vec<Segment>, points: &[Point], closed: bool, smooth: bool) {
    let Some(&first) = points.first() else {
        return;
    };
    if smooth {
        let mut ring = points.to_vec();
        if closed {
            ring.push(first);
        }
        out.extend(fit_segments(&ring, SMOOTH_TOLERANCE));
    } else {
        out.push(Segment::MoveTo { to: first });
        out.extend(points[1..].iter().map(|&to| Segment::LineTo { to }));
    }
    if closed {
        out.push(Segment::Close);
    }
}
