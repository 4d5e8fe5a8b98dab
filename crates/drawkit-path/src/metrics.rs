//! Path length, nearest-point queries and arc-length parametrization.
//!
//! Curves are measured on a flattened polyline whose maximum deviation from
//! the true curve is the metrics' `flatness`. All queries on one
//! [`PathMetrics`] share the same flattening, so `point_at_length` and
//! `length_for_point` are exact inverses of each other on that polyline.

use drawkit_core::{PathError, PathResult, Point};

use crate::bezier::Cubic;
use crate::model::{Path, Segment};

/// Default maximum deviation between a curve and its flattened polyline.
pub const DEFAULT_FLATNESS: f64 = 0.01;

/// Minimum hit tolerance, in drawing units.
pub const MIN_HIT_TOLERANCE: f64 = 4.0;

/// Tolerance used when the caller gives none: four times the widest stroke
/// applied to the path, but never less than four units.
pub fn default_tolerance(widest_stroke: f64) -> f64 {
    (4.0 * widest_stroke).max(MIN_HIT_TOLERANCE)
}

/// One straight piece of a flattened path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Piece {
    /// Index of the segment this piece was cut from.
    pub segment: usize,
    pub from: Point,
    pub to: Point,
    /// Segment-local curve parameter at `from` and `to`.
    pub t0: f64,
    pub t1: f64,
    /// Distance along the path at `from`.
    pub start: f64,
}

impl Piece {
    fn len(&self) -> f64 {
        self.from.distance_to(&self.to)
    }

    /// Parameter in [0, 1] of the projection of `p` on this piece.
    fn project(&self, p: Point) -> f64 {
        let d = self.to - self.from;
        let len_sq = d.dot(d);
        if len_sq <= f64::EPSILON {
            return 0.0;
        }
        ((p - self.from).dot(d) / len_sq).clamp(0.0, 1.0)
    }
}

/// Result of projecting a point onto a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathHit {
    /// Segment the projection falls on (a `Close` for the closing line).
    pub segment: usize,
    /// Approximate segment-local curve parameter of the projection.
    pub t: f64,
    /// The projected point.
    pub point: Point,
    /// Distance from the query point to `point`.
    pub distance: f64,
    /// Distance along the path from its start to `point`.
    pub length: f64,
}

/// Measures paths with a given flatness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathMetrics {
    pub flatness: f64,
}

impl Default for PathMetrics {
    fn default() -> Self {
        Self {
            flatness: DEFAULT_FLATNESS,
        }
    }
}

impl PathMetrics {
    pub fn new(flatness: f64) -> Self {
        debug_assert!(
            flatness.is_finite() && flatness > 0.0,
            "flatness must be positive and finite, got {flatness}"
        );
        Self { flatness }
    }

    pub(crate) fn pieces(&self, path: &Path) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = Vec::new();
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;
        let mut travelled = 0.0;

        let mut add = |segment: usize, from: Point, to: Point, t0: f64, t1: f64| {
            let piece = Piece {
                segment,
                from,
                to,
                t0,
                t1,
                start: travelled,
            };
            travelled += piece.len();
            pieces.push(piece);
        };

        for (i, seg) in path.segments().iter().enumerate() {
            match *seg {
                Segment::MoveTo { to } => {
                    current = Some(to);
                    subpath_start = Some(to);
                }
                Segment::LineTo { to } => {
                    if let Some(from) = current {
                        add(i, from, to, 0.0, 1.0);
                    }
                    current = Some(to);
                }
                Segment::CurveTo { ctrl1, ctrl2, to } => {
                    if let Some(from) = current {
                        let flat = Cubic::new(from, ctrl1, ctrl2, to).flatten(self.flatness);
                        for pair in flat.windows(2) {
                            add(i, pair[0].1, pair[1].1, pair[0].0, pair[1].0);
                        }
                    }
                    current = Some(to);
                }
                Segment::Close => {
                    if let (Some(from), Some(to)) = (current, subpath_start) {
                        if !from.is_coincident(&to) {
                            add(i, from, to, 0.0, 1.0);
                        }
                    }
                    current = subpath_start;
                }
            }
        }
        pieces
    }

    /// Total length of the path, including implicit closing lines.
    pub fn length(&self, path: &Path) -> f64 {
        self.pieces(path)
            .last()
            .map_or(0.0, |p| p.start + p.len())
    }

    /// Length of segment `index` alone (zero for moves).
    pub fn segment_length(&self, path: &Path, index: usize) -> f64 {
        self.pieces(path)
            .iter()
            .filter(|p| p.segment == index)
            .map(Piece::len)
            .sum()
    }

    /// Projects `point` onto the path. Ties resolve to the earliest piece.
    pub fn nearest_point(&self, path: &Path, point: Point) -> Option<PathHit> {
        let pieces = self.pieces(path);
        if pieces.is_empty() {
            // A path of isolated moves: only its points can be hit.
            return path
                .segments()
                .iter()
                .enumerate()
                .filter_map(|(i, s)| s.end_point().map(|p| (i, p)))
                .map(|(i, p)| PathHit {
                    segment: i,
                    t: 0.0,
                    point: p,
                    distance: p.distance_to(&point),
                    length: 0.0,
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance));
        }

        let mut best: Option<PathHit> = None;
        for piece in &pieces {
            let u = piece.project(point);
            let proj = piece.from.lerp(piece.to, u);
            let distance = proj.distance_to(&point);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(PathHit {
                    segment: piece.segment,
                    t: piece.t0 + (piece.t1 - piece.t0) * u,
                    point: proj,
                    distance,
                    length: piece.start + piece.len() * u,
                });
            }
        }
        best
    }

    /// Distance along the path to the projection of `point`, or `None` if
    /// the point is farther than `tolerance` from the path.
    pub fn length_for_point(&self, path: &Path, point: Point, tolerance: f64) -> Option<f64> {
        self.nearest_point(path, point)
            .filter(|hit| hit.distance <= tolerance)
            .map(|hit| hit.length)
    }

    /// The point at `distance` along the path.
    pub fn point_at_length(&self, path: &Path, distance: f64) -> PathResult<Point> {
        self.locate(path, distance).map(|(p, _)| p)
    }

    /// Tangent angle (radians) of the path at `distance`.
    pub fn slope_at_length(&self, path: &Path, distance: f64) -> PathResult<f64> {
        self.locate(path, distance).map(|(_, dir)| dir.angle())
    }

    fn locate(&self, path: &Path, distance: f64) -> PathResult<(Point, Point)> {
        let pieces = self.pieces(path);
        let total = pieces.last().map_or(0.0, |p| p.start + p.len());
        if !(0.0..=total).contains(&distance) {
            return Err(PathError::ArgumentOutOfRange {
                value: distance,
                min: 0.0,
                max: total,
            });
        }
        if pieces.is_empty() {
            return path
                .start_point()
                .map(|p| (p, Point::new(1.0, 0.0)))
                .ok_or_else(|| PathError::invalid_state("path is empty"));
        }
        // First piece whose end reaches the distance; zero-length pieces are skipped.
        let piece = pieces
            .iter()
            .find(|p| p.len() > 0.0 && p.start + p.len() >= distance)
            .or_else(|| pieces.last())
            .ok_or_else(|| PathError::invalid_state("path is empty"))?;
        let len = piece.len();
        let u = if len > 0.0 {
            ((distance - piece.start) / len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let dir = (piece.to - piece.from)
            .normalize()
            .unwrap_or(Point::new(1.0, 0.0));
        Ok((piece.from.lerp(piece.to, u), dir))
    }
}

impl Path {
    /// Length with the default flatness.
    pub fn length(&self) -> f64 {
        PathMetrics::default().length(self)
    }

    pub fn length_for_point(&self, point: Point, tolerance: f64) -> Option<f64> {
        PathMetrics::default().length_for_point(self, point, tolerance)
    }

    /// `length_for_point` with the tolerance derived from the widest stroke.
    pub fn length_for_point_default(&self, point: Point, widest_stroke: f64) -> Option<f64> {
        self.length_for_point(point, default_tolerance(widest_stroke))
    }

    pub fn point_at_length(&self, distance: f64) -> PathResult<Point> {
        PathMetrics::default().point_at_length(self, distance)
    }

    pub fn nearest_point(&self, point: Point) -> Option<PathHit> {
        PathMetrics::default().nearest_point(self, point)
    }
}
