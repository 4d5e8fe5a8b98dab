//! The path value type: segments, subpaths and partcodes.

use drawkit_core::{Bounds, PathError, PathResult, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use uuid::Uuid;

mod partcode;
mod segment;

pub use partcode::{PartCode, PointRole};
pub use segment::{Segment, SegmentKind};

/// Stable identity of a path across edits and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(Uuid);

impl PathId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PathId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A maximal run of segments starting at a `MoveTo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subpath {
    /// Segment indices covered by this subpath, including any trailing `Close`.
    pub range: Range<usize>,
    pub closed: bool,
}

impl Subpath {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn contains(&self, segment: usize) -> bool {
        self.range.contains(&segment)
    }
}

/// An ordered sequence of move/line/curve/close segments.
///
/// Cloning produces a snapshot of the same path (same [`PathId`]);
/// use [`Path::duplicate`] for an independent copy. Equality compares
/// geometry only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    id: PathId,
    segments: Vec<Segment>,
    #[serde(skip)]
    generation: u64,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            id: PathId::new(),
            segments: Vec::new(),
            generation: 0,
        }
    }

    /// Builds a path from raw segments, checking the structural invariants.
    pub fn from_segments(segments: Vec<Segment>) -> PathResult<Self> {
        validate_segments(&segments)?;
        Ok(Self {
            id: PathId::new(),
            segments,
            generation: 0,
        })
    }

    /// Wraps segments already known to be well formed.
    pub(crate) fn from_raw(segments: Vec<Segment>) -> Self {
        debug_assert!(validate_segments(&segments).is_ok());
        Self {
            id: PathId::new(),
            segments,
            generation: 0,
        }
    }

    /// Builds a polyline through `points`, optionally closed.
    pub fn from_points(points: &[Point], closed: bool) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            if closed {
                path.close();
            }
        }
        path
    }

    /// Same geometry under a fresh identity.
    pub fn duplicate(&self) -> Self {
        Self {
            id: PathId::new(),
            segments: self.segments.clone(),
            generation: 0,
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    /// Structure generation; partcodes from other generations are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.segments.push(Segment::MoveTo { to });
        self.touch();
        self
    }

    pub fn line_to(&mut self, to: Point) -> &mut Self {
        if self.begin_drawing(to) {
            self.segments.push(Segment::LineTo { to });
            self.touch();
        }
        self
    }

    pub fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        if self.begin_drawing(to) {
            self.segments.push(Segment::CurveTo { ctrl1, ctrl2, to });
            self.touch();
        }
        self
    }

    /// Closes the current subpath. Does nothing if it is already closed or
    /// there is no current subpath.
    pub fn close(&mut self) -> &mut Self {
        match self.segments.last() {
            None | Some(Segment::Close) => {}
            Some(_) => {
                self.segments.push(Segment::Close);
                self.touch();
            }
        }
        self
    }

    /// Makes sure a drawing segment ending at `to` has a subpath to join.
    /// Returns false when `to` was consumed as the initial `MoveTo`.
    fn begin_drawing(&mut self, to: Point) -> bool {
        match self.segments.last() {
            None => {
                self.segments.push(Segment::MoveTo { to });
                self.touch();
                false
            }
            Some(Segment::Close) => {
                // A segment after a close starts a new subpath at the old start.
                let start = self
                    .subpaths()
                    .last()
                    .and_then(|sp| self.segments[sp.range.start].end_point())
                    .unwrap_or(to);
                self.segments.push(Segment::MoveTo { to: start });
                true
            }
            Some(_) => true,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn segments_mut(&mut self) -> &mut Vec<Segment> {
        &mut self.segments
    }

    /// Replaces every segment at once, as a new structure generation.
    pub(crate) fn replace_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
        self.touch();
    }

    /// Enumerates the subpaths in order.
    pub fn subpaths(&self) -> Vec<Subpath> {
        let mut result = Vec::new();
        let mut start: Option<usize> = None;
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::MoveTo { .. } => {
                    if let Some(s) = start.take() {
                        result.push(Subpath {
                            range: s..i,
                            closed: false,
                        });
                    }
                    start = Some(i);
                }
                Segment::Close => {
                    if let Some(s) = start.take() {
                        result.push(Subpath {
                            range: s..i + 1,
                            closed: true,
                        });
                    }
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            result.push(Subpath {
                range: s..self.segments.len(),
                closed: false,
            });
        }
        result
    }

    /// The subpath containing segment `index`.
    pub fn subpath_of(&self, index: usize) -> Option<Subpath> {
        self.subpaths().into_iter().find(|sp| sp.contains(index))
    }

    pub fn subpath_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_move()).count()
    }

    /// A path is closed if it ends with a `Close` or its first and last
    /// on-path points coincide.
    pub fn is_closed(&self) -> bool {
        match self.segments.last() {
            None => false,
            Some(Segment::Close) => true,
            Some(_) => match (self.start_point(), self.end_point()) {
                (Some(a), Some(b)) => self.on_path_count() > 2 && a.is_coincident(&b),
                _ => false,
            },
        }
    }

    /// First on-path point.
    pub fn start_point(&self) -> Option<Point> {
        self.segments.iter().find_map(Segment::end_point)
    }

    /// Last on-path point (the point before any trailing `Close`).
    pub fn end_point(&self) -> Option<Point> {
        self.segments.iter().rev().find_map(Segment::end_point)
    }

    /// The point segment `index` starts drawing from: the previous on-path
    /// point. For `Close` this is the last point of its subpath.
    pub fn segment_start(&self, index: usize) -> Option<Point> {
        if index == 0 || index > self.segments.len() {
            return None;
        }
        if self.segments.get(index).is_some_and(Segment::is_move) {
            return None;
        }
        self.segments[..index].iter().rev().find_map(Segment::end_point)
    }

    /// The `MoveTo` point of the subpath containing `index`.
    pub fn subpath_start(&self, index: usize) -> Option<Point> {
        if self.segments.is_empty() {
            return None;
        }
        self.segments[..=index.min(self.segments.len() - 1)]
            .iter()
            .rev()
            .find(|s| s.is_move())
            .and_then(Segment::end_point)
    }

    pub fn on_path_points(&self) -> Vec<Point> {
        self.segments.iter().filter_map(Segment::end_point).collect()
    }

    pub fn on_path_count(&self) -> usize {
        self.segments.iter().filter(|s| s.end_point().is_some()).count()
    }

    /// Bounds of every on-path and control point.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(
            self.segments
                .iter()
                .flat_map(|s| s.points().into_iter().map(|(_, p)| p)),
        )
    }

    /// Issues a partcode for `role` on `segment`, if that point exists.
    pub fn partcode(&self, segment: usize, role: PointRole) -> Option<PartCode> {
        self.segments.get(segment)?.point(role)?;
        Some(PartCode {
            path: self.id,
            generation: self.generation,
            segment,
            role,
        })
    }

    /// Every valid partcode of the path, in segment order.
    pub fn partcodes(&self) -> Vec<PartCode> {
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(i, seg)| {
                seg.points().into_iter().map(move |(role, _)| (i, role))
            })
            .map(|(segment, role)| PartCode {
                path: self.id,
                generation: self.generation,
                segment,
                role,
            })
            .collect()
    }

    /// Partcodes of the on-path points only.
    pub fn on_path_partcodes(&self) -> Vec<PartCode> {
        self.partcodes()
            .into_iter()
            .filter(PartCode::is_on_path)
            .collect()
    }

    /// Checks that `pc` was issued by this path in its current structure.
    pub fn validate_partcode(&self, pc: PartCode) -> PathResult<()> {
        if pc.path != self.id || pc.generation != self.generation {
            return Err(PathError::not_found(format!("stale partcode {pc}")));
        }
        match self.segments.get(pc.segment) {
            Some(seg) if seg.point(pc.role).is_some() => Ok(()),
            _ => Err(PathError::not_found(format!("no point at partcode {pc}"))),
        }
    }

    /// Location of the point a partcode refers to.
    pub fn point_for_partcode(&self, pc: PartCode) -> PathResult<Point> {
        self.validate_partcode(pc)?;
        self.segments[pc.segment]
            .point(pc.role)
            .ok_or_else(|| PathError::not_found(format!("no point at partcode {pc}")))
    }

    /// True only for the first and last on-path points of an open path.
    pub fn is_open_end_point(&self, pc: PartCode) -> bool {
        if self.validate_partcode(pc).is_err() || !pc.is_on_path() || self.is_closed() {
            return false;
        }
        let first = self.segments.iter().position(|s| s.end_point().is_some());
        let last = self.segments.iter().rposition(|s| s.end_point().is_some());
        Some(pc.segment) == first || Some(pc.segment) == last
    }

    /// The path traversed in the opposite direction, subpath by subpath.
    pub fn reversed(&self) -> Path {
        let mut out = Vec::with_capacity(self.segments.len());
        for sp in self.subpaths() {
            let segs = &self.segments[sp.range.clone()];
            let drawing: Vec<(Point, Segment)> = segs
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_drawing())
                .filter_map(|(k, s)| {
                    let from = segs[..k].iter().rev().find_map(Segment::end_point)?;
                    Some((from, *s))
                })
                .collect();
            let last = segs
                .iter()
                .rev()
                .find_map(Segment::end_point)
                .unwrap_or(Point::ZERO);
            out.push(Segment::MoveTo { to: last });
            for (from, seg) in drawing.iter().rev() {
                out.push(match *seg {
                    Segment::CurveTo { ctrl1, ctrl2, .. } => Segment::CurveTo {
                        ctrl1: ctrl2,
                        ctrl2: ctrl1,
                        to: *from,
                    },
                    _ => Segment::LineTo { to: *from },
                });
            }
            if sp.closed {
                out.push(Segment::Close);
            }
        }
        Path {
            id: self.id,
            segments: out,
            generation: self.generation.wrapping_add(1),
        }
    }

    /// Mirrors the path left-to-right about its bounds center.
    pub fn flipped_horizontally(&self) -> Path {
        let c = self.bounds().center();
        self.map_points(|p| Point::new(2.0 * c.x - p.x, p.y))
    }

    /// Mirrors the path top-to-bottom about its bounds center.
    pub fn flipped_vertically(&self) -> Path {
        let c = self.bounds().center();
        self.map_points(|p| Point::new(p.x, 2.0 * c.y - p.y))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Path {
        let d = Point::new(dx, dy);
        self.map_points(|p| p + d)
    }

    /// Applies `f` to every point; structure (and partcodes) are unchanged.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Path {
        Path {
            id: self.id,
            segments: self.segments.iter().map(|s| s.map_points(&mut f)).collect(),
            generation: self.generation,
        }
    }
}

/// Checks the ordering rules for a segment list.
pub fn validate_segments(segments: &[Segment]) -> PathResult<()> {
    if let Some(first) = segments.first() {
        if !first.is_move() {
            return Err(PathError::invalid_state(
                "a path must begin with a move-to segment",
            ));
        }
    }
    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0].is_close() && !pair[1].is_move() {
            return Err(PathError::invalid_state(format!(
                "segment {} follows a close without a move-to",
                i + 1
            )));
        }
    }
    for (i, seg) in segments.iter().enumerate() {
        let finite = seg.points().iter().all(|(_, p)| p.is_finite());
        if !finite {
            return Err(PathError::invalid_state(format!(
                "segment {i} has a non-finite coordinate"
            )));
        }
    }
    Ok(())
}
