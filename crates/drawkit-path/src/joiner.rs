//! Joining two open paths end to end.

use drawkit_core::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Path, Segment};

/// Outcome of a join query or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinResult {
    #[default]
    NoJoin,
    /// The other path was added after the receiver's end.
    AppendedOther,
    /// The other path was added before the receiver's start.
    PrependedOther,
    /// Both ends met; the result is closed.
    BothEndsJoined,
}

impl JoinResult {
    pub fn is_joined(self) -> bool {
        self != JoinResult::NoJoin
    }
}

/// How the other path is laid against the receiver.
#[derive(Debug, Clone, Copy)]
struct JoinPlan {
    result: JoinResult,
    reverse_other: bool,
}

/// The points a path can be joined at: the start of its first subpath and
/// the end of its last, each present only while that subpath is open.
#[derive(Debug, Clone, Copy)]
struct OpenEnds {
    start: Option<Point>,
    end: Option<Point>,
    single_subpath: bool,
}

fn open_ends(path: &Path) -> Option<OpenEnds> {
    if path.is_empty() || path.is_closed() {
        return None;
    }
    let subpaths = path.subpaths();
    let (first, last) = (subpaths.first()?, subpaths.last()?);
    let segments = path.segments();
    let start = (!first.closed)
        .then(|| segments[first.range.clone()].iter().find_map(Segment::end_point))
        .flatten();
    let end = (!last.closed)
        .then(|| segments[last.range.clone()].iter().rev().find_map(Segment::end_point))
        .flatten();
    Some(OpenEnds {
        start,
        end,
        single_subpath: subpaths.len() == 1,
    })
}

fn plan(receiver: &Path, other: &Path, tolerance: f64) -> Option<JoinPlan> {
    let a = open_ends(receiver)?;
    let b = open_ends(other)?;
    let near = |p: Option<Point>, q: Option<Point>| {
        p.zip(q).is_some_and(|(p, q)| p.distance_to(&q) <= tolerance)
    };

    let found = |result, reverse_other| Some(JoinPlan { result, reverse_other });
    // Closing a loop only makes sense when the two paths form a single ring.
    if a.single_subpath && b.single_subpath {
        if near(a.end, b.start) && near(b.end, a.start) {
            return found(JoinResult::BothEndsJoined, false);
        }
        if near(a.end, b.end) && near(a.start, b.start) {
            return found(JoinResult::BothEndsJoined, true);
        }
    }
    if near(a.end, b.start) {
        return found(JoinResult::AppendedOther, false);
    }
    if near(b.end, a.start) {
        return found(JoinResult::PrependedOther, false);
    }
    if near(a.end, b.end) {
        return found(JoinResult::AppendedOther, true);
    }
    if near(a.start, b.start) {
        return found(JoinResult::PrependedOther, true);
    }
    None
}

/// `tail`'s segments continuing from `from`: its leading `MoveTo` becomes a
/// bridging `LineTo`, or disappears when it lands on `from`. The flag tells
/// whether a bridge was added.
fn bridged(from: Point, tail: &[Segment]) -> (Vec<Segment>, bool) {
    let mut out = Vec::with_capacity(tail.len());
    let mut bridge = false;
    if let Some((first, rest)) = tail.split_first() {
        if let Some(to) = first.end_point() {
            if !to.is_coincident(&from) {
                out.push(Segment::LineTo { to });
                bridge = true;
            }
        }
        out.extend_from_slice(rest);
    }
    (out, bridge)
}

/// Aligns the two handles around the vertex between `segs[i - 1]` and
/// `segs[i]` along their averaged direction, keeping their lengths.
fn smooth_vertex(segs: &mut [Segment], i: usize) {
    if i == 0 || i >= segs.len() {
        return;
    }
    let (Segment::CurveTo { ctrl2: c_in, to: v, .. }, Segment::CurveTo { ctrl1: c_out, .. }) =
        (segs[i - 1], segs[i])
    else {
        return;
    };
    let len_in = v.distance_to(&c_in);
    let len_out = v.distance_to(&c_out);
    let (Some(d_in), Some(d_out)) = ((v - c_in).normalize(), (c_out - v).normalize()) else {
        return;
    };
    let Some(dir) = (d_in + d_out).normalize() else {
        return;
    };
    if let Segment::CurveTo { ctrl2, .. } = &mut segs[i - 1] {
        *ctrl2 = v - dir * len_in;
    }
    if let Segment::CurveTo { ctrl1, .. } = &mut segs[i] {
        *ctrl1 = v + dir * len_out;
    }
}

/// Turns the handles of a curve ending at `from` and of a curve starting at
/// `to` along the straight line between them, keeping their lengths.
fn align_with_line(before: &mut Segment, after: &mut Segment, from: Point, to: Point) {
    let (Segment::CurveTo { ctrl2, .. }, Segment::CurveTo { ctrl1, .. }) = (before, after) else {
        return;
    };
    let Some(dir) = (to - from).normalize() else {
        return;
    };
    *ctrl2 = from - dir * from.distance_to(ctrl2);
    *ctrl1 = to + dir * to.distance_to(ctrl1);
}

/// Smooths the join whose tail starts at `segs[vertex]`; with a bridge that
/// segment is the bridging line.
fn smooth_join(segs: &mut [Segment], vertex: usize, bridge: bool) {
    if !bridge {
        smooth_vertex(segs, vertex);
        return;
    }
    if vertex == 0 || vertex + 1 >= segs.len() {
        return;
    }
    let (Some(from), Some(to)) = (segs[vertex - 1].end_point(), segs[vertex].end_point()) else {
        return;
    };
    let (head, tail) = segs.split_at_mut(vertex + 1);
    align_with_line(&mut head[vertex - 1], &mut tail[0], from, to);
}

/// Smooths where a closed single-subpath ring returns to its start. `segs`
/// ends with the `Close`.
fn smooth_closing(segs: &mut [Segment]) {
    let Some(last) = segs.len().checked_sub(2) else {
        return;
    };
    if last < 2 {
        return;
    }
    let (Some(start), Some(end)) = (segs[0].end_point(), segs[last].end_point()) else {
        return;
    };
    if start.is_coincident(&end) {
        let mut ring = [segs[last], segs[1]];
        smooth_vertex(&mut ring, 1);
        segs[last] = ring[0];
        segs[1] = ring[1];
    } else {
        // The implicit closing line bridges the gap.
        let (head, tail) = segs.split_at_mut(2);
        align_with_line(&mut tail[last - 2], &mut head[1], end, start);
    }
}

impl Path {
    /// Whether `other` could be joined onto this path within `tolerance`.
    ///
    /// Both-ends matches win, then end-to-start pairings (this end to the
    /// other's start, then the other's end to this start), then end-to-end
    /// pairings (end to end, then start to start). Closed or empty paths
    /// never join, and neither does an end belonging to a closed subpath.
    pub fn would_join(&self, other: &Path, tolerance: f64) -> JoinResult {
        plan(self, other, tolerance).map_or(JoinResult::NoJoin, |p| p.result)
    }

    /// Joins `other` onto this path, reversing a copy of it when needed.
    ///
    /// With `colinear`, the control points on either side of each join
    /// vertex are aligned when both neighbouring segments are curves. Where
    /// a gap is bridged by a line, both handles are turned along it.
    pub fn join(&mut self, other: &Path, tolerance: f64, colinear: bool) -> JoinResult {
        let Some(plan) = plan(self, other, tolerance) else {
            return JoinResult::NoJoin;
        };
        let other = if plan.reverse_other {
            other.reversed()
        } else {
            other.clone()
        };

        let (head, tail) = match plan.result {
            JoinResult::PrependedOther => (&other, &*self),
            _ => (&*self, &other),
        };
        let Some(head_end) = head.end_point() else {
            return JoinResult::NoJoin;
        };
        let mut segs = head.segments().to_vec();
        let vertex = segs.len();
        let (rest, bridge) = bridged(head_end, tail.segments());
        segs.extend(rest);

        if colinear {
            smooth_join(&mut segs, vertex, bridge);
        }
        if plan.result == JoinResult::BothEndsJoined {
            segs.push(Segment::Close);
            if colinear {
                smooth_closing(&mut segs);
            }
        }

        debug!(
            "Joined path {} onto {}: {:?} ({} segments)",
            other.id(),
            self.id(),
            plan.result,
            segs.len()
        );
        self.replace_segments(segs);
        plan.result
    }
}
