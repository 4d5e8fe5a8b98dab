//! Point and segment editing.
//!
//! Every operation validates its arguments before touching the path, so a
//! failed call leaves the path exactly as it was. Structural edits move the
//! path to a new generation; moving points does not.

use drawkit_core::{PathError, PathResult, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bezier::Cubic;
use crate::constrain::constrain_to_angle;
use crate::metrics::PathMetrics;
use crate::model::{PartCode, Path, PointRole, Segment, Subpath};

/// Kind of segment produced when inserting a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertType {
    /// Keep whatever kind the hit segment already is.
    #[default]
    Auto,
    Line,
    Curve,
    /// The opposite of the hit segment's kind.
    InverseAuto,
}

impl InsertType {
    fn wants_curve(self, hit_is_curve: bool) -> bool {
        match self {
            InsertType::Auto => hit_is_curve,
            InsertType::Line => false,
            InsertType::Curve => true,
            InsertType::InverseAuto => !hit_is_curve,
        }
    }
}

/// Modifiers applied while moving a single point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveOptions {
    /// Snap the point's direction from its anchor to multiples of this
    /// angle (radians).
    pub constrain_angle: Option<f64>,
    /// Keep the opposite handle of the vertex aligned when moving a control
    /// point.
    pub colinear: bool,
}

impl Path {
    /// Deletes an on-path point. Control points cannot be deleted.
    pub fn delete_point(&mut self, pc: PartCode) -> PathResult<()> {
        self.validate_partcode(pc)?;
        if !pc.is_on_path() {
            warn!("Refusing to delete control point {}", pc);
            return Err(PathError::invalid_state(
                "only on-path points can be deleted",
            ));
        }
        let index = pc.segment;
        let sp = self
            .subpath_of(index)
            .ok_or_else(|| PathError::not_found(format!("no subpath for {pc}")))?;

        let mut segs = self.segments().to_vec();
        match segs[index] {
            Segment::MoveTo { .. } => {
                let next = index + 1;
                match segs.get(next).and_then(|s| s.is_drawing().then_some(*s)) {
                    Some(next_seg) if sp.contains(next) => {
                        let to = next_seg.end_point().unwrap_or(Point::ZERO);
                        segs[next] = Segment::MoveTo { to };
                        segs.remove(index);
                    }
                    _ => {
                        segs.drain(sp.range.clone());
                    }
                }
            }
            Segment::LineTo { .. } | Segment::CurveTo { .. } => {
                let next = index + 1;
                if let (
                    Segment::CurveTo { ctrl1, .. },
                    Some(Segment::CurveTo { ctrl2, to, .. }),
                ) = (segs[index], segs.get(next).copied())
                {
                    // Keep the outgoing handle of the surviving curve's start.
                    segs[next] = Segment::CurveTo { ctrl1, ctrl2, to };
                }
                segs.remove(index);
            }
            Segment::Close => {
                return Err(PathError::not_found(format!("no point at {pc}")));
            }
        }

        drop_degenerate_closes(&mut segs);
        debug!(
            "Deleted point at segment {} ({} -> {} segments)",
            index,
            self.len(),
            segs.len()
        );
        self.replace_segments(segs);
        Ok(())
    }

    /// Deletes the segment at `index`.
    ///
    /// Removing a middle segment splits its subpath in two and removing an
    /// end segment shortens it. Removing a segment of a closed subpath opens
    /// the loop there.
    pub fn delete_segment(&mut self, index: usize) -> PathResult<()> {
        let seg = *self.segment(index).ok_or(PathError::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        if !seg.is_drawing() {
            return Err(PathError::invalid_state(
                "move-to and close are not deletable segments",
            ));
        }
        let sp = self
            .subpath_of(index)
            .ok_or_else(|| PathError::not_found(format!("no subpath for segment {index}")))?;

        let mut segs = self.segments().to_vec();
        if sp.closed {
            let reopened = reopen_at(&segs, &sp, index);
            segs.splice(sp.range.clone(), reopened);
        } else {
            let to = seg.end_point().unwrap_or(Point::ZERO);
            let first_drawing = sp.range.start + 1;
            let last_drawing = sp.range.end - 1;
            if first_drawing == last_drawing {
                segs.drain(sp.range.clone());
            } else if index == first_drawing {
                segs[sp.range.start] = Segment::MoveTo { to };
                segs.remove(index);
            } else if index == last_drawing {
                segs.remove(index);
            } else {
                segs[index] = Segment::MoveTo { to };
            }
        }

        drop_degenerate_closes(&mut segs);
        debug!("Deleted segment {} of {}", index, self.len());
        self.replace_segments(segs);
        Ok(())
    }

    /// Deletes the segment hit by `location`, if any is within `tolerance`.
    pub fn delete_segment_at_point(&mut self, location: Point, tolerance: f64) -> PathResult<()> {
        let hit = self
            .nearest_point(location)
            .filter(|h| h.distance <= tolerance)
            .ok_or_else(|| PathError::not_found("no segment near the given point"))?;
        self.delete_segment(hit.segment)
    }

    /// Inserts an on-path point where `location` hits the path and returns
    /// its partcode (valid for the new generation).
    pub fn insert_point(
        &mut self,
        location: Point,
        insert_type: InsertType,
        tolerance: f64,
    ) -> PathResult<PartCode> {
        let hit = self
            .nearest_point(location)
            .filter(|h| h.distance <= tolerance)
            .ok_or_else(|| PathError::not_found("no segment near the insertion point"))?;
        let index = hit.segment;
        let seg = self.segments()[index];
        let from = self
            .segment_start(index)
            .ok_or_else(|| PathError::invalid_state("cannot insert into an isolated point"))?;

        let (cubic, is_curve) = match seg {
            Segment::LineTo { to } => (Cubic::from_line(from, to), false),
            Segment::CurveTo { ctrl1, ctrl2, to } => (Cubic::new(from, ctrl1, ctrl2, to), true),
            Segment::Close => {
                let start = self
                    .subpath_start(index)
                    .ok_or_else(|| PathError::invalid_state("close without a subpath"))?;
                (Cubic::from_line(from, start), false)
            }
            Segment::MoveTo { .. } => {
                return Err(PathError::invalid_state(
                    "cannot insert into an isolated point",
                ))
            }
        };

        let (a, b) = cubic.split(hit.t.clamp(0.0, 1.0));
        let want_curve = insert_type.wants_curve(is_curve);
        let mut segs = self.segments().to_vec();
        let first = if want_curve {
            Segment::CurveTo {
                ctrl1: a.ctrl1,
                ctrl2: a.ctrl2,
                to: a.to,
            }
        } else {
            Segment::LineTo { to: a.to }
        };
        let second = if want_curve {
            Some(Segment::CurveTo {
                ctrl1: b.ctrl1,
                ctrl2: b.ctrl2,
                to: b.to,
            })
        } else if seg.is_close() {
            // The closing line itself covers the second half.
            None
        } else {
            Some(Segment::LineTo { to: b.to })
        };

        if seg.is_close() {
            segs.insert(index, first);
            if let Some(second) = second {
                segs.insert(index + 1, second);
            }
        } else {
            segs[index] = first;
            if let Some(second) = second {
                segs.insert(index + 1, second);
            }
        }

        debug!(
            "Inserted {:?} point at segment {} (t = {:.3})",
            insert_type, index, hit.t
        );
        self.replace_segments(segs);
        self.partcode(index, PointRole::OnPath)
            .ok_or_else(|| PathError::not_found("inserted point"))
    }

    /// Moves a single on-path or control point.
    ///
    /// On-path points carry their attached control points with them. The
    /// structure is unchanged, so partcodes stay valid across moves.
    pub fn move_point(
        &mut self,
        pc: PartCode,
        location: Point,
        options: &MoveOptions,
    ) -> PathResult<()> {
        self.validate_partcode(pc)?;
        let index = pc.segment;
        let sp = self
            .subpath_of(index)
            .ok_or_else(|| PathError::not_found(format!("no subpath for {pc}")))?;

        match pc.role {
            PointRole::OnPath => {
                let old = self.point_for_partcode(pc)?;
                let mut target = location;
                if let Some(angle) = options.constrain_angle {
                    if let Some(anchor) = self.on_path_anchor(index, &sp) {
                        target = constrain_to_angle(anchor, target, angle);
                    }
                }
                let delta = target - old;
                let mut affected = vec![index];
                if sp.closed {
                    // Keep coincident start/end points of a closed loop together.
                    let last = last_drawing(self.segments(), &sp);
                    let start = sp.range.start;
                    let start_pt = self.segments()[start].end_point();
                    let last_pt = last.and_then(|l| self.segments()[l].end_point());
                    if let (Some(l), Some(s), Some(e)) = (last, start_pt, last_pt) {
                        if s.is_coincident(&e) {
                            if index == start && l != start {
                                affected.push(l);
                            } else if index == l && l != start {
                                affected.push(start);
                            }
                        }
                    }
                }
                let segs = self.segments_mut();
                for i in affected {
                    shift_on_path(segs, &sp, i, delta);
                }
            }
            PointRole::Control1 => {
                let anchor = self
                    .segment_start(index)
                    .ok_or_else(|| PathError::invalid_state("control point without anchor"))?;
                let target = match options.constrain_angle {
                    Some(angle) => constrain_to_angle(anchor, location, angle),
                    None => location,
                };
                let opposite = (index > sp.range.start + 1)
                    .then(|| index - 1)
                    .filter(|&i| self.segments()[i].is_curve());
                let segs = self.segments_mut();
                if let Some(p) = segs[index].point_mut(PointRole::Control1) {
                    *p = target;
                }
                if options.colinear {
                    if let Some(o) = opposite {
                        align_opposite(segs, o, PointRole::Control2, anchor, target);
                    }
                }
            }
            PointRole::Control2 => {
                let anchor = self.segments()[index]
                    .end_point()
                    .ok_or_else(|| PathError::invalid_state("control point without anchor"))?;
                let target = match options.constrain_angle {
                    Some(angle) => constrain_to_angle(anchor, location, angle),
                    None => location,
                };
                let opposite = Some(index + 1)
                    .filter(|&i| sp.contains(i) && self.segments()[i].is_curve());
                let segs = self.segments_mut();
                if let Some(p) = segs[index].point_mut(PointRole::Control2) {
                    *p = target;
                }
                if options.colinear {
                    if let Some(o) = opposite {
                        align_opposite(segs, o, PointRole::Control1, anchor, target);
                    }
                }
            }
        }
        Ok(())
    }

    /// The on-path point a moved on-path point is constrained against: the
    /// previous one, or the next one for a subpath's first point.
    fn on_path_anchor(&self, index: usize, sp: &Subpath) -> Option<Point> {
        if index > sp.range.start {
            self.segment_start(index)
        } else {
            self.segments()
                .get(index + 1)
                .filter(|_| sp.contains(index + 1))
                .and_then(Segment::end_point)
        }
    }

    /// Splits the path into one new path per subpath.
    pub fn break_apart(&self) -> Vec<Path> {
        let parts: Vec<Path> = self
            .subpaths()
            .into_iter()
            .map(|sp| Path::from_raw(self.segments()[sp.range].to_vec()))
            .collect();
        debug!("Broke path {} into {} parts", self.id(), parts.len());
        parts
    }

    /// A new version of this path with `other`'s segments appended.
    ///
    /// No boolean geometry is performed: overlapping regions render
    /// according to the fill winding rule.
    pub fn combine(&self, other: &Path) -> Path {
        let mut combined = self.clone();
        combined.append(other);
        combined
    }

    /// Appends `other`'s segments to this path.
    pub fn append(&mut self, other: &Path) {
        if other.is_empty() {
            return;
        }
        let mut segs = self.segments().to_vec();
        segs.extend_from_slice(other.segments());
        self.replace_segments(segs);
    }

    /// Splits the path at `distance` along it. The receiver keeps the head;
    /// the tail is returned as a new path. Returns `None` when `distance`
    /// is not strictly inside the path.
    pub fn divide_at_length(&mut self, distance: f64) -> Option<Path> {
        let pieces = PathMetrics::default().pieces(self);
        let total = pieces
            .last()
            .map(|p| p.start + p.from.distance_to(&p.to))?;
        if !(distance > 0.0 && distance < total) {
            return None;
        }
        let piece = pieces.iter().find(|p| {
            let len = p.from.distance_to(&p.to);
            len > 0.0 && p.start + len >= distance
        })?;
        let len = piece.from.distance_to(&piece.to);
        let u = ((distance - piece.start) / len).clamp(0.0, 1.0);
        let t = piece.t0 + (piece.t1 - piece.t0) * u;
        let index = piece.segment;

        let segs = self.segments();
        let from = self.segment_start(index)?;
        let subpath_start = self.subpath_start(index)?;
        let (head_end, tail_first) = match segs[index] {
            Segment::LineTo { to } => (
                Segment::LineTo { to: from.lerp(to, t) },
                Segment::LineTo { to },
            ),
            Segment::CurveTo { ctrl1, ctrl2, to } => {
                let (a, b) = Cubic::new(from, ctrl1, ctrl2, to).split(t);
                (
                    Segment::curve_to(a.ctrl1, a.ctrl2, a.to),
                    Segment::curve_to(b.ctrl1, b.ctrl2, b.to),
                )
            }
            Segment::Close => (
                Segment::LineTo {
                    to: from.lerp(subpath_start, t),
                },
                Segment::LineTo { to: subpath_start },
            ),
            Segment::MoveTo { .. } => return None,
        };
        let split_point = head_end.end_point()?;

        let mut head: Vec<Segment> = segs[..index].to_vec();
        head.push(head_end);
        let mut tail = vec![Segment::MoveTo { to: split_point }, tail_first];
        tail.extend_from_slice(&segs[index + 1..]);

        // Cutting a closed loop leaves both halves open: the tail draws the
        // closing line explicitly instead of closing onto the split point.
        if !segs[index].is_close() {
            if let Some(pos) = tail.iter().position(Segment::is_close) {
                if !tail[1..pos].iter().any(Segment::is_move) {
                    let ends_at_start = tail[pos - 1]
                        .end_point()
                        .is_some_and(|e| e.is_coincident(&subpath_start));
                    if ends_at_start {
                        tail.remove(pos);
                    } else {
                        tail[pos] = Segment::LineTo { to: subpath_start };
                    }
                }
            }
        }

        debug!("Divided path {} at length {:.3}", self.id(), distance);
        self.replace_segments(head);
        Some(Path::from_raw(tail))
    }

    /// Reverses the direction of every subpath.
    pub fn reverse(&mut self) {
        let reversed = self.reversed();
        self.replace_segments(reversed.segments().to_vec());
    }
}

/// Index of the last drawing segment of `sp`.
fn last_drawing(segs: &[Segment], sp: &Subpath) -> Option<usize> {
    sp.range
        .clone()
        .rev()
        .find(|&i| segs[i].is_drawing())
}

/// Moves the on-path point of segment `i` and the handles attached to it.
fn shift_on_path(segs: &mut [Segment], sp: &Subpath, i: usize, delta: Point) {
    match &mut segs[i] {
        Segment::MoveTo { to } | Segment::LineTo { to } => *to += delta,
        Segment::CurveTo { ctrl2, to, .. } => {
            *ctrl2 += delta;
            *to += delta;
        }
        Segment::Close => return,
    }
    if let Some(Segment::CurveTo { ctrl1, .. }) = segs.get_mut(i + 1) {
        if sp.contains(i + 1) {
            *ctrl1 += delta;
        }
    }
}

/// Rotates the handle `role` of segment `o` so it points away from `target`
/// through `anchor`, keeping its length.
fn align_opposite(segs: &mut [Segment], o: usize, role: PointRole, anchor: Point, target: Point) {
    let Some(dir) = (target - anchor).normalize() else {
        return;
    };
    if let Some(handle) = segs[o].point_mut(role) {
        let len = handle.distance_to(&anchor);
        *handle = anchor - dir * len;
    }
}

/// Rebuilds a closed subpath as an open one that starts right after the
/// removed drawing segment `index` and ends right before it.
fn reopen_at(segs: &[Segment], sp: &Subpath, index: usize) -> Vec<Segment> {
    let start = segs[sp.range.start].end_point().unwrap_or(Point::ZERO);
    let mut body: Vec<(usize, Segment)> = sp
        .range
        .clone()
        .filter(|&i| segs[i].is_drawing())
        .map(|i| (i, segs[i]))
        .collect();
    if let Some(last) = body.last().and_then(|(_, s)| s.end_point()) {
        if !last.is_coincident(&start) {
            body.push((usize::MAX, Segment::LineTo { to: start }));
        }
    }
    let k = body.iter().position(|(i, _)| *i == index).unwrap_or(0);
    let new_start = body[k].1.end_point().unwrap_or(start);

    let mut out = vec![Segment::MoveTo { to: new_start }];
    out.extend(body[k + 1..].iter().map(|(_, s)| *s));
    out.extend(body[..k].iter().map(|(_, s)| *s));
    out
}

/// Removes `Close` segments left directly after a `MoveTo`.
fn drop_degenerate_closes(segs: &mut Vec<Segment>) {
    let mut i = 1;
    while i < segs.len() {
        if segs[i].is_close() && segs[i - 1].is_move() {
            segs.remove(i);
        } else {
            i += 1;
        }
    }
    if segs.first().is_some_and(Segment::is_close) {
        segs.remove(0);
    }
}
