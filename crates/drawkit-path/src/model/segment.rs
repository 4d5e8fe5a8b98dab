use drawkit_core::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::PointRole;

/// One element of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    MoveTo { to: Point },
    LineTo { to: Point },
    CurveTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

/// Kind of a segment, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    CurveTo,
    Close,
}

impl Segment {
    pub fn move_to(to: Point) -> Self {
        Segment::MoveTo { to }
    }

    pub fn line_to(to: Point) -> Self {
        Segment::LineTo { to }
    }

    pub fn curve_to(ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Segment::CurveTo { ctrl1, ctrl2, to }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::MoveTo { .. } => SegmentKind::MoveTo,
            Segment::LineTo { .. } => SegmentKind::LineTo,
            Segment::CurveTo { .. } => SegmentKind::CurveTo,
            Segment::Close => SegmentKind::Close,
        }
    }

    /// The on-path point this segment ends at. `Close` has none of its own.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Segment::MoveTo { to } | Segment::LineTo { to } | Segment::CurveTo { to, .. } => {
                Some(to)
            }
            Segment::Close => None,
        }
    }

    /// True for segments that draw something (line or curve).
    pub fn is_drawing(&self) -> bool {
        matches!(self, Segment::LineTo { .. } | Segment::CurveTo { .. })
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Segment::MoveTo { .. })
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Segment::Close)
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, Segment::CurveTo { .. })
    }

    /// Every addressable point of this segment with its role.
    pub fn points(&self) -> SmallVec<[(PointRole, Point); 3]> {
        let mut out = SmallVec::new();
        match *self {
            Segment::MoveTo { to } | Segment::LineTo { to } => out.push((PointRole::OnPath, to)),
            Segment::CurveTo { ctrl1, ctrl2, to } => {
                out.push((PointRole::Control1, ctrl1));
                out.push((PointRole::Control2, ctrl2));
                out.push((PointRole::OnPath, to));
            }
            Segment::Close => {}
        }
        out
    }

    pub fn point(&self, role: PointRole) -> Option<Point> {
        match (*self, role) {
            (Segment::MoveTo { to }, PointRole::OnPath)
            | (Segment::LineTo { to }, PointRole::OnPath)
            | (Segment::CurveTo { to, .. }, PointRole::OnPath) => Some(to),
            (Segment::CurveTo { ctrl1, .. }, PointRole::Control1) => Some(ctrl1),
            (Segment::CurveTo { ctrl2, .. }, PointRole::Control2) => Some(ctrl2),
            _ => None,
        }
    }

    pub(crate) fn point_mut(&mut self, role: PointRole) -> Option<&mut Point> {
        match (self, role) {
            (Segment::MoveTo { to }, PointRole::OnPath)
            | (Segment::LineTo { to }, PointRole::OnPath)
            | (Segment::CurveTo { to, .. }, PointRole::OnPath) => Some(to),
            (Segment::CurveTo { ctrl1, .. }, PointRole::Control1) => Some(ctrl1),
            (Segment::CurveTo { ctrl2, .. }, PointRole::Control2) => Some(ctrl2),
            _ => None,
        }
    }

    /// Applies `f` to every point of the segment.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Segment {
        match *self {
            Segment::MoveTo { to } => Segment::MoveTo { to: f(to) },
            Segment::LineTo { to } => Segment::LineTo { to: f(to) },
            Segment::CurveTo { ctrl1, ctrl2, to } => Segment::CurveTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            Segment::Close => Segment::Close,
        }
    }
}
