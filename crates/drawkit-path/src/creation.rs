//! Interactive path creation.
//!
//! [`PathCreator`] turns a stream of pointer events into a path. It holds an
//! explicit state (`Idle`, `Creating`, `Done`) and keeps a preview path up
//! to date after every event, so a caller can draw the path while it is
//! being made and take the finished one with [`PathCreator::into_path`].

use std::f64::consts::{PI, TAU};

use drawkit_core::{PathError, PathResult, Point};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::bezier::arc_to_cubics;
use crate::constrain::{constrain_to_angle, DEFAULT_CONSTRAINT_ANGLE};
use crate::fit::{fit_segments, DEFAULT_SMOOTHING};
use crate::model::{Path, Segment};

/// Kind of path being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreationMode {
    /// A single straight line.
    Line,
    /// Curves through clicked points, with handles pulled by dragging.
    Bezier,
    /// Straight lines through clicked points.
    Polygon,
    /// A curve fitted to a dragged stroke.
    Freehand,
    /// A circular arc.
    Arc,
    /// A circular arc closed through its center.
    Wedge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationState {
    Idle,
    Creating(CreationMode),
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Press,
    Drag,
    Release,
    /// A double click or equivalent "finish here" gesture.
    DoubleActivation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Snap angles to the configured constraint angle.
    pub constrain: bool,
    /// Keep curve handles aligned without forcing equal lengths.
    pub colinear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: InputKind,
    pub location: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(kind: InputKind, location: Point) -> Self {
        Self {
            kind,
            location,
            modifiers: Modifiers::default(),
        }
    }

    pub fn press(location: Point) -> Self {
        Self::new(InputKind::Press, location)
    }

    pub fn drag(location: Point) -> Self {
        Self::new(InputKind::Drag, location)
    }

    pub fn release(location: Point) -> Self {
        Self::new(InputKind::Release, location)
    }

    pub fn double_activation(location: Point) -> Self {
        Self::new(InputKind::DoubleActivation, location)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Tunables for interactive creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreationOptions {
    /// Angle step (radians) used by the constrain modifier.
    pub constraint_angle: f64,
    /// Maximum deviation of a fitted freehand curve from the stroke.
    pub freehand_smoothing: f64,
    /// Minimum distance between recorded freehand samples.
    pub freehand_min_spacing: f64,
    /// How close a press must be to the start point to close the path.
    pub close_tolerance: f64,
}

impl Default for CreationOptions {
    fn default() -> Self {
        Self {
            constraint_angle: DEFAULT_CONSTRAINT_ANGLE,
            freehand_smoothing: DEFAULT_SMOOTHING,
            freehand_min_spacing: 1.0,
            close_tolerance: 4.0,
        }
    }
}

/// An on-path point of a bezier being created, with its two handles.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    point: Point,
    ctrl_in: Point,
    ctrl_out: Point,
}

impl Node {
    fn corner(point: Point) -> Self {
        Self {
            point,
            ctrl_in: point,
            ctrl_out: point,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ArcPhase {
    Radius,
    Sweep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ArcState {
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    phase: ArcPhase,
}

/// Event-driven path builder.
#[derive(Debug, Clone)]
pub struct PathCreator {
    mode: CreationMode,
    state: CreationState,
    options: CreationOptions,
    path: Path,
    /// Segments of the path being extended, kept verbatim.
    prefix: Vec<Segment>,
    vertices: Vec<Point>,
    nodes: Vec<Node>,
    cursor: Option<Point>,
    arc: Option<ArcState>,
    pressed: bool,
    dragged: bool,
    closed: bool,
}

impl PathCreator {
    pub fn new(mode: CreationMode, options: CreationOptions) -> Self {
        Self {
            mode,
            state: CreationState::Idle,
            options,
            path: Path::new(),
            prefix: Vec::new(),
            vertices: Vec::new(),
            nodes: Vec::new(),
            cursor: None,
            arc: None,
            pressed: false,
            dragged: false,
            closed: false,
        }
    }

    /// Continues an existing open path from its end point.
    ///
    /// Arcs and wedges always start a path of their own, and closed or empty
    /// paths have no end to continue from: these fail with `InvalidState`.
    pub fn extending(path: &Path, mode: CreationMode, options: CreationOptions) -> PathResult<Self> {
        if matches!(mode, CreationMode::Arc | CreationMode::Wedge) {
            return Err(PathError::invalid_state(format!(
                "{mode:?} creation cannot extend an existing path"
            )));
        }
        let end = path
            .end_point()
            .ok_or_else(|| PathError::invalid_state("cannot extend an empty path"))?;
        if path.is_closed() {
            return Err(PathError::invalid_state("cannot extend a closed path"));
        }

        let mut creator = Self::new(mode, options);
        creator.path = path.clone();
        creator.prefix = path.segments().to_vec();
        creator.vertices = vec![end];
        // Continue smoothly out of a trailing curve.
        let ctrl_in = match path.segments().last() {
            Some(Segment::CurveTo { ctrl2, .. }) => *ctrl2,
            _ => end,
        };
        creator.nodes = vec![Node {
            point: end,
            ctrl_in,
            ctrl_out: end * 2.0 - ctrl_in,
        }];
        creator.state = CreationState::Creating(mode);
        trace!("Extending path {} in {:?} mode", path.id(), mode);
        Ok(creator)
    }

    pub fn mode(&self) -> CreationMode {
        self.mode
    }

    pub fn state(&self) -> CreationState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == CreationState::Done
    }

    /// The path as created so far, including any rubber-band segment.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The finished path, or `None` if creation is not done or produced
    /// nothing with length.
    pub fn into_path(self) -> Option<Path> {
        if self.state != CreationState::Done {
            return None;
        }
        let has_drawing = self.path.segments().iter().any(Segment::is_drawing);
        (has_drawing && self.path.length() > 0.0).then_some(self.path)
    }

    /// Feeds one input event and returns the resulting state.
    pub fn handle(&mut self, event: InputEvent) -> PathResult<CreationState> {
        if self.state == CreationState::Done {
            warn!("Ignoring {:?} after path creation finished", event.kind);
            return Err(PathError::invalid_state("path creation already finished"));
        }
        let before = self.state;
        match self.mode {
            CreationMode::Line => self.handle_line(&event),
            CreationMode::Polygon => self.handle_polygon(&event),
            CreationMode::Bezier => self.handle_bezier(&event),
            CreationMode::Freehand => self.handle_freehand(&event),
            CreationMode::Arc | CreationMode::Wedge => self.handle_arc(&event),
        }
        self.rebuild();
        if self.state != before {
            trace!("{:?} -> {:?} on {:?}", before, self.state, event.kind);
        }
        Ok(self.state)
    }

    fn begin(&mut self) {
        self.state = CreationState::Creating(self.mode);
    }

    fn finish(&mut self) {
        self.cursor = None;
        self.pressed = false;
        self.state = CreationState::Done;
    }

    fn constrained(&self, from: Point, raw: Point, modifiers: Modifiers) -> Point {
        if modifiers.constrain {
            constrain_to_angle(from, raw, self.options.constraint_angle)
        } else {
            raw
        }
    }

    /// Where the subpath being drawn starts.
    fn start_point(&self) -> Option<Point> {
        if self.prefix.is_empty() {
            self.vertices
                .first()
                .or_else(|| self.nodes.first().map(|n| &n.point))
                .copied()
        } else {
            self.prefix
                .iter()
                .rev()
                .find(|s| s.is_move())
                .and_then(Segment::end_point)
        }
    }

    /// On-path points committed to the current subpath so far.
    fn committed_count(&self, placed: usize) -> usize {
        let earlier = match self.prefix.iter().rposition(Segment::is_move) {
            Some(start) => self.prefix[start..].iter().filter(|s| s.is_drawing()).count(),
            None => 0,
        };
        earlier + placed
    }

    /// Whether a press at `p` closes the subpath onto its start point.
    fn closes_at(&self, p: Point, placed: usize) -> bool {
        self.committed_count(placed) >= 3
            && self
                .start_point()
                .is_some_and(|s| s.distance_to(&p) <= self.options.close_tolerance)
    }

    fn handle_line(&mut self, event: &InputEvent) {
        let location = event.location;
        match (self.state, event.kind) {
            (CreationState::Idle, InputKind::Press) => {
                self.vertices = vec![location];
                self.cursor = Some(location);
                self.pressed = true;
                self.dragged = false;
                self.begin();
            }
            (CreationState::Creating(_), kind) => {
                let Some(&anchor) = self.vertices.last() else {
                    return;
                };
                let end = self.constrained(anchor, location, event.modifiers);
                match kind {
                    InputKind::Drag => {
                        self.cursor = Some(end);
                        self.dragged |= self.pressed;
                    }
                    InputKind::Release => {
                        self.pressed = false;
                        if self.dragged {
                            self.vertices.push(end);
                            self.finish();
                        } else {
                            self.cursor = Some(end);
                        }
                    }
                    InputKind::Press | InputKind::DoubleActivation => {
                        self.vertices.push(end);
                        self.finish();
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_polygon(&mut self, event: &InputEvent) {
        let location = event.location;
        match (self.state, event.kind) {
            (CreationState::Idle, InputKind::Press) => {
                self.vertices = vec![location];
                self.cursor = Some(location);
                self.begin();
            }
            (CreationState::Creating(_), kind) => {
                let Some(&last) = self.vertices.last() else {
                    return;
                };
                let p = self.constrained(last, location, event.modifiers);
                match kind {
                    InputKind::Drag => self.cursor = Some(p),
                    InputKind::Press => {
                        if self.closes_at(p, self.vertices.len()) {
                            self.closed = true;
                            self.finish();
                        } else {
                            self.vertices.push(p);
                            self.cursor = Some(p);
                        }
                    }
                    InputKind::DoubleActivation => {
                        // The press of a double click already placed this vertex.
                        let keep = if self.prefix.is_empty() { 2 } else { 1 };
                        if self.vertices.len() > keep {
                            let n = self.vertices.len();
                            if self.vertices[n - 1].is_coincident(&self.vertices[n - 2]) {
                                self.vertices.pop();
                            }
                        }
                        self.finish();
                    }
                    InputKind::Release => {}
                }
            }
            _ => {}
        }
    }

    fn handle_bezier(&mut self, event: &InputEvent) {
        let location = event.location;
        match (self.state, event.kind) {
            (CreationState::Idle, InputKind::Press) => {
                self.nodes = vec![Node::corner(location)];
                self.pressed = true;
                self.begin();
            }
            (CreationState::Creating(_), kind) => {
                let Some(last) = self.nodes.last().copied() else {
                    return;
                };
                match kind {
                    InputKind::Press => {
                        let p = self.constrained(last.point, location, event.modifiers);
                        let placed = self.nodes.len();
                        if self.closes_at(p, placed) {
                            if let Some(start) = self.start_point() {
                                let ctrl_in = if self.prefix.is_empty() {
                                    self.nodes[0].ctrl_in
                                } else {
                                    start
                                };
                                self.nodes.push(Node {
                                    point: start,
                                    ctrl_in,
                                    ctrl_out: start,
                                });
                            }
                            self.closed = true;
                            self.finish();
                        } else {
                            self.nodes.push(Node::corner(p));
                            self.cursor = None;
                            self.pressed = true;
                        }
                    }
                    InputKind::Drag if self.pressed => {
                        let handle = self.constrained(last.point, location, event.modifiers);
                        let colinear = event.modifiers.colinear;
                        if let Some(node) = self.nodes.last_mut() {
                            node.ctrl_out = handle;
                            let pivot = node.point;
                            let kept = pivot.distance_to(&node.ctrl_in);
                            node.ctrl_in = match (pivot - handle).normalize() {
                                Some(dir) if colinear && kept > 0.0 => pivot + dir * kept,
                                _ => pivot * 2.0 - handle,
                            };
                        }
                    }
                    InputKind::Drag => {
                        self.cursor = Some(self.constrained(last.point, location, event.modifiers));
                    }
                    InputKind::Release => self.pressed = false,
                    InputKind::DoubleActivation => {
                        let keep = if self.prefix.is_empty() { 2 } else { 1 };
                        if self.nodes.len() > keep {
                            let n = self.nodes.len();
                            if self.nodes[n - 1].point.is_coincident(&self.nodes[n - 2].point) {
                                self.nodes.pop();
                            }
                        }
                        self.finish();
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_freehand(&mut self, event: &InputEvent) {
        let location = event.location;
        match (event.kind, self.pressed) {
            (InputKind::Press, false) => {
                if self.state == CreationState::Idle {
                    self.vertices = vec![location];
                } else if self
                    .vertices
                    .last()
                    .is_none_or(|last| !last.is_coincident(&location))
                {
                    self.vertices.push(location);
                }
                self.pressed = true;
                self.begin();
            }
            (InputKind::Drag, true) => {
                let far_enough = self.vertices.last().is_none_or(|last| {
                    last.distance_to(&location) >= self.options.freehand_min_spacing
                });
                if far_enough {
                    self.vertices.push(location);
                }
            }
            (InputKind::Release, true) => {
                if self
                    .vertices
                    .last()
                    .is_none_or(|last| !last.is_coincident(&location))
                {
                    self.vertices.push(location);
                }
                self.finish();
            }
            _ => {}
        }
    }

    fn handle_arc(&mut self, event: &InputEvent) {
        let location = event.location;
        if self.state == CreationState::Idle {
            if event.kind == InputKind::Press {
                self.arc = Some(ArcState {
                    center: location,
                    radius: 0.0,
                    start_angle: 0.0,
                    sweep: 0.0,
                    phase: ArcPhase::Radius,
                });
                self.begin();
            }
            return;
        }
        let Some(mut arc) = self.arc else {
            return;
        };
        let p = self.constrained(arc.center, location, event.modifiers);
        match (arc.phase, event.kind) {
            (ArcPhase::Radius, kind) => {
                let r = arc.center.distance_to(&p);
                if r > 0.0 {
                    arc.radius = r;
                    arc.start_angle = (p - arc.center).angle();
                }
                let commits = matches!(kind, InputKind::Release | InputKind::Press);
                if commits && arc.radius > 0.0 {
                    arc.phase = ArcPhase::Sweep;
                }
            }
            (ArcPhase::Sweep, kind) => {
                if !arc.center.is_coincident(&p) {
                    let angle = (p - arc.center).angle();
                    let delta = wrap_angle(angle - arc.start_angle - arc.sweep);
                    arc.sweep = (arc.sweep + delta).clamp(-TAU, TAU);
                }
                if matches!(kind, InputKind::Press | InputKind::DoubleActivation) {
                    self.closed = self.mode == CreationMode::Wedge;
                    self.arc = Some(arc);
                    self.finish();
                    return;
                }
            }
        }
        self.arc = Some(arc);
    }

    fn rebuild(&mut self) {
        let mut segs = self.prefix.clone();
        match self.mode {
            CreationMode::Line | CreationMode::Polygon => {
                segs.extend(self.polyline_body());
            }
            CreationMode::Freehand => {
                if self.state == CreationState::Done {
                    let fitted = fit_segments(&self.vertices, self.options.freehand_smoothing);
                    let skip = usize::from(!self.prefix.is_empty());
                    segs.extend(fitted.into_iter().skip(skip));
                } else {
                    segs.extend(self.polyline_body());
                }
            }
            CreationMode::Bezier => segs.extend(self.bezier_body()),
            CreationMode::Arc | CreationMode::Wedge => segs.extend(self.arc_body()),
        }
        if self.closed && segs.last().is_some_and(|s| !s.is_close()) {
            segs.push(Segment::Close);
        }
        self.path.replace_segments(segs);
    }

    fn polyline_body(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.vertices.len() + 1);
        let Some((first, rest)) = self.vertices.split_first() else {
            return out;
        };
        if self.prefix.is_empty() {
            out.push(Segment::MoveTo { to: *first });
        }
        out.extend(rest.iter().map(|&to| Segment::LineTo { to }));
        if let Some(to) = self.cursor {
            out.push(Segment::LineTo { to });
        }
        out
    }

    fn bezier_body(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.nodes.len() + 1);
        let Some(first) = self.nodes.first() else {
            return out;
        };
        if self.prefix.is_empty() {
            out.push(Segment::MoveTo { to: first.point });
        }
        for pair in self.nodes.windows(2) {
            out.push(Segment::CurveTo {
                ctrl1: pair[0].ctrl_out,
                ctrl2: pair[1].ctrl_in,
                to: pair[1].point,
            });
        }
        if let (Some(to), Some(last)) = (self.cursor, self.nodes.last()) {
            out.push(Segment::CurveTo {
                ctrl1: last.ctrl_out,
                ctrl2: to,
                to,
            });
        }
        out
    }

    fn arc_body(&self) -> Vec<Segment> {
        let Some(arc) = self.arc else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if self.mode == CreationMode::Wedge {
            out.push(Segment::MoveTo { to: arc.center });
        }
        if arc.radius <= 0.0 {
            return out;
        }
        let start = arc.center + Point::from_angle(arc.start_angle) * arc.radius;
        out.push(if out.is_empty() {
            Segment::MoveTo { to: start }
        } else {
            Segment::LineTo { to: start }
        });
        out.extend(
            arc_to_cubics(arc.center, arc.radius, arc.start_angle, arc.sweep)
                .into_iter()
                .map(|[ctrl1, ctrl2, to]| Segment::CurveTo { ctrl1, ctrl2, to }),
        );
        out
    }
}

/// Wraps an angle into (-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI {
        a - TAU
    } else {
        a
    }
}
