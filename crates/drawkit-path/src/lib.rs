//! # DrawKit Path
//!
//! Vector path geometry and editing, independent of any UI toolkit.
//!
//! ## Core Components
//!
//! ### Path model
//! - **Path**: ordered move/line/curve/close segments with a stable identity
//! - **PartCode**: structured reference to one on-path or control point,
//!   stamped with the path's structure generation
//!
//! ### Geometry
//! - **Metrics**: length, nearest point, length <-> point mapping
//! - **Editing**: delete/insert/move points, delete segments, break apart,
//!   combine and divide
//! - **Joining**: open paths end to end with optional tangent continuity
//! - **Fitting**: freehand strokes to smooth cubic curves
//! - **Offsets**: parallel paths with mitred corners, and stroke outlines
//! - **Noise**: seeded random jitter and roughening
//!
//! ### Interaction
//! - **Creation**: an explicit state machine turning pointer events into paths
//! - **Hit testing**: points near a location, with on/off-path priority
//! - **History**: bounded snapshot undo/redo and all-or-nothing edit sessions
//!
//! ## Architecture
//!
//! ```text
//! Path (value type)
//!   ├── metrics / hit        queries
//!   ├── editor / joiner      structural edits (bump the generation)
//!   └── interop              lyon, SVG path data, JSON
//!
//! fit / offset / noise       free functions producing new paths
//! constrain                  angle snapping
//! creation                   PathCreator state machine
//! history                    PathHistory, EditSession
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use drawkit_path::{Path, PathMetrics};
//! use drawkit_core::Point;
//!
//! let line = Path::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], false);
//! assert_eq!(PathMetrics::default().length(&line), 10.0);
//! assert_eq!(line.length_for_point(Point::new(5.0, 3.0), 4.0), Some(5.0));
//! ```

pub mod bezier;
pub mod constrain;
pub mod creation;
pub mod editor;
pub mod fit;
pub mod history;
pub mod hit;
pub mod interop;
pub mod joiner;
pub mod metrics;
pub mod model;
pub mod noise;
pub mod offset;

pub use bezier::{arc_to_cubics, Cubic};
pub use constrain::{constrain_to_angle, DEFAULT_CONSTRAINT_ANGLE};
pub use creation::{
    CreationMode, CreationOptions, CreationState, InputEvent, InputKind, Modifiers, PathCreator,
};
pub use editor::{InsertType, MoveOptions};
pub use fit::{fit_freehand, smooth, DEFAULT_SMOOTHING};
pub use history::{EditSession, PathHistory, Snapshot, DEFAULT_HISTORY_DEPTH};
pub use hit::HitPriority;
pub use interop::SvgPathError;
pub use joiner::JoinResult;
pub use metrics::{default_tolerance, PathHit, PathMetrics, DEFAULT_FLATNESS, MIN_HIT_TOLERANCE};
pub use model::{validate_segments, PartCode, Path, PathId, PointRole, Segment, SegmentKind, Subpath};
pub use noise::{add_noise, roughen};
pub use offset::{offset, outline, MITER_LIMIT};
