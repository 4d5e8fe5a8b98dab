//! # DrawKit
//!
//! A toolkit-independent vector path geometry and editing core:
//! - Path model with stable identities and generation-stamped partcodes
//! - Length, nearest point and length <-> point queries
//! - Point and segment editing, joining, dividing and combining
//! - Freehand curve fitting and parallel offsets
//! - An explicit state machine for interactive path creation
//! - Snapshot undo history
//!
//! ## Architecture
//!
//! DrawKit is organized as a workspace with multiple crates:
//!
//! 1. **drawkit-core** - Error types and plain geometry (`Point`, `Bounds`)
//! 2. **drawkit-path** - Path model, metrics, editing, fitting, creation, history
//! 3. **drawkit-settings** - Configuration sections and their persistence
//! 4. **drawkit** - This facade: re-exports and logging setup

pub use drawkit_core::{
    Bounds, ConfigError, Error, PathError, PathResult, Point, Result, COINCIDENCE_EPSILON,
};

pub use drawkit_path::{
    add_noise, arc_to_cubics, constrain_to_angle, default_tolerance, fit_freehand, offset, outline,
    roughen, smooth, CreationMode, CreationOptions, CreationState, Cubic, EditSession,
    HitPriority, InputEvent, InputKind, InsertType, JoinResult, Modifiers, MoveOptions, PartCode,
    Path, PathCreator, PathHistory, PathHit, PathId, PathMetrics, PointRole, Segment, SegmentKind,
    Snapshot, Subpath, SvgPathError, DEFAULT_CONSTRAINT_ANGLE, DEFAULT_FLATNESS,
    DEFAULT_HISTORY_DEPTH, DEFAULT_SMOOTHING, MITER_LIMIT,
};

pub use drawkit_settings::{
    Config, CreationSettings, HistorySettings, HitTestingSettings, JoinSettings, MetricsSettings,
    SettingsError, SettingsStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Like [`init_logging`], but emits one JSON object per event.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
