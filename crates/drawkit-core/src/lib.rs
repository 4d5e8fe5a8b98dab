//! # DrawKit Core
//!
//! Core types shared by the DrawKit crates: the unified error types and the
//! plain geometry data (points and bounds) every path operation is built on.

pub mod error;
pub mod geometry;

pub use error::{ConfigError, Error, PathError, PathResult, Result};
pub use geometry::{Bounds, Point, COINCIDENCE_EPSILON};
