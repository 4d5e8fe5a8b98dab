use serde::{Deserialize, Serialize};
use std::fmt;

use super::PathId;

/// Which point of a segment a partcode refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRole {
    /// The segment's end point, lying on the path.
    OnPath,
    /// First bezier control point (leaving the previous on-path point).
    Control1,
    /// Second bezier control point (arriving at this segment's end point).
    Control2,
}

impl PointRole {
    pub fn is_on_path(&self) -> bool {
        matches!(self, PointRole::OnPath)
    }
}

/// Identifies one point of one segment of a specific path.
///
/// Partcodes are issued by a [`Path`](super::Path) and carry its id and
/// structure generation. Any structural edit (deleting or inserting points
/// and segments, joining, combining) moves the path to a new generation,
/// after which older partcodes no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartCode {
    pub(crate) path: PathId,
    pub(crate) generation: u64,
    pub segment: usize,
    pub role: PointRole,
}

impl PartCode {
    pub fn is_on_path(&self) -> bool {
        self.role.is_on_path()
    }

    pub fn path_id(&self) -> PathId {
        self.path
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for PartCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{} (gen {})",
            self.role, self.segment, self.generation
        )
    }
}
