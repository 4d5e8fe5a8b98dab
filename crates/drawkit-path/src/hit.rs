//! Point hit testing.

use drawkit_core::Point;
use serde::{Deserialize, Serialize};

use crate::model::{PartCode, Path};

/// Which kind of point wins when on-path and control points are both hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitPriority {
    /// Control points are tested first.
    #[default]
    OffPath,
    /// On-path points are tested first.
    OnPath,
}

impl HitPriority {
    pub fn from_on_path_flag(on_path_priority: bool) -> Self {
        if on_path_priority {
            HitPriority::OnPath
        } else {
            HitPriority::OffPath
        }
    }
}

impl Path {
    /// The partcode of the point nearest to `location` within `tolerance`.
    ///
    /// Points of the preferred kind are searched first; the other kind is
    /// only considered when none of them is close enough.
    pub fn hit_test(&self, location: Point, tolerance: f64, priority: HitPriority) -> Option<PartCode> {
        let candidates: Vec<(PartCode, f64)> = self
            .partcodes()
            .into_iter()
            .filter_map(|pc| {
                let p = self.point_for_partcode(pc).ok()?;
                let d = p.distance_to(&location);
                (d <= tolerance).then_some((pc, d))
            })
            .collect();

        let prefer_on_path = priority == HitPriority::OnPath;
        let nearest = |on_path: bool| {
            candidates
                .iter()
                .filter(|(pc, _)| pc.is_on_path() == on_path)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(pc, _)| *pc)
        };
        nearest(prefer_on_path).or_else(|| nearest(!prefer_on_path))
    }
}
