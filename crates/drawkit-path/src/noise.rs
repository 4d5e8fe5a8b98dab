//! Random distortion of paths.
//!
//! Both operations take a seed so a distortion can be reproduced, e.g. when
//! an undo snapshot is replayed.

use std::collections::HashMap;

use drawkit_core::{PathError, PathResult, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::model::{Path, Segment};
use crate::offset::flattened_subpaths;

/// Shortest spacing between the samples of a roughened edge.
const MIN_ROUGHEN_SPACING: f64 = 1.0;

fn check_amount(amount: f64) -> PathResult<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(PathError::ArgumentOutOfRange {
            value: amount,
            min: 0.0,
            max: f64::INFINITY,
        })
    }
}

/// Moves every point of `path`, control points included, by up to `amount`
/// along each axis.
///
/// Points that coincide exactly before the call move together, so shared
/// vertices and closed loops stay joined. The segment structure is kept.
pub fn add_noise(path: &Path, amount: f64, seed: u64) -> PathResult<Path> {
    check_amount(amount)?;
    if amount == 0.0 {
        return Ok(path.clone());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut moved: HashMap<(u64, u64), Point> = HashMap::new();
    let noisy = path.map_points(|p| {
        *moved.entry((p.x.to_bits(), p.y.to_bits())).or_insert_with(|| {
            Point::new(
                p.x + rng.gen_range(-amount..=amount),
                p.y + rng.gen_range(-amount..=amount),
            )
        })
    });
    debug!("Added noise of {:.3} to path {}", amount, path.id());
    Ok(noisy)
}

/// Replaces every subpath by a jagged polyline wandering up to `amount` to
/// either side of it.
///
/// Edges are resampled every `2 * amount` units (at least one unit) and each
/// sample is pushed along the edge normal. The ends of open subpaths stay in
/// place; closed subpaths stay closed.
pub fn roughen(path: &Path, amount: f64, seed: u64) -> PathResult<Path> {
    check_amount(amount)?;
    if amount == 0.0 {
        return Ok(path.clone());
    }

    let spacing = (amount * 2.0).max(MIN_ROUGHEN_SPACING);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();

    for (points, closed) in flattened_subpaths(path) {
        let edge_count = if closed { points.len() } else { points.len() - 1 };
        let mut rough: Vec<Point> = Vec::new();
        for i in 0..edge_count {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            let Some(dir) = (b - a).normalize() else {
                continue;
            };
            let normal = Point::new(-dir.y, dir.x);
            let steps = (a.distance_to(&b) / spacing).ceil().max(1.0) as usize;
            for step in 0..steps {
                let sample = a.lerp(b, step as f64 / steps as f64);
                let pinned = !closed && i == 0 && step == 0;
                rough.push(if pinned {
                    sample
                } else {
                    sample + normal * rng.gen_range(-amount..=amount)
                });
            }
        }
        if !closed {
            rough.push(points[points.len() - 1]);
        }

        let Some((&first, rest)) = rough.split_first() else {
            continue;
        };
        out.push(Segment::MoveTo { to: first });
        out.extend(rest.iter().map(|&to| Segment::LineTo { to }));
        if closed {
            out.push(Segment::Close);
        }
    }

    debug!(
        "Roughened path {} by {:.3} into {} segments",
        path.id(),
        amount,
        out.len()
    );
    Ok(Path::from_raw(out))
}
