//! Angular constraint for interactive point placement.

use drawkit_core::Point;

/// Conventional constraint step: 45 degrees.
pub const DEFAULT_CONSTRAINT_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Snaps the direction from `previous` to `raw` to the nearest multiple of
/// `angle` (radians), keeping the distance from `previous`.
///
/// A non-positive angle or a zero-length move returns `raw` unchanged.
pub fn constrain_to_angle(previous: Point, raw: Point, angle: f64) -> Point {
    if !(angle.is_finite() && angle > 0.0) {
        return raw;
    }
    let v = raw - previous;
    let radius = v.length();
    if radius <= f64::EPSILON {
        return raw;
    }
    let snapped = (v.angle() / angle).round() * angle;
    previous + Point::from_angle(snapped) * radius
}
