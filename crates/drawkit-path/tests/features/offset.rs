use std::f64::consts::FRAC_PI_2;

use drawkit_core::Point;
use drawkit_path::{arc_to_cubics, offset, outline, Path};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_straight_segment_offset_is_parallel() {
    let line = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0)], false);
    let shifted = offset(&line, 5.0, false);

    assert!((shifted.length() - 10.0).abs() < 1e-9);
    let pts = shifted.on_path_points();
    assert_eq!(pts.len(), 2);
    for (orig, moved) in line.on_path_points().iter().zip(&pts) {
        assert!((moved.distance_to(orig) - 5.0).abs() < 1e-9);
        assert!((moved.x - orig.x).abs() < 1e-9);
    }
}

#[test]
fn test_sharp_corner_is_bevelled() {
    // A left turn of about 154 degrees: on its outer (right) side the miter
    // would reach beyond the limit.
    let path = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(1.0, 4.359)], false);
    let result = offset(&path, -1.0, false);
    assert_eq!(result.on_path_count(), 4);
    let pts = result.on_path_points();
    assert!(pts[1].distance_to(&p(10.0, -1.0)) < 1e-6);

    let right_angle = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)], false);
    let mitred = offset(&right_angle, -1.0, false).on_path_points();
    assert_eq!(mitred.len(), 3);
    assert!(mitred[1].distance_to(&p(11.0, -1.0)) < 1e-9);
}

#[test]
fn test_smooth_offset_of_arc() {
    let mut arc = Path::new();
    arc.move_to(p(10.0, 0.0));
    for [c1, c2, to] in arc_to_cubics(Point::ZERO, 10.0, 0.0, FRAC_PI_2) {
        arc.curve_to(c1, c2, to);
    }

    let flat = offset(&arc, 2.0, false);
    assert!(flat.segments().iter().all(|s| !s.is_curve()));

    let smooth = offset(&arc, 2.0, true);
    assert!(smooth.segments().iter().skip(1).all(|s| s.is_curve()));
    assert!(smooth.len() < flat.len());
    for pt in smooth.on_path_points() {
        assert!((pt.length() - 8.0).abs() < 0.6, "point {pt:?} off the inner arc");
    }
}

#[test]
fn test_each_subpath_is_offset() {
    let mut path = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0)], false);
    path.append(&Path::from_points(&[p(0.0, 20.0), p(10.0, 20.0)], false));
    let result = offset(&path, -1.0, false);
    assert_eq!(result.subpath_count(), 2);
    let expected = [p(0.0, -1.0), p(10.0, -1.0), p(0.0, 19.0), p(10.0, 19.0)];
    let pts = result.on_path_points();
    assert_eq!(pts.len(), expected.len());
    for (got, want) in pts.iter().zip(&expected) {
        assert!(got.distance_to(want) < 1e-9, "{got:?} != {want:?}");
    }
}

#[test]
fn test_outline_of_polyline_encloses_stroke() {
    let path = Path::from_points(&[p(0.0, 0.0), p(20.0, 0.0), p(20.0, 20.0)], false);
    let shape = outline(&path, 4.0);
    assert_eq!(shape.subpath_count(), 1);
    assert!(shape.is_closed());

    let b = shape.bounds();
    assert!((b.min_x - 0.0).abs() < 1e-9);
    assert!((b.min_y + 2.0).abs() < 1e-9);
    assert!((b.max_x - 22.0).abs() < 1e-9);
    assert!((b.max_y - 20.0).abs() < 1e-9);

    // Every point of the outline is half the width away from the centre line.
    for pt in shape.on_path_points() {
        let hit = path.nearest_point(pt).unwrap();
        assert!(hit.distance <= 2.0 * std::f64::consts::SQRT_2 + 1e-9);
        assert!(hit.distance >= 2.0 - 1e-9);
    }
}
