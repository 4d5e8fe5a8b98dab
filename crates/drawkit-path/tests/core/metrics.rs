use std::f64::consts::{FRAC_PI_2, PI};

use drawkit_core::{PathError, Point};
use drawkit_path::{arc_to_cubics, Path, PathMetrics};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn straight_line() -> Path {
    Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0)], false)
}

fn quarter_circle(radius: f64) -> Path {
    let mut path = Path::new();
    path.move_to(p(radius, 0.0));
    for [c1, c2, to] in arc_to_cubics(Point::ZERO, radius, 0.0, FRAC_PI_2) {
        path.curve_to(c1, c2, to);
    }
    path
}

#[test]
fn test_straight_line_length_and_projection() {
    let line = straight_line();
    assert_eq!(line.length(), 10.0);
    assert_eq!(line.length_for_point(p(5.0, 3.0), 4.0), Some(5.0));
    assert_eq!(line.length_for_point(p(5.0, 10.0), 4.0), None);
}

#[test]
fn test_default_tolerance_from_stroke() {
    let line = straight_line();
    // A thin stroke still gets the four unit floor.
    assert_eq!(line.length_for_point_default(p(5.0, 3.5), 0.5), Some(5.0));
    assert_eq!(line.length_for_point_default(p(5.0, 4.5), 0.5), None);
    assert_eq!(line.length_for_point_default(p(5.0, 7.0), 2.0), Some(5.0));
}

#[test]
fn test_closed_path_counts_closing_line() {
    let square = Path::from_points(
        &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
        true,
    );
    assert!((square.length() - 40.0).abs() < 1e-9);
    let back = square.length_for_point(p(-1.0, 5.0), 2.0).unwrap();
    assert!((back - 35.0).abs() < 1e-9);
}

#[test]
fn test_curve_length_matches_arc() {
    let arc = quarter_circle(10.0);
    let expected = PI * 10.0 / 2.0;
    assert!((arc.length() - expected).abs() < 0.05);

    let coarse = PathMetrics::new(1.0).length(&arc);
    let fine = PathMetrics::new(0.001).length(&arc);
    assert!(coarse <= fine + 1e-9);
    assert!((fine - expected).abs() < 0.01);
}

#[test]
fn test_point_at_length() {
    let path = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)], false);
    assert_eq!(path.point_at_length(0.0).unwrap(), p(0.0, 0.0));
    assert_eq!(path.point_at_length(15.0).unwrap(), p(10.0, 5.0));
    assert_eq!(path.point_at_length(20.0).unwrap(), p(10.0, 10.0));

    assert!(matches!(
        path.point_at_length(20.5),
        Err(PathError::ArgumentOutOfRange { .. })
    ));
    assert!(matches!(
        path.point_at_length(-0.1),
        Err(PathError::ArgumentOutOfRange { .. })
    ));
}

#[test]
fn test_slope_and_segment_length() {
    let metrics = PathMetrics::default();
    let path = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)], false);
    assert!(metrics.slope_at_length(&path, 5.0).unwrap().abs() < 1e-12);
    assert!((metrics.slope_at_length(&path, 15.0).unwrap() - FRAC_PI_2).abs() < 1e-12);
    assert_eq!(metrics.segment_length(&path, 0), 0.0);
    assert_eq!(metrics.segment_length(&path, 2), 10.0);
}

#[test]
fn test_nearest_point_reports_segment() {
    let path = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)], false);
    let hit = path.nearest_point(p(12.0, 7.0)).unwrap();
    assert_eq!(hit.segment, 2);
    assert!(hit.point.distance_to(&p(10.0, 7.0)) < 1e-9);
    assert!((hit.distance - 2.0).abs() < 1e-9);
    assert!((hit.length - 17.0).abs() < 1e-9);
}

#[test]
fn test_empty_path_metrics() {
    let empty = Path::new();
    assert_eq!(empty.length(), 0.0);
    assert!(empty.nearest_point(p(0.0, 0.0)).is_none());
    assert!(empty.length_for_point(p(0.0, 0.0), 100.0).is_none());
    assert!(empty.point_at_length(0.0).is_err());
}
