use drawkit_core::Point;
use drawkit_path::{Path, SvgPathError};
use lyon::path::PathEvent;

fn sample() -> Path {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(10.0, 0.0))
        .curve_to(Point::new(12.5, 0.0), Point::new(15.0, 2.5), Point::new(15.0, 5.0))
        .close();
    path
}

#[test]
fn test_svg_round_trip() {
    let path = sample();
    let data = path.to_svg_path_data();
    assert_eq!(data, "M 0 0 L 10 0 C 12.5 0 15 2.5 15 5 Z");
    assert_eq!(Path::from_svg_path_data(&data).unwrap(), path);
}

#[test]
fn test_compact_svg_syntax() {
    let path = Path::from_svg_path_data("M0,0H10V10h-10z M20-5l5,5").unwrap();
    assert_eq!(path.subpath_count(), 2);
    assert!((path.length() - (40.0 + 50f64.sqrt())).abs() < 1e-9);
    assert_eq!(path.end_point(), Some(Point::new(25.0, 0.0)));
}

#[test]
fn test_empty_data_gives_empty_path() {
    assert!(Path::from_svg_path_data("").unwrap().is_empty());
    assert!(Path::from_svg_path_data("  \n ").unwrap().is_empty());
}

#[test]
fn test_svg_errors() {
    assert_eq!(
        Path::from_svg_path_data("10 10"),
        Err(SvgPathError::ExpectedMoveTo("10".to_string()))
    );
    assert_eq!(
        Path::from_svg_path_data("M 0 0 A 5 5 0 0 1 10 10"),
        Err(SvgPathError::UnsupportedCommand('A'))
    );
    assert_eq!(
        Path::from_svg_path_data("M 0 0 L 3"),
        Err(SvgPathError::MissingArguments { command: 'L' })
    );
}

#[test]
fn test_lyon_events() {
    let lyon_path = sample().to_lyon_path();
    let events: Vec<_> = lyon_path.iter().collect();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], PathEvent::Begin { .. }));
    assert!(matches!(events[2], PathEvent::Cubic { .. }));
    assert!(matches!(events[3], PathEvent::End { close: true, .. }));
}

#[test]
fn test_lyon_quadratic_becomes_cubic() {
    let mut builder = lyon::path::Path::builder();
    builder.begin(lyon::math::point(0.0, 0.0));
    builder.quadratic_bezier_to(lyon::math::point(3.0, 3.0), lyon::math::point(6.0, 0.0));
    builder.end(false);
    let path = Path::from_lyon_path(&builder.build());

    assert_eq!(path.len(), 2);
    assert!(path.segments()[1].is_curve());
    assert_eq!(path.end_point(), Some(Point::new(6.0, 0.0)));
    // The apex of the quadratic is at (3, 1.5).
    assert!((path.point_at_length(path.length() / 2.0).unwrap().y - 1.5).abs() < 0.05);
}
