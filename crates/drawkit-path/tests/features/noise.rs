use drawkit_core::Point;
use drawkit_path::{add_noise, roughen, Path};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn distance_to_edge(q: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let t = ((q - a).dot(ab) / ab.dot(ab)).clamp(0.0, 1.0);
    q.distance_to(&a.lerp(b, t))
}

fn distance_to_outline(q: Point, outline: &[Point]) -> f64 {
    outline
        .iter()
        .zip(outline.iter().cycle().skip(1))
        .map(|(&a, &b)| distance_to_edge(q, a, b))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_roughened_square_stays_closed_and_near() {
    let corners = [p(0.0, 0.0), p(20.0, 0.0), p(20.0, 20.0), p(0.0, 20.0)];
    let square = Path::from_points(&corners, true);
    let rough = roughen(&square, 1.0, 11).unwrap();

    assert!(rough.is_closed());
    assert_eq!(rough.subpath_count(), 1);
    assert!(rough.on_path_count() > 4 * 5);
    for q in rough.on_path_points() {
        assert!(distance_to_outline(q, &corners) <= 1.0 + 1e-9, "{q:?} strayed");
    }
}

#[test]
fn test_roughened_polyline_keeps_its_ends() {
    let polyline = Path::from_points(&[p(0.0, 0.0), p(30.0, 0.0), p(30.0, 30.0)], false);
    let rough = roughen(&polyline, 2.0, 5).unwrap();

    assert!(!rough.is_closed());
    assert_eq!(rough.start_point(), Some(p(0.0, 0.0)));
    assert_eq!(rough.end_point(), Some(p(30.0, 30.0)));
    assert_eq!(rough, roughen(&polyline, 2.0, 5).unwrap());
}

#[test]
fn test_noise_keeps_a_returning_loop_joined() {
    let mut ring = Path::new();
    ring.move_to(p(0.0, 0.0))
        .line_to(p(10.0, 0.0))
        .line_to(p(10.0, 10.0))
        .line_to(p(0.0, 0.0))
        .close();
    let noisy = add_noise(&ring, 0.5, 99).unwrap();

    assert_eq!(noisy.len(), ring.len());
    assert_eq!(noisy.start_point(), noisy.end_point());
    for (before, after) in ring.on_path_points().into_iter().zip(noisy.on_path_points()) {
        assert!((after.x - before.x).abs() <= 0.5);
        assert!((after.y - before.y).abs() <= 0.5);
    }
}
