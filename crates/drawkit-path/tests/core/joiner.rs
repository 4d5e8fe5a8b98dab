use drawkit_core::Point;
use drawkit_path::{JoinResult, Path, Segment};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn line(a: Point, b: Point) -> Path {
    Path::from_points(&[a, b], false)
}

#[test]
fn test_append_across_small_gap() {
    let mut a = line(p(0.0, 0.0), p(10.0, 0.0));
    let b = line(p(10.1, 0.0), p(20.0, 0.0));
    let expected_len = a.len() + b.len();

    assert_eq!(a.would_join(&b, 0.5), JoinResult::AppendedOther);
    assert_eq!(a.join(&b, 0.5, false), JoinResult::AppendedOther);
    assert_eq!(a.len(), expected_len);
    assert_eq!(a.subpath_count(), 1);
    assert_eq!(a.end_point(), Some(p(20.0, 0.0)));
}

#[test]
fn test_out_of_tolerance_does_not_join() {
    let mut a = line(p(0.0, 0.0), p(10.0, 0.0));
    let b = line(p(11.0, 0.0), p(20.0, 0.0));
    let before = a.clone();
    assert_eq!(a.would_join(&b, 0.5), JoinResult::NoJoin);
    assert_eq!(a.join(&b, 0.5, true), JoinResult::NoJoin);
    assert_eq!(a, before);
}

#[test]
fn test_coincident_ends_share_the_vertex() {
    let mut a = line(p(0.0, 0.0), p(10.0, 0.0));
    let b = line(p(10.0, 0.0), p(10.0, 10.0));
    assert_eq!(a.join(&b, 0.5, false), JoinResult::AppendedOther);
    assert_eq!(
        a.on_path_points(),
        vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]
    );
}

#[test]
fn test_reversed_other_is_prepended() {
    // Start meets start: the other path is reversed and goes in front.
    let mut a = line(p(0.0, 0.0), p(10.0, 0.0));
    let b = line(p(0.0, 0.0), p(0.0, -10.0));
    assert_eq!(a.would_join(&b, 0.5), JoinResult::PrependedOther);
    a.join(&b, 0.5, false);
    assert_eq!(a.start_point(), Some(p(0.0, -10.0)));
    assert_eq!(a.end_point(), Some(p(10.0, 0.0)));
    assert_eq!(a.on_path_count(), 3);
}

#[test]
fn test_both_ends_close_the_loop() {
    let mut a = line(p(0.0, 0.0), p(10.0, 0.0));
    let mut b = Path::new();
    b.move_to(p(10.0, 0.0))
        .line_to(p(5.0, 8.0))
        .line_to(p(0.0, 0.0));
    assert_eq!(a.join(&b, 0.5, true), JoinResult::BothEndsJoined);
    assert!(a.is_closed());
    assert_eq!(a.segments().last(), Some(&Segment::Close));

    let other = line(p(20.0, 0.0), p(30.0, 0.0));
    assert_eq!(a.would_join(&other, 100.0), JoinResult::NoJoin);
}

#[test]
fn test_colinear_join_smooths_curves() {
    let mut a = Path::new();
    a.move_to(p(0.0, 0.0))
        .curve_to(p(0.0, 5.0), p(10.0, 5.0), p(10.0, 0.0));
    let mut b = Path::new();
    b.move_to(p(10.0, 0.0))
        .curve_to(p(15.0, 0.0), p(20.0, 5.0), p(20.0, 0.0));

    let mut smooth = a.clone();
    smooth.join(&b, 0.1, true);
    let (c_in, c_out) = match (smooth.segments()[1], smooth.segments()[2]) {
        (Segment::CurveTo { ctrl2, .. }, Segment::CurveTo { ctrl1, .. }) => (ctrl2, ctrl1),
        other => panic!("unexpected segments {other:?}"),
    };
    let v = p(10.0, 0.0);
    let cross = (v - c_in).cross(c_out - v);
    assert!(cross.abs() < 1e-9);

    let mut sharp = a;
    sharp.join(&b, 0.1, false);
    assert_eq!(sharp.segments()[2], b.segments()[1]);
}

#[test]
fn test_bridged_colinear_join_is_tangent_continuous() {
    let mut a = Path::new();
    a.move_to(p(0.0, 0.0))
        .curve_to(p(0.0, 5.0), p(10.0, 5.0), p(10.0, 0.0));
    let mut b = Path::new();
    b.move_to(p(10.1, 0.0))
        .curve_to(p(15.0, -5.0), p(20.0, -5.0), p(20.0, 0.0));
    let expected_len = a.len() + b.len();

    assert_eq!(a.join(&b, 0.5, true), JoinResult::AppendedOther);
    assert_eq!(a.len(), expected_len);
    let (c_in, c_out) = match (a.segments()[1], a.segments()[3]) {
        (Segment::CurveTo { ctrl2, .. }, Segment::CurveTo { ctrl1, .. }) => (ctrl2, ctrl1),
        other => panic!("unexpected segments {other:?}"),
    };
    let bridge = p(10.1, 0.0) - p(10.0, 0.0);
    assert!((p(10.0, 0.0) - c_in).cross(bridge).abs() < 1e-9);
    assert!((c_out - p(10.1, 0.0)).cross(bridge).abs() < 1e-9);
}

#[test]
fn test_closed_first_subpath_keeps_its_loop() {
    let mut a = Path::new();
    a.move_to(p(0.0, 0.0))
        .line_to(p(10.0, 0.0))
        .line_to(p(10.0, 10.0))
        .close()
        .move_to(p(20.0, 0.0))
        .line_to(p(30.0, 0.0));
    let before = a.clone();
    let b = line(p(-5.0, 0.0), p(0.0, 0.0));

    assert_eq!(a.would_join(&b, 0.5), JoinResult::NoJoin);
    assert_eq!(b.would_join(&a, 0.5), JoinResult::NoJoin);
    assert_eq!(a.join(&b, 0.5, false), JoinResult::NoJoin);
    assert_eq!(a, before);
}
