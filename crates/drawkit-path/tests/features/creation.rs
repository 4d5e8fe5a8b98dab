use std::f64::consts::{FRAC_PI_2, PI};

use drawkit_core::{PathError, Point};
use drawkit_path::{
    CreationMode, CreationOptions, CreationState, InputEvent, Modifiers, Path, PathCreator,
    Segment,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn click(creator: &mut PathCreator, at: Point) -> CreationState {
    creator.handle(InputEvent::press(at)).unwrap();
    creator.handle(InputEvent::release(at)).unwrap()
}

#[test]
fn test_arc_follows_sweep_past_half_turn() {
    let mut c = PathCreator::new(CreationMode::Arc, CreationOptions::default());
    c.handle(InputEvent::press(p(0.0, 0.0))).unwrap();
    c.handle(InputEvent::drag(p(10.0, 0.0))).unwrap();
    c.handle(InputEvent::release(p(10.0, 0.0))).unwrap();
    for at in [p(0.0, 10.0), p(-10.0, 0.0), p(0.0, -10.0)] {
        c.handle(InputEvent::drag(at)).unwrap();
    }
    assert_eq!(c.state(), CreationState::Creating(CreationMode::Arc));
    assert_eq!(
        c.handle(InputEvent::press(p(0.0, -10.0))).unwrap(),
        CreationState::Done
    );

    let arc = c.into_path().unwrap();
    assert!(!arc.is_closed());
    assert_eq!(arc.start_point(), Some(p(10.0, 0.0)));
    assert!(arc.end_point().unwrap().distance_to(&p(0.0, -10.0)) < 1e-9);
    assert!((arc.length() - 1.5 * PI * 10.0).abs() < 0.1);
}

#[test]
fn test_quarter_arc_is_one_curve() {
    let mut c = PathCreator::new(CreationMode::Arc, CreationOptions::default());
    c.handle(InputEvent::press(p(0.0, 0.0))).unwrap();
    c.handle(InputEvent::release(p(10.0, 0.0))).unwrap();
    c.handle(InputEvent::drag(p(0.0, 10.0))).unwrap();
    c.handle(InputEvent::press(p(0.0, 10.0))).unwrap();
    let arc = c.into_path().unwrap();
    assert_eq!(arc.len(), 2);
    assert!(arc.segments()[1].is_curve());
}

#[test]
fn test_bezier_closes_on_start_point() {
    let mut c = PathCreator::new(CreationMode::Bezier, CreationOptions::default());
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(10.0, 0.0));
    click(&mut c, p(10.0, 10.0));
    assert_eq!(
        c.handle(InputEvent::press(p(0.5, 0.5))).unwrap(),
        CreationState::Done
    );
    let path = c.into_path().unwrap();
    assert!(path.is_closed());
    assert_eq!(path.len(), 5);
    assert_eq!(path.segments()[3].end_point(), Some(p(0.0, 0.0)));
    assert_eq!(path.segments()[4], Segment::Close);
}

#[test]
fn test_preview_tracks_rubber_band() {
    let mut c = PathCreator::new(CreationMode::Polygon, CreationOptions::default());
    click(&mut c, p(0.0, 0.0));
    c.handle(InputEvent::drag(p(5.0, 5.0))).unwrap();
    assert_eq!(c.path().end_point(), Some(p(5.0, 5.0)));
    c.handle(InputEvent::drag(p(8.0, 2.0))).unwrap();
    assert_eq!(c.path().end_point(), Some(p(8.0, 2.0)));
    assert_eq!(c.path().on_path_count(), 2);
    assert!(c.into_path().is_none());
}

#[test]
fn test_constraint_angle_comes_from_options() {
    let options = CreationOptions {
        constraint_angle: FRAC_PI_2,
        ..CreationOptions::default()
    };
    let constrain = Modifiers {
        constrain: true,
        colinear: false,
    };
    let mut c = PathCreator::new(CreationMode::Line, options);
    c.handle(InputEvent::press(p(0.0, 0.0))).unwrap();
    c.handle(InputEvent::release(p(0.0, 0.0))).unwrap();
    c.handle(InputEvent::press(p(6.0, 8.0)).with_modifiers(constrain))
        .unwrap();
    let end = c.into_path().unwrap().end_point().unwrap();
    // 53 degrees snaps to 90 with the distance kept.
    assert!(end.distance_to(&p(0.0, 10.0)) < 1e-9);
}

#[test]
fn test_freehand_drops_close_samples() {
    let mut c = PathCreator::new(CreationMode::Freehand, CreationOptions::default());
    c.handle(InputEvent::press(p(0.0, 0.0))).unwrap();
    c.handle(InputEvent::drag(p(0.2, 0.0))).unwrap();
    c.handle(InputEvent::drag(p(0.4, 0.1))).unwrap();
    c.handle(InputEvent::drag(p(2.0, 0.0))).unwrap();
    assert_eq!(c.path().on_path_count(), 2);
}

#[test]
fn test_zero_length_result_is_discarded() {
    let mut c = PathCreator::new(CreationMode::Line, CreationOptions::default());
    c.handle(InputEvent::press(p(3.0, 3.0))).unwrap();
    c.handle(InputEvent::press(p(3.0, 3.0))).unwrap();
    assert!(c.is_done());
    assert!(c.into_path().is_none());
}

#[test]
fn test_extending_rules() {
    let open = Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0)], false);
    for mode in [CreationMode::Arc, CreationMode::Wedge] {
        assert!(matches!(
            PathCreator::extending(&open, mode, CreationOptions::default()),
            Err(PathError::InvalidState { .. })
        ));
    }
    assert!(matches!(
        PathCreator::extending(&Path::new(), CreationMode::Line, CreationOptions::default()),
        Err(PathError::InvalidState { .. })
    ));

    let mut c =
        PathCreator::extending(&open, CreationMode::Freehand, CreationOptions::default()).unwrap();
    c.handle(InputEvent::press(p(10.0, 0.0))).unwrap();
    for i in 1..=20 {
        c.handle(InputEvent::drag(p(10.0 + i as f64, (i as f64 / 3.0).sin())))
            .unwrap();
    }
    c.handle(InputEvent::release(p(30.0, 0.0))).unwrap();
    let path = c.into_path().unwrap();
    assert_eq!(path.id(), open.id());
    assert_eq!(path.subpath_count(), 1);
    assert_eq!(&path.segments()[..2], open.segments());
    assert_eq!(path.end_point(), Some(p(30.0, 0.0)));
}
