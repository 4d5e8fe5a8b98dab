use std::fs;

use drawkit_core::{Error, PathError, Point};
use drawkit_path::{EditSession, Path, Segment};
use tempfile::tempdir;

fn sample() -> Path {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0))
        .curve_to(Point::new(0.0, 5.0), Point::new(5.0, 5.0), Point::new(5.0, 0.0))
        .close()
        .move_to(Point::new(10.0, 0.0))
        .line_to(Point::new(20.0, 0.0));
    path
}

#[test]
fn test_json_file_round_trip_keeps_identity() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("path.json");
    let path = sample();

    fs::write(&file, path.to_json().unwrap()).unwrap();
    let loaded = Path::from_json(&fs::read_to_string(&file).unwrap()).unwrap();

    assert_eq!(loaded, path);
    assert_eq!(loaded.id(), path.id());
    assert!(loaded.is_closed() == path.is_closed());
}

#[test]
fn test_json_uses_tagged_segments() {
    let json = Path::from_points(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)], true)
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let segments = value["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0]["type"], "move_to");
    assert_eq!(segments[1]["to"]["x"], 3.0);
    assert_eq!(segments[2]["type"], "close");
    assert!(value.get("generation").is_none());
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = Path::from_json(r#"{"segments": [{"type": "line_to", "to": {"x": 1.0, "y": 0.0}}]}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Path(PathError::InvalidState { .. })));

    let err = Path::from_json("not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_missing_id_gets_a_fresh_one() {
    let a = Path::from_json(r#"{"segments": [{"type": "move_to", "to": {"x": 0.0, "y": 0.0}}]}"#)
        .unwrap();
    let b = Path::from_json(r#"{"segments": [{"type": "move_to", "to": {"x": 0.0, "y": 0.0}}]}"#)
        .unwrap();
    assert_eq!(a, b);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.segments(), &[Segment::move_to(Point::ZERO)]);
}

#[test]
fn test_saved_session_path_reloads() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("edited.json");

    let mut session = EditSession::new(sample(), 10);
    session
        .apply("drop second subpath", |path| path.delete_segment(4))
        .unwrap();
    fs::write(&file, session.path().to_json().unwrap()).unwrap();

    let reloaded = Path::from_json(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(&reloaded, session.path());
    assert_eq!(reloaded.subpath_count(), 1);
}
