use drawkit_core::{PathError, Point};
use drawkit_path::{EditSession, InsertType, Path, PathHistory, PointRole};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn polyline() -> Path {
    Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0)], false)
}

#[test]
fn test_history_creation() {
    let history = PathHistory::new(50);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 0);
    assert_eq!(history.max_depth(), 50);
    assert_eq!(PathHistory::new(0).max_depth(), 1);
}

#[test]
fn test_sequence_numbers_keep_growing() {
    let mut path = polyline();
    let mut history = PathHistory::default();
    let first = history.record(&path, "first");
    path.reverse();
    let second = history.record(&path, "second");
    path.reverse();
    assert!(second > first);

    assert_eq!(history.undo(&mut path), Some(second));
    let third = history.record(&path, "third");
    assert!(third > second);
    assert_eq!(history.snapshot(first).map(|s| s.label.as_str()), Some("first"));
    assert!(history.snapshot(second).is_none());
}

#[test]
fn test_session_undo_redo_several_edits() {
    let mut session = EditSession::new(polyline(), 10);
    let original = session.path().clone();

    session
        .apply("insert", |path| {
            path.insert_point(p(5.0, 0.0), InsertType::Line, 1.0)
        })
        .unwrap();
    let after_insert = session.path().clone();
    session
        .apply("delete", |path| {
            let pc = path
                .partcode(1, PointRole::OnPath)
                .ok_or_else(|| PathError::not_found("point"))?;
            path.delete_point(pc)
        })
        .unwrap();

    assert_eq!(session.history().undo_depth(), 2);
    assert_eq!(session.history().undo_label(), Some("delete"));

    assert!(session.undo());
    assert_eq!(session.path(), &after_insert);
    assert!(session.undo());
    assert_eq!(session.path(), &original);
    assert!(!session.undo());

    assert!(session.redo());
    assert!(session.redo());
    assert!(!session.redo());
    assert_eq!(session.path().on_path_count(), 3);
    assert_eq!(session.path().id(), original.id());
}

#[test]
fn test_failed_operation_records_nothing() {
    let mut session = EditSession::new(polyline(), 10);
    let stale = session.path().partcode(1, PointRole::OnPath).unwrap();
    session
        .apply("reverse", |path| {
            path.reverse();
            Ok(())
        })
        .unwrap();

    let before = session.path().clone();
    let err = session
        .apply("delete stale", |path| path.delete_point(stale))
        .unwrap_err();
    assert!(matches!(err, PathError::NotFound { .. }));
    assert_eq!(session.path(), &before);
    assert_eq!(session.history().undo_depth(), 1);
}

#[test]
fn test_no_op_edit_is_not_recorded() {
    let mut session = EditSession::default();
    let length = session.apply("measure", |path| Ok(path.length())).unwrap();
    assert_eq!(length, 0.0);
    assert!(!session.history().can_undo());
}
