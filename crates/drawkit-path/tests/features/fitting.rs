use std::f64::consts::TAU;

use drawkit_core::Point;
use drawkit_path::{fit_freehand, smooth, Path, DEFAULT_SMOOTHING};

fn circle_samples(radius: f64, count: usize) -> Vec<Point> {
    (0..=count)
        .map(|i| {
            let a = TAU * i as f64 / count as f64;
            Point::new(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

fn max_deviation(path: &Path, samples: &[Point]) -> f64 {
    samples
        .iter()
        .filter_map(|s| path.nearest_point(*s))
        .map(|hit| hit.distance)
        .fold(0.0, f64::max)
}

#[test]
fn test_circle_fit_uses_few_curves() {
    let samples = circle_samples(50.0, 120);
    let path = fit_freehand(&samples, DEFAULT_SMOOTHING);
    assert!(path.segments().iter().skip(1).all(|s| s.is_curve()));
    assert!(path.len() < samples.len() / 4);
    assert!(max_deviation(&path, &samples) <= DEFAULT_SMOOTHING + 0.5);
}

#[test]
fn test_tighter_smoothing_follows_input_closer() {
    let samples = circle_samples(50.0, 120);
    let loose = fit_freehand(&samples, 20.0);
    let tight = fit_freehand(&samples, 0.05);
    assert!(tight.len() >= loose.len());
    assert!(max_deviation(&tight, &samples) < 0.5);
}

#[test]
fn test_duplicate_samples_are_ignored() {
    let mut samples = Vec::new();
    for i in 0..20 {
        let p = Point::new(i as f64 * 2.0, (i as f64 * 0.3).sin() * 5.0);
        samples.push(p);
        samples.push(p);
    }
    let doubled = fit_freehand(&samples, 1.0);
    samples.dedup();
    let single = fit_freehand(&samples, 1.0);
    assert_eq!(doubled, single);
}

#[test]
fn test_smooth_polyline_keeps_ends() {
    let zigzag = Path::from_points(
        &[
            Point::new(0.0, 0.0),
            Point::new(10.0, 3.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 3.0),
            Point::new(40.0, 0.0),
        ],
        false,
    );
    let smoothed = smooth(&zigzag, 5.0);
    assert_eq!(smoothed.start_point(), zigzag.start_point());
    assert_eq!(smoothed.end_point(), zigzag.end_point());
    assert!(!smoothed.is_closed());
    assert!(smoothed.segments()[1].is_curve());
    assert!(max_deviation(&smoothed, &zigzag.on_path_points()) <= 5.5);
}
