use {
    crate::{
        smoother::{PointSmoother, SmootherSet},
        types::PredictedPoint,
    },
    base::Vec2,
};

fn point(x: f32, y: f32, confidence: f32) -> Option<PredictedPoint> {
    Some(PredictedPoint::new(0, Vec2::new(x, y), confidence))
}

#[test]
fn test_single_add_is_exact() {
    let mut smoother = PointSmoother::new(3);
    smoother.add(point(12.25, 7.5, 0.6));
    assert_eq!(smoother.averaged_value(), point(12.25, 7.5, 0.6));
}

#[test]
fn test_window_keeps_last_three() {
    let mut smoother = PointSmoother::new(3);
    for i in 1..=5 {
        smoother.add(point(i as f32 * 10.0, i as f32, 0.5));
    }
    assert_eq!(smoother.len(), 3);
    let avg = smoother.averaged_value().unwrap();
    // mean of frames 3, 4, 5
    assert_eq!(avg.position, Vec2::new(40.0, 4.0));
    assert_eq!(avg.confidence, 0.5);
}

#[test]
fn test_empty_window_has_no_average() {
    assert!(PointSmoother::default().averaged_value().is_none());
}

#[test]
fn test_absent_point_occupies_a_slot() {
    let mut smoother = PointSmoother::new(3);
    smoother.add(point(0.0, 0.0, 1.0));
    smoother.add(point(6.0, 3.0, 1.0));
    smoother.add(None);
    assert_eq!(smoother.averaged_value().unwrap().position, Vec2::new(3.0, 1.5));

    // pushes out the first point
    smoother.add(None);
    assert_eq!(smoother.averaged_value().unwrap().position, Vec2::new(6.0, 3.0));

    smoother.add(None);
    assert!(smoother.averaged_value().is_none());
    assert_eq!(smoother.len(), 3);
}

#[test]
fn test_zero_capacity_is_raised_to_one() {
    let mut smoother = PointSmoother::new(0);
    assert_eq!(smoother.capacity(), 1);
    smoother.add(point(1.0, 1.0, 0.2));
    smoother.add(point(3.0, 5.0, 0.4));
    assert_eq!(smoother.averaged_value(), point(3.0, 5.0, 0.4));
}

#[test]
fn test_set_smooths_each_joint_independently() {
    let mut set = SmootherSet::new(2);
    let first = vec![point(0.0, 0.0, 1.0), None];
    let second = vec![point(2.0, 4.0, 1.0), point(8.0, 8.0, 0.5)];
    set.smooth(&first);
    let out = set.smooth(&second);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].unwrap().position, Vec2::new(1.0, 2.0));
    assert_eq!(out[1].unwrap().position, Vec2::new(8.0, 8.0));
}

#[test]
fn test_set_resets_when_joint_count_changes() {
    let mut set = SmootherSet::new(3);
    set.smooth(&[point(100.0, 100.0, 1.0); 2]);
    assert_eq!(set.len(), 2);

    let out = set.smooth(&[point(0.0, 0.0, 1.0); 3]);
    assert_eq!(set.len(), 3);
    // no history carried over from the two-joint frames
    assert_eq!(out[0].unwrap().position, Vec2::new(0.0, 0.0));
    assert_eq!(set.get(0).unwrap().len(), 1);
}
