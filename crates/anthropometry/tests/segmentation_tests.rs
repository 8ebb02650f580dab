use {
    anthropometry::{MeasureError, PERSON_CLASS, SegmentationMask},
    base::Tensor,
};

fn mask() -> SegmentationMask {
    // 3 x 4, person in the middle two columns
    SegmentationMask::from_labels(
        3,
        4,
        vec![
            0, 15, 15, 0, //
            0, 15, 15, 7, //
            0, 0, 15, 0,
        ],
    )
    .unwrap()
}

#[test]
fn test_class_lookup() {
    let mask = mask();
    assert_eq!(mask.width(), 4);
    assert_eq!(mask.height(), 3);
    assert_eq!(mask.class_at(3, 1), Some(7));
    assert_eq!(mask.class_at(1, 2), Some(0));
    assert_eq!(mask.class_at(4, 0), None);
    assert_eq!(mask.class_at(0, 3), None);
}

#[test]
fn test_person_pixels() {
    let mask = mask();
    assert!(mask.is_person(2, 2));
    assert!(!mask.is_person(0, 0));
    assert!(!mask.is_person(10, 10));
    assert_eq!(mask.count(PERSON_CLASS), 5);
    assert_eq!(mask.count(7), 1);
    assert!((mask.coverage(PERSON_CLASS) - 5.0 / 12.0).abs() < 1e-6);
}

#[test]
fn test_batch_of_one_is_accepted() {
    let tensor = Tensor::new(vec![1, 2, 2], vec![15, 0, 0, 15]).unwrap();
    let mask = SegmentationMask::new(tensor).unwrap();
    assert_eq!((mask.width(), mask.height()), (2, 2));
    assert!(mask.is_person(1, 1));
}

#[test]
fn test_bad_shapes_rejected() {
    let cube = Tensor::new(vec![2, 2, 2], vec![0; 8]).unwrap();
    assert!(matches!(
        SegmentationMask::new(cube),
        Err(MeasureError::InvalidMask(_))
    ));
    assert!(matches!(
        SegmentationMask::from_labels(2, 3, vec![0; 5]),
        Err(MeasureError::InvalidMask(_))
    ));
    assert!(SegmentationMask::from_labels(0, 3, vec![]).is_err());
}
