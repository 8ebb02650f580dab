use {
    crate::{
        error::MeasureError,
        heatmap::{Heatmap, HeatmapDecoder, find_peak, refine_axis},
    },
    base::{Tensor, Vec2},
};

fn plane(height: usize, width: usize, peaks: &[(usize, usize, f32)]) -> Vec<f32> {
    let mut data = vec![0.0; height * width];
    for &(x, y, value) in peaks {
        data[y * width + x] = value;
    }
    data
}

#[test]
fn test_find_peak_picks_strict_max() {
    let channel = plane(4, 5, &[(1, 1, 0.4), (3, 2, 0.9), (0, 3, 0.5)]);
    let peak = find_peak(&channel, 5).unwrap();
    assert_eq!((peak.x, peak.y), (3, 2));
    assert_eq!(peak.value, 0.9);
}

#[test]
fn test_find_peak_tie_goes_to_first_in_row_major_order() {
    // (4, 0) comes before (0, 1) when scanning rows
    let channel = plane(3, 5, &[(0, 1, 0.7), (4, 0, 0.7), (2, 2, 0.7)]);
    let peak = find_peak(&channel, 5).unwrap();
    assert_eq!((peak.x, peak.y), (4, 0));
}

#[test]
fn test_find_peak_flat_channel() {
    assert!(find_peak(&[0.3; 12], 4).is_none());
}

#[test]
fn test_refine_axis() {
    assert_eq!(refine_axis(0.5, 1.0, 0.5), 0.0);
    assert!(refine_axis(0.2, 1.0, 0.6) > 0.0);
    assert!(refine_axis(0.6, 1.0, 0.2) < 0.0);
    // not a local peak along this axis
    assert_eq!(refine_axis(1.0, 1.0, 1.0), 0.0);
    assert_eq!(refine_axis(0.0, 0.5, 2.0), 0.0);
    let offset = refine_axis(0.99, 1.0, 0.0);
    assert!((-0.5..=0.5).contains(&offset));
}

#[test]
fn test_decode_one_point_per_channel() {
    let heatmap = Heatmap::from_channels(
        4,
        6,
        vec![
            plane(4, 6, &[(2, 1, 0.8)]),
            plane(4, 6, &[]),
            plane(4, 6, &[(5, 3, 0.1)]),
        ],
    )
    .unwrap();
    let points = HeatmapDecoder::new(3).decode(&heatmap).unwrap();
    assert_eq!(points.len(), 3);

    let first = points[0].unwrap();
    assert_eq!(first.joint_index, 0);
    assert_eq!(first.position, Vec2::new(2.0, 1.0));
    assert_eq!(first.confidence, 0.8);

    assert!(points[1].is_none());
    assert_eq!(points[2].unwrap().position, Vec2::new(5.0, 3.0));
}

#[test]
fn test_decode_non_positive_max_is_absent() {
    let mut negative = vec![-1.0; 9];
    negative[4] = -0.2;
    let heatmap = Heatmap::from_channels(3, 3, vec![negative]).unwrap();
    let points = HeatmapDecoder::new(1).decode(&heatmap).unwrap();
    assert_eq!(points, vec![None]);
}

#[test]
fn test_decode_threshold() {
    let heatmap = Heatmap::from_channels(
        2,
        2,
        vec![plane(2, 2, &[(1, 1, 0.3)]), plane(2, 2, &[(0, 1, 0.6)])],
    )
    .unwrap();
    let points = HeatmapDecoder::new(2)
        .with_threshold(0.3)
        .decode(&heatmap)
        .unwrap();
    assert!(points[0].is_none());
    assert!(points[1].is_some());
}

#[test]
fn test_decode_wrong_joint_count() {
    let heatmap = Heatmap::from_channels(2, 2, vec![plane(2, 2, &[(0, 0, 1.0)]); 3]).unwrap();
    let result = HeatmapDecoder::new(14).decode(&heatmap);
    assert!(matches!(result, Err(MeasureError::InvalidHeatmap(_))));
}

#[test]
fn test_subpixel_stays_within_peak_pixel() {
    let channel = plane(5, 5, &[(2, 2, 1.0), (3, 2, 0.8), (1, 2, 0.2)]);
    let heatmap = Heatmap::from_channels(5, 5, vec![channel]).unwrap();
    let plain = HeatmapDecoder::new(1).decode(&heatmap).unwrap()[0].unwrap();
    let refined = HeatmapDecoder::new(1)
        .with_subpixel(true)
        .decode(&heatmap)
        .unwrap()[0]
        .unwrap();
    assert_eq!(plain.position, Vec2::new(2.0, 2.0));
    assert!(refined.position.x > 2.0 && refined.position.x <= 2.5);
    assert_eq!(refined.position.y, 2.0);
    assert_eq!(refined.confidence, plain.confidence);
}

#[test]
fn test_subpixel_skipped_at_border() {
    let channel = plane(3, 3, &[(0, 0, 1.0), (1, 0, 0.5), (0, 1, 0.5)]);
    let heatmap = Heatmap::from_channels(3, 3, vec![channel]).unwrap();
    let point = HeatmapDecoder::new(1)
        .with_subpixel(true)
        .decode(&heatmap)
        .unwrap()[0]
        .unwrap();
    assert_eq!(point.position, Vec2::new(0.0, 0.0));
}

#[test]
fn test_heatmap_accepts_batch_of_one() {
    let tensor = Tensor::new(vec![1, 2, 3, 3], plane(2 * 3, 3, &[(1, 1, 1.0)])).unwrap();
    let heatmap = Heatmap::new(tensor).unwrap();
    assert_eq!(heatmap.joints(), 2);
    assert_eq!(heatmap.height(), 3);
    assert_eq!(heatmap.width(), 3);
    assert_eq!(heatmap.value(0, 1, 1), Some(1.0));
}

#[test]
fn test_heatmap_rejects_bad_input() {
    let nan = Tensor::new(vec![1, 2, 2], vec![0.0, f32::NAN, 0.0, 0.0]).unwrap();
    assert!(matches!(Heatmap::new(nan), Err(MeasureError::InvalidHeatmap(_))));

    let batch = Tensor::new(vec![2, 1, 2, 2], vec![0.0; 8]).unwrap();
    assert!(matches!(Heatmap::new(batch), Err(MeasureError::InvalidHeatmap(_))));

    let flat = Tensor::new(vec![4, 4], vec![0.0; 16]).unwrap();
    assert!(Heatmap::new(flat).is_err());

    let empty = Tensor::new(vec![3, 0, 4], vec![]).unwrap();
    assert!(Heatmap::new(empty).is_err());
}

#[cfg(feature = "candle")]
#[test]
fn test_heatmap_from_candle_tensor() {
    use candle_core::{Device, Tensor as CanTensor};

    let data = vec![0.0f32, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.75];
    let tensor = CanTensor::from_vec(data, (1, 2, 2, 2), &Device::Cpu).unwrap();
    let heatmap = Heatmap::try_from(&tensor).unwrap();
    assert_eq!(heatmap.joints(), 2);
    let points = HeatmapDecoder::new(2).decode(&heatmap).unwrap();
    assert_eq!(points[0].unwrap().position, Vec2::new(1.0, 0.0));
    assert_eq!(points[1].unwrap().position, Vec2::new(1.0, 1.0));
}

#[test]
fn test_from_channels_rejects_uneven_planes() {
    // total length matches 2x2x2, but the planes do not
    let result = Heatmap::from_channels(
        2,
        2,
        vec![vec![0.0, 0.0, 9.0], vec![0.0, 0.0, 0.0, 0.0, 1.0]],
    );
    assert!(matches!(result, Err(MeasureError::InvalidHeatmap(_))));

    let long = Heatmap::from_channels(2, 2, vec![plane(2, 2, &[]), vec![0.0; 5]]);
    assert!(matches!(long, Err(MeasureError::InvalidHeatmap(_))));
}

#[test]
fn test_channel_out_of_range_is_none() {
    let heatmap = Heatmap::from_channels(1, 1, vec![vec![1.0]]).unwrap();
    assert_eq!(heatmap.channel(0), Some(&[1.0][..]));
    assert!(heatmap.channel(1).is_none());
    assert!(heatmap.channel(usize::MAX).is_none());

    let decoder = HeatmapDecoder::new(1);
    assert!(decoder.decode_channel(&heatmap, usize::MAX).is_none());
    assert!(decoder.decode_channel(&heatmap, 7).is_none());
}
