use anthropometry::{
    Heatmap, ImageStream, JOINT_COUNT, MeasureError, PERSON_CLASS, SegmentationMask,
};

pub const WIDTH: usize = 96;
pub const HEIGHT: usize = 128;
const SIGMA: f32 = 1.5;

/// Joint pixels of a person standing with arms slightly out (front) or
/// seen from the left (side).
fn pose(stream: ImageStream) -> [(f32, f32); JOINT_COUNT] {
    match stream {
        ImageStream::Front => [
            (48.0, 6.0),
            (48.0, 22.0),
            (36.0, 26.0),
            (31.0, 44.0),
            (28.0, 61.0),
            (60.0, 26.0),
            (65.0, 44.0),
            (68.0, 61.0),
            (42.0, 62.0),
            (41.0, 88.0),
            (41.0, 116.0),
            (54.0, 62.0),
            (55.0, 88.0),
            (55.0, 116.0),
        ],
        ImageStream::Side => [
            (46.0, 6.0),
            (47.0, 22.0),
            (46.0, 26.0),
            (48.0, 44.0),
            (52.0, 60.0),
            (48.0, 26.0),
            (50.0, 44.0),
            (54.0, 60.0),
            (46.0, 62.0),
            (47.0, 88.0),
            (45.0, 116.0),
            (48.0, 62.0),
            (49.0, 88.0),
            (47.0, 116.0),
        ],
    }
}

/// Small deterministic wobble so the smoothing window has something to do.
fn jitter(frame: usize, joint: usize) -> (f32, f32) {
    let phase = (frame * 7 + joint * 3) % 5;
    let dx = phase as f32 * 0.25 - 0.5;
    let dy = ((phase + 2) % 5) as f32 * 0.25 - 0.5;
    (dx, dy)
}

/// Gaussian blobs around each joint, as a pose model would emit.
pub fn heatmap(stream: ImageStream, frame: usize) -> Result<Heatmap, MeasureError> {
    let channels = pose(stream)
        .iter()
        .enumerate()
        .map(|(joint, &(cx, cy))| {
            let (dx, dy) = jitter(frame, joint);
            let (cx, cy) = (cx + dx, cy + dy);
            let mut plane = Vec::with_capacity(WIDTH * HEIGHT);
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    let d2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
                    plane.push((-d2 / (2.0 * SIGMA * SIGMA)).exp());
                }
            }
            plane
        })
        .collect();
    Heatmap::from_channels(HEIGHT, WIDTH, channels)
}

/// Person label inside the bounding box of the pose, background elsewhere.
pub fn mask(stream: ImageStream) -> Result<SegmentationMask, MeasureError> {
    let points = pose(stream);
    let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for &(x, y) in &points {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    let mut labels = Vec::with_capacity(WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let (fx, fy) = (x as f32, y as f32);
            let inside = fx >= x0 && fx <= x1 && fy >= y0 && fy <= y1;
            labels.push(if inside { PERSON_CLASS } else { 0 });
        }
    }
    SegmentationMask::from_labels(HEIGHT, WIDTH, labels)
}
