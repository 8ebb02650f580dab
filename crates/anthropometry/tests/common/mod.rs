#![allow(dead_code)]

use anthropometry::{Heatmap, JOINT_COUNT, Joint};

pub const WIDTH: usize = 100;
pub const HEIGHT: usize = 320;

/// Standing pose in heatmap pixels. Top at (50, 10), ankles at y = 310 and
/// the left forearm exactly 100 px long.
pub fn standing_pose() -> [(usize, usize); JOINT_COUNT] {
    [
        (50, 10),  // top
        (50, 40),  // neck
        (30, 50),  // right shoulder
        (30, 110), // right elbow
        (30, 170), // right wrist
        (70, 50),  // left shoulder
        (70, 150), // left elbow
        (70, 250), // left wrist
        (40, 170), // right hip
        (40, 240), // right knee
        (40, 310), // right ankle
        (60, 170), // left hip
        (60, 240), // left knee
        (60, 310), // left ankle
    ]
}

/// One channel per joint with a single peak of `peak` at the joint's pixel
/// and a weaker ring around it.
pub fn heatmap_for(pose: &[(usize, usize)], peak: f32) -> Heatmap {
    let channels = pose
        .iter()
        .map(|&(x, y)| {
            let mut plane = vec![0.0f32; WIDTH * HEIGHT];
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let (px, py) = (x as i32 + dx, y as i32 + dy);
                    if px >= 0 && py >= 0 && (px as usize) < WIDTH && (py as usize) < HEIGHT {
                        plane[py as usize * WIDTH + px as usize] = peak * 0.5;
                    }
                }
            }
            plane[y * WIDTH + x] = peak;
            plane
        })
        .collect();
    Heatmap::from_channels(HEIGHT, WIDTH, channels).unwrap()
}

pub fn standing_heatmap() -> Heatmap {
    heatmap_for(&standing_pose(), 1.0)
}

/// Standing pose with one joint's channel blanked out.
pub fn heatmap_without(joint: Joint) -> Heatmap {
    let pose = standing_pose();
    let channels = (0..JOINT_COUNT)
        .map(|i| {
            let mut plane = vec![0.0f32; WIDTH * HEIGHT];
            if i != usize::from(joint) {
                let (x, y) = pose[i];
                plane[y * WIDTH + x] = 1.0;
            }
            plane
        })
        .collect();
    Heatmap::from_channels(HEIGHT, WIDTH, channels).unwrap()
}
