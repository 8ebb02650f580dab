use {
    crate::{
        assembler::{Keypoints, Segment},
        config::MeasureConfig,
        error::MeasureError,
        types::Joint,
    },
    base::{Vec2, log_warn},
    serde::Serialize,
};

/// Euclidean distance between two points.
pub fn find_distance(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
    a.distance_to(b)
}

/// Pixel to real-world conversion derived from the pose's vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub top_y: f32,
    /// Lower of the two ankles.
    pub bottom_y: f32,
    pub system_height: f32,
    /// Real units per pixel.
    pub factor: f32,
}

/// Compute the scale of a pose whose top is at `top_y` and whose lowest
/// ankle is at `bottom_y` (y grows downward).
pub fn scale_factor(top_y: f32, bottom_y: f32, real_height: f32) -> Result<Scale, MeasureError> {
    let system_height = bottom_y - top_y;
    let degenerate = MeasureError::DegenerateScale {
        system_height,
        real_height,
    };
    let usable_height = |h: f32| h.is_finite() && h > 0.0;
    if !usable_height(real_height) || !usable_height(system_height) {
        log_warn!("degenerate scale: pose height {system_height}, real height {real_height}");
        return Err(degenerate);
    }
    let factor = real_height / system_height;
    if !factor.is_finite() {
        log_warn!("scale factor overflow: pose height {system_height}, real height {real_height}");
        return Err(degenerate);
    }
    Ok(Scale {
        top_y,
        bottom_y,
        system_height,
        factor,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub segment: Segment,
    pub pixel_distance: f32,
    pub scaled_distance: f32,
}

/// Limb lengths of one pose, in [`Segment::LIMBS`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurements {
    pub scale: Scale,
    pub items: Vec<Measurement>,
}

impl Measurements {
    pub fn get(&self, segment: Segment) -> Option<&Measurement> {
        self.items.iter().find(|m| m.segment == segment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.items.iter()
    }
}

/// Joints a measurement cannot do without, in canonical order.
fn required_joints() -> Vec<Joint> {
    Joint::ALL
        .into_iter()
        .filter(|&joint| {
            matches!(joint, Joint::Top | Joint::LeftAnkle | Joint::RightAnkle)
                || Segment::LIMBS.iter().any(|segment| {
                    segment
                        .endpoints()
                        .is_some_and(|(a, b)| a == joint || b == joint)
                })
        })
        .collect()
}

/// Converts keypoint distances into real-world lengths using a known body height.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementEngine {
    real_height: f32,
}

impl MeasurementEngine {
    pub fn new(real_height: f32) -> Self {
        Self { real_height }
    }

    pub fn from_config(config: &MeasureConfig) -> Self {
        Self::new(config.real_height)
    }

    pub fn real_height(&self) -> f32 {
        self.real_height
    }

    pub fn set_real_height(&mut self, real_height: f32) {
        self.real_height = real_height;
    }

    pub fn measure(&self, keypoints: &Keypoints) -> Result<Measurements, MeasureError> {
        let missing = keypoints.missing(&required_joints());
        if !missing.is_empty() {
            return Err(MeasureError::IncompletePose { missing });
        }
        let position = |joint: Joint| {
            keypoints
                .position(joint)
                .ok_or_else(|| MeasureError::IncompletePose {
                    missing: vec![joint],
                })
        };

        let top_y = position(Joint::Top)?.y;
        let bottom_y = position(Joint::LeftAnkle)?
            .y
            .max(position(Joint::RightAnkle)?.y);
        let scale = scale_factor(top_y, bottom_y, self.real_height)?;

        let mut items = Vec::with_capacity(Segment::LIMBS.len());
        for segment in Segment::LIMBS {
            let Some((a, b)) = segment.endpoints() else {
                continue;
            };
            let pixel_distance = find_distance(position(a)?, position(b)?);
            let scaled_distance = pixel_distance * scale.factor;
            if !pixel_distance.is_finite() || !scaled_distance.is_finite() {
                return Err(MeasureError::NonFinite(format!(
                    "{segment} length {pixel_distance} px"
                )));
            }
            items.push(Measurement {
                segment,
                pixel_distance,
                scaled_distance,
            });
        }
        Ok(Measurements { scale, items })
    }
}
