use {
    crate::{
        config::MeasureConfig,
        error::MeasureError,
        types::{JOINT_COUNT, PredictedPoint},
    },
    base::{Tensor, Vec2},
};

/// Per-joint confidence maps with shape `[joints, height, width]`.
///
/// All values are finite and every dimension is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    tensor: Tensor<f32>,
}

impl Heatmap {
    /// Accepts `[K, H, W]` or a batch of one, `[1, K, H, W]`.
    pub fn new(tensor: Tensor<f32>) -> Result<Self, MeasureError> {
        let tensor = tensor.squeeze_to(3)?;
        if tensor.shape.contains(&0) {
            return Err(MeasureError::InvalidHeatmap(format!(
                "empty dimension in shape {:?}",
                tensor.shape
            )));
        }
        if let Some(index) = tensor.data.iter().position(|v| !v.is_finite()) {
            return Err(MeasureError::InvalidHeatmap(format!(
                "non-finite value at element {index}"
            )));
        }
        Ok(Self { tensor })
    }

    /// Build a heatmap from one row-major `height * width` plane per joint.
    pub fn from_channels(
        height: usize,
        width: usize,
        channels: Vec<Vec<f32>>,
    ) -> Result<Self, MeasureError> {
        let joints = channels.len();
        let plane = height * width;
        if let Some((joint, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != plane)
        {
            return Err(MeasureError::InvalidHeatmap(format!(
                "channel {joint} has {} values, expected {height}x{width}",
                channel.len()
            )));
        }
        let data: Vec<f32> = channels.into_iter().flatten().collect();
        Self::new(Tensor::new(vec![joints, height, width], data)?)
    }

    pub fn joints(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[2]
    }

    pub fn channel(&self, joint: usize) -> Option<&[f32]> {
        if joint >= self.joints() {
            return None;
        }
        let plane = self.height() * self.width();
        let start = joint * plane;
        self.tensor.data.get(start..start + plane)
    }

    pub fn value(&self, joint: usize, y: usize, x: usize) -> Option<f32> {
        self.tensor.get(&[joint, y, x]).copied()
    }

    pub fn tensor(&self) -> &Tensor<f32> {
        &self.tensor
    }
}

#[cfg(feature = "candle")]
impl TryFrom<&candle_core::Tensor> for Heatmap {
    type Error = MeasureError;

    fn try_from(tensor: &candle_core::Tensor) -> Result<Self, Self::Error> {
        let shape = tensor.dims().to_vec();
        let data = tensor
            .to_dtype(candle_core::DType::F32)?
            .flatten_all()?
            .to_vec1::<f32>()?;
        Heatmap::new(Tensor::new(shape, data)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Peak {
    pub x: usize,
    pub y: usize,
    pub value: f32,
}

/// Row-major argmax of one channel. The first pixel wins ties. Returns `None`
/// for a flat channel.
pub(crate) fn find_peak(channel: &[f32], width: usize) -> Option<Peak> {
    let mut best: Option<Peak> = None;
    let mut min = f32::INFINITY;
    for (i, &value) in channel.iter().enumerate() {
        min = min.min(value);
        if best.is_none_or(|peak| value > peak.value) {
            best = Some(Peak {
                x: i % width,
                y: i / width,
                value,
            });
        }
    }
    best.filter(|peak| peak.value > min)
}

/// Offset of the vertex of the parabola through `(-1, prev)`, `(0, center)`,
/// `(1, next)`, in `[-0.5, 0.5]`. Zero unless `center` is a strict local peak.
pub(crate) fn refine_axis(prev: f32, center: f32, next: f32) -> f32 {
    let curvature = prev - 2.0 * center + next;
    if curvature >= 0.0 {
        return 0.0;
    }
    (0.5 * (prev - next) / curvature).clamp(-0.5, 0.5)
}

fn refine(channel: &[f32], width: usize, height: usize, peak: Peak) -> Vec2<f32> {
    let at = |x: usize, y: usize| channel[y * width + x];
    let mut position = Vec2::<f32>::from(Vec2::new(peak.x, peak.y));
    if peak.x > 0 && peak.x + 1 < width {
        position.x += refine_axis(at(peak.x - 1, peak.y), peak.value, at(peak.x + 1, peak.y));
    }
    if peak.y > 0 && peak.y + 1 < height {
        position.y += refine_axis(at(peak.x, peak.y - 1), peak.value, at(peak.x, peak.y + 1));
    }
    position
}

/// Turns each heatmap channel into its best pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapDecoder {
    joint_count: usize,
    threshold: f32,
    subpixel: bool,
}

impl Default for HeatmapDecoder {
    fn default() -> Self {
        Self::new(JOINT_COUNT)
    }
}

impl HeatmapDecoder {
    pub fn new(joint_count: usize) -> Self {
        Self {
            joint_count,
            threshold: 0.0,
            subpixel: false,
        }
    }

    pub fn from_config(config: &MeasureConfig) -> Self {
        Self::new(config.joint_count)
            .with_threshold(config.decode_threshold)
            .with_subpixel(config.subpixel)
    }

    /// Peaks at or below `threshold` are reported as undetected.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Refine peak positions with a quadratic fit through the neighbouring pixels.
    pub fn with_subpixel(mut self, subpixel: bool) -> Self {
        self.subpixel = subpixel;
        self
    }

    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// Decode every channel, in channel order.
    ///
    /// A channel without a usable peak yields `None`; only a joint count that
    /// differs from the decoder's is an error.
    pub fn decode(&self, heatmap: &Heatmap) -> Result<Vec<Option<PredictedPoint>>, MeasureError> {
        if heatmap.joints() != self.joint_count {
            return Err(MeasureError::InvalidHeatmap(format!(
                "expected {} joint channels, got {}",
                self.joint_count,
                heatmap.joints()
            )));
        }
        Ok((0..heatmap.joints())
            .map(|joint| self.decode_channel(heatmap, joint))
            .collect())
    }

    pub fn decode_channel(&self, heatmap: &Heatmap, joint: usize) -> Option<PredictedPoint> {
        let channel = heatmap.channel(joint)?;
        let peak = find_peak(channel, heatmap.width())?;
        if peak.value <= self.threshold {
            return None;
        }
        let position = if self.subpixel {
            refine(channel, heatmap.width(), heatmap.height(), peak)
        } else {
            Vec2::from(Vec2::new(peak.x, peak.y))
        };
        Some(PredictedPoint::new(joint, position, peak.value))
    }
}
