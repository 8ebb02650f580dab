use {
    crate::types::PredictedPoint,
    base::{Vec2, log_info},
    std::collections::VecDeque,
};

/// Default number of frames averaged per joint
pub const DEFAULT_WINDOW: usize = 3;

/// Moving average over the last `capacity` observations of one joint.
///
/// Missed detections are kept in the window as empty slots: they push older
/// observations out but do not take part in the average.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSmoother {
    window: VecDeque<Option<PredictedPoint>>,
    capacity: usize,
}

impl Default for PointSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl PointSmoother {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots, empty ones included.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn add(&mut self, point: Option<PredictedPoint>) {
        self.window.push_back(point);
        while self.window.len() > self.capacity {
            self.window.pop_front();
        }
    }

    /// Mean position and confidence of the detected points in the window.
    ///
    /// `None` when the window holds no detection at all.
    pub fn averaged_value(&self) -> Option<PredictedPoint> {
        let mut sum = Vec2::<f32>::zero();
        let mut confidence = 0.0;
        let mut count = 0usize;
        let mut joint_index = None;
        for point in self.window.iter().flatten() {
            sum += point.position;
            confidence += point.confidence;
            count += 1;
            joint_index = Some(point.joint_index);
        }
        let joint_index = joint_index?;
        let n = count as f32;
        Some(PredictedPoint::new(joint_index, sum / n, confidence / n))
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

/// One smoother per heatmap channel, owned by a single image stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SmootherSet {
    capacity: usize,
    smoothers: Vec<PointSmoother>,
}

impl SmootherSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            smoothers: Vec::new(),
        }
    }

    /// Number of joints currently tracked.
    pub fn len(&self) -> usize {
        self.smoothers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smoothers.is_empty()
    }

    pub fn get(&self, joint: usize) -> Option<&PointSmoother> {
        self.smoothers.get(joint)
    }

    /// Push one frame of raw detections and return the smoothed frame.
    ///
    /// When the frame has a different number of joints than the previous one
    /// every window is discarded and the set starts over.
    pub fn smooth(&mut self, raw: &[Option<PredictedPoint>]) -> Vec<Option<PredictedPoint>> {
        if raw.len() != self.smoothers.len() {
            if !self.smoothers.is_empty() {
                log_info!(
                    "joint count changed from {} to {}, resetting smoothers",
                    self.smoothers.len(),
                    raw.len()
                );
            }
            self.smoothers = (0..raw.len())
                .map(|_| PointSmoother::new(self.capacity))
                .collect();
        }
        self.smoothers
            .iter_mut()
            .zip(raw)
            .map(|(smoother, point)| {
                smoother.add(*point);
                smoother.averaged_value()
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.smoothers.clear();
    }
}
