use {
    base::Vec2,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Number of joints in the pose model's heatmap output
pub const JOINT_COUNT: usize = 14;

/// Anatomical joints in heatmap channel order.
///
/// The discriminant is the channel index in the heatmap tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Top = 0,
    Neck = 1,
    RightShoulder = 2,
    RightElbow = 3,
    RightWrist = 4,
    LeftShoulder = 5,
    LeftElbow = 6,
    LeftWrist = 7,
    RightHip = 8,
    RightKnee = 9,
    RightAnkle = 10,
    LeftHip = 11,
    LeftKnee = 12,
    LeftAnkle = 13,
}

impl Joint {
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Top,
        Joint::Neck,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightWrist,
        Joint::LeftShoulder,
        Joint::LeftElbow,
        Joint::LeftWrist,
        Joint::RightHip,
        Joint::RightKnee,
        Joint::RightAnkle,
        Joint::LeftHip,
        Joint::LeftKnee,
        Joint::LeftAnkle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Joint::Top => "top",
            Joint::Neck => "neck",
            Joint::RightShoulder => "right_shoulder",
            Joint::RightElbow => "right_elbow",
            Joint::RightWrist => "right_wrist",
            Joint::LeftShoulder => "left_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightHip => "right_hip",
            Joint::RightKnee => "right_knee",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHip => "left_hip",
            Joint::LeftKnee => "left_knee",
            Joint::LeftAnkle => "left_ankle",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Joint> for usize {
    fn from(joint: Joint) -> usize {
        joint as usize
    }
}

impl TryFrom<usize> for Joint {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Joint::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid joint index: {}. Must be in range 0-{}.",
                value,
                JOINT_COUNT - 1
            )
        })
    }
}

/// Best location of one joint in one heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedPoint {
    /// Heatmap channel this point was decoded from.
    pub joint_index: usize,
    /// Location in heatmap pixels (x right, y down).
    pub position: Vec2<f32>,
    /// Heatmap value at the peak.
    pub confidence: f32,
}

impl PredictedPoint {
    pub fn new(joint_index: usize, position: Vec2<f32>, confidence: f32) -> Self {
        Self {
            joint_index,
            position,
            confidence,
        }
    }

    pub fn joint(&self) -> Option<Joint> {
        Joint::try_from(self.joint_index).ok()
    }

    /// Position in `[0, 1]` coordinates, measured at pixel centres.
    pub fn normalized(&self, width: usize, height: usize) -> Vec2<f32> {
        Vec2::new(
            (self.position.x + 0.5) / width as f32,
            (self.position.y + 0.5) / height as f32,
        )
    }
}
