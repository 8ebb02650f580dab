use {
    crate::{
        error::MeasureError,
        types::{JOINT_COUNT, Joint, PredictedPoint},
    },
    base::{Vec2, log_debug},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, fmt},
};

/// Point halfway between `a` and `b`.
pub fn midpoint(a: Vec2<f32>, b: Vec2<f32>) -> Vec2<f32> {
    a.midpoint(b)
}

/// Named body segments, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    LeftForearm,
    LeftUpperArm,
    RightForearm,
    RightUpperArm,
    MiddleBody,
    LeftThigh,
    LeftCalf,
    RightThigh,
    RightCalf,
}

/// What a segment's two ends are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentAnchor {
    /// Between two joints.
    Joints(Joint, Joint),
    /// Between the midpoints of two joint pairs.
    Midpoints((Joint, Joint), (Joint, Joint)),
}

impl Segment {
    pub const ALL: [Segment; 9] = [
        Segment::LeftForearm,
        Segment::LeftUpperArm,
        Segment::RightForearm,
        Segment::RightUpperArm,
        Segment::MiddleBody,
        Segment::LeftThigh,
        Segment::LeftCalf,
        Segment::RightThigh,
        Segment::RightCalf,
    ];

    /// Segments with two joint endpoints; these are the ones measured.
    pub const LIMBS: [Segment; 8] = [
        Segment::LeftForearm,
        Segment::LeftUpperArm,
        Segment::RightForearm,
        Segment::RightUpperArm,
        Segment::LeftThigh,
        Segment::LeftCalf,
        Segment::RightThigh,
        Segment::RightCalf,
    ];

    pub fn anchor(self) -> SegmentAnchor {
        use Joint::*;
        match self {
            Segment::LeftForearm => SegmentAnchor::Joints(LeftWrist, LeftElbow),
            Segment::LeftUpperArm => SegmentAnchor::Joints(LeftElbow, LeftShoulder),
            Segment::RightForearm => SegmentAnchor::Joints(RightWrist, RightElbow),
            Segment::RightUpperArm => SegmentAnchor::Joints(RightElbow, RightShoulder),
            Segment::MiddleBody => {
                SegmentAnchor::Midpoints((LeftShoulder, RightShoulder), (LeftHip, RightHip))
            }
            Segment::LeftThigh => SegmentAnchor::Joints(LeftHip, LeftKnee),
            Segment::LeftCalf => SegmentAnchor::Joints(LeftKnee, LeftAnkle),
            Segment::RightThigh => SegmentAnchor::Joints(RightHip, RightKnee),
            Segment::RightCalf => SegmentAnchor::Joints(RightKnee, RightAnkle),
        }
    }

    /// Joint endpoints for limb segments, `None` for the torso.
    pub fn endpoints(self) -> Option<(Joint, Joint)> {
        match self.anchor() {
            SegmentAnchor::Joints(a, b) => Some((a, b)),
            SegmentAnchor::Midpoints(..) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Segment::LeftForearm => "left_forearm",
            Segment::LeftUpperArm => "left_upper_arm",
            Segment::RightForearm => "right_forearm",
            Segment::RightUpperArm => "right_upper_arm",
            Segment::MiddleBody => "middle_body",
            Segment::LeftThigh => "left_thigh",
            Segment::LeftCalf => "left_calf",
            Segment::RightThigh => "right_thigh",
            Segment::RightCalf => "right_calf",
        }
    }

    /// Short form naming the anchors, e.g. `lWrist-lElbow`.
    pub fn label(self) -> &'static str {
        match self {
            Segment::LeftForearm => "lWrist-lElbow",
            Segment::LeftUpperArm => "lElbow-lShoulder",
            Segment::RightForearm => "rWrist-rElbow",
            Segment::RightUpperArm => "rElbow-rShoulder",
            Segment::MiddleBody => "shoulders-hips",
            Segment::LeftThigh => "lHip-lKnee",
            Segment::LeftCalf => "lKnee-lAnkle",
            Segment::RightThigh => "rHip-rKnee",
            Segment::RightCalf => "rKnee-rAnkle",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Representative point of a segment, used as a drawing origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentPoint {
    pub segment: Segment,
    pub position: Vec2<f32>,
}

/// Detected points keyed by joint.
///
/// Built complete by [`KeypointAssembler`]; may be partial when built by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keypoints {
    points: BTreeMap<Joint, PredictedPoint>,
}

impl Keypoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect points, keying each by its `joint_index`. Points whose index is
    /// not a known joint are dropped.
    pub fn from_points(points: impl IntoIterator<Item = PredictedPoint>) -> Self {
        let points = points
            .into_iter()
            .filter_map(|point| point.joint().map(|joint| (joint, point)))
            .collect();
        Self { points }
    }

    pub fn insert(&mut self, joint: Joint, position: Vec2<f32>, confidence: f32) {
        self.points
            .insert(joint, PredictedPoint::new(joint.into(), position, confidence));
    }

    pub fn get(&self, joint: Joint) -> Option<&PredictedPoint> {
        self.points.get(&joint)
    }

    pub fn position(&self, joint: Joint) -> Option<Vec2<f32>> {
        self.points.get(&joint).map(|point| point.position)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() == JOINT_COUNT
    }

    /// Joints from `required` with no point, in the order given.
    pub fn missing(&self, required: &[Joint]) -> Vec<Joint> {
        required
            .iter()
            .copied()
            .filter(|joint| !self.points.contains_key(joint))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, &PredictedPoint)> {
        self.points.iter().map(|(joint, point)| (*joint, point))
    }

    /// Representative point of one segment, `None` if an anchor is missing.
    pub fn segment_point(&self, segment: Segment) -> Option<SegmentPoint> {
        let position = match segment.anchor() {
            SegmentAnchor::Joints(a, b) => midpoint(self.position(a)?, self.position(b)?),
            SegmentAnchor::Midpoints((a1, a2), (b1, b2)) => {
                let upper = midpoint(self.position(a1)?, self.position(a2)?);
                let lower = midpoint(self.position(b1)?, self.position(b2)?);
                midpoint(upper, lower)
            }
        };
        Some(SegmentPoint { segment, position })
    }

    /// All segment points in catalog order, skipping segments with a missing anchor.
    pub fn segment_points(&self) -> Vec<SegmentPoint> {
        Segment::ALL
            .iter()
            .filter_map(|&segment| self.segment_point(segment))
            .collect()
    }
}

/// Binds a frame of smoothed points to named joints.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeypointAssembler;

impl KeypointAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Index `i` of `points` is joint `i`. Every joint must be present;
    /// entries past the last joint are ignored.
    pub fn assemble(&self, points: &[Option<PredictedPoint>]) -> Result<Keypoints, MeasureError> {
        let mut keypoints = Keypoints::new();
        let mut missing = Vec::new();
        for joint in Joint::ALL {
            match points.get(usize::from(joint)).copied().flatten() {
                Some(point) => {
                    keypoints.points.insert(joint, point);
                }
                None => missing.push(joint),
            }
        }
        if !missing.is_empty() {
            log_debug!("incomplete pose, {} of {} joints missing", missing.len(), JOINT_COUNT);
            return Err(MeasureError::IncompletePose { missing });
        }
        Ok(keypoints)
    }
}
