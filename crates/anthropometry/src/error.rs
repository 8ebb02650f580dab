use {
    crate::{session::ImageStream, types::Joint},
    base::TensorError,
    std::fmt,
};

/// Failure of one pipeline step. Every variant is recoverable: callers skip
/// the frame or ask for another photo.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// One or more joints were not detected after decoding and smoothing.
    IncompletePose { missing: Vec<Joint> },
    /// The top-to-ankle height or the real height cannot produce a usable scale.
    DegenerateScale { system_height: f32, real_height: f32 },
    /// Heatmap tensor has the wrong shape or non-finite values.
    InvalidHeatmap(String),
    /// Segmentation mask tensor has the wrong shape.
    InvalidMask(String),
    /// A derived quantity came out NaN or infinite.
    NonFinite(String),
    /// A stream has not produced a measurement yet.
    MissingStream(ImageStream),
    Config(String),
    Io(String),
    Parse(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::IncompletePose { missing } => {
                let names: Vec<&str> = missing.iter().map(|joint| joint.name()).collect();
                write!(f, "incomplete pose: missing {}", names.join(", "))
            }
            MeasureError::DegenerateScale {
                system_height,
                real_height,
            } => write!(
                f,
                "degenerate scale: pose height {system_height} px, real height {real_height}"
            ),
            MeasureError::InvalidHeatmap(msg) => write!(f, "invalid heatmap: {msg}"),
            MeasureError::InvalidMask(msg) => write!(f, "invalid mask: {msg}"),
            MeasureError::NonFinite(msg) => write!(f, "non-finite value: {msg}"),
            MeasureError::MissingStream(stream) => write!(f, "no measurement for {stream} image"),
            MeasureError::Config(msg) => write!(f, "config error: {msg}"),
            MeasureError::Io(msg) => write!(f, "io error: {msg}"),
            MeasureError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for MeasureError {}

impl MeasureError {
    /// True for failures caused by what the camera saw rather than by bad input data.
    pub fn is_pose_failure(&self) -> bool {
        matches!(
            self,
            MeasureError::IncompletePose { .. } | MeasureError::DegenerateScale { .. }
        )
    }
}

impl From<std::io::Error> for MeasureError {
    fn from(err: std::io::Error) -> Self {
        MeasureError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MeasureError {
    fn from(err: serde_json::Error) -> Self {
        MeasureError::Parse(err.to_string())
    }
}

impl From<TensorError> for MeasureError {
    fn from(err: TensorError) -> Self {
        MeasureError::InvalidHeatmap(err.to_string())
    }
}

#[cfg(feature = "candle")]
impl From<candle_core::Error> for MeasureError {
    fn from(err: candle_core::Error) -> Self {
        MeasureError::InvalidHeatmap(err.to_string())
    }
}
