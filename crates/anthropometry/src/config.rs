use {
    crate::{error::MeasureError, smoother::DEFAULT_WINDOW, types::JOINT_COUNT},
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

/// Default reference height of the photographed person.
pub const DEFAULT_REAL_HEIGHT: f32 = 182.0;

fn default_real_height() -> f32 {
    DEFAULT_REAL_HEIGHT
}

fn default_smoothing_window() -> usize {
    DEFAULT_WINDOW
}

fn default_joint_count() -> usize {
    JOINT_COUNT
}

/// Pipeline settings, shared by both image streams.
///
/// Fields missing from a JSON file take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// Real height of the person, in the unit measurements are reported in.
    #[serde(default = "default_real_height")]
    pub real_height: f32,
    /// Frames averaged per joint.
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
    /// Heatmap peaks at or below this value count as undetected.
    #[serde(default)]
    pub decode_threshold: f32,
    #[serde(default)]
    pub subpixel: bool,
    /// Channels in the model's heatmap output.
    #[serde(default = "default_joint_count")]
    pub joint_count: usize,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            real_height: DEFAULT_REAL_HEIGHT,
            smoothing_window: DEFAULT_WINDOW,
            decode_threshold: 0.0,
            subpixel: false,
            joint_count: JOINT_COUNT,
        }
    }
}

impl MeasureConfig {
    pub fn with_real_height(mut self, real_height: f32) -> Self {
        self.real_height = real_height;
        self
    }

    pub fn validate(&self) -> Result<(), MeasureError> {
        if self.smoothing_window == 0 {
            return Err(MeasureError::Config(
                "smoothing_window must be at least 1".to_string(),
            ));
        }
        if !self.real_height.is_finite() || self.real_height <= 0.0 {
            return Err(MeasureError::Config(format!(
                "real_height must be positive, got {}",
                self.real_height
            )));
        }
        if !self.decode_threshold.is_finite() {
            return Err(MeasureError::Config(format!(
                "decode_threshold must be finite, got {}",
                self.decode_threshold
            )));
        }
        if self.joint_count < JOINT_COUNT {
            return Err(MeasureError::Config(format!(
                "joint_count must be at least {JOINT_COUNT}, got {}",
                self.joint_count
            )));
        }
        Ok(())
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeasureError> {
        let text = fs::read_to_string(path)?;
        let config: MeasureConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}
