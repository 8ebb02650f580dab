use {crate::error::MeasureError, base::Tensor};

/// Pascal VOC label of the `person` class, as emitted by DeepLabV3.
pub const PERSON_CLASS: i32 = 15;

/// Per-pixel class labels of one image, shape `[height, width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationMask {
    tensor: Tensor<i32>,
}

impl SegmentationMask {
    /// Accepts `[H, W]` or `[1, H, W]`.
    pub fn new(tensor: Tensor<i32>) -> Result<Self, MeasureError> {
        let tensor = tensor
            .squeeze_to(2)
            .map_err(|err| MeasureError::InvalidMask(err.to_string()))?;
        if tensor.shape.contains(&0) {
            return Err(MeasureError::InvalidMask(format!(
                "empty dimension in shape {:?}",
                tensor.shape
            )));
        }
        Ok(Self { tensor })
    }

    pub fn from_labels(height: usize, width: usize, labels: Vec<i32>) -> Result<Self, MeasureError> {
        let tensor = Tensor::new(vec![height, width], labels)
            .map_err(|err| MeasureError::InvalidMask(err.to_string()))?;
        Self::new(tensor)
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn class_at(&self, x: usize, y: usize) -> Option<i32> {
        self.tensor.get(&[y, x]).copied()
    }

    /// False outside the mask.
    pub fn is_person(&self, x: usize, y: usize) -> bool {
        self.class_at(x, y) == Some(PERSON_CLASS)
    }

    pub fn count(&self, class: i32) -> usize {
        self.tensor.data.iter().filter(|&&label| label == class).count()
    }

    /// Fraction of pixels labelled `class`.
    pub fn coverage(&self, class: i32) -> f32 {
        self.count(class) as f32 / self.tensor.len() as f32
    }

    pub fn tensor(&self) -> &Tensor<i32> {
        &self.tensor
    }
}
