//! JSON tensor files, `{ "shape": [...], "data": [...] }` with row-major data.

use {
    crate::{error::MeasureError, heatmap::Heatmap, segmentation::SegmentationMask},
    base::Tensor,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

#[derive(Debug, Serialize, Deserialize)]
struct TensorFile<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

pub fn parse_heatmap(json: &str) -> Result<Heatmap, MeasureError> {
    let file: TensorFile<f32> = serde_json::from_str(json)?;
    Heatmap::new(Tensor::new(file.shape, file.data)?)
}

pub fn parse_mask(json: &str) -> Result<SegmentationMask, MeasureError> {
    let file: TensorFile<i32> = serde_json::from_str(json)?;
    let tensor = Tensor::new(file.shape, file.data)
        .map_err(|err| MeasureError::InvalidMask(err.to_string()))?;
    SegmentationMask::new(tensor)
}

pub fn load_heatmap(path: impl AsRef<Path>) -> Result<Heatmap, MeasureError> {
    parse_heatmap(&fs::read_to_string(path)?)
}

pub fn load_mask(path: impl AsRef<Path>) -> Result<SegmentationMask, MeasureError> {
    parse_mask(&fs::read_to_string(path)?)
}

pub fn heatmap_to_json(heatmap: &Heatmap) -> Result<String, MeasureError> {
    let tensor = heatmap.tensor();
    let file = TensorFile {
        shape: tensor.shape.clone(),
        data: tensor.data.clone(),
    };
    Ok(serde_json::to_string(&file)?)
}
