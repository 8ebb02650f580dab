//! Body measurement from pose-estimation heatmaps.
//!
//! A heatmap goes through [`HeatmapDecoder`], a per-joint [`SmootherSet`],
//! [`KeypointAssembler`] and [`MeasurementEngine`]. [`StreamSession`] owns that
//! state for one photo stream and [`BodySession`] pairs a front and a side stream.

pub mod assembler;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod io;
pub mod measure;
pub mod segmentation;
pub mod session;
pub mod smoother;
pub mod stream;
pub mod types;

pub use {
    assembler::{KeypointAssembler, Keypoints, Segment, SegmentAnchor, SegmentPoint, midpoint},
    config::MeasureConfig,
    error::MeasureError,
    heatmap::{Heatmap, HeatmapDecoder},
    measure::{Measurement, MeasurementEngine, Measurements, Scale, find_distance, scale_factor},
    segmentation::{PERSON_CLASS, SegmentationMask},
    session::{BodyReport, BodySession, Frame, FrameResult, ImageStream, StreamReport, StreamSession},
    smoother::{PointSmoother, SmootherSet},
    stream::MeasureStream,
    types::{JOINT_COUNT, Joint, PredictedPoint},
};

#[cfg(test)]
#[path = "tests/heatmap_test.rs"]
mod heatmap_test;

#[cfg(test)]
#[path = "tests/smoother_test.rs"]
mod smoother_test;
