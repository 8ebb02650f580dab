use {
    crate::{
        assembler::{KeypointAssembler, Keypoints, SegmentPoint},
        config::MeasureConfig,
        error::MeasureError,
        heatmap::{Heatmap, HeatmapDecoder},
        measure::{Measurement, MeasurementEngine, Measurements, Scale},
        segmentation::{PERSON_CLASS, SegmentationMask},
        smoother::SmootherSet,
        types::PredictedPoint,
    },
    base::log_debug,
    serde::Serialize,
    std::fmt,
};

/// Which photograph a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStream {
    Front,
    Side,
}

impl ImageStream {
    pub const ALL: [ImageStream; 2] = [ImageStream::Front, ImageStream::Side];

    pub fn name(self) -> &'static str {
        match self {
            ImageStream::Front => "front",
            ImageStream::Side => "side",
        }
    }
}

impl fmt::Display for ImageStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model output for one image. The mask, when present, is attached to the
/// session before the heatmap is measured.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub heatmap: Heatmap,
    pub mask: Option<SegmentationMask>,
}

impl Frame {
    pub fn new(heatmap: Heatmap) -> Self {
        Self {
            heatmap,
            mask: None,
        }
    }

    pub fn with_mask(mut self, mask: SegmentationMask) -> Self {
        self.mask = Some(mask);
        self
    }
}

impl From<Heatmap> for Frame {
    fn from(heatmap: Heatmap) -> Self {
        Self::new(heatmap)
    }
}

/// Everything derived from one successfully measured frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    pub stream: ImageStream,
    /// Decoder output, one entry per channel.
    pub raw: Vec<Option<PredictedPoint>>,
    pub smoothed: Vec<Option<PredictedPoint>>,
    pub keypoints: Keypoints,
    pub segments: Vec<SegmentPoint>,
    pub measurements: Measurements,
}

/// Decoder, smoothing windows and measurement state of one image stream.
#[derive(Debug, Clone)]
pub struct StreamSession {
    stream: ImageStream,
    decoder: HeatmapDecoder,
    smoothers: SmootherSet,
    assembler: KeypointAssembler,
    engine: MeasurementEngine,
    mask: Option<SegmentationMask>,
    latest: Option<FrameResult>,
    frames: usize,
}

impl StreamSession {
    pub fn new(stream: ImageStream, config: &MeasureConfig) -> Self {
        Self {
            stream,
            decoder: HeatmapDecoder::from_config(config),
            smoothers: SmootherSet::new(config.smoothing_window),
            assembler: KeypointAssembler::new(),
            engine: MeasurementEngine::from_config(config),
            mask: None,
            latest: None,
            frames: 0,
        }
    }

    pub fn stream(&self) -> ImageStream {
        self.stream
    }

    pub fn decoder(&self) -> &HeatmapDecoder {
        &self.decoder
    }

    /// Switch to a decoder for another model. If its joint count differs, the
    /// smoothing windows start over with the next frame.
    pub fn set_decoder(&mut self, decoder: HeatmapDecoder) {
        self.decoder = decoder;
    }

    /// Run one heatmap through decode, smoothing, assembly and measurement.
    ///
    /// The frame always enters the smoothing windows, even when a later step
    /// fails. On failure the previous result stays available from [`latest`].
    ///
    /// [`latest`]: StreamSession::latest
    pub fn process(&mut self, heatmap: &Heatmap) -> Result<FrameResult, MeasureError> {
        self.frames += 1;
        let raw = self.decoder.decode(heatmap)?;
        let smoothed = self.smoothers.smooth(&raw);
        let keypoints = self.assembler.assemble(&smoothed)?;
        let segments = keypoints.segment_points();
        let measurements = self.engine.measure(&keypoints)?;
        log_debug!(
            "{} frame {}: scale {:.4}",
            self.stream,
            self.frames,
            measurements.scale.factor
        );
        let result = FrameResult {
            stream: self.stream,
            raw,
            smoothed,
            keypoints,
            segments,
            measurements,
        };
        self.latest = Some(result.clone());
        Ok(result)
    }

    pub fn process_frame(&mut self, frame: Frame) -> Result<FrameResult, MeasureError> {
        if let Some(mask) = frame.mask {
            self.mask = Some(mask);
        }
        self.process(&frame.heatmap)
    }

    pub fn latest(&self) -> Option<&FrameResult> {
        self.latest.as_ref()
    }

    pub fn segmentation(&self) -> Option<&SegmentationMask> {
        self.mask.as_ref()
    }

    /// Frames seen since creation or the last reset, failed ones included.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn real_height(&self) -> f32 {
        self.engine.real_height()
    }

    pub fn set_real_height(&mut self, real_height: f32) {
        self.engine.set_real_height(real_height);
    }

    /// Forget smoothing history, the mask and the last result, for a new photo.
    pub fn reset(&mut self) {
        self.smoothers.reset();
        self.mask = None;
        self.latest = None;
        self.frames = 0;
    }
}

/// Measurements of one stream as written to a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamReport {
    pub stream: ImageStream,
    pub scale: Scale,
    pub measurements: Vec<Measurement>,
    pub segments: Vec<SegmentPoint>,
    /// Share of mask pixels labelled as person, when a mask was supplied.
    pub person_coverage: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    pub real_height: f32,
    pub front: StreamReport,
    pub side: StreamReport,
}

impl BodyReport {
    pub fn to_json(&self) -> Result<String, MeasureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Front and side photo of one person, measured independently.
#[derive(Debug, Clone)]
pub struct BodySession {
    real_height: f32,
    front: StreamSession,
    side: StreamSession,
}

impl BodySession {
    pub fn new(config: &MeasureConfig) -> Self {
        Self {
            real_height: config.real_height,
            front: StreamSession::new(ImageStream::Front, config),
            side: StreamSession::new(ImageStream::Side, config),
        }
    }

    /// Pair two sessions that were driven separately, e.g. on their own tasks.
    pub fn from_sessions(front: StreamSession, side: StreamSession) -> Result<Self, MeasureError> {
        if front.stream() != ImageStream::Front || side.stream() != ImageStream::Side {
            return Err(MeasureError::Config(format!(
                "expected front and side sessions, got {} and {}",
                front.stream(),
                side.stream()
            )));
        }
        if front.real_height() != side.real_height() {
            return Err(MeasureError::Config(format!(
                "front and side real heights differ: {} vs {}",
                front.real_height(),
                side.real_height()
            )));
        }
        Ok(Self {
            real_height: front.real_height(),
            front,
            side,
        })
    }

    pub fn real_height(&self) -> f32 {
        self.real_height
    }

    /// Applies to frames processed from now on.
    pub fn set_real_height(&mut self, real_height: f32) {
        self.real_height = real_height;
        self.front.set_real_height(real_height);
        self.side.set_real_height(real_height);
    }

    pub fn stream(&self, stream: ImageStream) -> &StreamSession {
        match stream {
            ImageStream::Front => &self.front,
            ImageStream::Side => &self.side,
        }
    }

    pub fn stream_mut(&mut self, stream: ImageStream) -> &mut StreamSession {
        match stream {
            ImageStream::Front => &mut self.front,
            ImageStream::Side => &mut self.side,
        }
    }

    pub fn process(
        &mut self,
        stream: ImageStream,
        frame: Frame,
    ) -> Result<FrameResult, MeasureError> {
        self.stream_mut(stream).process_frame(frame)
    }

    /// Number of streams with a successful measurement.
    pub fn measured_count(&self) -> usize {
        ImageStream::ALL
            .iter()
            .filter(|&&stream| self.stream(stream).latest().is_some())
            .count()
    }

    pub fn is_ready(&self) -> bool {
        self.measured_count() == ImageStream::ALL.len()
    }

    fn stream_report(&self, stream: ImageStream) -> Result<StreamReport, MeasureError> {
        let session = self.stream(stream);
        let result = session
            .latest()
            .ok_or(MeasureError::MissingStream(stream))?;
        Ok(StreamReport {
            stream,
            scale: result.measurements.scale,
            measurements: result.measurements.items.clone(),
            segments: result.segments.clone(),
            person_coverage: session
                .segmentation()
                .map(|mask| mask.coverage(PERSON_CLASS)),
        })
    }

    pub fn report(&self) -> Result<BodyReport, MeasureError> {
        Ok(BodyReport {
            real_height: self.real_height,
            front: self.stream_report(ImageStream::Front)?,
            side: self.stream_report(ImageStream::Side)?,
        })
    }

    pub fn reset(&mut self) {
        self.front.reset();
        self.side.reset();
    }
}
