mod common;

use {
    anthropometry::{
        ImageStream, Joint, MeasureConfig, PredictedPoint, SmootherSet, StreamSession,
        scale_factor,
    },
    base::{Level, MemoryLogger, Vec2, set_logger, set_max_level},
};

// One test per binary: the logger is process-global.
#[test]
fn test_pipeline_events_are_logged() {
    let logger = MemoryLogger::new();
    set_logger(Box::new(logger.clone()));
    set_max_level(Level::Debug);

    let point = Some(PredictedPoint::new(0, Vec2::new(1.0, 1.0), 1.0));
    let mut set = SmootherSet::new(3);
    set.smooth(&[point; 2]);
    assert!(!logger.contains("resetting smoothers"));
    set.smooth(&[point; 3]);
    assert!(logger.contains("joint count changed from 2 to 3"));

    assert!(scale_factor(50.0, 50.0, 182.0).is_err());
    assert!(logger.contains("degenerate scale"));

    let mut session = StreamSession::new(ImageStream::Front, &MeasureConfig::default());
    assert!(session.process(&common::heatmap_without(Joint::Neck)).is_err());
    assert!(logger.contains("incomplete pose, 1 of 14 joints missing"));

    let lines = logger.lines();
    assert!(lines.iter().any(|line| line.contains("WARN")));
    assert!(lines.iter().any(|line| line.contains("DEBUG")));
}
