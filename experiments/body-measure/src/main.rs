mod demo;

use {
    anthropometry::{
        BodySession, Frame, FrameResult, ImageStream, MeasureConfig, MeasureError, MeasureStream,
        StreamSession,
        io::{load_heatmap, load_mask},
    },
    base::{log_debug, log_error, log_info, log_warn},
    futures_util::{SinkExt, StreamExt},
    std::{env, path::PathBuf, process},
};

const DEMO_FRAMES: usize = 5;

#[derive(Debug, Default)]
struct Args {
    demo: bool,
    height: Option<f32>,
    config: Option<PathBuf>,
    front: Option<PathBuf>,
    side: Option<PathBuf>,
    front_mask: Option<PathBuf>,
    side_mask: Option<PathBuf>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [options] <front-heatmap.json> <side-heatmap.json>");
    eprintln!("       {program} --demo [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --height <value>      real height of the person (default 182)");
    eprintln!("  --config <file>       JSON pipeline config");
    eprintln!("  --front-mask <file>   segmentation mask for the front photo");
    eprintln!("  --side-mask <file>    segmentation mask for the side photo");
    eprintln!("  --demo                measure built-in synthetic heatmaps");
    process::exit(1);
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut positional = Vec::new();
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| iter.next().ok_or(format!("{name} needs a value"));
        match arg.as_str() {
            "--demo" => args.demo = true,
            "--height" => {
                let raw = value("--height")?;
                let height = raw
                    .parse::<f32>()
                    .map_err(|e| format!("invalid height '{raw}': {e}"))?;
                args.height = Some(height);
            }
            "--config" => args.config = Some(value("--config")?.into()),
            "--front-mask" => args.front_mask = Some(value("--front-mask")?.into()),
            "--side-mask" => args.side_mask = Some(value("--side-mask")?.into()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }
    match (args.demo, positional.len()) {
        (true, 0) => {}
        (false, 2) => {
            let mut positional = positional.into_iter();
            args.front = positional.next();
            args.side = positional.next();
        }
        (true, _) => return Err("--demo takes no heatmap files".to_string()),
        (false, n) => return Err(format!("expected 2 heatmap files, got {n}")),
    }
    Ok(args)
}

fn load_frames(
    heatmap: Option<&PathBuf>,
    mask: Option<&PathBuf>,
) -> Result<Vec<Frame>, MeasureError> {
    let Some(path) = heatmap else {
        return Ok(Vec::new());
    };
    log_info!("loading {}", path.display());
    let mut frame = Frame::new(load_heatmap(path)?);
    if let Some(mask) = mask {
        frame = frame.with_mask(load_mask(mask)?);
    }
    Ok(vec![frame])
}

fn demo_frames(stream: ImageStream) -> Result<Vec<Frame>, MeasureError> {
    let mut frames = Vec::with_capacity(DEMO_FRAMES);
    for i in 0..DEMO_FRAMES {
        let mut frame = Frame::new(demo::heatmap(stream, i)?);
        if i == 0 {
            frame = frame.with_mask(demo::mask(stream)?);
        }
        frames.push(frame);
    }
    Ok(frames)
}

/// Feed every frame of one photo through its own measurement stream.
async fn run_stream(
    stream: ImageStream,
    config: MeasureConfig,
    frames: Vec<Frame>,
) -> Result<StreamSession, MeasureError> {
    let mut measure = MeasureStream::new(stream, &config);
    for frame in frames {
        measure.feed(frame).await?;
    }
    measure.close().await?;

    let mut index = 0;
    while let Some(result) = measure.next().await {
        index += 1;
        match result {
            Ok(result) => log_debug!(
                "{stream} frame {index}: system height {:.1} px",
                result.measurements.scale.system_height
            ),
            Err(err) if err.is_pose_failure() => log_warn!("{stream} frame {index}: {err}"),
            Err(err) => {
                log_error!("{stream} frame {index}: {err}");
                return Err(err);
            }
        }
    }
    Ok(measure.into_session())
}

fn print_table(result: &FrameResult) {
    println!();
    println!("{} (scale {:.4} per px)", result.stream, result.measurements.scale.factor);
    println!("  {:<16} {:>10} {:>10}", "segment", "pixels", "length");
    for m in result.measurements.iter() {
        println!(
            "  {:<16} {:>10.2} {:>10.2}",
            m.segment.name(),
            m.pixel_distance,
            m.scaled_distance
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let program = env::args().next().unwrap_or_else(|| "body_measure".to_string());
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            usage(&program);
        }
    };

    let mut config = match &args.config {
        Some(path) => MeasureConfig::load(path)?,
        None => MeasureConfig::default(),
    };
    if let Some(height) = args.height {
        config = config.with_real_height(height);
    }
    config.validate()?;
    log_info!(
        "real height {}, smoothing window {}",
        config.real_height,
        config.smoothing_window
    );

    let (front_frames, side_frames) = if args.demo {
        (
            demo_frames(ImageStream::Front)?,
            demo_frames(ImageStream::Side)?,
        )
    } else {
        (
            load_frames(args.front.as_ref(), args.front_mask.as_ref())?,
            load_frames(args.side.as_ref(), args.side_mask.as_ref())?,
        )
    };

    let front = tokio::spawn(run_stream(ImageStream::Front, config.clone(), front_frames));
    let side = tokio::spawn(run_stream(ImageStream::Side, config.clone(), side_frames));
    let (front, side) = tokio::join!(front, side);
    let body = BodySession::from_sessions(front??, side??)?;

    for stream in ImageStream::ALL {
        if let Some(result) = body.stream(stream).latest() {
            print_table(result);
        }
    }

    let report = body.report()?;
    println!();
    println!("{}", report.to_json()?);
    Ok(())
}
