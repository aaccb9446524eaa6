use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;

use blinkpoint_core::capture::infrastructure::nokhwa_frame_source::NokhwaFrameSource;
use blinkpoint_core::control::domain::screenshot_naming::default_screenshot_dir;
use blinkpoint_core::control::infrastructure::enigo_action_sink::EnigoActionSink;
use blinkpoint_core::detection::infrastructure::onnx_blazeface_detector::{
    OnnxBlazefaceDetector, DEFAULT_CONFIDENCE,
};
use blinkpoint_core::detection::infrastructure::onnx_face_mesh_provider::{
    OnnxFaceMeshProvider, DEFAULT_PRESENCE_THRESHOLD,
};
use blinkpoint_core::display::domain::frame_display::{FrameDisplay, NullFrameDisplay};
use blinkpoint_core::display::infrastructure::bitmap_text_renderer::BitmapTextRenderer;
use blinkpoint_core::display::infrastructure::minifb_display::MinifbDisplay;
use blinkpoint_core::gesture::domain::gesture_config::GestureConfig;
use blinkpoint_core::gesture::infrastructure::monotonic_clock::MonotonicClock;
use blinkpoint_core::pipeline::eye_control_use_case::{
    EyeControlOptions, EyeControlPorts, EyeControlUseCase,
};
use blinkpoint_core::pipeline::infrastructure::threaded_loop_runner::ThreadedLoopRunner;
use blinkpoint_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use blinkpoint_core::shared::constants::{BLAZEFACE_MODEL_NAME, FACE_MESH_MODEL_NAME};
use blinkpoint_core::shared::model_resolver;

const WINDOW_TITLE: &str = "Eye Controlled Mouse | Click, Screenshot, Zoom";

/// Hands-free mouse control with eye gestures.
///
/// Wink left or right to click, lean in or out to zoom, keep both eyes
/// closed to take a screenshot.
#[derive(Parser)]
#[command(name = "blinkpoint")]
struct Cli {
    /// Camera index.
    #[arg(long, default_value = "0")]
    camera: u32,

    /// Do not flip the camera image horizontally.
    #[arg(long)]
    no_mirror: bool,

    /// Run without the preview window (quit with Ctrl-C).
    #[arg(long)]
    no_preview: bool,

    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings (file plus flags) back to the settings file.
    #[arg(long)]
    save_settings: bool,

    /// Interpret gestures on every Nth captured frame.
    #[arg(long)]
    process_every: Option<usize>,

    /// Eyelid gap below this fraction of frame height counts as closed.
    #[arg(long)]
    blink_ratio: Option<f64>,

    /// Seconds both eyes must stay closed to take a screenshot.
    #[arg(long)]
    screenshot_hold: Option<f64>,

    /// Eye distance change in pixels that triggers zoom.
    #[arg(long)]
    zoom_sensitivity: Option<f64>,

    /// Where screenshots are saved (defaults to the pictures directory).
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Directory searched for model files after the cache.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Face detector ONNX model (skips model resolution).
    #[arg(long)]
    detector_model: Option<PathBuf>,

    /// Download URL for the face detector model if it is not found locally.
    #[arg(long)]
    detector_model_url: Option<String>,

    /// Face landmark ONNX model (skips model resolution).
    #[arg(long)]
    landmark_model: Option<PathBuf>,

    /// Download URL for the face landmark model if it is not found locally.
    #[arg(long)]
    landmark_model_url: Option<String>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = load_config(&cli)?;
    let detector_model = model_path(
        cli.detector_model.as_deref(),
        BLAZEFACE_MODEL_NAME,
        cli.detector_model_url.as_deref(),
        cli.models_dir.as_deref(),
    )?;
    let landmark_model = model_path(
        cli.landmark_model.as_deref(),
        FACE_MESH_MODEL_NAME,
        cli.landmark_model_url.as_deref(),
        cli.models_dir.as_deref(),
    )?;
    let screenshot_dir = match cli.screenshot_dir {
        Some(dir) => dir,
        None => default_screenshot_dir().ok_or("Cannot determine pictures directory")?,
    };
    log::info!("Screenshots go to {}", screenshot_dir.display());

    let cancelled = Arc::new(AtomicBool::new(false));
    let options = EyeControlOptions {
        screenshot_dir,
        mirror: !cli.no_mirror,
        cancelled: cancelled.clone(),
    };
    let camera = cli.camera;
    let confidence = cli.confidence;
    let preview = !cli.no_preview;

    // Devices are opened on the loop thread
    let handle = ThreadedLoopRunner::spawn(
        move || {
            let detector = OnnxBlazefaceDetector::new(&detector_model, confidence)?;
            let provider =
                OnnxFaceMeshProvider::new(detector, &landmark_model, DEFAULT_PRESENCE_THRESHOLD)?;
            let actions = EnigoActionSink::new()?;
            let display: Box<dyn FrameDisplay> = if preview {
                Box::new(MinifbDisplay::new(WINDOW_TITLE))
            } else {
                Box::new(NullFrameDisplay)
            };
            let ports = EyeControlPorts {
                source: Box::new(NokhwaFrameSource::open(camera)?),
                provider: Box::new(provider),
                actions: Box::new(actions),
                renderer: Box::new(BitmapTextRenderer::default()),
                display,
                clock: Box::new(MonotonicClock::new()),
                logger: Box::new(StdoutPipelineLogger::default()),
            };
            EyeControlUseCase::new(ports, config, options)
        },
        cancelled,
    );

    handle.join()
}

fn load_config(cli: &Cli) -> Result<GestureConfig, Box<dyn std::error::Error>> {
    let path = cli.config.clone().or_else(GestureConfig::default_path);
    let mut config = match &path {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            GestureConfig::load(path)?
        }
        None => GestureConfig::default(),
    };
    apply_overrides(cli, &mut config);
    config.validate()?;

    if cli.save_settings {
        let path = path.ok_or("Cannot determine settings directory")?;
        config.save(&path)?;
        log::info!("Settings saved to {}", path.display());
    }
    Ok(config)
}

/// Command-line flags take precedence over the settings file.
fn apply_overrides(cli: &Cli, config: &mut GestureConfig) {
    if let Some(n) = cli.process_every {
        config.process_every = n;
    }
    if let Some(ratio) = cli.blink_ratio {
        config.blink_ratio = ratio;
    }
    if let Some(secs) = cli.screenshot_hold {
        config.screenshot_hold_secs = secs;
    }
    if let Some(px) = cli.zoom_sensitivity {
        config.zoom_sensitivity = px;
    }
}

fn model_path(
    explicit: Option<&Path>,
    name: &str,
    url: Option<&str>,
    models_dir: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(format!("Model file not found: {}", path.display()).into());
        }
        return Ok(path.to_path_buf());
    }

    log::info!("Resolving model: {name}");
    let path = model_resolver::resolve(name, url, models_dir, Some(Box::new(download_progress)))?;
    if url.is_some() {
        eprintln!();
    }
    Ok(path)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(dir) = &cli.models_dir {
        if !dir.is_dir() {
            return Err(format!("Models directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
