use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::capture::domain::frame_source::FrameSource;
use crate::control::domain::action_sink::{ActionSink, ChordKey, MouseButton};
use crate::control::domain::screenshot_naming::screenshot_path;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::landmark_provider::LandmarkProvider;
use crate::display::domain::frame_display::FrameDisplay;
use crate::display::domain::overlay_renderer::OverlayRenderer;
use crate::gesture::domain::clock::Clock;
use crate::gesture::domain::cursor_mapper::ScreenSize;
use crate::gesture::domain::gesture_config::GestureConfig;
use crate::gesture::domain::gesture_intent::{BlinkStatus, ClickKind, GestureIntent, ZoomDirection};
use crate::gesture::domain::gesture_interpreter::GestureInterpreter;
use crate::pipeline::frame_sampler::FrameSampler;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;

const GREEN: [u8; 3] = [0, 255, 0];
const RED: [u8; 3] = [255, 0, 0];
const FIRST_LINE: (u32, u32) = (10, 30);
const SECOND_LINE: (u32, u32) = (10, 60);
/// Pause after a failed frame read before trying the camera again.
const READ_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Devices and services the control loop talks to.
pub struct EyeControlPorts {
    pub source: Box<dyn FrameSource>,
    pub provider: Box<dyn LandmarkProvider>,
    pub actions: Box<dyn ActionSink>,
    pub renderer: Box<dyn OverlayRenderer>,
    pub display: Box<dyn FrameDisplay>,
    pub clock: Box<dyn Clock>,
    pub logger: Box<dyn PipelineLogger>,
}

pub struct EyeControlOptions {
    pub screenshot_dir: PathBuf,
    /// Flip frames horizontally before detection so the preview acts as a mirror.
    pub mirror: bool,
    pub cancelled: Arc<AtomicBool>,
}

/// What the overlay showed on the last interpreted frame. Repeated on the
/// frames in between so the status text does not flicker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OverlayStatus {
    NoFace,
    Eyes(BlinkStatus),
}

/// Captures frames, turns the user's face into gestures and performs the
/// resulting desktop actions, until the source ends, the user quits from
/// the preview, or the cancel flag is raised.
pub struct EyeControlUseCase {
    ports: EyeControlPorts,
    interpreter: GestureInterpreter,
    sampler: FrameSampler,
    screen: ScreenSize,
    options: EyeControlOptions,
    last_status: Option<OverlayStatus>,
}

impl EyeControlUseCase {
    pub fn new(
        ports: EyeControlPorts,
        config: GestureConfig,
        options: EyeControlOptions,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;
        let sampler = FrameSampler::new(config.process_every)?;
        let screen = ports.actions.screen_size()?;
        log::info!(
            "Screen {}x{}, interpreting every {} frame(s)",
            screen.width,
            screen.height,
            sampler.every()
        );

        Ok(Self {
            ports,
            interpreter: GestureInterpreter::new(config),
            sampler,
            screen,
            options,
            last_status: None,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let result = self.run_loop();

        self.ports.source.close();
        self.ports.display.close();
        self.ports.logger.summary();
        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            if self.options.cancelled.load(Ordering::Relaxed) {
                self.ports.logger.info("Cancelled");
                return Ok(());
            }

            let t0 = Instant::now();
            let frame = match self.ports.source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    self.ports.logger.info("Frame source exhausted");
                    return Ok(());
                }
                Err(e) => {
                    log::debug!("Skipping iteration, frame read failed: {e}");
                    self.ports.display.poll_events();
                    if self.ports.display.quit_requested() {
                        self.ports.logger.info("Quit requested from preview");
                        return Ok(());
                    }
                    std::thread::sleep(READ_RETRY_DELAY);
                    continue;
                }
            };
            self.ports.logger.timing("capture", elapsed_ms(t0));
            let now = self.ports.clock.now();

            let mut frame = if self.options.mirror {
                frame.mirrored()
            } else {
                frame
            };

            let interpreted = self.sampler.should_process();
            if interpreted {
                let t1 = Instant::now();
                let landmarks = self.detect(&frame);
                self.ports.logger.timing("detect", elapsed_ms(t1));

                let t2 = Instant::now();
                self.process_frame(&mut frame, landmarks.as_ref(), now);
                self.ports.logger.timing("interpret", elapsed_ms(t2));
            } else if let Some(status) = self.last_status {
                self.draw_status(&mut frame, status);
            }
            self.ports.logger.frame(interpreted);

            let t3 = Instant::now();
            self.ports.display.show(&frame)?;
            self.ports.logger.timing("display", elapsed_ms(t3));

            if self.ports.display.quit_requested() {
                self.ports.logger.info("Quit requested from preview");
                return Ok(());
            }
        }
    }

    fn detect(&mut self, frame: &Frame) -> Option<FaceLandmarks> {
        match self.ports.provider.detect(frame) {
            Ok(landmarks) => landmarks,
            Err(e) => {
                log::warn!("Landmark detection failed on frame {}: {e}", frame.index());
                None
            }
        }
    }

    /// Interprets one frame's landmarks, performs the resulting actions and
    /// draws the status overlay. Returns the intent when a face was usable.
    ///
    /// Without a face (or with an incomplete landmark set) the interpreter
    /// state is left alone.
    pub fn process_frame(
        &mut self,
        frame: &mut Frame,
        landmarks: Option<&FaceLandmarks>,
        now: Duration,
    ) -> Option<GestureIntent> {
        let Some(landmarks) = landmarks.filter(|l| !l.is_empty()) else {
            log::warn!("Face not detected");
            self.show_status(frame, OverlayStatus::NoFace);
            return None;
        };

        let intent = match self.interpreter.interpret(
            landmarks,
            frame.width(),
            frame.height(),
            self.screen,
            now,
        ) {
            Ok(intent) => intent,
            Err(e) => {
                log::warn!("Skipping gestures for frame {}: {e}", frame.index());
                self.show_status(frame, OverlayStatus::NoFace);
                return None;
            }
        };

        self.perform(&intent);
        self.show_status(frame, OverlayStatus::Eyes(intent.eyes));
        Some(intent)
    }

    fn perform(&mut self, intent: &GestureIntent) {
        let actions = &mut self.ports.actions;
        let logger = &mut self.ports.logger;

        let (x, y) = (intent.cursor.x.round() as i32, intent.cursor.y.round() as i32);
        if let Err(e) = actions.move_cursor_to(x, y) {
            log::warn!("Cursor move to ({x}, {y}) failed: {e}");
        }

        let button = match intent.click {
            ClickKind::Left => Some((MouseButton::Left, "click_left")),
            ClickKind::Right => Some((MouseButton::Right, "click_right")),
            ClickKind::None => None,
        };
        if let Some((button, event)) = button {
            log::info!("{button:?} click");
            logger.event(event);
            if let Err(e) = actions.click(button) {
                log::warn!("{button:?} click failed: {e}");
            }
        }

        let chord = match intent.zoom {
            ZoomDirection::In => Some(([ChordKey::Control, ChordKey::Plus], "zoom_in")),
            ZoomDirection::Out => Some(([ChordKey::Control, ChordKey::Minus], "zoom_out")),
            ZoomDirection::None => None,
        };
        if let Some((keys, event)) = chord {
            log::info!("Zoom {:?}", intent.zoom);
            logger.event(event);
            if let Err(e) = actions.send_key_chord(&keys) {
                log::warn!("Zoom key chord failed: {e}");
            }
        }

        if intent.screenshot {
            let path = screenshot_path(&self.options.screenshot_dir, &chrono::Local::now());
            logger.event("screenshot");
            match actions.take_screenshot(&path) {
                Ok(()) => log::info!("Screenshot saved to {}", path.display()),
                Err(e) => log::error!("Screenshot failed: {e}"),
            }
        }
    }

    fn show_status(&mut self, frame: &mut Frame, status: OverlayStatus) {
        self.last_status = Some(status);
        self.draw_status(frame, status);
    }

    fn draw_status(&self, frame: &mut Frame, status: OverlayStatus) {
        let renderer = &self.ports.renderer;
        match status {
            OverlayStatus::NoFace => {
                renderer.draw_text(frame, "Face Not Detected", FIRST_LINE, RED);
            }
            OverlayStatus::Eyes(eyes) => {
                let label = |closed: bool| if closed { ("Closed", GREEN) } else { ("Open", RED) };
                let (left, left_color) = label(eyes.left_closed);
                let (right, right_color) = label(eyes.right_closed);
                renderer.draw_text(frame, &format!("Left Eye: {left}"), FIRST_LINE, left_color);
                renderer.draw_text(
                    frame,
                    &format!("Right Eye: {right}"),
                    SECOND_LINE,
                    right_color,
                );
            }
        }
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
