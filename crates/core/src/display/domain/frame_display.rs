use crate::shared::frame::Frame;

/// Shows annotated frames and reports when the user wants to stop.
pub trait FrameDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Processes pending window input without drawing a new frame, so quit
    /// keys are still seen while no frames arrive. Default: no-op.
    fn poll_events(&mut self) {}

    /// True once the user asked to quit (window closed, Esc or `q`).
    fn quit_requested(&self) -> bool;

    fn close(&mut self);
}

/// Headless display: accepts frames and never asks to quit.
pub struct NullFrameDisplay;

impl FrameDisplay for NullFrameDisplay {
    fn show(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        false
    }

    fn close(&mut self) {}
}
