use crate::shared::frame::Frame;

/// Supplies RGB frames to the control loop, one per call.
///
/// Device handles (camera drivers in particular) are often tied to the
/// thread that opened them, so implementations are not required to be
/// `Send`; the loop builds its source on the thread that reads from it.
pub trait FrameSource {
    /// Returns the next frame, `Ok(None)` once a finite source is
    /// exhausted, or an error for a single failed read.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the underlying device.
    fn close(&mut self);
}
