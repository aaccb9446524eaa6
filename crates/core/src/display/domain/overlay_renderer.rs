use crate::shared::frame::Frame;

/// Draws status text into a frame before it is displayed.
pub trait OverlayRenderer {
    /// `origin` is the bottom-left corner of the text in frame pixels.
    /// Text running off the frame is clipped.
    fn draw_text(&self, frame: &mut Frame, text: &str, origin: (u32, u32), color: [u8; 3]);
}
