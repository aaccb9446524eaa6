use minifb::{Key, Window, WindowOptions};

use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::frame::Frame;

/// Preview window backed by `minifb`.
///
/// The window is created on the first frame so it matches the camera
/// resolution. Closing it, Esc or `q` requests quit.
pub struct MinifbDisplay {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl MinifbDisplay {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window: None,
            buffer: Vec::new(),
        }
    }

    fn ensure_window(&mut self, width: usize, height: usize) -> Result<&mut Window, minifb::Error> {
        let window = match self.window.take() {
            Some(window) if window.get_size() == (width, height) => window,
            _ => {
                let mut window =
                    Window::new(&self.title, width, height, WindowOptions::default())?;
                window.set_target_fps(60);
                window
            }
        };
        Ok(self.window.insert(window))
    }
}

/// Packs RGB bytes into minifb's 0RGB `u32` pixels.
fn pack_rgb(rgb: &[u8], out: &mut Vec<u32>) {
    out.clear();
    out.extend(
        rgb.chunks_exact(3)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32),
    );
}

impl FrameDisplay for MinifbDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("expected RGB frame, got {} channels", frame.channels()).into());
        }
        let (w, h) = (frame.width() as usize, frame.height() as usize);

        let mut buffer = std::mem::take(&mut self.buffer);
        pack_rgb(frame.data(), &mut buffer);
        let result = self
            .ensure_window(w, h)
            .and_then(|window| window.update_with_buffer(&buffer, w, h));
        self.buffer = buffer;
        result?;
        Ok(())
    }

    fn poll_events(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.update();
        }
    }

    fn quit_requested(&self) -> bool {
        match &self.window {
            Some(window) => {
                !window.is_open() || window.is_key_down(Key::Escape) || window.is_key_down(Key::Q)
            }
            None => false,
        }
    }

    fn close(&mut self) {
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb() {
        let mut out = vec![7; 5];
        pack_rgb(&[0xFF, 0x00, 0x00, 0x12, 0x34, 0x56], &mut out);
        assert_eq!(out, vec![0x00FF_0000, 0x0012_3456]);
    }

    #[test]
    fn test_no_window_means_no_quit() {
        let display = MinifbDisplay::new("test");
        assert!(!display.quit_requested());
    }
}
