//! Desktop input through `enigo`; screenshots are delegated to
//! [`XcapScreenCapturer`].

use std::path::Path;

use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

use crate::control::domain::action_sink::{ActionSink, ChordKey, MouseButton, ScreenshotError};
use crate::control::infrastructure::xcap_screen_capturer::XcapScreenCapturer;
use crate::gesture::domain::cursor_mapper::ScreenSize;

pub struct EnigoActionSink {
    enigo: Enigo,
    capturer: XcapScreenCapturer,
}

impl EnigoActionSink {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let enigo = Enigo::new(&Settings::default())?;
        Ok(Self {
            enigo,
            capturer: XcapScreenCapturer::new(),
        })
    }
}

fn to_enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
    }
}

fn to_enigo_key(key: ChordKey) -> Key {
    match key {
        ChordKey::Control => Key::Control,
        ChordKey::Plus => Key::Unicode('+'),
        ChordKey::Minus => Key::Unicode('-'),
    }
}

impl ActionSink for EnigoActionSink {
    fn screen_size(&self) -> Result<ScreenSize, Box<dyn std::error::Error>> {
        let (width, height) = self.enigo.main_display()?;
        if width <= 0 || height <= 0 {
            return Err(format!("invalid display size {width}x{height}").into());
        }
        Ok(ScreenSize {
            width: width as u32,
            height: height as u32,
        })
    }

    fn move_cursor_to(&mut self, x: i32, y: i32) -> Result<(), Box<dyn std::error::Error>> {
        self.enigo.move_mouse(x, y, Coordinate::Abs)?;
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<(), Box<dyn std::error::Error>> {
        self.enigo.button(to_enigo_button(button), Direction::Click)?;
        Ok(())
    }

    fn send_key_chord(&mut self, keys: &[ChordKey]) -> Result<(), Box<dyn std::error::Error>> {
        let mut pressed = Vec::with_capacity(keys.len());
        let mut result = Ok(());
        for &key in keys {
            let key = to_enigo_key(key);
            if let Err(e) = self.enigo.key(key, Direction::Press) {
                result = Err(e.into());
                break;
            }
            pressed.push(key);
        }
        // Release whatever went down, even after a failed press
        for key in pressed.into_iter().rev() {
            if let Err(e) = self.enigo.key(key, Direction::Release) {
                log::warn!("Failed to release {key:?}: {e}");
            }
        }
        result
    }

    fn take_screenshot(&mut self, path: &Path) -> Result<(), ScreenshotError> {
        self.capturer.capture_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(to_enigo_button(MouseButton::Left), Button::Left);
        assert_eq!(to_enigo_button(MouseButton::Right), Button::Right);
    }

    #[test]
    fn test_zoom_chord_keys() {
        assert_eq!(to_enigo_key(ChordKey::Control), Key::Control);
        assert_eq!(to_enigo_key(ChordKey::Plus), Key::Unicode('+'));
        assert_eq!(to_enigo_key(ChordKey::Minus), Key::Unicode('-'));
    }
}
