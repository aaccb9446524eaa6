use std::path::{Path, PathBuf};

use crate::gesture::domain::cursor_mapper::ScreenSize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Keys that can take part in a zoom chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordKey {
    Control,
    Plus,
    Minus,
}

#[derive(thiserror::Error, Debug)]
pub enum ScreenshotError {
    #[error("no display available to capture")]
    NoDisplay,
    #[error("screen capture failed: {0}")]
    Capture(String),
    #[error("failed to write screenshot {path}: {source}")]
    Write {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Desktop side effects requested by gestures.
///
/// Like frame sources, input backends may be bound to the thread that
/// created them, so no `Send` bound.
pub trait ActionSink {
    /// Size of the primary display in pixels.
    fn screen_size(&self) -> Result<ScreenSize, Box<dyn std::error::Error>>;

    fn move_cursor_to(&mut self, x: i32, y: i32) -> Result<(), Box<dyn std::error::Error>>;

    fn click(&mut self, button: MouseButton) -> Result<(), Box<dyn std::error::Error>>;

    /// Presses `keys` in order, then releases them in reverse order.
    fn send_key_chord(&mut self, keys: &[ChordKey]) -> Result<(), Box<dyn std::error::Error>>;

    /// Captures the primary display to a PNG at `path`.
    fn take_screenshot(&mut self, path: &Path) -> Result<(), ScreenshotError>;
}
