use std::path::Path;

use xcap::Monitor;

use crate::control::domain::action_sink::ScreenshotError;

/// Grabs the primary monitor with `xcap` and saves it as PNG.
pub struct XcapScreenCapturer;

impl XcapScreenCapturer {
    pub fn new() -> Self {
        Self
    }

    pub fn capture_to(&self, path: &Path) -> Result<(), ScreenshotError> {
        let monitors = Monitor::all().map_err(|e| ScreenshotError::Capture(e.to_string()))?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary())
            .or_else(|| monitors.first())
            .ok_or(ScreenshotError::NoDisplay)?;

        let image = monitor
            .capture_image()
            .map_err(|e| ScreenshotError::Capture(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScreenshotError::Write {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        }
        image.save(path).map_err(|e| ScreenshotError::Write {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        log::debug!(
            "Captured {}x{} screenshot to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }
}

impl Default for XcapScreenCapturer {
    fn default() -> Self {
        Self::new()
    }
}
