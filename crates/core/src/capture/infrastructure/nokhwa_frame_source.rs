use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Webcam frames via `nokhwa`, decoded to packed RGB.
pub struct NokhwaFrameSource {
    camera: Camera,
    frame_count: usize,
}

impl NokhwaFrameSource {
    /// Opens camera `index` at its highest frame rate and starts streaming.
    pub fn open(index: u32) -> Result<Self, Box<dyn std::error::Error>> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)?;
        camera.open_stream()?;

        let resolution = camera.resolution();
        log::info!(
            "Opened camera {index}: {} ({}x{} @ {} fps)",
            camera.info().human_name(),
            resolution.width(),
            resolution.height(),
            camera.frame_rate()
        );

        Ok(Self {
            camera,
            frame_count: 0,
        })
    }
}

impl FrameSource for NokhwaFrameSource {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let buffer = self.camera.frame()?;
        let image = buffer.decode_image::<RgbFormat>()?;
        let (width, height) = image.dimensions();
        let frame = Frame::new(image.into_raw(), width, height, 3, self.frame_count);
        self.frame_count += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream: {e}");
        }
    }
}
