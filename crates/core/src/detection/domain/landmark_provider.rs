use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::shared::frame::Frame;

/// Domain interface for face landmark extraction.
///
/// Returns `None` when no face is visible. Only the first (most confident)
/// face is reported. Implementations may keep state across frames, hence
/// `&mut self`.
pub trait LandmarkProvider: Send {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<FaceLandmarks>, Box<dyn std::error::Error>>;
}
