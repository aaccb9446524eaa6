use crate::detection::domain::face_landmarks::{FaceLandmarks, LandmarkError};
use crate::shared::constants::{LEFT_EYE_OUTER_CORNER, RIGHT_EYE_OUTER_CORNER};

/// Distance between the outer eye corners, used as a proxy for how close
/// the face is to the camera.
///
/// Horizontal span is scaled to frame pixels; the vertical offset stays
/// normalized, so the result is dominated by the pixel width between the
/// eyes and zoom sensitivity reads as "pixels per frame".
pub fn eye_distance(landmarks: &FaceLandmarks, frame_width: u32) -> Result<f64, LandmarkError> {
    let left = landmarks.get(LEFT_EYE_OUTER_CORNER)?;
    let right = landmarks.get(RIGHT_EYE_OUTER_CORNER)?;
    let w = frame_width as f64;

    Ok((left.x * w - right.x * w).hypot(left.y - right.y))
}
