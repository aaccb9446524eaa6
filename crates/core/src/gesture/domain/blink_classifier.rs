//! Per-frame eye closure classification from eyelid landmark separation.
//!
//! The threshold is a fraction of the frame height so the same ratio works
//! at any camera resolution. Every frame is classified from scratch.

use crate::detection::domain::face_landmarks::{FaceLandmarks, LandmarkError};
use crate::gesture::domain::gesture_intent::BlinkStatus;
use crate::shared::constants::{LEFT_EYE_LOWER, LEFT_EYE_UPPER, RIGHT_EYE_LOWER, RIGHT_EYE_UPPER};

/// Closed iff the eyelid gap is strictly below `ratio × frame_height`.
pub fn is_eye_closed(upper_y: f64, lower_y: f64, frame_height: f64, ratio: f64) -> bool {
    (upper_y - lower_y).abs() < ratio * frame_height
}

/// Classifies both eyes. Landmark y is scaled to frame pixels first.
pub fn blink_status(
    landmarks: &FaceLandmarks,
    frame_height: u32,
    ratio: f64,
) -> Result<BlinkStatus, LandmarkError> {
    let h = frame_height as f64;
    let eye_closed = |upper: usize, lower: usize| -> Result<bool, LandmarkError> {
        let upper_y = landmarks.get(upper)?.y * h;
        let lower_y = landmarks.get(lower)?.y * h;
        Ok(is_eye_closed(upper_y, lower_y, h, ratio))
    };

    Ok(BlinkStatus {
        left_closed: eye_closed(LEFT_EYE_UPPER, LEFT_EYE_LOWER)?,
        right_closed: eye_closed(RIGHT_EYE_UPPER, RIGHT_EYE_LOWER)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_landmarks::Landmark;
    use crate::shared::constants::{BLINK_THRESHOLD_RATIO, FACE_MESH_LANDMARK_COUNT};
    use rstest::rstest;

    fn face_with_gaps(left_gap: f64, right_gap: f64) -> FaceLandmarks {
        let mut pts = vec![Landmark::new(0.5, 0.5); FACE_MESH_LANDMARK_COUNT];
        pts[LEFT_EYE_UPPER] = Landmark::new(0.4, 0.40);
        pts[LEFT_EYE_LOWER] = Landmark::new(0.4, 0.40 + left_gap);
        pts[RIGHT_EYE_UPPER] = Landmark::new(0.6, 0.40);
        pts[RIGHT_EYE_LOWER] = Landmark::new(0.6, 0.40 + right_gap);
        FaceLandmarks::new(pts)
    }

    #[rstest]
    #[case::well_below(0.0, true)]
    #[case::just_below(7.5, true)]
    #[case::boundary_counts_as_open(8.0, false)]
    #[case::above(12.0, false)]
    fn test_is_eye_closed_threshold(#[case] gap_px: f64, #[case] expected: bool) {
        // 512px frame, ratio 1/64 -> threshold exactly 8px
        assert_eq!(is_eye_closed(0.0, gap_px, 512.0, 0.015625), expected);
    }

    #[test]
    fn test_is_eye_closed_ignores_lid_order() {
        assert!(is_eye_closed(105.0, 100.0, 480.0, 0.015));
        assert!(!is_eye_closed(120.0, 100.0, 480.0, 0.015));
    }

    #[test]
    fn test_is_eye_closed_scales_with_resolution() {
        // Same 10px gap: closed at 1080p (16.2px threshold), open at 480p
        assert!(is_eye_closed(0.0, 10.0, 1080.0, 0.015));
        assert!(!is_eye_closed(0.0, 10.0, 480.0, 0.015));
    }

    #[test]
    fn test_is_eye_closed_is_deterministic() {
        let first = is_eye_closed(10.0, 14.0, 480.0, 0.015);
        for _ in 0..5 {
            assert_eq!(is_eye_closed(10.0, 14.0, 480.0, 0.015), first);
        }
    }

    #[rstest]
    #[case::both_open(0.05, 0.05, false, false)]
    #[case::left_wink(0.001, 0.05, true, false)]
    #[case::right_wink(0.05, 0.001, false, true)]
    #[case::both_closed(0.001, 0.001, true, true)]
    fn test_blink_status(
        #[case] left_gap: f64,
        #[case] right_gap: f64,
        #[case] left_closed: bool,
        #[case] right_closed: bool,
    ) {
        let status = blink_status(&face_with_gaps(left_gap, right_gap), 480, BLINK_THRESHOLD_RATIO)
            .unwrap();
        assert_eq!(
            status,
            BlinkStatus {
                left_closed,
                right_closed
            }
        );
    }

    #[test]
    fn test_blink_status_missing_landmarks_errors() {
        let lm = FaceLandmarks::new(vec![Landmark::new(0.5, 0.5); 100]);
        assert!(blink_status(&lm, 480, BLINK_THRESHOLD_RATIO).is_err());
    }
}
