use crate::detection::domain::face_landmarks::Landmark;
use crate::gesture::domain::gesture_intent::CursorTarget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

/// Linear map from a normalized landmark to absolute screen pixels.
///
/// No smoothing, deadzone or acceleration.
pub fn map_to_screen(landmark: &Landmark, screen: ScreenSize) -> CursorTarget {
    CursorTarget {
        x: landmark.x * screen.width as f64,
        y: landmark.y * screen.height as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    #[rstest]
    #[case::origin(0.0, 0.0, 0.0, 0.0)]
    #[case::center(0.5, 0.5, 960.0, 540.0)]
    #[case::far_corner(1.0, 1.0, 1920.0, 1080.0)]
    #[case::quarter(0.25, 0.75, 480.0, 810.0)]
    fn test_map_to_screen(#[case] x: f64, #[case] y: f64, #[case] sx: f64, #[case] sy: f64) {
        let target = map_to_screen(&Landmark::new(x, y), SCREEN);
        assert_relative_eq!(target.x, sx);
        assert_relative_eq!(target.y, sy);
    }
}
