use std::time::Duration;

use crate::gesture::domain::gesture_intent::ZoomDirection;
use crate::gesture::domain::interpreter_state::InterpreterState;

/// Fires zoom when the eye distance jumps between consecutive frames.
///
/// Growing distance means the face moved toward the camera (zoom in).
/// The previous distance is replaced on every call, so the delta is always
/// frame-to-frame. The first sample never fires. Unlike clicks, the zoom
/// cooldown must be strictly exceeded.
pub fn detect_zoom(
    state: &mut InterpreterState,
    distance: f64,
    now: Duration,
    sensitivity: f64,
    cooldown: Duration,
) -> ZoomDirection {
    let previous = state.previous_eye_distance.replace(distance);

    let Some(previous) = previous else {
        return ZoomDirection::None;
    };

    let delta = distance - previous;
    let cooled_down = match state.last_zoom_time {
        None => true,
        Some(t) => now.saturating_sub(t) > cooldown,
    };

    if delta.abs() <= sensitivity || !cooled_down {
        return ZoomDirection::None;
    }

    state.last_zoom_time = Some(now);
    if delta > 0.0 {
        ZoomDirection::In
    } else {
        ZoomDirection::Out
    }
}
