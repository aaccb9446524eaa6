use std::time::Duration;

use crate::gesture::domain::gesture_intent::BlinkStatus;
use crate::gesture::domain::interpreter_state::{EyeClosure, InterpreterState};

/// Outcome of one step of the closed-eyes state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClosureStep {
    pub fire_screenshot: bool,
    /// True only outside a closed-eyes episode. A reopening still inside the
    /// grace period, or the eyes opening after the screenshot, does not count.
    pub clicks_enabled: bool,
}

/// Advances the closed-eyes episode by one interpreted frame.
///
/// An episode starts on the first both-closed frame and fires a single
/// screenshot once it has lasted `hold`. It ends only after the eyes have
/// stayed open for longer than `grace`; closing again inside the grace
/// continues the same episode. Clicks stay disabled for the whole episode,
/// including after the screenshot has fired.
pub fn advance_closure(
    state: &mut InterpreterState,
    eyes: BlinkStatus,
    now: Duration,
    hold: Duration,
    grace: Duration,
) -> ClosureStep {
    if eyes.both_closed() {
        state.reopened_at = None;
        let mut fire_screenshot = false;
        match state.closure {
            EyeClosure::Open => {
                state.closure = EyeClosure::Closing { since: now };
            }
            EyeClosure::Closing { since } => {
                if now.saturating_sub(since) >= hold {
                    state.closure = EyeClosure::Fired { since };
                    fire_screenshot = true;
                }
            }
            EyeClosure::Fired { .. } => {}
        }
        return ClosureStep {
            fire_screenshot,
            clicks_enabled: false,
        };
    }

    if state.closure != EyeClosure::Open {
        let reopened_at = *state.reopened_at.get_or_insert(now);
        if now.saturating_sub(reopened_at) > grace {
            state.closure = EyeClosure::Open;
            state.reopened_at = None;
        }
    }

    ClosureStep {
        fire_screenshot: false,
        clicks_enabled: state.closure == EyeClosure::Open,
    }
}
