use std::time::Duration;

/// Progress of the current closed-eyes episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EyeClosure {
    #[default]
    Open,
    /// Both eyes closed since `since`; screenshot not taken yet.
    Closing { since: Duration },
    /// Screenshot already taken for the episode that started at `since`.
    Fired { since: Duration },
}

/// Everything the interpreter remembers between frames.
///
/// Timestamps are offsets from the clock's epoch. `None` means the action
/// has never fired, so its cooldown is always considered elapsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterpreterState {
    pub(crate) last_click_time: Option<Duration>,
    pub(crate) last_zoom_time: Option<Duration>,
    pub(crate) closure: EyeClosure,
    /// First frame of the current reopening while an episode is pending.
    pub(crate) reopened_at: Option<Duration>,
    pub(crate) previous_eye_distance: Option<f64>,
}

impl InterpreterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_click_time(&self) -> Option<Duration> {
        self.last_click_time
    }

    pub fn last_zoom_time(&self) -> Option<Duration> {
        self.last_zoom_time
    }

    pub fn closure(&self) -> EyeClosure {
        self.closure
    }

    pub fn eye_closed_start_time(&self) -> Option<Duration> {
        match self.closure {
            EyeClosure::Open => None,
            EyeClosure::Closing { since } | EyeClosure::Fired { since } => Some(since),
        }
    }

    pub fn screenshot_taken(&self) -> bool {
        matches!(self.closure, EyeClosure::Fired { .. })
    }

    pub fn previous_eye_distance(&self) -> Option<f64> {
        self.previous_eye_distance
    }
}

/// True when no previous firing exists or at least `cooldown` has passed.
pub(crate) fn cooldown_elapsed(last: Option<Duration>, now: Duration, cooldown: Duration) -> bool {
    match last {
        None => true,
        Some(t) => now.saturating_sub(t) >= cooldown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = InterpreterState::new();
        assert_eq!(state.last_click_time(), None);
        assert_eq!(state.last_zoom_time(), None);
        assert_eq!(state.closure(), EyeClosure::Open);
        assert_eq!(state.eye_closed_start_time(), None);
        assert!(!state.screenshot_taken());
        assert_eq!(state.previous_eye_distance(), None);
    }

    #[test]
    fn test_screenshot_taken_implies_start_time() {
        let mut state = InterpreterState::new();
        state.closure = EyeClosure::Fired { since: secs(3.0) };
        assert!(state.screenshot_taken());
        assert_eq!(state.eye_closed_start_time(), Some(secs(3.0)));
    }

    #[test]
    fn test_closing_has_start_time_but_no_screenshot() {
        let mut state = InterpreterState::new();
        state.closure = EyeClosure::Closing { since: secs(1.0) };
        assert!(!state.screenshot_taken());
        assert_eq!(state.eye_closed_start_time(), Some(secs(1.0)));
    }

    #[test]
    fn test_cooldown_elapsed() {
        let cd = secs(1.0);
        assert!(cooldown_elapsed(None, secs(0.0), cd));
        assert!(!cooldown_elapsed(Some(secs(1.0)), secs(1.5), cd));
        assert!(cooldown_elapsed(Some(secs(1.0)), secs(2.0), cd));
        // Clock readings older than the last firing never count as elapsed
        assert!(!cooldown_elapsed(Some(secs(5.0)), secs(4.0), cd));
    }
}
