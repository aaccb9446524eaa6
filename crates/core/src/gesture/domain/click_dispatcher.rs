use std::time::Duration;

use crate::gesture::domain::gesture_intent::{BlinkStatus, ClickKind};
use crate::gesture::domain::interpreter_state::{cooldown_elapsed, InterpreterState};

/// Turns a wink into at most one click per cooldown window.
///
/// Left wink clicks left, right wink clicks right. Both eyes open or both
/// closed never click. The cooldown is shared by both buttons.
pub fn dispatch_click(
    state: &mut InterpreterState,
    eyes: BlinkStatus,
    now: Duration,
    cooldown: Duration,
) -> ClickKind {
    if !cooldown_elapsed(state.last_click_time, now, cooldown) {
        return ClickKind::None;
    }

    let click = match (eyes.left_closed, eyes.right_closed) {
        (true, false) => ClickKind::Left,
        (false, true) => ClickKind::Right,
        _ => ClickKind::None,
    };

    if click != ClickKind::None {
        state.last_click_time = Some(now);
    }
    click
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const COOLDOWN: Duration = Duration::from_secs(1);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn eyes(left_closed: bool, right_closed: bool) -> BlinkStatus {
        BlinkStatus {
            left_closed,
            right_closed,
        }
    }

    #[rstest]
    #[case::left_wink(true, false, ClickKind::Left)]
    #[case::right_wink(false, true, ClickKind::Right)]
    #[case::both_open(false, false, ClickKind::None)]
    #[case::both_closed(true, true, ClickKind::None)]
    fn test_parity(#[case] left: bool, #[case] right: bool, #[case] expected: ClickKind) {
        let mut state = InterpreterState::new();
        assert_eq!(dispatch_click(&mut state, eyes(left, right), ms(0), COOLDOWN), expected);
    }

    #[test]
    fn test_click_updates_last_click_time() {
        let mut state = InterpreterState::new();
        dispatch_click(&mut state, eyes(true, false), ms(1200), COOLDOWN);
        assert_eq!(state.last_click_time(), Some(ms(1200)));
    }

    #[test]
    fn test_no_click_leaves_last_click_time() {
        let mut state = InterpreterState::new();
        dispatch_click(&mut state, eyes(false, false), ms(1200), COOLDOWN);
        assert_eq!(state.last_click_time(), None);
    }

    #[test]
    fn test_sustained_wink_fires_once_per_window() {
        let mut state = InterpreterState::new();
        let mut clicks = 0;
        // Wink held for 900ms, sampled every 33ms
        for t in (0..900).step_by(33) {
            if dispatch_click(&mut state, eyes(true, false), ms(t), COOLDOWN) != ClickKind::None {
                clicks += 1;
            }
        }
        assert_eq!(clicks, 1);
    }

    #[test]
    fn test_cooldown_is_shared_between_buttons() {
        let mut state = InterpreterState::new();
        assert_eq!(
            dispatch_click(&mut state, eyes(true, false), ms(0), COOLDOWN),
            ClickKind::Left
        );
        assert_eq!(
            dispatch_click(&mut state, eyes(false, true), ms(500), COOLDOWN),
            ClickKind::None
        );
        assert_eq!(
            dispatch_click(&mut state, eyes(false, true), ms(1000), COOLDOWN),
            ClickKind::Right
        );
    }

    #[test]
    fn test_never_two_clicks_within_cooldown() {
        let mut state = InterpreterState::new();
        let mut fired_at = Vec::new();
        for t in (0..5000).step_by(20) {
            let left = (t / 100) % 2 == 0;
            if dispatch_click(&mut state, eyes(left, !left), ms(t), COOLDOWN) != ClickKind::None {
                fired_at.push(t);
            }
        }
        assert!(fired_at.len() > 1);
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] >= 1000);
        }
    }
}
