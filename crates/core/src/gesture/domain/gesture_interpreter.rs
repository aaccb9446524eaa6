use std::time::Duration;

use crate::detection::domain::face_landmarks::{FaceLandmarks, LandmarkError};
use crate::gesture::domain::blink_classifier::blink_status;
use crate::gesture::domain::click_dispatcher::dispatch_click;
use crate::gesture::domain::cursor_mapper::{map_to_screen, ScreenSize};
use crate::gesture::domain::eye_distance::eye_distance;
use crate::gesture::domain::gesture_config::GestureConfig;
use crate::gesture::domain::gesture_intent::{ClickKind, GestureIntent};
use crate::gesture::domain::interpreter_state::InterpreterState;
use crate::gesture::domain::screenshot_trigger::advance_closure;
use crate::gesture::domain::zoom_detector::detect_zoom;
use crate::shared::constants::POINTER_LANDMARK;

/// Owns the gesture state and turns one face's landmarks into an intent.
pub struct GestureInterpreter {
    config: GestureConfig,
    state: InterpreterState,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: InterpreterState::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    /// Runs cursor, blink, zoom, screenshot and click steps in that order.
    ///
    /// All landmark lookups happen before any state changes, so a set
    /// missing a required point leaves the interpreter untouched.
    pub fn interpret(
        &mut self,
        landmarks: &FaceLandmarks,
        frame_width: u32,
        frame_height: u32,
        screen: ScreenSize,
        now: Duration,
    ) -> Result<GestureIntent, LandmarkError> {
        let cursor = map_to_screen(landmarks.get(POINTER_LANDMARK)?, screen);
        let eyes = blink_status(landmarks, frame_height, self.config.blink_ratio)?;
        let distance = eye_distance(landmarks, frame_width)?;

        let zoom = detect_zoom(
            &mut self.state,
            distance,
            now,
            self.config.zoom_sensitivity,
            self.config.zoom_cooldown(),
        );
        let closure = advance_closure(
            &mut self.state,
            eyes,
            now,
            self.config.screenshot_hold(),
            self.config.reopen_grace(),
        );
        let click = if closure.clicks_enabled {
            dispatch_click(&mut self.state, eyes, now, self.config.click_cooldown())
        } else {
            ClickKind::None
        };

        Ok(GestureIntent {
            cursor,
            click,
            zoom,
            screenshot: closure.fire_screenshot,
            eyes,
        })
    }
}
