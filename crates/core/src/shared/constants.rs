pub const BLAZEFACE_MODEL_NAME: &str = "blazeface_short_range.onnx";
pub const FACE_MESH_MODEL_NAME: &str = "face_landmarks_detector.onnx";

/// Eyelid gap below this fraction of the frame height counts as closed.
pub const BLINK_THRESHOLD_RATIO: f64 = 0.015;

pub const CLICK_COOLDOWN_SECS: f64 = 1.0;
pub const ZOOM_COOLDOWN_SECS: f64 = 1.0;

/// Frame-to-frame eye distance change (in frame pixels) that triggers zoom.
pub const ZOOM_SENSITIVITY: f64 = 8.0;

/// How long both eyes must stay closed before a screenshot is taken.
pub const SCREENSHOT_HOLD_SECS: f64 = 2.5;

/// Reopenings shorter than this do not end a closed-eyes episode.
pub const REOPEN_GRACE_SECS: f64 = 0.5;

/// Run gesture interpretation on every Nth captured frame.
pub const PROCESS_EVERY_N_FRAMES: usize = 5;

// Face mesh landmark indices (478-point topology with iris refinement).
pub const LEFT_EYE_UPPER: usize = 159;
pub const LEFT_EYE_LOWER: usize = 145;
pub const RIGHT_EYE_UPPER: usize = 386;
pub const RIGHT_EYE_LOWER: usize = 374;
pub const LEFT_EYE_OUTER_CORNER: usize = 33;
pub const RIGHT_EYE_OUTER_CORNER: usize = 263;
pub const POINTER_LANDMARK: usize = 474;

pub const FACE_MESH_LANDMARK_COUNT: usize = 478;

pub const SCREENSHOT_FILE_PREFIX: &str = "eyes_closed_screenshot_";
pub const SETTINGS_DIR_NAME: &str = "BlinkPoint";
