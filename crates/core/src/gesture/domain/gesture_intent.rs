/// Which mouse click, if any, a frame's eye state asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClickKind {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomDirection {
    #[default]
    None,
    In,
    Out,
}

/// Absolute screen position in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorTarget {
    pub x: f64,
    pub y: f64,
}

/// Per-eye closed classification for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlinkStatus {
    pub left_closed: bool,
    pub right_closed: bool,
}

impl BlinkStatus {
    pub fn both_closed(&self) -> bool {
        self.left_closed && self.right_closed
    }
}

/// Everything the interpreter decided for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureIntent {
    pub cursor: CursorTarget,
    pub click: ClickKind,
    pub zoom: ZoomDirection,
    pub screenshot: bool,
    pub eyes: BlinkStatus,
}
