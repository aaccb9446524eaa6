/// Axis-aligned face bounding box in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: f32,
}

impl FaceBox {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Square box around the same center, with each side grown by `padding`
    /// (fraction of the longer side), clamped to the frame.
    ///
    /// Returns `None` when nothing of the box remains inside the frame.
    pub fn padded_square(&self, padding: f32, frame_w: u32, frame_h: u32) -> Option<FaceBox> {
        let (cx, cy) = self.center();
        let side = self.width.max(self.height) * (1.0 + padding);
        let x1 = (cx - side / 2.0).max(0.0);
        let y1 = (cy - side / 2.0).max(0.0);
        let x2 = (cx + side / 2.0).min(frame_w as f32);
        let y2 = (cy + side / 2.0).min(frame_h as f32);

        if x2 - x1 < 1.0 || y2 - y1 < 1.0 {
            return None;
        }

        Some(FaceBox {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            score: self.score,
        })
    }

    pub fn iou(&self, other: &FaceBox) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }
        let union = self.width * self.height + other.width * other.height - inter;
        inter / union
    }
}
