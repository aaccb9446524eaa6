//! BlazeFace face detector using ONNX Runtime via `ort`.
//!
//! A lightweight short-range detector that provides face boxes only. The
//! face mesh stage uses its best box as the crop for landmark regression.

use std::path::Path;

use crate::detection::infrastructure::onnx_session::load_session;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// BlazeFace model input resolution.
const INPUT_SIZE: u32 = 128;

/// Default confidence threshold.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f32 = 0.3;

/// Number of BlazeFace anchors (short-range model).
const NUM_ANCHORS: usize = 896;

/// BlazeFace face detector backed by an ONNX Runtime session.
pub struct OnnxBlazefaceDetector {
    session: ort::session::Session,
    confidence: f32,
    anchors: Vec<[f32; 2]>,
}

impl OnnxBlazefaceDetector {
    /// Load a BlazeFace ONNX model.
    pub fn new(model_path: &Path, confidence: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        Ok(Self {
            session,
            confidence,
            anchors: generate_anchors(),
        })
    }

    /// Detected faces sorted by descending score.
    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let fw = frame.width() as f32;
        let fh = frame.height() as f32;

        let input_tensor = preprocess(frame, INPUT_SIZE);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // BlazeFace outputs two tensors:
        // - regressors: [1, 896, 16] (box deltas + keypoints)
        // - classificators: [1, 896, 1] (confidence scores)
        if outputs.len() < 2 {
            return Err(
                format!("BlazeFace model expected 2 outputs, got {}", outputs.len()).into(),
            );
        }

        let regressors = outputs[0].try_extract_array::<f32>()?;
        let scores = outputs[1].try_extract_array::<f32>()?;
        let reg_data = regressors.as_slice().ok_or("Cannot get regressor slice")?;
        let score_data = scores.as_slice().ok_or("Cannot get score slice")?;

        let mut raw = Vec::new();
        let num_anchors = self.anchors.len().min(NUM_ANCHORS);

        for (i, &raw_score) in score_data.iter().enumerate().take(num_anchors) {
            let score = sigmoid(raw_score);
            if score < self.confidence {
                continue;
            }

            let reg_offset = i * 16;
            if reg_offset + 4 > reg_data.len() {
                break;
            }

            let anchor = &self.anchors[i];
            raw.push(decode_box(anchor, &reg_data[reg_offset..reg_offset + 4], score, fw, fh));
        }

        Ok(nms(raw, NMS_IOU_THRESH))
    }
}

/// Decode box center + size relative to the anchor, in frame pixels.
fn decode_box(anchor: &[f32; 2], reg: &[f32], score: f32, fw: f32, fh: f32) -> FaceBox {
    let size = INPUT_SIZE as f32;
    let cx = anchor[0] + reg[0] / size;
    let cy = anchor[1] + reg[1] / size;
    let w = reg[2] / size;
    let h = reg[3] / size;

    let x1 = ((cx - w / 2.0) * fw).max(0.0);
    let y1 = ((cy - h / 2.0) * fh).max(0.0);
    let x2 = ((cx + w / 2.0) * fw).min(fw);
    let y2 = ((cy + h / 2.0) * fh).min(fh);

    FaceBox {
        x: x1,
        y: y1,
        width: (x2 - x1).max(0.0),
        height: (y2 - y1).max(0.0),
        score,
    }
}

/// Resize frame to `size × size` and normalize to [0,1] NCHW float32.
fn preprocess(frame: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

/// Generate BlazeFace anchors for the short-range model.
///
/// The short-range model uses two feature map sizes: 16×16 and 8×8,
/// with 2 and 6 anchors per cell respectively.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)]; // (stride, anchors_per_cell)
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, num) in &strides {
        let grid_size = INPUT_SIZE as usize / stride;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let cx = (x as f32 + 0.5) / grid_size as f32;
                let cy = (y as f32 + 0.5) / grid_size as f32;
                for _ in 0..num {
                    anchors.push([cx, cy]);
                }
            }
        }
    }

    anchors
}

fn nms(mut dets: Vec<FaceBox>, iou_thresh: f32) -> Vec<FaceBox> {
    dets.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<FaceBox> = Vec::new();
    for det in dets {
        if keep.iter().all(|k| k.iou(&det) <= iou_thresh) {
            keep.push(det);
        }
    }
    keep
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn face_box(x: f32, y: f32, w: f32, h: f32, score: f32) -> FaceBox {
        FaceBox {
            x,
            y,
            width: w,
            height: h,
            score,
        }
    }

    #[test]
    fn test_preprocess_shape() {
        let data = vec![128u8; 200 * 100 * 3];
        let frame = Frame::new(data, 200, 100, 3, 0);
        let tensor = preprocess(&frame, 128);
        assert_eq!(tensor.shape(), &[1, 3, 128, 128]);
    }

    #[test]
    fn test_preprocess_normalized() {
        let data = vec![255u8; 50 * 50 * 3];
        let frame = Frame::new(data, 50, 50, 3, 0);
        let tensor = preprocess(&frame, 128);
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_generate_anchors_count() {
        // 16×16 grid × 2 anchors + 8×8 grid × 6 anchors = 512 + 384 = 896
        assert_eq!(generate_anchors().len(), NUM_ANCHORS);
    }

    #[test]
    fn test_decode_box_centered_on_anchor() {
        // Zero offsets, 64px box (half the input) on a 640x480 frame
        let b = decode_box(&[0.5, 0.5], &[0.0, 0.0, 64.0, 64.0], 0.9, 640.0, 480.0);
        assert_relative_eq!(b.x, 160.0);
        assert_relative_eq!(b.y, 120.0);
        assert_relative_eq!(b.width, 320.0);
        assert_relative_eq!(b.height, 240.0);
    }

    #[test]
    fn test_decode_box_clamps_to_frame() {
        let b = decode_box(&[0.0, 0.0], &[0.0, 0.0, 64.0, 64.0], 0.9, 100.0, 100.0);
        assert_relative_eq!(b.x, 0.0);
        assert_relative_eq!(b.y, 0.0);
        assert_relative_eq!(b.width, 25.0);
    }

    #[test]
    fn test_sigmoid_zero() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_nms_suppresses_overlap_keeps_best() {
        let dets = vec![
            face_box(5.0, 5.0, 100.0, 100.0, 0.7),
            face_box(0.0, 0.0, 100.0, 100.0, 0.9),
        ];
        let kept = nms(dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert_relative_eq!(kept[0].score, 0.9);
    }

    #[test]
    fn test_nms_keeps_separate_sorted() {
        let dets = vec![
            face_box(200.0, 200.0, 50.0, 50.0, 0.8),
            face_box(0.0, 0.0, 50.0, 50.0, 0.9),
        ];
        let kept = nms(dets, 0.3);
        assert_eq!(kept.len(), 2);
        assert!(kept[0].score > kept[1].score);
    }
}
