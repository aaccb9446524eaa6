//! Two-stage face mesh landmark provider.
//!
//! BlazeFace finds the face box; the box is padded to a square crop that the
//! MediaPipe face landmark model regresses 478 points from (468 mesh points
//! plus 10 iris points). Points are mapped back to frame-normalized
//! coordinates.

use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;

use crate::detection::domain::face_landmarks::{FaceLandmarks, Landmark};
use crate::detection::domain::landmark_provider::LandmarkProvider;
use crate::detection::infrastructure::onnx_blazeface_detector::OnnxBlazefaceDetector;
use crate::detection::infrastructure::onnx_session::load_session;
use crate::shared::constants::FACE_MESH_LANDMARK_COUNT;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Face landmark model input resolution (square, NHWC).
const INPUT_SIZE: u32 = 256;

/// Crop padding around the detected box, as a fraction of its longer side.
const CROP_PADDING: f32 = 0.25;

/// Minimum face presence probability reported by the mesh model.
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.5;

pub struct OnnxFaceMeshProvider {
    detector: OnnxBlazefaceDetector,
    session: ort::session::Session,
    presence_threshold: f32,
}

impl OnnxFaceMeshProvider {
    pub fn new(
        detector: OnnxBlazefaceDetector,
        mesh_model_path: &Path,
        presence_threshold: f32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(mesh_model_path)?;
        Ok(Self {
            detector,
            session,
            presence_threshold,
        })
    }
}

impl LandmarkProvider for OnnxFaceMeshProvider {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<FaceLandmarks>, Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("expected RGB frame, got {} channels", frame.channels()).into());
        }

        let Some(best) = self.detector.detect(frame)?.into_iter().next() else {
            return Ok(None);
        };
        let Some(crop) = best.padded_square(CROP_PADDING, frame.width(), frame.height()) else {
            return Ok(None);
        };

        let input = preprocess(frame, &crop)?;
        let input_value = ort::value::Tensor::from_array(input)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // Outputs: landmarks [1, 1, 1, 1434] in input pixels, then a face
        // presence logit [1, 1, 1, 1].
        let raw = outputs[0].try_extract_array::<f32>()?;
        let raw = raw.as_slice().ok_or("Cannot get landmark slice")?;

        if outputs.len() > 1 {
            let presence = outputs[1].try_extract_array::<f32>()?;
            if let Some(&logit) = presence.iter().next() {
                if sigmoid(logit) < self.presence_threshold {
                    log::debug!("Face mesh presence below threshold");
                    return Ok(None);
                }
            }
        }

        Ok(Some(decode_landmarks(raw, &crop, frame.width(), frame.height())?))
    }
}

/// Crop the face square and resize to the model input, [0,1] NHWC float32.
fn preprocess(
    frame: &Frame,
    crop: &FaceBox,
) -> Result<ndarray::Array4<f32>, Box<dyn std::error::Error>> {
    let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or("Failed to create image from frame data")?;
    let cropped = image::imageops::crop_imm(
        &img,
        crop.x as u32,
        crop.y as u32,
        crop.width.max(1.0) as u32,
        crop.height.max(1.0) as u32,
    )
    .to_image();
    let resized = image::imageops::resize(&cropped, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

    let s = INPUT_SIZE as usize;
    let mut tensor = ndarray::Array4::<f32>::zeros((1, s, s, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }
    Ok(tensor)
}

/// Map crop-space landmark triples back to frame-normalized points.
fn decode_landmarks(
    raw: &[f32],
    crop: &FaceBox,
    frame_w: u32,
    frame_h: u32,
) -> Result<FaceLandmarks, Box<dyn std::error::Error>> {
    if raw.len() < FACE_MESH_LANDMARK_COUNT * 3 {
        return Err(format!(
            "face mesh output has {} values, expected {}",
            raw.len(),
            FACE_MESH_LANDMARK_COUNT * 3
        )
        .into());
    }

    let size = INPUT_SIZE as f64;
    let points = raw
        .chunks_exact(3)
        .take(FACE_MESH_LANDMARK_COUNT)
        .map(|p| Landmark {
            x: (crop.x as f64 + p[0] as f64 / size * crop.width as f64) / frame_w as f64,
            y: (crop.y as f64 + p[1] as f64 / size * crop.height as f64) / frame_h as f64,
            z: p[2] as f64 / size,
        })
        .collect();

    Ok(FaceLandmarks::new(points))
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crop(x: f32, y: f32, side: f32) -> FaceBox {
        FaceBox {
            x,
            y,
            width: side,
            height: side,
            score: 1.0,
        }
    }

    #[test]
    fn test_decode_landmarks_maps_crop_to_frame() {
        let mut raw = vec![0.0f32; FACE_MESH_LANDMARK_COUNT * 3];
        // Point 0 at crop center
        raw[0] = 128.0;
        raw[1] = 128.0;
        // Point 1 at crop origin
        raw[3] = 0.0;
        raw[4] = 0.0;

        let lm = decode_landmarks(&raw, &crop(100.0, 50.0, 200.0), 400, 300).unwrap();
        assert_eq!(lm.len(), FACE_MESH_LANDMARK_COUNT);
        // center: (100 + 100) / 400 = 0.5, (50 + 100) / 300 = 0.5
        assert_relative_eq!(lm.points()[0].x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(lm.points()[0].y, 0.5, epsilon = 1e-9);
        assert_relative_eq!(lm.points()[1].x, 0.25, epsilon = 1e-9);
        assert_relative_eq!(lm.points()[1].y, 50.0 / 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_decode_landmarks_short_output_errors() {
        let raw = vec![0.0f32; 468 * 3];
        assert!(decode_landmarks(&raw, &crop(0.0, 0.0, 10.0), 10, 10).is_err());
    }

    #[test]
    fn test_preprocess_shape_and_range() {
        let frame = Frame::new(vec![255u8; 64 * 48 * 3], 64, 48, 3, 0);
        let tensor = preprocess(&frame, &crop(8.0, 4.0, 40.0)).unwrap();
        assert_eq!(tensor.shape(), &[1, 256, 256, 3]);
        assert!((tensor[[0, 10, 10, 1]] - 1.0).abs() < 1e-6);
    }
}
