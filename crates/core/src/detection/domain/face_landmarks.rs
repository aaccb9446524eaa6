//! Face mesh landmarks for a single detected face, valid for one frame.
//!
//! Coordinates are normalized: `x` and `y` in [0, 1] relative to the frame
//! the landmarks were extracted from. `z` is the model's relative depth.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("landmark {index} missing (face has {available} landmarks)")]
    Missing { index: usize, available: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<Landmark>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Landmark, LandmarkError> {
        self.points.get(index).ok_or(LandmarkError::Missing {
            index,
            available: self.len(),
        })
    }
}
