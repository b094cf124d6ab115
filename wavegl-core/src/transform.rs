/// Interactive translation/rotation state and the model-view matrix it derives
use serde::{Deserialize, Serialize};

use crate::matrix::{self, Matrix16};

/// Translation along the three axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranslationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TranslationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// Rotation about the X and Y axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Accumulated user transform of the displayed mesh
///
/// Values are never clamped; repeated input keeps accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub translation: TranslationState,
    pub rotation: RotationState,
}

impl TransformState {
    pub fn new(translation: TranslationState, rotation: RotationState) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Build the model-view matrix
    ///
    /// The product is `(Rx * Ry) * T` in row-major order. Swapping the
    /// operands changes whether the mesh orbits its own origin or the camera.
    pub fn model_view_matrix(&self) -> Matrix16 {
        let t = matrix::translation(self.translation.x, self.translation.y, self.translation.z);
        let rx = matrix::rotation_x(self.rotation.x);
        let ry = matrix::rotation_y(self.rotation.y);
        matrix::multiply(&matrix::multiply(&rx, &ry), &t)
    }
}

impl Default for TransformState {
    /// Mesh four units in front of the camera, tilted to show the wave
    fn default() -> Self {
        Self {
            translation: TranslationState::new(0.0, 0.0, -4.0),
            rotation: RotationState::new(40.0, 30.0),
        }
    }
}
