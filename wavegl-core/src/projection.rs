/// Viewport size, the fixed perspective frustum, and screen projection
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

use crate::matrix::{self, Matrix16};

/// Vertical field of view of the sample, in degrees
pub const FOV_Y_DEG: f32 = 50.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Pixel dimensions of the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
}

impl ViewportState {
    /// Zero dimensions are raised to 1 so the aspect ratio stays finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix16 {
        matrix::perspective(FOV_Y_DEG, self.aspect(), Z_NEAR, Z_FAR)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(800, 800)
    }
}

/// Project a 3D point to 2D screen space
///
/// `mvp` is the full clip transform (projection * model-view). Returns the
/// screen position and the normalized depth, or `None` for points behind the
/// camera or outside the view volume.
pub fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip = mvp * point.to_homogeneous();

    // Prevent division by near-zero w (and reject points behind the eye)
    if clip.w < 1e-6 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let depth = clip.z / clip.w;

    // Clip test
    if !(-1.0..=1.0).contains(&ndc_x)
        || !(-1.0..=1.0).contains(&ndc_y)
        || !(-1.0..=1.0).contains(&depth)
    {
        return None;
    }

    // Convert to screen space
    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some((screen_x, screen_y, depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = ViewportState::new(800, 600);
        assert!((viewport.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_height_is_clamped() {
        let mut viewport = ViewportState::default();
        viewport.resize(640, 0);
        assert_eq!(viewport, ViewportState { width: 640, height: 1 });
        assert!(viewport.aspect().is_finite());
    }

    #[test]
    fn test_projection_uses_aspect() {
        let wide = ViewportState::new(1600, 800).projection_matrix();
        let square = ViewportState::new(800, 800).projection_matrix();
        assert!((wide[0] * 2.0 - square[0]).abs() < 1e-6);
        assert_eq!(wide[5], square[5]);
    }

    #[test]
    fn test_center_point_projects_to_center() {
        let viewport = ViewportState::new(100, 50);
        let mvp = matrix::to_matrix4(&viewport.projection_matrix())
            * matrix::to_matrix4(&matrix::translation(0.0, 0.0, -4.0));
        let (x, y, depth) =
            project_to_screen(&mvp, &Point3::origin(), viewport.width, viewport.height).unwrap();
        assert!((x - 50.0).abs() < 1e-4);
        assert!((y - 25.0).abs() < 1e-4);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let viewport = ViewportState::default();
        let mvp = matrix::to_matrix4(&viewport.projection_matrix());
        let behind = Point3::new(0.0, 0.0, 5.0);
        assert!(project_to_screen(&mvp, &behind, viewport.width, viewport.height).is_none());
    }
}
