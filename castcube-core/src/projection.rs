/// Camera and projection utilities
use nalgebra::{Matrix4, Vector4};

use crate::transform::matrix_from_translation;

/// Perspective projection with zero-to-one depth and clip w equal to view z.
///
/// Columns are (xscale, 0, 0, 0), (0, yscale, 0, 0), (0, 0, q, 1) and
/// (0, 0, -q * near_z, 0) with `yscale = cot(fov_y / 2)`,
/// `xscale = yscale / aspect` and `q = far_z / (far_z - near_z)`.
///
/// Nothing is validated: `fov_y` outside (0, π), a zero aspect or
/// `far_z <= near_z` produce NaN or infinite elements.
pub fn matrix_from_perspective(fov_y: f32, aspect: f32, near_z: f32, far_z: f32) -> Matrix4<f32> {
    let yscale = 1.0 / (fov_y * 0.5).tan();
    let xscale = yscale / aspect;
    let q = far_z / (far_z - near_z);

    Matrix4::from_columns(&[
        Vector4::new(xscale, 0.0, 0.0, 0.0),
        Vector4::new(0.0, yscale, 0.0, 0.0),
        Vector4::new(0.0, 0.0, q, 1.0),
        Vector4::new(0.0, 0.0, q * -near_z, 0.0),
    ])
}

/// Clip-space w below which a point counts as behind the eye
const MIN_CLIP_W: f32 = 1e-6;

/// Camera configuration for rendering the cube.
///
/// The view is a plain translation: the eye sits at the origin looking down +Z
/// and `offset` moves the scene in front of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub offset: [f32; 3],
}

impl Camera {
    pub fn new(fov_y: f32, near: f32, far: f32, offset: [f32; 3]) -> Self {
        Self {
            fov_y,
            near,
            far,
            offset,
        }
    }

    /// Create the view matrix (scene placement in front of the eye)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let [x, y, z] = self.offset;
        matrix_from_translation(x, y, z)
    }

    /// Create the projection matrix for a target of the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        matrix_from_perspective(self.fov_y, aspect, self.near, self.far)
    }

    /// Project a clip-space position to screen space without clipping.
    ///
    /// Returns `(x, y, depth)` with the origin in the top-left corner, or
    /// `None` only when the point is behind the eye. Coordinates may fall
    /// outside the target and depth outside [0, 1]; a rasterizer clips those
    /// per pixel.
    pub fn clip_to_screen(
        clip: &Vector4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        if !(clip.w >= MIN_CLIP_W) {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }

    /// Project a clip-space position to screen space.
    ///
    /// Like `clip_to_screen`, but also `None` when the point lies outside the
    /// view volume.
    pub fn project_to_screen(
        clip: &Vector4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let (screen_x, screen_y, depth) = Self::clip_to_screen(clip, width, height)?;

        // Clip test
        if !(0.0..=width as f32).contains(&screen_x)
            || !(0.0..=height as f32).contains(&screen_y)
            || !(0.0..=1.0).contains(&depth)
        {
            return None;
        }

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(65.0_f32.to_radians(), 0.1, 100.0, [0.0, 0.0, 2.5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_perspective_layout() {
        let (near, far) = (0.5, 20.0);
        let m = matrix_from_perspective(2.0 * 1.0f32.atan(), 1.0, near, far);

        assert!((m[(0, 0)] - 1.0).abs() < 1e-6);
        assert!((m[(1, 1)] - 1.0).abs() < 1e-6);
        assert!((m[(2, 2)] - far / (far - near)).abs() < 1e-6);
        assert!((m[(2, 3)] - (-near * far / (far - near))).abs() < 1e-5);
        assert_eq!(m[(3, 2)], 1.0);
        assert_eq!(m[(3, 3)], 0.0);

        // Every other element is zero
        #[rustfmt::skip]
        let zeros: [(usize, usize); 10] = [
            (1, 0), (2, 0), (3, 0),
            (0, 1), (2, 1), (3, 1),
            (0, 2), (1, 2),
            (0, 3), (1, 3),
        ];
        for (row, col) in zeros {
            assert_eq!(m[(row, col)], 0.0, "element ({}, {})", row, col);
        }
    }

    #[test]
    fn test_perspective_is_column_major() {
        let m = matrix_from_perspective(FRAC_PI_2, 2.0, 1.0, 3.0);
        let q = 3.0f32 / 2.0;
        #[rustfmt::skip]
        let expected: [f32; 16] = [
            0.5, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, q, 1.0,
            0.0, 0.0, -q, 0.0,
        ];
        for (got, want) in m.as_slice().iter().zip(expected) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_perspective_maps_planes_to_unit_depth() {
        let (near, far) = (0.1, 100.0);
        let m = matrix_from_perspective(1.0, 1.5, near, far);

        let at_near = m * Vector4::new(0.0, 0.0, near, 1.0);
        let at_far = m * Vector4::new(0.0, 0.0, far, 1.0);
        assert!((at_near.z / at_near.w).abs() < 1e-5);
        assert!((at_far.z / at_far.w - 1.0).abs() < 1e-5);
        assert_eq!(at_far.w, far);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let zero_aspect = matrix_from_perspective(1.0, 0.0, 0.1, 10.0);
        assert!(zero_aspect[(0, 0)].is_infinite());

        let flat = matrix_from_perspective(1.0, 1.0, 5.0, 5.0);
        assert!(!flat[(2, 2)].is_finite());

        let closed = matrix_from_perspective(0.0, 1.0, 0.1, 10.0);
        assert!(closed[(1, 1)].is_infinite());
    }

    #[test]
    fn test_camera_projection_and_view() {
        let camera = Camera::default();
        assert_eq!(camera.view_matrix()[(2, 3)], 2.5);

        let proj = camera.projection_matrix(2.0);
        let direct = matrix_from_perspective(camera.fov_y, 2.0, camera.near, camera.far);
        assert_eq!(proj, direct);
    }

    #[test]
    fn test_project_to_screen() {
        let center = Camera::project_to_screen(&Vector4::new(0.0, 0.0, 1.0, 2.0), 80, 40);
        assert_eq!(center, Some((40.0, 20.0, 0.5)));

        let top_left = Camera::project_to_screen(&Vector4::new(-2.0, 2.0, 0.0, 2.0), 80, 40);
        assert_eq!(top_left, Some((0.0, 0.0, 0.0)));

        // Behind the eye
        assert!(Camera::project_to_screen(&Vector4::new(0.0, 0.0, -1.0, -1.0), 80, 40).is_none());
        // Outside the frustum
        assert!(Camera::project_to_screen(&Vector4::new(3.0, 0.0, 1.0, 2.0), 80, 40).is_none());
        assert!(Camera::project_to_screen(&Vector4::new(0.0, 0.0, 3.0, 2.0), 80, 40).is_none());
    }

    #[test]
    fn test_clip_to_screen_keeps_offscreen_points() {
        let wide = Camera::clip_to_screen(&Vector4::new(3.0, 0.0, 1.0, 2.0), 80, 40);
        assert_eq!(wide, Some((100.0, 20.0, 0.5)));

        let deep = Camera::clip_to_screen(&Vector4::new(0.0, 0.0, 3.0, 2.0), 80, 40);
        assert_eq!(deep, Some((40.0, 20.0, 1.5)));

        // Still rejected at or behind the eye, and for NaN input
        assert!(Camera::clip_to_screen(&Vector4::new(0.0, 0.0, 0.0, 0.0), 80, 40).is_none());
        assert!(Camera::clip_to_screen(&Vector4::new(1.0, 1.0, 1.0, -2.0), 80, 40).is_none());
        assert!(Camera::clip_to_screen(&Vector4::from_element(f32::NAN), 80, 40).is_none());
    }
}
