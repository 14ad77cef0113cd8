/// Model transforms: translation, axis-angle rotation and the spin state driving them
use nalgebra::{Matrix4, Vector3, Vector4};
use std::f32::consts::TAU;

/// Identity with the fourth column set to (x, y, z, 1).
pub fn matrix_from_translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    let mut m = Matrix4::identity();
    m.set_column(3, &Vector4::new(x, y, z, 1.0));
    m
}

/// Rotation of `radians` about the axis (x, y, z), right-handed.
///
/// The axis does not need to be normalized. A zero axis normalizes to NaN and
/// so does every element of the returned matrix; callers that care must check
/// the axis themselves.
pub fn matrix_from_rotation(radians: f32, x: f32, y: f32, z: f32) -> Matrix4<f32> {
    let v = Vector3::new(x, y, z).normalize();
    let cos = radians.cos();
    let cosp = 1.0 - cos;
    let sin = radians.sin();

    Matrix4::from_columns(&[
        Vector4::new(
            cos + cosp * v.x * v.x,
            cosp * v.x * v.y + v.z * sin,
            cosp * v.x * v.z - v.y * sin,
            0.0,
        ),
        Vector4::new(
            cosp * v.x * v.y - v.z * sin,
            cos + cosp * v.y * v.y,
            cosp * v.y * v.z + v.x * sin,
            0.0,
        ),
        Vector4::new(
            cosp * v.x * v.z + v.y * sin,
            cosp * v.y * v.z - v.x * sin,
            cos + cosp * v.z * v.z,
            0.0,
        ),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    ])
}

/// Rotation about a fixed axis, advancing with time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Current angle in radians, kept in [0, 2π)
    pub angle: f32,
    pub axis: [f32; 3],
    /// Radians per second
    pub speed: f32,
}

impl Spin {
    pub fn new(axis: [f32; 3], speed: f32) -> Self {
        Self {
            angle: 0.0,
            axis,
            speed,
        }
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.rotate(self.speed * dt);
    }

    /// Rotate by a delta angle (in radians)
    pub fn rotate(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(TAU);
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        let [x, y, z] = self.axis;
        matrix_from_rotation(self.angle, x, y, z)
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new([1.0, 1.0, 0.0], 1.0)
    }
}
