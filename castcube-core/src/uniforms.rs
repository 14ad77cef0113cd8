/// Per-frame uniform block handed to the rendering pipeline
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;

//
//   Shader-side layout:
//     mvp_mat       : mat4x4<f32>  -> 64 bytes, offset 0
//     normal_mat    : mat4x4<f32>  -> 64 bytes, offset 64
//     ambient_color : vec4<f32>    -> 16 bytes, offset 128
//   Total: 144 bytes
//

/// Model-view-projection and normal matrices plus the ambient color, in the
/// column-major layout a uniform buffer expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub mvp_mat: [[f32; 4]; 4],
    pub normal_mat: [[f32; 4]; 4],
    pub ambient_color: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<Uniforms>() == 144);

impl Uniforms {
    pub fn new(mvp: Matrix4<f32>, normal: Matrix4<f32>, ambient_color: [f32; 4]) -> Self {
        Self {
            mvp_mat: mvp.into(),
            normal_mat: normal.into(),
            ambient_color,
        }
    }

    /// Combine model, view and projection into one block.
    ///
    /// The normal matrix is the inverse transpose of `view * model`; a
    /// singular model-view leaves it filled with NaN.
    pub fn compose(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
        ambient_color: [f32; 4],
    ) -> Self {
        let model_view = view * model;
        let mvp = projection * model_view;
        Self::new(mvp, normal_matrix(&model_view), ambient_color)
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        Matrix4::from(self.mvp_mat)
    }

    pub fn normal(&self) -> Matrix4<f32> {
        Matrix4::from(self.normal_mat)
    }

    /// The block as an opaque blob for a uniform buffer write
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Inverse transpose of a model-view matrix, NaN when it has no inverse
pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix4<f32> {
    match model_view.try_inverse() {
        Some(inverse) => inverse.transpose(),
        None => {
            log::debug!("model-view matrix is singular, normal matrix left as NaN");
            Matrix4::from_element(f32::NAN)
        }
    }
}
