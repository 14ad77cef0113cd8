/// The spinning cube: owns the per-frame state and builds the uniform block
use nalgebra::Matrix4;

use crate::config::SceneConfig;
use crate::projection::Camera;
use crate::transform::Spin;
use crate::uniforms::Uniforms;

#[derive(Debug, Clone)]
pub struct CubeScene {
    pub camera: Camera,
    pub spin: Spin,
    pub ambient_color: [f32; 4],
}

impl CubeScene {
    /// Build from a config; the config is expected to have passed `validate`
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: config.camera(),
            spin: config.spin(),
            ambient_color: config.ambient_color,
        }
    }

    /// Advance the animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.spin.advance(dt);
        log::trace!("spin angle {:.3} rad", self.spin.angle);
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.spin.matrix()
    }

    /// Uniforms for one frame drawn into a target of the given aspect ratio
    pub fn uniforms(&self, aspect: f32) -> Uniforms {
        Uniforms::compose(
            &self.model_matrix(),
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(aspect),
            self.ambient_color,
        )
    }
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
