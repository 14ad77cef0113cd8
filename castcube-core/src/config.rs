/// Scene configuration: camera, spin and ambient color, loadable from JSON
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use thiserror::Error;

use crate::projection::Camera;
use crate::transform::Spin;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene config")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

/// Everything the scene needs besides the target's aspect ratio.
///
/// Every field may be omitted from the JSON form and falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Translation placing the cube in front of the eye
    pub camera_offset: [f32; 3],
    pub spin_axis: [f32; 3],
    /// Radians per second
    pub spin_speed: f32,
    pub ambient_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        let camera = Camera::default();
        let spin = Spin::default();
        Self {
            fov_y: camera.fov_y,
            near: camera.near,
            far: camera.far,
            camera_offset: camera.offset,
            spin_axis: spin.axis,
            spin_speed: spin.speed,
            ambient_color: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded scene config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Check the preconditions the matrix builders leave to their callers
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [self.fov_y, self.near, self.far, self.spin_speed];
        let finite = scalars
            .iter()
            .chain(&self.camera_offset)
            .chain(&self.spin_axis)
            .chain(&self.ambient_color)
            .all(|v| v.is_finite());
        if !finite {
            return Err(invalid("all values must be finite"));
        }

        if self.fov_y <= 0.0 || self.fov_y >= PI {
            return Err(invalid(format!(
                "fov_y must lie strictly between 0 and pi, got {}",
                self.fov_y
            )));
        }
        if self.near <= 0.0 {
            return Err(invalid(format!("near must be positive, got {}", self.near)));
        }
        if self.far <= self.near {
            return Err(invalid(format!(
                "far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }
        if self.spin_axis.iter().all(|c| *c == 0.0) {
            return Err(invalid("spin_axis must not be the zero vector"));
        }
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.fov_y, self.near, self.far, self.camera_offset)
    }

    pub fn spin(&self) -> Spin {
        Spin::new(self.spin_axis, self.spin_speed)
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(reason.into())
}
