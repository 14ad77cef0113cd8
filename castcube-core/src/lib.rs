/// castcube core - the spinning cube shown on a remote display
///
/// Stateless geometry and matrix builders plus the per-frame scene that
/// combines them into a uniform block for a rendering pipeline.

pub mod config;
pub mod geometry;
#[cfg(feature = "wgpu")]
pub mod layout;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod uniforms;

// Re-export commonly used types
pub use config::{ConfigError, SceneConfig};
pub use geometry::{vertex_bytes, Triangle, Vertex, CUBE_VERTICES, CUBE_VERTEX_COUNT};
pub use projection::{matrix_from_perspective, Camera};
pub use scene::CubeScene;
pub use transform::{matrix_from_rotation, matrix_from_translation, Spin};
pub use uniforms::Uniforms;
