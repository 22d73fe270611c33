use glam::{Mat4, Vec3};

use crate::constants::*;
use crate::mesh::ModelMesh;

/// Fixed light rig: ambient fill, one directional key light and a sky/ground
/// hemisphere term. Colors are linear RGB pre-multiplied by intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: Vec3,
    pub directional: Vec3,
    /// Unit vector pointing from the scene toward the light.
    pub directional_dir: Vec3,
    pub hemisphere_sky: Vec3,
    pub hemisphere_ground: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: Vec3::from(AMBIENT_RGB) * AMBIENT_INTENSITY,
            directional: Vec3::from(DIRECTIONAL_RGB) * DIRECTIONAL_INTENSITY,
            directional_dir: Vec3::from(DIRECTIONAL_POSITION).normalize(),
            hemisphere_sky: srgb_to_linear(HEMISPHERE_SKY_RGB) * HEMISPHERE_INTENSITY,
            hemisphere_ground: srgb_to_linear(HEMISPHERE_GROUND_RGB) * HEMISPHERE_INTENSITY,
        }
    }
}

/// Convert an sRGB-encoded color (as written in hex) to linear RGB.
pub fn srgb_to_linear(rgb: [f32; 3]) -> Vec3 {
    Vec3::from(rgb.map(|c| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }))
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView {
    pub view_proj: Mat4,
    /// `None` until a model is loaded; the frame is then just the background.
    pub model: Option<Mat4>,
    pub eye: Vec3,
    pub lighting: Lighting,
    /// Linear RGB.
    pub clear_color: Vec3,
}

/// Rendering collaborator driven by the render loop.
pub trait SceneRenderer {
    /// Add the model to the scene. Called once, when loading completes.
    fn upload_model(&mut self, mesh: &ModelMesh) -> anyhow::Result<()>;

    /// Match the output surface to a new viewport size.
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, frame: &FrameView) -> anyhow::Result<()>;
}
