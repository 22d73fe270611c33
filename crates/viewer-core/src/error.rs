use glam::Vec3;

/// Errors surfaced by the viewer core.
///
/// Only asset loading can fail at runtime; everything driven by input events
/// is total. Front-ends log these and keep ticking.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to load model {reference:?}: {reason}")]
    AssetLoad { reference: String, reason: String },

    #[error("malformed glTF: {0}")]
    Decode(#[from] gltf::Error),

    #[error("glTF buffer {index} is not the embedded GLB chunk")]
    UnsupportedBuffer { index: usize },

    #[error("glTF node {index} is reached more than once (cyclic or shared hierarchy)")]
    CyclicNodes { index: usize },

    #[error("model has no triangle geometry")]
    EmptyModel,

    #[error("model bounds are degenerate (size {size})")]
    DegenerateBounds { size: Vec3 },

    #[error("invalid viewer configuration: {0}")]
    InvalidConfig(String),
}

impl ViewerError {
    /// Wrap any failure into an `AssetLoad` for the given reference.
    pub fn asset_load(reference: &str, reason: impl std::fmt::Display) -> Self {
        ViewerError::AssetLoad {
            reference: reference.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
