pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod fit;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod load;
pub mod mesh;
pub mod orientation;
pub mod scene;
pub mod state;
pub mod zoom;

pub use config::*;
pub use driver::*;
pub use error::ViewerError;
pub use fit::*;
pub use load::*;
pub use mesh::*;
pub use orientation::*;
pub use scene::*;
pub use state::*;
pub use zoom::*;

pub static MODEL_WGSL: &str = include_str!("../shaders/model.wgsl");
