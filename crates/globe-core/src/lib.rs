pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod lifecycle;
pub mod markers;
pub mod motion;
pub mod projection;
pub mod raster;
pub mod rotation;
pub mod world_map;

// Shader bundled as a string constant for GPU-backed hosts
pub static BLIT_WGSL: &str = include_str!("../shaders/blit.wgsl");

pub use config::*;
pub use error::*;
pub use gesture::*;
pub use lifecycle::*;
pub use markers::*;
pub use motion::*;
pub use projection::*;
pub use raster::*;
pub use rotation::*;
