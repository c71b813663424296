//! WebGPU rendering module
//!
//! The scene is built on the CPU as flat-colored triangles in track pixels,
//! then uploaded and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{SceneStyle, build_scene};
pub use vertex::{Vertex, colors};
