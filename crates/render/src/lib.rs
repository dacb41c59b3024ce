//! Rendering adapter: renderer-agnostic camera and frame description.
//!
//! # Invariants
//! - Renderer cannot mutate the tower or camera.
//! - Render state derives from tower state and view, recomputed every frame.

mod camera;
mod scene;

pub use camera::{OrbitCamera, Projection};
pub use scene::{FrameScene, Mesh, MeshDraw};
