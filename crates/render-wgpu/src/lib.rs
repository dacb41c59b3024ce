//! wgpu render backend for the tower scene.
//!
//! Draws the ground quad and one cube per tower layer with the unified
//! flat-color program, then the screen-space overlay with the texture program.
//!
//! # Invariants
//! - Renderer never mutates tower or camera state.
//! - A missing or broken program/texture skips its draws; it never aborts the frame.
//! - Per-draw uniforms live in one buffer addressed by dynamic offsets.

mod geometry;
mod gpu;
mod program;
mod texture;

pub use geometry::{CUBE_VERTEX_COUNT, OverlayVertex, Vertex, cube_vertices, ground_vertices};
pub use gpu::{SceneAssets, WgpuRenderer};
pub use texture::{address_mode, texture_format};
