//! Shared types for the tower scene: the layer value type and the fixed scene constants.

pub mod layer;
pub mod scene;

pub use layer::Layer;
