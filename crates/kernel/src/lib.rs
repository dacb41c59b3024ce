//! Tower kernel: the layer stack, the samplers that size and color new layers,
//! and the frame gate that paces mutations.
//!
//! # Invariants
//! - Layer count stays within `[MIN_LAYERS, MAX_LAYERS]`.
//! - Layers stack with no gap and no overlap; the bottom layer rests on y = 0.
//! - Randomness is always injected; the kernel holds no generator of its own.

pub mod clock;
pub mod sampler;
pub mod tower;

pub use clock::FrameThrottle;
pub use sampler::{FixedSampler, LayerSampler, RandomSampler};
pub use tower::Tower;
