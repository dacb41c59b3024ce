use std::collections::VecDeque;
use std::ops::Range;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random properties of new layers.
///
/// The tower never owns a generator; callers pass one in so tests can swap
/// in a deterministic source.
pub trait LayerSampler {
    /// Uniform size factor drawn from `range`.
    fn size(&mut self, range: Range<f32>) -> f32;

    /// One color channel drawn from `range`.
    fn channel(&mut self, range: Range<f32>) -> f32;

    /// RGB color with each channel drawn independently from `range`.
    fn color(&mut self, range: Range<f32>) -> Vec3 {
        let r = self.channel(range.clone());
        let g = self.channel(range.clone());
        let b = self.channel(range);
        Vec3::new(r, g, b)
    }
}

/// Sampler backed by a pseudo-random generator that is seeded once.
#[derive(Debug, Clone)]
pub struct RandomSampler<R = StdRng> {
    rng: R,
}

impl RandomSampler<StdRng> {
    /// Seed from OS entropy. Call once at startup and share the result.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sampler for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LayerSampler for RandomSampler<R> {
    fn size(&mut self, range: Range<f32>) -> f32 {
        self.rng.gen_range(range)
    }

    fn channel(&mut self, range: Range<f32>) -> f32 {
        self.rng.gen_range(range)
    }
}

/// Deterministic sampler that replays a fixed list of sizes.
///
/// Once the queue runs dry it keeps returning `fallback_size`. Every color
/// channel is `channel` regardless of the requested range.
#[derive(Debug, Clone)]
pub struct FixedSampler {
    sizes: VecDeque<f32>,
    fallback_size: f32,
    channel: f32,
}

impl FixedSampler {
    pub fn new(sizes: impl IntoIterator<Item = f32>) -> Self {
        Self {
            sizes: sizes.into_iter().collect(),
            fallback_size: 1.0,
            channel: 0.5,
        }
    }

    pub fn with_fallback_size(mut self, size: f32) -> Self {
        self.fallback_size = size;
        self
    }

    pub fn with_channel(mut self, channel: f32) -> Self {
        self.channel = channel;
        self
    }

    /// Sizes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.sizes.len()
    }
}

impl LayerSampler for FixedSampler {
    fn size(&mut self, _range: Range<f32>) -> f32 {
        self.sizes.pop_front().unwrap_or(self.fallback_size)
    }

    fn channel(&mut self, _range: Range<f32>) -> f32 {
        self.channel
    }
}
