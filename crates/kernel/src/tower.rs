use towerworks_common::Layer;
use towerworks_common::scene::{
    ADDED_COLOR_RANGE, MAX_LAYERS, MIN_LAYERS, SCALE_RANGE, SEED_COLOR_RANGE,
};

use crate::sampler::LayerSampler;

/// The stack of layers, bottom first.
///
/// All mutations go through [`Tower::add_layer`] and [`Tower::remove_layer`],
/// which keep the layer count within `[MIN_LAYERS, MAX_LAYERS]` and every
/// layer resting on the one below it. Layers are never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    layers: Vec<Layer>,
}

impl Tower {
    /// Build the starting tower of `MIN_LAYERS` seed layers.
    pub fn initialize(sampler: &mut impl LayerSampler) -> Self {
        let mut tower = Self {
            layers: Vec::with_capacity(MAX_LAYERS),
        };
        for _ in 0..MIN_LAYERS {
            let size = sampler.size(SCALE_RANGE);
            let color = sampler.color(SEED_COLOR_RANGE);
            tower.push(size, color);
        }
        tracing::debug!(
            layers = tower.len(),
            height = tower.total_height(),
            "tower initialized"
        );
        tower
    }

    /// Append a new random layer on top. Returns `None` without touching the
    /// tower when it is already at `MAX_LAYERS`.
    pub fn add_layer(&mut self, sampler: &mut impl LayerSampler) -> Option<Layer> {
        if !self.can_grow() {
            return None;
        }
        let size = sampler.size(SCALE_RANGE);
        let color = sampler.color(ADDED_COLOR_RANGE);
        Some(self.push(size, color))
    }

    /// Pop the top layer. Returns `None` when the tower is at `MIN_LAYERS`.
    pub fn remove_layer(&mut self) -> Option<Layer> {
        if !self.can_shrink() {
            return None;
        }
        self.layers.pop()
    }

    /// Sum of the scaled heights of all layers.
    pub fn total_height(&self) -> f32 {
        self.layers.iter().map(Layer::height).sum()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Topmost layer.
    pub fn top(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn can_grow(&self) -> bool {
        self.layers.len() < MAX_LAYERS
    }

    pub fn can_shrink(&self) -> bool {
        !self.layers.is_empty() && self.layers.len() > MIN_LAYERS
    }

    fn push(&mut self, size: f32, color: glam::Vec3) -> Layer {
        let layer = Layer::stacked(self.total_height(), size, color);
        self.layers.push(layer);
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{FixedSampler, RandomSampler};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use towerworks_common::scene::CUBE_SIZE;

    fn assert_stacked(tower: &Tower) {
        let mut below = 0.0_f32;
        for (i, layer) in tower.layers().iter().enumerate() {
            let expected = below + layer.scale.y * CUBE_SIZE * 0.5;
            assert_relative_eq!(layer.position.y, expected, epsilon = 1e-5);
            assert!(
                (layer.base() - below).abs() < 1e-5,
                "layer {i} floats or overlaps: base {} vs {}",
                layer.base(),
                below
            );
            below += layer.scale.y * CUBE_SIZE;
        }
    }

    fn summed_scale(tower: &Tower) -> f32 {
        tower.layers().iter().map(|l| l.scale.y).sum()
    }

    #[test]
    fn initialize_seeds_four_layers() {
        let mut sampler = RandomSampler::seeded(1);
        let tower = Tower::initialize(&mut sampler);
        assert_eq!(tower.len(), MIN_LAYERS);
        assert!(tower.total_height() > 0.0);
        for layer in tower.layers() {
            assert!(SCALE_RANGE.contains(&layer.scale.x));
            assert_eq!(layer.scale.x, layer.scale.y);
            assert_eq!(layer.scale.y, layer.scale.z);
            for ch in layer.color.to_array() {
                assert!(SEED_COLOR_RANGE.contains(&ch), "seed channel {ch}");
            }
        }
        assert_stacked(&tower);
    }

    #[test]
    fn fixed_sizes_stack_without_gaps() {
        let mut sampler = FixedSampler::new([0.7, 1.2, 0.9, 1.0, 0.75, 1.15]);
        let mut tower = Tower::initialize(&mut sampler);
        tower.add_layer(&mut sampler);
        tower.add_layer(&mut sampler);

        let ys: Vec<f32> = tower.layers().iter().map(|l| l.position.y).collect();
        let expected = [0.35, 1.3, 2.35, 3.3, 4.175, 5.125];
        assert_eq!(ys.len(), expected.len());
        for (y, e) in ys.iter().zip(expected) {
            assert_relative_eq!(*y, e, epsilon = 1e-5);
        }
        assert_relative_eq!(tower.total_height(), 5.7, epsilon = 1e-5);
        assert_stacked(&tower);
    }

    #[test]
    fn added_layers_use_wide_color_range() {
        let mut sampler = RandomSampler::seeded(3);
        let mut tower = Tower::initialize(&mut sampler);
        let layer = tower.add_layer(&mut sampler).unwrap();
        for ch in layer.color.to_array() {
            assert!(ADDED_COLOR_RANGE.contains(&ch));
        }
        assert_eq!(tower.top(), Some(&layer));
    }

    #[test]
    fn add_past_cap_is_noop() {
        let mut sampler = RandomSampler::seeded(5);
        let mut tower = Tower::initialize(&mut sampler);
        for _ in 0..(MAX_LAYERS - MIN_LAYERS) {
            assert!(tower.add_layer(&mut sampler).is_some());
        }
        assert_eq!(tower.len(), MAX_LAYERS);
        let snapshot = tower.clone();
        for _ in 0..5 {
            assert!(tower.add_layer(&mut sampler).is_none());
        }
        assert_eq!(tower, snapshot);
    }

    #[test]
    fn full_tower_does_not_consume_samples() {
        let mut sampler = FixedSampler::new([1.0; MAX_LAYERS]);
        let mut tower = Tower::initialize(&mut sampler);
        while tower.add_layer(&mut sampler).is_some() {}
        assert_eq!(sampler.remaining(), 0);

        let mut spare = FixedSampler::new([0.8]);
        assert!(tower.add_layer(&mut spare).is_none());
        assert_eq!(spare.remaining(), 1);
    }

    #[test]
    fn remove_past_floor_is_noop() {
        let mut sampler = RandomSampler::seeded(9);
        let mut tower = Tower::initialize(&mut sampler);
        let seeded = tower.clone();
        for _ in 0..10 {
            assert!(tower.remove_layer().is_none());
        }
        assert_eq!(tower.len(), MIN_LAYERS);
        assert_eq!(tower, seeded);
    }

    #[test]
    fn remove_pops_the_top_layer() {
        let mut sampler = RandomSampler::seeded(11);
        let mut tower = Tower::initialize(&mut sampler);
        let added = tower.add_layer(&mut sampler).unwrap();
        assert_eq!(tower.remove_layer(), Some(added));
        assert_eq!(tower.len(), MIN_LAYERS);
    }

    #[test]
    fn grow_and_shrink_scenario() {
        let mut sampler = RandomSampler::from_entropy();
        let mut tower = Tower::initialize(&mut sampler);
        assert_eq!(tower.len(), 4);
        let start = tower.total_height();
        assert!(start > 0.0);

        let a = tower.add_layer(&mut sampler).unwrap();
        let b = tower.add_layer(&mut sampler).unwrap();
        assert_eq!(tower.len(), 6);
        assert_relative_eq!(
            tower.total_height(),
            start + a.scale.y + b.scale.y,
            epsilon = 1e-5
        );

        let removed: Vec<_> = (0..4).filter_map(|_| tower.remove_layer()).collect();
        assert_eq!(removed, vec![b, a]);
        assert_eq!(tower.len(), 4);
        assert_relative_eq!(tower.total_height(), start, epsilon = 1e-5);
    }

    #[test]
    fn random_walk_keeps_invariants() {
        let mut sampler = RandomSampler::seeded(2024);
        let mut tower = Tower::initialize(&mut sampler);
        let mut coin = StdRng::seed_from_u64(99);
        for _ in 0..2_000 {
            if coin.gen_bool(0.5) {
                tower.add_layer(&mut sampler);
            } else {
                tower.remove_layer();
            }
            assert!((MIN_LAYERS..=MAX_LAYERS).contains(&tower.len()));
            assert_relative_eq!(tower.total_height(), summed_scale(&tower), epsilon = 1e-4);
        }
        assert_stacked(&tower);
    }
}
