use glam::{Mat4, Vec3};

use crate::scene::CUBE_SIZE;

/// One cube segment of the tower.
///
/// Position, scale and color are fixed once the layer is created; the tower
/// only ever appends or pops whole layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// World-space center of the cube.
    pub position: Vec3,
    /// Per-axis scale factor applied to the unit cube.
    pub scale: Vec3,
    /// Opaque RGB color, each channel in `[0, 1]`.
    pub color: Vec3,
}

impl Layer {
    /// Build a layer of uniform `size` whose base rests at `base_height`.
    pub fn stacked(base_height: f32, size: f32, color: Vec3) -> Self {
        let scale = Vec3::splat(size);
        let height = scale.y * CUBE_SIZE;
        Self {
            position: Vec3::new(0.0, base_height + height * 0.5, 0.0),
            scale,
            color,
        }
    }

    /// Vertical extent of this layer in world units.
    pub fn height(&self) -> f32 {
        self.scale.y * CUBE_SIZE
    }

    /// Y coordinate of the bottom face.
    pub fn base(&self) -> f32 {
        self.position.y - self.height() * 0.5
    }

    /// Y coordinate of the top face.
    pub fn top(&self) -> f32 {
        self.position.y + self.height() * 0.5
    }

    /// `translate(position) * scale(scale)`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale)
    }

    /// Color with the fixed opaque alpha used at draw time.
    pub fn rgba(&self) -> [f32; 4] {
        [self.color.x, self.color.y, self.color.z, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stacked_layer_sits_on_base() {
        let layer = Layer::stacked(2.0, 0.8, Vec3::ONE);
        assert_relative_eq!(layer.base(), 2.0);
        assert_relative_eq!(layer.top(), 2.8);
        assert_relative_eq!(layer.position.y, 2.4);
        assert_eq!(layer.position.x, 0.0);
        assert_eq!(layer.position.z, 0.0);
    }

    #[test]
    fn scale_is_uniform() {
        let layer = Layer::stacked(0.0, 1.1, Vec3::ZERO);
        assert_eq!(layer.scale, Vec3::splat(1.1));
        assert_relative_eq!(layer.height(), 1.1);
    }

    #[test]
    fn model_matrix_translates_then_scales() {
        let layer = Layer::stacked(1.0, 0.5, Vec3::ONE);
        let m = layer.model_matrix();
        // A unit-cube corner lands at center + corner * scale.
        let corner = m.transform_point3(Vec3::splat(0.5));
        assert_relative_eq!(corner.x, 0.25);
        assert_relative_eq!(corner.y, 1.25 + 0.25);
        assert_relative_eq!(corner.z, 0.25);
    }

    #[test]
    fn rgba_is_opaque() {
        let layer = Layer::stacked(0.0, 1.0, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(layer.rgba(), [0.1, 0.2, 0.3, 1.0]);
    }
}
