//! Fixed parameters of the construction-site scene.

use std::ops::Range;

use glam::Vec3;

/// Edge length of the unit cube mesh before per-layer scaling.
pub const CUBE_SIZE: f32 = 1.0;

/// The tower never shrinks below the seeded layer count.
pub const MIN_LAYERS: usize = 4;
pub const MAX_LAYERS: usize = 10;

/// Uniform scale factor range for every layer.
pub const SCALE_RANGE: Range<f32> = 0.7..1.2;
/// Color channel range for the layers seeded at startup.
pub const SEED_COLOR_RANGE: Range<f32> = 0.3..1.0;
/// Color channel range for layers added later. Wider than the seed range on purpose.
pub const ADDED_COLOR_RANGE: Range<f32> = 0.0..1.0;

/// Point the camera orbits around and looks at.
pub const TOWER_CENTER: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const CAMERA_RADIUS: f32 = 15.0;
pub const CAMERA_HEIGHT_OFFSET: f32 = 5.0;
/// Orbit angle change per processed frame while a rotate key is held.
pub const CAMERA_STEP: f32 = 0.02;

pub const TARGET_FPS: f64 = 60.0;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "3D Construction Site";

pub const CLEAR_COLOR: [f32; 4] = [0.7, 0.9, 1.0, 1.0];
pub const GROUND_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
/// Half extent of the square ground quad on X and Z.
pub const GROUND_HALF_EXTENT: f32 = 10.0;
/// Ground sits half a cube below the tower base.
pub const GROUND_HEIGHT: f32 = -0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_consistent() {
        assert!(MIN_LAYERS < MAX_LAYERS);
        assert!(SCALE_RANGE.start > 0.0);
        assert!(SEED_COLOR_RANGE.start >= ADDED_COLOR_RANGE.start);
        assert!(SEED_COLOR_RANGE.end <= ADDED_COLOR_RANGE.end);
    }
}
