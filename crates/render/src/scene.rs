use glam::Mat4;
use towerworks_common::scene::{CLEAR_COLOR, GROUND_COLOR};
use towerworks_kernel::Tower;

use crate::camera::{OrbitCamera, Projection};

/// Static meshes the scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mesh {
    Ground,
    Cube,
}

/// One draw of the unified (flat color) program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDraw {
    pub mesh: Mesh,
    pub model: Mat4,
    pub color: [f32; 4],
}

/// Everything a backend needs to draw one frame.
///
/// Derived from the tower and camera each frame; the backend never writes back.
/// Draws run in order with depth test and back-face culling on, then the
/// overlay is composited with both off.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScene {
    pub clear_color: [f32; 4],
    pub view: Mat4,
    pub projection: Mat4,
    pub draws: Vec<MeshDraw>,
    pub overlay: bool,
}

impl FrameScene {
    /// Ground first, then each layer bottom to top, then the overlay.
    pub fn compose(tower: &Tower, camera: &OrbitCamera, projection: &Projection) -> Self {
        let mut draws = Vec::with_capacity(tower.len() + 1);
        draws.push(MeshDraw {
            mesh: Mesh::Ground,
            model: Mat4::IDENTITY,
            color: GROUND_COLOR,
        });
        draws.extend(tower.layers().iter().map(|layer| MeshDraw {
            mesh: Mesh::Cube,
            model: layer.model_matrix(),
            color: layer.rgba(),
        }));

        Self {
            clear_color: CLEAR_COLOR,
            view: camera.view_matrix(),
            projection: projection.matrix(),
            draws,
            overlay: true,
        }
    }

    /// Cube draws only, in stack order.
    pub fn layer_draws(&self) -> impl Iterator<Item = &MeshDraw> {
        self.draws.iter().filter(|d| d.mesh == Mesh::Cube)
    }
}
