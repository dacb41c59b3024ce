use glam::{Mat4, Vec3};
use towerworks_common::scene::{
    CAMERA_HEIGHT_OFFSET, CAMERA_RADIUS, TOWER_CENTER, WINDOW_HEIGHT, WINDOW_WIDTH,
};

/// Camera orbiting a fixed target on a horizontal circle.
///
/// Only the angle changes at runtime. It is never wrapped or clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Orbit angle in radians, measured from +X toward +Z.
    pub angle: f32,
    pub target: Vec3,
    pub radius: f32,
    /// Height of the eye above `target`.
    pub height_offset: f32,
    pub up: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            target: TOWER_CENTER,
            radius: CAMERA_RADIUS,
            height_offset: CAMERA_HEIGHT_OFFSET,
            up: Vec3::Y,
        }
    }
}

impl OrbitCamera {
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    /// Eye position on the orbit around `target`.
    pub fn compute_position(&self, target: Vec3, radius: f32, height_offset: f32) -> Vec3 {
        Vec3::new(
            target.x + radius * self.angle.cos(),
            target.y + height_offset,
            target.z + radius * self.angle.sin(),
        )
    }

    /// Look-at transform from the orbit position toward `target`.
    pub fn compute_view_matrix(&self, target: Vec3, up: Vec3) -> Mat4 {
        let eye = self.compute_position(target, self.radius, self.height_offset);
        Mat4::look_at_rh(eye, target, up)
    }

    pub fn position(&self) -> Vec3 {
        self.compute_position(self.target, self.radius, self.height_offset)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.compute_view_matrix(self.target, self.up)
    }
}

/// Perspective projection with a [0, 1] depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45.0_f32.to_radians(),
            aspect: WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Update the aspect ratio from a surface size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}
