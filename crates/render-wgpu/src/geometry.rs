use bytemuck::{Pod, Zeroable};
use towerworks_common::scene::{GROUND_HALF_EXTENT, GROUND_HEIGHT};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

pub const CUBE_VERTEX_COUNT: u32 = 36;
pub const GROUND_VERTEX_COUNT: u32 = 6;
pub const OVERLAY_VERTEX_COUNT: u32 = 6;

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
    };
}

impl OverlayVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<OverlayVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
    };
}

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex {
        position: [x, y, z],
    }
}

/// Unit cube centered on the origin, 6 faces x 2 triangles, counter-clockwise
/// when seen from outside. Unindexed so each draw is a plain 36-vertex list.
pub fn cube_vertices() -> [Vertex; CUBE_VERTEX_COUNT as usize] {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = [
        // +Z
        v(-p, -p,  p), v( p, -p,  p), v( p,  p,  p),
        v(-p, -p,  p), v( p,  p,  p), v(-p,  p,  p),
        // -Z
        v( p, -p, -p), v(-p, -p, -p), v(-p,  p, -p),
        v( p, -p, -p), v(-p,  p, -p), v( p,  p, -p),
        // -X
        v(-p, -p, -p), v(-p, -p,  p), v(-p,  p,  p),
        v(-p, -p, -p), v(-p,  p,  p), v(-p,  p, -p),
        // +X
        v( p, -p,  p), v( p, -p, -p), v( p,  p, -p),
        v( p, -p,  p), v( p,  p, -p), v( p,  p,  p),
        // -Y
        v(-p, -p, -p), v( p, -p, -p), v( p, -p,  p),
        v(-p, -p, -p), v( p, -p,  p), v(-p, -p,  p),
        // +Y
        v(-p,  p,  p), v( p,  p,  p), v( p,  p, -p),
        v(-p,  p,  p), v( p,  p, -p), v(-p,  p, -p),
    ];
    vertices
}

/// Square ground quad facing +Y.
pub fn ground_vertices() -> [Vertex; GROUND_VERTEX_COUNT as usize] {
    let e = GROUND_HALF_EXTENT;
    let y = GROUND_HEIGHT;
    [
        v(-e, y, -e),
        v(-e, y, e),
        v(e, y, e),
        v(-e, y, -e),
        v(e, y, e),
        v(e, y, -e),
    ]
}

/// Overlay banner in clip space, top-left corner of the window.
/// `uv.y = 0` is the bottom edge because the image rows are uploaded flipped.
pub fn overlay_vertices() -> [OverlayVertex; OVERLAY_VERTEX_COUNT as usize] {
    let (left, right) = (-1.0, -0.3);
    let (bottom, top) = (0.85, 1.0);
    let q = |x: f32, y: f32, u: f32, v: f32| OverlayVertex {
        position: [x, y],
        uv: [u, v],
    };
    [
        q(left, bottom, 0.0, 0.0),
        q(left, top, 0.0, 1.0),
        q(right, top, 1.0, 1.0),
        q(left, bottom, 0.0, 0.0),
        q(right, top, 1.0, 1.0),
        q(right, bottom, 1.0, 0.0),
    ]
}
