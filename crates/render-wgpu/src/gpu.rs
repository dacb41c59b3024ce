use crate::geometry::{
    CUBE_VERTEX_COUNT, GROUND_VERTEX_COUNT, OVERLAY_VERTEX_COUNT, OverlayVertex, Vertex,
    cube_vertices, ground_vertices, overlay_vertices,
};
use crate::program::{ProgramLayout, build_program};
use crate::texture::OverlayTexture;
use bytemuck::{Pod, Zeroable};
use towerworks_assets::{ProgramSource, TextureData};
use towerworks_common::scene::MAX_LAYERS;
use towerworks_render::{FrameScene, Mesh};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Ground plus one cube per layer.
const MAX_DRAWS: usize = MAX_LAYERS + 1;

/// Per-draw uniform block of the unified program.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    u_m: [[f32; 4]; 4],
    u_v: [[f32; 4]; 4],
    u_p: [[f32; 4]; 4],
    u_color: [f32; 4],
}

/// CPU-side inputs the renderer turns into GPU objects.
///
/// Any of them may be missing after a load failure; the matching draws are
/// skipped instead of aborting.
#[derive(Debug, Default)]
pub struct SceneAssets {
    pub unified: Option<ProgramSource>,
    pub texture: Option<ProgramSource>,
    pub overlay: Option<TextureData>,
}

/// wgpu-based scene renderer.
///
/// Fields are declared so that dependents drop before what they depend on.
pub struct WgpuRenderer {
    unified_pipeline: Option<wgpu::RenderPipeline>,
    texture_pipeline: Option<wgpu::RenderPipeline>,
    overlay: Option<OverlayTexture>,
    draw_bind_group: wgpu::BindGroup,
    draw_uniforms: wgpu::Buffer,
    uniform_stride: u64,
    cube_vertex_buffer: wgpu::Buffer,
    ground_vertex_buffer: wgpu::Buffer,
    overlay_vertex_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        assets: &SceneAssets,
    ) -> Self {
        let align = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let uniform_size = std::mem::size_of::<DrawUniforms>() as u64;
        let uniform_stride = uniform_size.div_ceil(align) * align;

        let draw_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniforms"),
            size: uniform_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bind_group"),
            layout: &draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_uniforms,
                    offset: 0,
                    size: wgpu::BufferSize::new(uniform_size),
                }),
            }],
        });

        let overlay_layout = OverlayTexture::bind_group_layout(device);

        let unified_pipeline = assets.unified.as_ref().and_then(|src| {
            build_program(
                device,
                src,
                &ProgramLayout {
                    bind_group_layout: &draw_layout,
                    vertex_buffer: Vertex::LAYOUT,
                    color_format: surface_format,
                    depth_format: DEPTH_FORMAT,
                    depth_and_cull: true,
                },
            )
        });

        let texture_pipeline = assets.texture.as_ref().and_then(|src| {
            build_program(
                device,
                src,
                &ProgramLayout {
                    bind_group_layout: &overlay_layout,
                    vertex_buffer: OverlayVertex::LAYOUT,
                    color_format: surface_format,
                    depth_format: DEPTH_FORMAT,
                    depth_and_cull: false,
                },
            )
        });

        let overlay = assets
            .overlay
            .as_ref()
            .map(|data| OverlayTexture::upload(device, queue, data, &overlay_layout));

        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ground_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ground_vertex_buffer"),
            contents: bytemuck::cast_slice(&ground_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let overlay_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("overlay_vertex_buffer"),
            contents: bytemuck::cast_slice(&overlay_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            unified_pipeline,
            texture_pipeline,
            overlay,
            draw_bind_group,
            draw_uniforms,
            uniform_stride,
            cube_vertex_buffer,
            ground_vertex_buffer,
            overlay_vertex_buffer,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Whether the 3D program and the overlay program/texture are usable.
    pub fn health(&self) -> (bool, bool) {
        (
            self.unified_pipeline.is_some(),
            self.texture_pipeline.is_some() && self.overlay.is_some(),
        )
    }

    /// Render one frame: ground, tower layers, then the overlay on top.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &FrameScene,
    ) {
        if scene.draws.len() > MAX_DRAWS {
            tracing::warn!(
                draws = scene.draws.len(),
                capacity = MAX_DRAWS,
                "frame has more draws than uniform slots, extra draws dropped"
            );
        }
        let draws = &scene.draws[..scene.draws.len().min(MAX_DRAWS)];

        let stride = self.uniform_stride as usize;
        let mut staging = vec![0u8; stride * draws.len()];
        for (slot, draw) in staging.chunks_exact_mut(stride).zip(draws) {
            let uniforms = DrawUniforms {
                u_m: draw.model.to_cols_array_2d(),
                u_v: scene.view.to_cols_array_2d(),
                u_p: scene.projection.to_cols_array_2d(),
                u_color: draw.color,
            };
            let bytes = bytemuck::bytes_of(&uniforms);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        if !staging.is_empty() {
            queue.write_buffer(&self.draw_uniforms, 0, &staging);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = scene.clear_color.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Ground and tower layers
            if let Some(pipeline) = &self.unified_pipeline {
                pass.set_pipeline(pipeline);
                for (i, draw) in draws.iter().enumerate() {
                    let offset = (i * stride) as u32;
                    pass.set_bind_group(0, &self.draw_bind_group, &[offset]);
                    let (buffer, count) = match draw.mesh {
                        Mesh::Ground => (&self.ground_vertex_buffer, GROUND_VERTEX_COUNT),
                        Mesh::Cube => (&self.cube_vertex_buffer, CUBE_VERTEX_COUNT),
                    };
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..count, 0..1);
                }
            }

            // Overlay: its pipeline has depth test and culling disabled.
            if scene.overlay {
                if let (Some(pipeline), Some(overlay)) = (&self.texture_pipeline, &self.overlay) {
                    pass.set_pipeline(pipeline);
                    pass.set_bind_group(0, &overlay.bind_group, &[]);
                    pass.set_vertex_buffer(0, self.overlay_vertex_buffer.slice(..));
                    pass.draw(0..OVERLAY_VERTEX_COUNT, 0..1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // Three mat4x4<f32> then a vec4<f32>, no padding.
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 3 * 64 + 16);
    }

    #[test]
    fn uniform_slots_cover_full_tower() {
        assert_eq!(MAX_DRAWS, 11);
    }
}
