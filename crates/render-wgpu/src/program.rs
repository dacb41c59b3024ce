use towerworks_assets::ProgramSource;

/// Fixed-function state and resource layout for one program.
pub struct ProgramLayout<'a> {
    pub bind_group_layout: &'a wgpu::BindGroupLayout,
    pub vertex_buffer: wgpu::VertexBufferLayout<'a>,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    /// Depth test and back-face culling on (3D pass) or both off (overlay).
    pub depth_and_cull: bool,
}

/// Pipeline stage a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
    Link,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Link => "link",
        }
    }
}

/// Compile both stages and link them into a render pipeline.
///
/// Every failure is logged with its stage and yields `None`. Nothing here
/// panics on bad shader text; the caller keeps running without the program.
pub fn build_program(
    device: &wgpu::Device,
    source: &ProgramSource,
    layout: &ProgramLayout<'_>,
) -> Option<wgpu::RenderPipeline> {
    link(device, source, layout).ok()
}

/// Same as [`build_program`], reporting the first stage that failed.
fn link(
    device: &wgpu::Device,
    source: &ProgramSource,
    layout: &ProgramLayout<'_>,
) -> Result<wgpu::RenderPipeline, Stage> {
    let name = source.name.as_str();
    let vs = compile(device, name, Stage::Vertex, &source.vertex);
    let fs = compile(device, name, Stage::Fragment, &source.fragment);
    let (vs, fs) = (vs?, fs?);

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(name),
        bind_group_layouts: &[layout.bind_group_layout],
        push_constant_ranges: &[],
    });

    let (cull_mode, depth_compare, depth_write_enabled) = if layout.depth_and_cull {
        (Some(wgpu::Face::Back), wgpu::CompareFunction::Less, true)
    } else {
        (None, wgpu::CompareFunction::Always, false)
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(name),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: std::slice::from_ref(&layout.vertex_buffer),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: layout.color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: layout.depth_format,
            depth_write_enabled,
            depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        report(name, Stage::Link, &err);
        return Err(Stage::Link);
    }

    tracing::info!(program = name, "shader program linked");
    Ok(pipeline)
}

fn compile(
    device: &wgpu::Device,
    program: &str,
    stage: Stage,
    code: &str,
) -> Result<wgpu::ShaderModule, Stage> {
    let label = format!("{program}.{}", stage.as_str());
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(code.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => {
            report(program, stage, &err);
            Err(stage)
        }
        None => {
            tracing::debug!(program, stage = stage.as_str(), "shader stage compiled");
            Ok(module)
        }
    }
}

fn report(program: &str, stage: Stage, err: &wgpu::Error) {
    tracing::error!(
        program,
        stage = stage.as_str(),
        "shader program failed: {err}"
    );
}
