use towerworks_assets::{PixelLayout, TextureData};

/// GPU copy of the overlay image plus the sampler and bind group the
/// texture program reads it through.
pub struct OverlayTexture {
    pub bind_group: wgpu::BindGroup,
    pub sampler: wgpu::Sampler,
    pub view: wgpu::TextureView,
    pub texture: wgpu::Texture,
}

/// Texel format for each decoded layout. RGB data arrives padded to RGBA.
pub fn texture_format(layout: PixelLayout) -> wgpu::TextureFormat {
    match layout {
        PixelLayout::R8 => wgpu::TextureFormat::R8Unorm,
        PixelLayout::Rg8 => wgpu::TextureFormat::Rg8Unorm,
        PixelLayout::Rgb8 | PixelLayout::Rgba8 => wgpu::TextureFormat::Rgba8Unorm,
    }
}

/// Wrap mode for the overlay: clamp-to-border where the device allows it.
pub fn address_mode(features: wgpu::Features) -> wgpu::AddressMode {
    if features.contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER) {
        wgpu::AddressMode::ClampToBorder
    } else {
        wgpu::AddressMode::ClampToEdge
    }
}

/// Nearest filtering on the base level only. The mip chain is uploaded but
/// never sampled.
pub fn sampler_descriptor(wrap: wgpu::AddressMode) -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("overlay_sampler"),
        address_mode_u: wrap,
        address_mode_v: wrap,
        address_mode_w: wrap,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: 0.0,
        border_color: (wrap == wgpu::AddressMode::ClampToBorder)
            .then_some(wgpu::SamplerBorderColor::TransparentBlack),
        ..Default::default()
    }
}

impl OverlayTexture {
    /// Upload every mip level of `data` and bind it for the texture program.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let format = texture_format(data.layout);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("overlay_texture"),
            size: wgpu::Extent3d {
                width: data.width(),
                height: data.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: data.mip_level_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let bytes_per_pixel = data.layout.bytes_per_pixel();
        for (mip_level, level) in (0u32..).zip(&data.levels) {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.width * bytes_per_pixel),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let wrap = address_mode(device.features());
        let sampler = device.create_sampler(&sampler_descriptor(wrap));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("overlay_bind_group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        tracing::info!(
            width = data.width(),
            height = data.height(),
            ?format,
            ?wrap,
            "overlay texture uploaded"
        );

        Self {
            bind_group,
            sampler,
            view,
            texture,
        }
    }

    /// Bind group layout matching `uTex` (binding 0) and `uTexSampler` (binding 1).
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("overlay_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }
}
