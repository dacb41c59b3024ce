use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use towerworks_assets::{ProgramSource, TextureData};
use towerworks_common::scene::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use towerworks_input::Key;
use towerworks_render::FrameScene;
use towerworks_render_wgpu::{SceneAssets, WgpuRenderer};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::error::FatalError;
use crate::state::{FrameOutcome, SceneState};

/// Window, device and renderer, created together on resume.
///
/// Field order is drop order: GPU objects go before the surface, the surface
/// before the window it was created from.
struct GpuContext {
    renderer: WgpuRenderer,
    config: wgpu::SurfaceConfiguration,
    surface: wgpu::Surface<'static>,
    queue: wgpu::Queue,
    device: wgpu::Device,
    window: Arc<Window>,
}

impl GpuContext {
    fn new(event_loop: &ActiveEventLoop, assets_dir: &Path) -> Result<Self, FatalError> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let (surface, adapter) = match request_adapter(&window, wgpu::Backends::GL) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("OpenGL backend unavailable ({e}), trying native backends");
                request_adapter(&window, wgpu::Backends::all())?
            }
        };

        let required_features =
            adapter.features() & wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("towerworks_device"),
                required_features,
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        // Colors are authored as linear values written straight to the
        // framebuffer, so a non-sRGB target keeps them unchanged.
        let surface_format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(FatalError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let info = adapter.get_info();
        tracing::info!(
            backend = info.backend.to_str(),
            adapter = %info.name,
            format = ?surface_format,
            "GPU initialized"
        );

        let assets = load_assets(assets_dir);
        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &assets,
        );
        let (scene_ok, overlay_ok) = renderer.health();
        if !scene_ok {
            tracing::warn!("scene program unavailable, tower will not be drawn");
        }
        if !overlay_ok {
            tracing::warn!("overlay unavailable, banner will not be drawn");
        }

        Ok(Self {
            renderer,
            config,
            surface,
            queue,
            device,
            window,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw(&self, scene: &FrameScene) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&self.device, &self.queue, &view, scene);
        output.present();
    }
}

fn request_adapter(
    window: &Arc<Window>,
    backends: wgpu::Backends,
) -> Result<(wgpu::Surface<'static>, wgpu::Adapter), FatalError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends,
        ..Default::default()
    });
    let surface = instance.create_surface(window.clone())?;
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .ok_or(FatalError::NoAdapter)?;
    Ok((surface, adapter))
}

/// Read shader sources and the overlay image. A missing or broken asset is
/// logged and left out; the renderer skips whatever depends on it.
fn load_assets(dir: &Path) -> SceneAssets {
    let shaders = dir.join("shaders");
    let program = |name: &str| match ProgramSource::load(&shaders, name) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::error!(program = name, "shader source not loaded: {e}");
            None
        }
    };

    let overlay_path = dir.join("author.png");
    let overlay = match TextureData::load(&overlay_path) {
        Ok(data) => {
            tracing::info!(
                path = %overlay_path.display(),
                width = data.width(),
                height = data.height(),
                layout = ?data.layout,
                "texture loaded"
            );
            Some(data)
        }
        Err(e) => {
            tracing::error!("texture not loaded: {e}");
            None
        }
    };

    SceneAssets {
        unified: program("basic"),
        texture: program("texture"),
        overlay,
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        _ => None,
    }
}

pub struct TowerApp {
    state: SceneState,
    assets_dir: PathBuf,
    gpu: Option<GpuContext>,
    fatal: Option<FatalError>,
}

impl TowerApp {
    pub fn new(assets_dir: PathBuf) -> Self {
        Self {
            state: SceneState::new(),
            assets_dir,
            gpu: None,
            fatal: None,
        }
    }

    /// Initialization error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<(), FatalError> {
        match self.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        match self.state.advance(Instant::now()) {
            FrameOutcome::Skipped => {}
            FrameOutcome::Close => event_loop.exit(),
            FrameOutcome::Draw => {
                if let Some(gpu) = &self.gpu {
                    gpu.draw(&self.state.scene());
                }
            }
        }
    }
}

impl ApplicationHandler for TowerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match GpuContext::new(event_loop, &self.assets_dir) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.projection.resize(size.width, size.height);
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.state.request_close();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.state.projection.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.state.keyboard.release_all(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_key(code) {
                    self.state
                        .keyboard
                        .key_event(key, key_state == ElementState::Pressed);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        let throttle = self.state.throttle();
        if throttle.is_due(Instant::now()) {
            gpu.window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else if let Some(deadline) = throttle.next_deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.gpu.take().is_some() {
            tracing::info!("GPU resources released");
        }
    }
}
