/// Initialization failures that end the process.
///
/// Each stage maps to its own exit code so scripts can tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("windowing system failed to initialize: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window could not be created: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("graphics surface could not be created: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter can present to the window")]
    NoAdapter,
    #[error("graphics device could not be created: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

impl FatalError {
    /// 1 = windowing library, 2 = window creation, 3 = graphics loader.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::EventLoop(_) => 1,
            Self::Window(_) => 2,
            Self::Surface(_) | Self::NoAdapter | Self::Device(_) | Self::NoSurfaceFormat => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_failures_share_exit_code() {
        assert_eq!(FatalError::NoAdapter.exit_code(), 3);
        assert_eq!(FatalError::NoSurfaceFormat.exit_code(), 3);
    }

    #[test]
    fn messages_name_the_stage() {
        assert!(FatalError::NoAdapter.to_string().contains("adapter"));
        assert!(FatalError::NoSurfaceFormat.to_string().contains("formats"));
    }
}
