//! Scene assets: shader source files and the overlay image.
//!
//! Everything here is CPU-side and GPU-agnostic. Failures are returned as
//! [`AssetError`]; the caller decides whether they are fatal.

mod error;
mod shader;
mod texture;

pub use error::AssetError;
pub use shader::ProgramSource;
pub use texture::{MipLevel, PixelLayout, TextureData, mip_level_count};
