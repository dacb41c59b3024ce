use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;

use crate::AssetError;

/// Pixel layout chosen from the decoded image's channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel.
    R8,
    /// Two channels.
    Rg8,
    /// Three channels. Stored padded to four bytes with opaque alpha,
    /// since GPUs expose no 3-byte texel format.
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    /// 1 -> R8, 2 -> RG8, 3 -> RGB8, 4 -> RGBA8, anything else -> RGB8.
    pub fn from_channels(channels: u8) -> Self {
        match channels {
            1 => Self::R8,
            2 => Self::Rg8,
            3 => Self::Rgb8,
            4 => Self::Rgba8,
            _ => Self::Rgb8,
        }
    }

    /// Bytes per texel in the uploaded pixel data.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::R8 => 1,
            Self::Rg8 => 2,
            Self::Rgb8 | Self::Rgba8 => 4,
        }
    }

    fn pixels(self, img: &DynamicImage) -> Vec<u8> {
        match self {
            Self::R8 => img.to_luma8().into_raw(),
            Self::Rg8 => img.to_luma_alpha8().into_raw(),
            Self::Rgb8 | Self::Rgba8 => img.to_rgba8().into_raw(),
        }
    }
}

/// One level of the mip chain, tightly packed rows.
#[derive(Debug, Clone)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decoded texture ready for upload: flipped vertically, full mip chain.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub layout: PixelLayout,
    pub levels: Vec<MipLevel>,
}

impl TextureData {
    /// Read and decode an image file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::decode(&bytes)?;
        tracing::info!(
            path = %path.display(),
            width = data.width(),
            height = data.height(),
            layout = ?data.layout,
            mips = data.levels.len(),
            "decoded texture"
        );
        Ok(data)
    }

    /// Decode in-memory image bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img)
    }

    pub fn from_image(img: &DynamicImage) -> Result<Self, AssetError> {
        if img.width() == 0 || img.height() == 0 {
            return Err(AssetError::EmptyImage);
        }
        let layout = PixelLayout::from_channels(img.color().channel_count());
        // Row 0 of the upload is the bottom row of the picture.
        let base = img.flipv();

        let count = mip_level_count(base.width(), base.height());
        let mut levels = Vec::with_capacity(count as usize);
        for level in 0..count {
            let width = (base.width() >> level).max(1);
            let height = (base.height() >> level).max(1);
            let pixels = if level == 0 {
                layout.pixels(&base)
            } else {
                layout.pixels(&base.resize_exact(width, height, FilterType::Triangle))
            };
            levels.push(MipLevel {
                width,
                height,
                pixels,
            });
        }
        Ok(Self { layout, levels })
    }

    pub fn width(&self) -> u32 {
        self.levels.first().map_or(0, |l| l.width)
    }

    pub fn height(&self) -> u32 {
        self.levels.first().map_or(0, |l| l.height)
    }

    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }
}

/// Levels in a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn channel_count_maps_to_layout() {
        assert_eq!(PixelLayout::from_channels(1), PixelLayout::R8);
        assert_eq!(PixelLayout::from_channels(2), PixelLayout::Rg8);
        assert_eq!(PixelLayout::from_channels(3), PixelLayout::Rgb8);
        assert_eq!(PixelLayout::from_channels(4), PixelLayout::Rgba8);
        assert_eq!(PixelLayout::from_channels(0), PixelLayout::Rgb8);
        assert_eq!(PixelLayout::from_channels(7), PixelLayout::Rgb8);
    }

    #[test]
    fn mip_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(4, 2), 3);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(300, 17), 9);
    }

    #[test]
    fn rgb_is_flipped_and_padded() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));

        let data = TextureData::from_image(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(data.layout, PixelLayout::Rgb8);
        assert_eq!(data.mip_level_count(), 2);
        let base = &data.levels[0];
        assert_eq!(base.pixels.len(), 2 * 2 * 4);
        // The bottom (blue) row comes first after the flip.
        assert_eq!(&base.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&base.pixels[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn gray_uses_single_channel() {
        let img = GrayImage::from_pixel(4, 2, Luma([128]));
        let data = TextureData::from_image(&DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(data.layout, PixelLayout::R8);
        let sizes: Vec<_> = data.levels.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(4, 2), (2, 1), (1, 1)]);
        for level in &data.levels {
            assert_eq!(level.pixels.len(), (level.width * level.height) as usize);
        }
    }

    #[test]
    fn gray_alpha_uses_two_channels() {
        let img = image::GrayAlphaImage::from_pixel(2, 2, LumaA([10, 200]));
        let data = TextureData::from_image(&DynamicImage::ImageLumaA8(img)).unwrap();
        assert_eq!(data.layout, PixelLayout::Rg8);
        assert_eq!(&data.levels[0].pixels[0..2], &[10, 200]);
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.png");
        RgbaImage::from_pixel(8, 4, Rgba([1, 2, 3, 4]))
            .save(&path)
            .unwrap();

        let data = TextureData::load(&path).unwrap();
        assert_eq!(data.layout, PixelLayout::Rgba8);
        assert_eq!((data.width(), data.height()), (8, 4));
        assert_eq!(&data.levels[0].pixels[0..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn garbage_fails_to_decode() {
        let err = TextureData::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TextureData::load(Path::new("/nonexistent/author.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }
}
