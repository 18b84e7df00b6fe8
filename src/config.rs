use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::{Result, TextureError};
use crate::height_field::validate_grid_size;

/// Channel layout of the written image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PixelFormat {
    /// 32-bit: normal in RGB, height in alpha
    #[default]
    Rgba,
    /// 24-bit: normal only
    Rgb,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Rgb => 3,
        }
    }
}

/// Parameters controlling texture generation
#[derive(Debug, Clone, PartialEq)]
pub struct TextureConfig {
    /// Width and height of the square texture in texels
    pub grid_size: usize,
    /// Number of sine features averaged into each height value
    pub feature_count: usize,
    /// Seed for the random stream that places the features
    pub seed: u64,
    /// Destination TGA file
    pub output: PathBuf,
    pub pixel_format: PixelFormat,
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig {
            grid_size: 1024,
            feature_count: 100,
            seed: 123456789,
            output: PathBuf::from("detail_normal.tga"),
            pixel_format: PixelFormat::Rgba,
        }
    }
}

impl TextureConfig {
    /// Check every parameter before any work begins
    pub fn validate(&self) -> Result<()> {
        validate_grid_size(self.grid_size)?;
        if self.grid_size > u16::MAX as usize {
            return Err(TextureError::InvalidConfig(format!(
                "grid size {} exceeds the TGA limit of {}",
                self.grid_size,
                u16::MAX
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(TextureError::InvalidConfig(
                "output path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a tileable detail-normal texture and save it as TGA
#[derive(Debug, Parser)]
#[command(name = "detail-normal", version)]
pub struct Args {
    /// Texture width and height in texels
    #[arg(long, default_value_t = 1024)]
    pub size: usize,

    /// Number of random sine features
    #[arg(long, default_value_t = 100)]
    pub features: usize,

    /// Random seed
    #[arg(long, default_value_t = 123456789)]
    pub seed: u64,

    /// Output TGA path
    #[arg(short, long, default_value = "detail_normal.tga")]
    pub output: PathBuf,

    /// Pixel layout of the written file
    #[arg(long, value_enum, default_value_t = PixelFormat::Rgba)]
    pub format: PixelFormat,
}

impl From<Args> for TextureConfig {
    fn from(args: Args) -> Self {
        TextureConfig {
            grid_size: args.size,
            feature_count: args.features,
            seed: args.seed,
            output: args.output,
            pixel_format: args.format,
        }
    }
}
