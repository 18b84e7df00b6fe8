use std::borrow::Cow;
use std::io::Write;

use crate::config::{PixelFormat, TextureConfig};
use crate::error::Result;
use crate::height_field::HeightField;
use crate::normal_map::{ImageBuffer, derive_normal_map};
use crate::pcg::Pcg32;
use crate::tga;

/// Run synthesis and normal derivation for `config`, without touching disk
pub fn render(config: &TextureConfig) -> Result<ImageBuffer> {
    config.validate()?;

    let mut rng = Pcg32::new(config.seed);

    log::info!(
        "Synthesizing {}x{} height field from {} features (seed {})...",
        config.grid_size,
        config.grid_size,
        config.feature_count,
        config.seed
    );
    let field = HeightField::synthesize(config.grid_size, config.feature_count, &mut rng)?;

    log::info!("Deriving normal map...");
    Ok(derive_normal_map(&field))
}

/// Image bytes laid out for `format`
fn pixel_bytes(image: &ImageBuffer, format: PixelFormat) -> Cow<'_, [u8]> {
    match format {
        PixelFormat::Rgba => Cow::Borrowed(image.as_bytes()),
        PixelFormat::Rgb => Cow::Owned(image.to_rgb_bytes()),
    }
}

/// Encode `image` in the given pixel format into any sink
pub fn encode<W: Write>(image: &ImageBuffer, format: PixelFormat, writer: &mut W) -> Result<()> {
    let pixels = pixel_bytes(image, format);
    tga::write_tga(
        writer,
        &pixels,
        image.width(),
        image.height(),
        format.bytes_per_pixel(),
    )
}

/// Render the texture and write it to `config.output`
pub fn generate(config: &TextureConfig) -> Result<()> {
    let image = render(config)?;
    let bpp = config.pixel_format.bytes_per_pixel();

    log::info!("Writing {}-bit TGA to {}", bpp * 8, config.output.display());
    let pixels = pixel_bytes(&image, config.pixel_format);
    tga::save_tga(&config.output, &pixels, image.width(), image.height(), bpp)?;

    log::debug!(
        "Wrote {} bytes",
        tga::encoded_len(image.width(), image.height(), bpp)
    );
    Ok(())
}
