use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TextureError};

/// Uncompressed true-color image type
const IMAGE_TYPE_FULL_COLOR: u8 = 2;

pub const HEADER_LEN: usize = 18;
pub const FOOTER_LEN: usize = 26;

/// TGA 2.0 signature; followed on disk by `'.'` and a NUL
pub const SIGNATURE: &[u8; 16] = b"TRUEVISION-XFILE";

/// Fixed 18-byte file header, serialized field by field in little-endian order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_index: u16,
    pub color_map_length: u16,
    pub color_map_size: u8,
    pub origin_x: u16,
    pub origin_y: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    pub fn full_color(width: u16, height: u16, bits_per_pixel: u8) -> Self {
        TgaHeader {
            image_type: IMAGE_TYPE_FULL_COLOR,
            width,
            height,
            bits_per_pixel,
            ..Default::default()
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.image_type;
        out[3..5].copy_from_slice(&self.color_map_index.to_le_bytes());
        out[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        out[7] = self.color_map_size;
        out[8..10].copy_from_slice(&self.origin_x.to_le_bytes());
        out[10..12].copy_from_slice(&self.origin_y.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.image_descriptor;
        out
    }
}

/// Fixed 26-byte file footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TgaFooter {
    pub extension_offset: u32,
    pub developer_offset: u32,
}

impl TgaFooter {
    pub fn to_bytes(&self) -> [u8; FOOTER_LEN] {
        let mut out = [0u8; FOOTER_LEN];
        out[0..4].copy_from_slice(&self.extension_offset.to_le_bytes());
        out[4..8].copy_from_slice(&self.developer_offset.to_le_bytes());
        out[8..24].copy_from_slice(SIGNATURE);
        out[24] = b'.';
        out[25] = 0;
        out
    }
}

/// Check the buffer shape and build the matching header
///
/// Nothing is written and no file is touched when this fails.
fn prepare_header(
    pixels: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<TgaHeader> {
    if bytes_per_pixel != 3 && bytes_per_pixel != 4 {
        return Err(TextureError::InvalidConfig(format!(
            "TGA supports 3 or 4 bytes per pixel, got {}",
            bytes_per_pixel
        )));
    }

    let to_u16 = |value: usize, name: &str| {
        u16::try_from(value).map_err(|_| {
            TextureError::InvalidConfig(format!(
                "TGA {} {} exceeds {}",
                name,
                value,
                u16::MAX
            ))
        })
    };
    let header_width = to_u16(width, "width")?;
    let header_height = to_u16(height, "height")?;

    let expected = width * height * bytes_per_pixel;
    if pixels.len() != expected {
        return Err(TextureError::InvalidConfig(format!(
            "pixel buffer holds {} bytes, expected {} for {}x{} at {} bytes per pixel",
            pixels.len(),
            expected,
            width,
            height,
            bytes_per_pixel
        )));
    }

    Ok(TgaHeader::full_color(
        header_width,
        header_height,
        (bytes_per_pixel * 8) as u8,
    ))
}

/// Serialize `pixels` (row-major, RGB or RGBA) as an uncompressed TGA image
///
/// # Arguments
/// * `writer` - Destination sink
/// * `pixels` - Source bytes, row 0 first, channels in R, G, B[, A] order
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `bytes_per_pixel` - 3 for 24-bit output, 4 for 32-bit output
///
/// Rows are emitted bottom-up and channels as B, G, R[, A]; `pixels` itself
/// is never reordered.
pub fn write_tga<W: Write>(
    writer: &mut W,
    pixels: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<()> {
    let header = prepare_header(pixels, width, height, bytes_per_pixel)?;
    writer.write_all(&header.to_bytes())?;
    write_payload(writer, pixels, width, bytes_per_pixel)?;
    writer.write_all(&TgaFooter::default().to_bytes())?;
    Ok(())
}

fn write_payload<W: Write>(
    writer: &mut W,
    pixels: &[u8],
    width: usize,
    bytes_per_pixel: usize,
) -> Result<()> {
    let stride = width * bytes_per_pixel;
    if stride == 0 {
        return Ok(());
    }

    let mut row_out = Vec::with_capacity(stride);
    for row in pixels.chunks_exact(stride).rev() {
        row_out.clear();
        for px in row.chunks_exact(bytes_per_pixel) {
            row_out.extend_from_slice(&[px[2], px[1], px[0]]);
            if bytes_per_pixel == 4 {
                row_out.push(px[3]);
            }
        }
        writer.write_all(&row_out)?;
    }
    Ok(())
}

/// Write a TGA file at `path`
///
/// The buffer is validated before the file is created. An I/O failure at
/// any point, including the final flush, is returned as an error.
pub fn save_tga(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<()> {
    prepare_header(pixels, width, height, bytes_per_pixel)?;

    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_tga(&mut writer, pixels, width, height, bytes_per_pixel)?;
    writer.flush()?;
    Ok(())
}

/// Size in bytes of an encoded image
pub fn encoded_len(width: usize, height: usize, bytes_per_pixel: usize) -> usize {
    HEADER_LEN + width * height * bytes_per_pixel + FOOTER_LEN
}
