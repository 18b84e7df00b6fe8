//! Tangent-space normal map derivation from a tileable height field
//!
//! Each texel stores the surface normal in RGB and the encoded height in A,
//! using the same `[-1, 1] -> [0, 255]` mapping for all four channels.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::height_field::HeightField;

/// One packed texel: normal in RGB, height in A
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
}

/// Row-major texel buffer, row 0 first
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba8>,
}

impl ImageBuffer {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Raw RGBA bytes, 4 per texel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// RGB bytes, 3 per texel, with the height channel dropped
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b]);
        }
        bytes
    }
}

/// Map a value in `[-1, 1]` to a byte, clamping anything outside that range
///
/// Rounds to nearest, so `0.0` encodes to 128 and `1.0` to 255.
pub fn encode_unit(value: f32) -> u8 {
    ((value.clamp(-1.0, 1.0) * 0.5 + 0.5) * 255.0).round() as u8
}

fn normalize_or_up(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(Vec3::Z)
}

/// Normal at column `x`, row `y`, from central differences of the wrapped field
pub fn texel_normal(field: &HeightField, x: i64, y: i64) -> Vec3 {
    let slope_u = (field.sample(x + 1, y) - field.sample(x - 1, y)) * 0.5;
    let slope_v = (field.sample(x, y + 1) - field.sample(x, y - 1)) * 0.5;

    let tangent_u = normalize_or_up(Vec3::new(1.0, 0.0, slope_u));
    let tangent_v = normalize_or_up(Vec3::new(0.0, 1.0, slope_v));

    normalize_or_up(tangent_u.cross(tangent_v))
}

/// Build the packed normal + height buffer for every texel of `field`
pub fn derive_normal_map(field: &HeightField) -> ImageBuffer {
    let size = field.size();
    let mut pixels = Vec::with_capacity(size * size);

    for y in 0..size as i64 {
        for x in 0..size as i64 {
            let n = texel_normal(field, x, y);
            pixels.push(Rgba8::new(
                encode_unit(n.x),
                encode_unit(n.y),
                encode_unit(n.z),
                encode_unit(field.sample(x, y)),
            ));
        }
    }

    ImageBuffer {
        width: size,
        height: size,
        pixels,
    }
}
