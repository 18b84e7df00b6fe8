//! Procedural detail-normal texture generation.
//!
//! A seeded [`pcg::Pcg32`] stream places random sine features, which
//! [`height_field::HeightField`] averages into a tileable height field.
//! [`normal_map::derive_normal_map`] turns that into packed normal + height
//! texels, and [`tga`] writes them as an uncompressed TGA image.

pub mod config;
pub mod error;
pub mod height_field;
pub mod normal_map;
pub mod pcg;
pub mod pipeline;
pub mod tga;

pub use config::{Args, PixelFormat, TextureConfig};
pub use error::TextureError;
