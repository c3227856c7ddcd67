//! Dominant-color palette extraction.
//!
//! The pipeline is: pick a working size, resample to RGBA, bucket every opaque
//! pixel on a 12-step grid per channel, then walk the buckets from most to least
//! frequent and keep the ones that are visually far enough from what was
//! already kept.

pub mod cluster;
mod error;
mod extract;
mod options;
pub mod quantize;
pub mod resize;

pub use ::palette::Srgb;
pub use error::ConfigError;
pub use extract::{
    color_to_hex, extract_from_pixels, extract_palette, Palette, PaletteEntry, MAX_TARGET_PIXELS,
};
pub use options::{ExtractOptions, Interpolation};
pub use quantize::{PixelStats, QuantizedBucket, QuantizedHistogram};
