use std::num::NonZeroU32;
use std::ops::Deref;

use image::{DynamicImage, GenericImageView, RgbaImage};
use palette::Srgb;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::cluster::{self, percentage};
use crate::quantize::{PixelStats, QuantizedBucket, QuantizedHistogram};
use crate::resize::{resample, target_dimensions};
use crate::{ConfigError, ExtractOptions};

/// Buckets listed in the diagnostics trace.
const TRACE_TOP: usize = 10;

/// Largest working buffer produced by upscaling (8192 x 8192). Sources that
/// are already bigger may still be processed at their own size.
pub const MAX_TARGET_PIXELS: u64 = 8192 * 8192;

/// One representative color of an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub hex: String,
    #[serde(serialize_with = "serialize_rgb")]
    pub rgb: Srgb<u8>,
    /// Pixels that fell into this color's bucket.
    pub count: u32,
    /// Share of all counted pixels, rounded to a whole percent.
    pub percentage: u8,
}

impl PaletteEntry {
    pub fn new(rgb: Srgb<u8>, count: u32, total: NonZeroU32) -> Self {
        Self {
            hex: color_to_hex(rgb),
            rgb,
            count,
            percentage: percentage(count, total),
        }
    }
}

fn serialize_rgb<S: Serializer>(rgb: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Rgb", 3)?;
    state.serialize_field("r", &rgb.red)?;
    state.serialize_field("g", &rgb.green)?;
    state.serialize_field("b", &rgb.blue)?;
    state.end()
}

pub fn color_to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Ordered palette, most representative color first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
    pub stats: PixelStats,
    /// Set when clustering kept nothing and the raw top buckets were used instead.
    pub fallback: bool,
}

impl Deref for Palette {
    type Target = [PaletteEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl IntoIterator for Palette {
    type Item = PaletteEntry;
    type IntoIter = std::vec::IntoIter<PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Scales `image` per `options.resolution`, then extracts its palette.
pub fn extract_palette(image: &DynamicImage, options: &ExtractOptions) -> Result<Palette, ConfigError> {
    options.validate()?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        if options.diagnostics {
            log::debug!("empty image, nothing to extract");
        }
        return Ok(Palette::default());
    }

    let (target_width, target_height) = target_dimensions(width, height, options.resolution);
    let target_pixels = u64::from(target_width) * u64::from(target_height);
    let limit = MAX_TARGET_PIXELS.max(u64::from(width) * u64::from(height));
    if target_pixels > limit {
        return Err(ConfigError::TargetTooLarge {
            width: target_width,
            height: target_height,
            resolution: options.resolution,
        });
    }

    if options.diagnostics {
        log::debug!(
            "source {}x{}, resolution {}, max colors {}, exclude bw {}, interpolation {}",
            width,
            height,
            options.resolution,
            options.max_colors,
            options.exclude_bw,
            options.interpolation.name()
        );
        log::debug!(
            "scaling mode: {}, target {}x{}",
            scaling_mode(options.resolution),
            target_width,
            target_height
        );
    }

    let pixels = resample(image, target_width, target_height, options.interpolation);
    extract_from_pixels(&pixels, options)
}

/// Extracts the palette of an already scaled RGBA buffer.
pub fn extract_from_pixels(pixels: &RgbaImage, options: &ExtractOptions) -> Result<Palette, ConfigError> {
    options.validate()?;

    let histogram = QuantizedHistogram::from_pixels(pixels, options.exclude_bw);
    let stats = histogram.stats();
    let ranked = histogram.ranked();

    if options.diagnostics {
        log::debug!(
            "{} pixels: {} transparent, {} excluded, {} valid, {} buckets",
            stats.total,
            stats.transparent,
            stats.excluded,
            stats.valid,
            ranked.len()
        );
    }

    let Some(total) = NonZeroU32::new(stats.valid) else {
        return Ok(Palette {
            stats,
            ..Default::default()
        });
    };

    if options.diagnostics {
        trace_candidates(&histogram, &ranked, total);
    }

    let clustered = cluster::cluster(&ranked, options.max_colors, total);
    if options.diagnostics {
        log::debug!(
            "skipped {} similar colors, kept {}",
            clustered.skipped,
            clustered.entries.len()
        );
        for (i, entry) in clustered.entries.iter().enumerate() {
            log::debug!(
                "{}. {} rgb({}, {}, {}) {}%",
                i + 1,
                entry.hex,
                entry.rgb.red,
                entry.rgb.green,
                entry.rgb.blue,
                entry.percentage
            );
        }
    }

    if clustered.entries.is_empty() && !ranked.is_empty() {
        log::warn!("clustering kept no colors, using the top buckets as-is");
        return Ok(Palette {
            entries: cluster::fallback(&ranked, options.max_colors, total),
            stats,
            fallback: true,
        });
    }

    Ok(Palette {
        entries: clustered.entries,
        stats,
        fallback: false,
    })
}

fn scaling_mode(resolution: f64) -> &'static str {
    if resolution == 1.0 {
        "original size"
    } else if resolution > 1.0 {
        "fixed size"
    } else {
        "proportional"
    }
}

fn trace_candidates(histogram: &QuantizedHistogram, ranked: &[QuantizedBucket], total: NonZeroU32) {
    for (i, bucket) in ranked.iter().take(TRACE_TOP).enumerate() {
        let marker = if histogram.is_achromatic_bucket(bucket.color) {
            " (near black/white)"
        } else {
            ""
        };
        log::debug!(
            "{}. {} x{} ({}%){}",
            i + 1,
            color_to_hex(bucket.color),
            bucket.count,
            percentage(bucket.count, total),
            marker
        );
    }
}
