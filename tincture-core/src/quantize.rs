use std::collections::{HashMap, HashSet};

use image::RgbaImage;
use palette::Srgb;

/// Width of a bucket on each channel.
pub const QUANTIZATION_FACTOR: u8 = 12;

/// Pixels with alpha below this are ignored.
pub const ALPHA_THRESHOLD: u8 = 128;

const NEAR_BLACK_SUM: u16 = 60;
const NEAR_WHITE_SUM: u16 = 710;
const LOW_SPREAD: u8 = 15;

/// Rounds `value` half-up to the nearest multiple of [`QUANTIZATION_FACTOR`].
pub fn quantize_channel(value: u8) -> u8 {
    let factor = u16::from(QUANTIZATION_FACTOR);
    let rounded = (u16::from(value) + factor / 2) / factor * factor;
    rounded.min(u16::from(u8::MAX)) as u8
}

/// Near black, near white, or too little spread between channels to read as a hue.
pub fn is_achromatic_near(r: u8, g: u8, b: u8) -> bool {
    let sum = u16::from(r) + u16::from(g) + u16::from(b);
    let spread = r.max(g).max(b) - r.min(g).min(b);
    sum < NEAR_BLACK_SUM || sum > NEAR_WHITE_SUM || spread < LOW_SPREAD
}

fn pack(color: Srgb<u8>) -> u32 {
    (u32::from(color.red) << 16) | (u32::from(color.green) << 8) | u32::from(color.blue)
}

fn unpack(key: u32) -> Srgb<u8> {
    Srgb::new((key >> 16) as u8, (key >> 8) as u8, key as u8)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizedBucket {
    pub color: Srgb<u8>,
    pub count: u32,
}

/// Pixel tallies gathered while counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelStats {
    pub total: u32,
    pub transparent: u32,
    pub excluded: u32,
    pub valid: u32,
}

/// Occurrence counts per quantized color, from a single pass over the pixels.
#[derive(Debug, Default)]
pub struct QuantizedHistogram {
    buckets: HashMap<u32, u32>,
    achromatic: HashSet<u32>,
    stats: PixelStats,
}

impl QuantizedHistogram {
    pub fn from_pixels(pixels: &RgbaImage, exclude_bw: bool) -> Self {
        let mut histogram = Self::default();
        for pixel in pixels.pixels() {
            let [r, g, b, a] = pixel.0;
            histogram.stats.total += 1;

            if a < ALPHA_THRESHOLD {
                histogram.stats.transparent += 1;
                continue;
            }

            let key = pack(Srgb::new(
                quantize_channel(r),
                quantize_channel(g),
                quantize_channel(b),
            ));

            if is_achromatic_near(r, g, b) {
                if exclude_bw {
                    histogram.stats.excluded += 1;
                    continue;
                }
                histogram.achromatic.insert(key);
            }

            *histogram.buckets.entry(key).or_insert(0) += 1;
            histogram.stats.valid += 1;
        }
        histogram
    }

    pub fn stats(&self) -> PixelStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn count_of(&self, color: Srgb<u8>) -> u32 {
        self.buckets.get(&pack(color)).copied().unwrap_or(0)
    }

    /// Whether any pixel counted into this bucket was achromatic-near.
    /// Only tracked when black/white pixels are kept.
    pub fn is_achromatic_bucket(&self, color: Srgb<u8>) -> bool {
        self.achromatic.contains(&pack(color))
    }

    /// Buckets by descending count; equal counts fall back to ascending (r, g, b).
    pub fn ranked(&self) -> Vec<QuantizedBucket> {
        let mut ranked: Vec<(u32, u32)> = self.buckets.iter().map(|(&k, &c)| (k, c)).collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .map(|(key, count)| QuantizedBucket {
                color: unpack(key),
                count,
            })
            .collect()
    }
}
