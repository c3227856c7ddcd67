use image::{imageops, DynamicImage, RgbaImage};

use crate::Interpolation;

/// Working size for an image of `width`x`height` under `resolution`.
///
/// Callers validate `resolution` first; see [`crate::ExtractOptions`].
pub fn target_dimensions(width: u32, height: u32, resolution: f64) -> (u32, u32) {
    if resolution == 1.0 {
        return (width, height);
    }

    if resolution > 1.0 {
        let size = round_to_pixels(resolution);
        if width > height {
            let scaled = f64::from(height) / f64::from(width) * resolution;
            (size, round_to_pixels(scaled))
        } else {
            let scaled = f64::from(width) / f64::from(height) * resolution;
            (round_to_pixels(scaled), size)
        }
    } else {
        (
            round_to_pixels(f64::from(width) * resolution),
            round_to_pixels(f64::from(height) * resolution),
        )
    }
}

// Half-up rounding with a floor of one pixel. NaN saturates to 0 and is floored too.
fn round_to_pixels(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

/// Converts to RGBA (opaque alpha when the source has none) and resizes to
/// exactly `width`x`height`. An unchanged size skips the resampling pass.
pub fn resample(
    image: &DynamicImage,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> RgbaImage {
    let rgba = image.to_rgba8();
    if rgba.dimensions() == (width, height) {
        return rgba;
    }
    imageops::resize(&rgba, width, height, interpolation.filter_type())
}
