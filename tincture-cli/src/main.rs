mod format;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tincture_core::{extract_palette, ExtractOptions, Interpolation};

use crate::format::{format_entry, ColorSystem};

/// Extract a color palette from an image, or from the cover art of an audio file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image (jpg, png, gif, webp, bmp, tiff) or audio (mp3, m4a, flac, ogg, wav, wma) file
    file: PathBuf,

    /// 1 keeps the original size, >1 is the longer side in pixels, 0-1 scales by that factor
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    precision: f64,

    /// Exclude near-black, near-white and grayish colors
    #[arg(long)]
    unabw: bool,

    /// Output color notation
    #[arg(long, value_enum, default_value_t = ColorSystem::Hex)]
    colorsys: ColorSystem,

    /// Maximum number of colors
    #[arg(long = "max", default_value_t = 5)]
    max_colors: usize,

    /// Show each color's share of the image
    #[arg(long)]
    present: bool,

    /// nearest, linear, cubic or lanczos; anything else falls back to linear
    #[arg(long, default_value = "linear")]
    interpolation: String,

    /// Verbose diagnostics on stderr
    #[arg(long)]
    dev: bool,

    /// Print the palette as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.dev { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let interpolation = Interpolation::from_name(&args.interpolation).unwrap_or_else(|| {
        log::warn!("unknown interpolation {:?}, using linear", args.interpolation);
        Interpolation::default()
    });

    let options = ExtractOptions {
        max_colors: args.max_colors,
        resolution: args.precision,
        exclude_bw: args.unabw,
        interpolation,
        diagnostics: args.dev,
    };
    options.validate().context("invalid options")?;

    let path = args.file.canonicalize().unwrap_or_else(|_| args.file.clone());
    let image = tincture_media::load_image(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let palette = extract_palette(&image, &options).context("failed to extract colors")?;
    log::debug!("{} colors, fallback: {}", palette.len(), palette.fallback);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&palette.entries)?);
    } else {
        for entry in palette.iter() {
            println!("{}", format_entry(entry, args.colorsys, args.present));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library() {
        let args = Args::parse_from(["tincture", "bg.jpg"]);
        let defaults = ExtractOptions::default();
        assert_eq!(args.precision, defaults.resolution);
        assert_eq!(args.max_colors, defaults.max_colors);
        assert_eq!(args.colorsys, ColorSystem::Hex);
        assert_eq!(args.interpolation, defaults.interpolation.name());
        assert!(!args.unabw && !args.present && !args.dev && !args.json);
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "tincture",
            "song.mp3",
            "--precision",
            "0.5",
            "--unabw",
            "--colorsys",
            "rgba",
            "--max",
            "3",
            "--present",
            "--interpolation",
            "lanczos",
            "--dev",
        ]);
        assert_eq!(args.file, PathBuf::from("song.mp3"));
        assert_eq!(args.precision, 0.5);
        assert!(args.unabw);
        assert_eq!(args.colorsys, ColorSystem::Rgba);
        assert_eq!(args.max_colors, 3);
        assert!(args.present && args.dev);
        assert_eq!(args.interpolation, "lanczos");
    }

    #[test]
    fn rejects_unknown_color_system() {
        assert!(Args::try_parse_from(["tincture", "a.png", "--colorsys", "hsl"]).is_err());
    }
}
