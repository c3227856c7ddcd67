use clap::ValueEnum;
use tincture_core::PaletteEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorSystem {
    #[default]
    Hex,
    Rgb,
    Rgba,
}

pub fn format_entry(entry: &PaletteEntry, system: ColorSystem, show_percentage: bool) -> String {
    let (r, g, b) = (entry.rgb.red, entry.rgb.green, entry.rgb.blue);
    let value = match system {
        ColorSystem::Hex => entry.hex.clone(),
        ColorSystem::Rgb => format!("rgb({r}, {g}, {b})"),
        ColorSystem::Rgba => format!("rgba({r}, {g}, {b}, 1)"),
    };

    if show_percentage {
        format!("{value} ({}%)", entry.percentage)
    } else {
        value
    }
}
