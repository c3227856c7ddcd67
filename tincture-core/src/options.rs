use image::imageops::FilterType;

use crate::ConfigError;

/// Resampling kernel used when shrinking the source image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
    Cubic,
    Lanczos,
}

impl Interpolation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "linear" => Some(Self::Linear),
            "cubic" => Some(Self::Cubic),
            "lanczos" => Some(Self::Lanczos),
            _ => None,
        }
    }

    /// Like [`Interpolation::from_name`], but unknown names become `Linear`.
    pub fn from_name_lossy(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
            Self::Lanczos => "lanczos",
        }
    }

    pub fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Linear => FilterType::Triangle,
            Self::Cubic => FilterType::CatmullRom,
            Self::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Knobs for a single extraction.
///
/// `resolution` follows three modes: exactly `1` keeps the source size, values
/// above `1` are the pixel length of the longer side, and values in `(0, 1)`
/// scale both sides by that factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    pub max_colors: usize,
    pub resolution: f64,
    pub exclude_bw: bool,
    pub interpolation: Interpolation,
    /// Emits a verbose trace through `log`. Never changes the result.
    pub diagnostics: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_colors: 5,
            resolution: 100.0,
            exclude_bw: false,
            interpolation: Interpolation::default(),
            diagnostics: false,
        }
    }
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if self.max_colors == 0 {
            return Err(ConfigError::InvalidMaxColors(self.max_colors));
        }
        Ok(())
    }
}
