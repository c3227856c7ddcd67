use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("resolution must be a finite number greater than 0, got {0}")]
    InvalidResolution(f64),
    #[error("max colors must be at least 1, got {0}")]
    InvalidMaxColors(usize),
    #[error("resolution {resolution} gives a {width}x{height} working image, which is too large")]
    TargetTooLarge {
        width: u32,
        height: u32,
        resolution: f64,
    },
}
