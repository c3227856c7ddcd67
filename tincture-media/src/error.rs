use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported file type: {0:?}")]
    UnsupportedType(String),
    #[error("failed to parse audio file")]
    Metadata(#[from] lofty::error::LoftyError),
    #[error("no cover image found in {}", .0.display())]
    NoCover(PathBuf),
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
