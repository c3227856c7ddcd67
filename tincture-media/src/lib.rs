//! Turns a path on disk into a decoded image: either the file itself, or the
//! cover art embedded in an audio file.

mod cover;
mod error;
mod source;

use std::path::Path;

use image::{DynamicImage, ImageReader};

pub use cover::{extract_cover, extension_for, CoverFile};
pub use error::MediaError;
pub use source::{SourceKind, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS};

pub fn load_image(path: &Path) -> Result<DynamicImage, MediaError> {
    if !path.exists() {
        return Err(MediaError::NotFound(path.to_path_buf()));
    }

    match SourceKind::from_path(path)? {
        SourceKind::Image => decode(path),
        SourceKind::Audio => {
            let cover = extract_cover(path)?;
            log::info!("extracted cover from {}", path.display());
            // `cover` is dropped (and deleted) once decoding is done, on error too.
            decode(cover.path())
        }
    }
}

/// Decodes by sniffing the leading bytes; the extension is only a fallback.
fn decode(path: &Path) -> Result<DynamicImage, MediaError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}
