use std::path::Path;

use crate::MediaError;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "flac", "ogg", "wav", "wma"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Image,
    /// Audio file whose embedded cover is used.
    Audio,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Audio)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Image)
        } else if ext.is_empty() {
            Err(MediaError::UnsupportedType(ext))
        } else {
            Err(MediaError::UnsupportedType(format!(".{ext}")))
        }
    }
}
