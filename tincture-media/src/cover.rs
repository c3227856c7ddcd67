use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;

use crate::MediaError;

const TEMP_DIR: &str = ".temp";

/// Cover image written next to its audio file. Removed on drop, together with
/// the temp directory once it is empty.
#[derive(Debug)]
pub struct CoverFile {
    path: PathBuf,
}

impl CoverFile {
    /// Writes `data` into `<dir>/.temp/` with an extension derived from `mime`.
    pub fn write(dir: &Path, data: &[u8], mime: Option<&MimeType>) -> Result<Self, MediaError> {
        let temp_dir = dir.join(TEMP_DIR);
        fs::create_dir_all(&temp_dir)?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let name = format!("cover_{}_{}.{}", std::process::id(), nanos, extension_for(mime));
        let path = temp_dir.join(name);

        fs::write(&path, data)?;
        log::debug!("wrote cover to {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CoverFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("failed to remove {}: {}", self.path.display(), e);
        }
        // Only succeeds when nothing else is left in the directory.
        if let Some(dir) = self.path.parent() {
            match fs::remove_dir(dir) {
                Err(e) if e.kind() != ErrorKind::DirectoryNotEmpty => {
                    log::debug!("left {} in place: {}", dir.display(), e);
                }
                _ => {}
            }
        }
    }
}

pub fn extension_for(mime: Option<&MimeType>) -> &'static str {
    match mime {
        Some(MimeType::Png) => "png",
        Some(MimeType::Gif) => "gif",
        Some(MimeType::Unknown(other)) if other.eq_ignore_ascii_case("image/webp") => "webp",
        _ => "jpg",
    }
}

/// Front cover if there is one, otherwise the first picture of any type.
fn pick_picture<'a>(pictures: &[&'a Picture]) -> Option<&'a Picture> {
    pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())
        .copied()
}

/// Pulls the embedded cover out of `audio` and writes it to a [`CoverFile`].
pub fn extract_cover(audio: &Path) -> Result<CoverFile, MediaError> {
    let tagged = lofty::read_from_path(audio)?;
    let pictures: Vec<&Picture> = tagged.tags().iter().flat_map(|tag| tag.pictures()).collect();

    let picture = pick_picture(&pictures).ok_or_else(|| MediaError::NoCover(audio.to_path_buf()))?;
    log::debug!(
        "found {:?} picture ({} bytes) in {}",
        picture.pic_type(),
        picture.data().len(),
        audio.display()
    );

    let dir = audio.parent().unwrap_or_else(|| Path::new("."));
    CoverFile::write(dir, picture.data(), picture.mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tincture-cover-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn extension_follows_mime() {
        assert_eq!(extension_for(Some(&MimeType::Jpeg)), "jpg");
        assert_eq!(extension_for(Some(&MimeType::Png)), "png");
        assert_eq!(extension_for(Some(&MimeType::Gif)), "gif");
        assert_eq!(extension_for(Some(&MimeType::Unknown("image/webp".into()))), "webp");
        assert_eq!(extension_for(Some(&MimeType::Bmp)), "jpg");
        assert_eq!(extension_for(None), "jpg");
    }

    #[test]
    fn cover_file_cleans_up_after_itself() {
        let dir = scratch_dir("cleanup");
        let cover = CoverFile::write(&dir, b"not really a png", Some(&MimeType::Png)).unwrap();
        let path = cover.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "png");
        assert_eq!(path.parent().unwrap(), dir.join(TEMP_DIR));

        drop(cover);
        assert!(!path.exists());
        assert!(!dir.join(TEMP_DIR).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cover_file_keeps_shared_temp_dir() {
        let dir = scratch_dir("shared");
        let other = dir.join(TEMP_DIR).join("keep.txt");
        fs::create_dir_all(other.parent().unwrap()).unwrap();
        fs::write(&other, b"x").unwrap();

        drop(CoverFile::write(&dir, b"bytes", None).unwrap());
        assert!(other.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn drop_tolerates_temp_dir_removed_underneath() {
        let dir = scratch_dir("vanished");
        let cover = CoverFile::write(&dir, b"bytes", Some(&MimeType::Jpeg)).unwrap();
        fs::remove_dir_all(dir.join(TEMP_DIR)).unwrap();

        drop(cover);
        assert!(!dir.join(TEMP_DIR).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn audio_without_tags_is_an_error() {
        let dir = scratch_dir("untagged");
        let audio = dir.join("silence.mp3");
        fs::write(&audio, [0u8; 64]).unwrap();
        assert!(extract_cover(&audio).is_err());
        assert!(!dir.join(TEMP_DIR).exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
