use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "heic", "heif", "tif", "tiff", "bmp",
];

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "mkv", "avi", "webm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Filename prefix used by phone cameras
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Image => "IMG",
            Self::Video => "VID",
            Self::Other => "FILE",
        }
    }

    #[must_use]
    pub const fn is_media(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Classify an extension, with or without the leading dot, ignoring case.
#[must_use]
pub fn classify_extension(extension: &str) -> MediaKind {
    let ext = extension.trim_start_matches('.').to_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Other
    }
}

#[must_use]
pub fn classify_path(path: &Path) -> MediaKind {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(MediaKind::Other, classify_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_extension_maps_to_one_kind() {
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(classify_extension(ext), MediaKind::Image, "{ext}");
            assert!(!VIDEO_EXTENSIONS.contains(ext));
        }
        for ext in VIDEO_EXTENSIONS {
            assert_eq!(classify_extension(ext), MediaKind::Video, "{ext}");
        }
    }

    #[test]
    fn test_classify_ignores_case_and_dot() {
        assert_eq!(classify_extension(".JPG"), MediaKind::Image);
        assert_eq!(classify_extension("MoV"), MediaKind::Video);
        assert_eq!(classify_extension(".heic"), MediaKind::Image);
    }

    #[test]
    fn test_unknown_extensions_are_other() {
        assert_eq!(classify_extension("txt"), MediaKind::Other);
        assert_eq!(classify_extension(""), MediaKind::Other);
        assert!(!classify_extension("pdf").is_media());
    }

    #[test]
    fn test_classify_path() {
        assert_eq!(classify_path(Path::new("/a/b/photo.PNG")), MediaKind::Image);
        assert_eq!(classify_path(Path::new("clip.webm")), MediaKind::Video);
        assert_eq!(classify_path(Path::new("README")), MediaKind::Other);
        assert_eq!(classify_path(Path::new(".hidden")), MediaKind::Other);
    }
}
