use crate::config::{MediaKind, classify_path};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// Prefix of the staging folders the cleaner creates while working
pub const STAGING_PREFIX: &str = ".niclean-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub modified: Option<SystemTime>,
}

impl MediaEntry {
    fn sort_key(&self) -> (SystemTime, String) {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        (self.modified.unwrap_or(SystemTime::UNIX_EPOCH), name)
    }
}

/// Scan `root` for image and video files, skipping anything under `exclude`.
///
/// Ordered by modification time, then lowercase file name. An unreadable root
/// yields an empty list.
#[must_use]
pub fn collect_media(root: &Path, recursive: bool, exclude: Option<&Path>) -> Vec<MediaEntry> {
    if let Err(e) = std::fs::read_dir(root) {
        warn!("Cannot read {}: {e}", root.display());
        return Vec::new();
    }

    let walker = WalkDir::new(root).follow_links(false).min_depth(1);
    let walker = if recursive {
        walker
    } else {
        walker.max_depth(1)
    };

    let mut files: Vec<MediaEntry> = walker
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, exclude))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let kind = classify_path(entry.path());
            if !kind.is_media() {
                return None;
            }
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            Some(MediaEntry {
                path: entry.into_path(),
                kind,
                modified,
            })
        })
        .collect();

    files.sort_by_cached_key(MediaEntry::sort_key);
    files
}

fn is_excluded(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    if entry
        .file_name()
        .to_string_lossy()
        .starts_with(STAGING_PREFIX)
    {
        return true;
    }
    exclude.is_some_and(|excluded| same_path(entry.path(), excluded))
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
