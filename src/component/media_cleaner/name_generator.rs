//! Phone-camera style file names
//!
//! Sequential names use a counter per media kind, timestamped names use the
//! file's modification time in local time. Every path handed out is unique
//! for the run, both against the disk and against earlier reservations.

use crate::config::{MediaKind, NamingMode};
use crate::error::CleanError;
use crate::tools::MediaEntry;
use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Upper bound on `_N` suffixes tried before giving up
pub const MAX_COLLISION_ATTEMPTS: u32 = 1_000_000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KindCounters {
    image: u32,
    video: u32,
}

impl KindCounters {
    /// Advance the counter for `kind` and return its new value (first call gives 1)
    pub fn next(&mut self, kind: MediaKind) -> u32 {
        let counter = match kind {
            MediaKind::Video => &mut self.video,
            MediaKind::Image | MediaKind::Other => &mut self.image,
        };
        *counter += 1;
        *counter
    }
}

/// `.jpeg` → `.JPG`, everything else just uppercased. Empty stays empty.
#[must_use]
pub fn output_extension(extension: &str) -> String {
    let ext = extension.trim_start_matches('.').to_uppercase();
    match ext.as_str() {
        "" => String::new(),
        "JPEG" => ".JPG".to_string(),
        _ => format!(".{ext}"),
    }
}

#[must_use]
pub fn format_name(
    mode: NamingMode,
    kind: MediaKind,
    counter: u32,
    original_name: &str,
    timestamp: Option<NaiveDateTime>,
) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match mode {
        NamingMode::Sequential => {
            format!("{}_{counter:04}{}", kind.prefix(), output_extension(extension))
        }
        NamingMode::Timestamped => {
            let timestamp = timestamp.unwrap_or_else(|| Local::now().naive_local());
            format!(
                "{}_{}{}",
                kind.prefix(),
                timestamp.format("%Y%m%d_%H%M%S"),
                output_extension(extension)
            )
        }
        NamingMode::Original => original_name.to_string(),
    }
}

/// Insert `_<n>` between stem and extension.
fn with_suffix(file_name: &str, n: u32) -> String {
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            format!("{}_{n}.{}", stem.to_string_lossy(), ext.to_string_lossy())
        }
        _ => format!("{file_name}_{n}"),
    }
}

#[derive(Debug)]
pub struct NameGenerator {
    mode: NamingMode,
    counters: KindCounters,
    reserved: HashSet<PathBuf>,
}

impl NameGenerator {
    #[must_use]
    pub fn new(mode: NamingMode) -> Self {
        Self {
            mode,
            counters: KindCounters::default(),
            reserved: HashSet::new(),
        }
    }

    /// Name for the next entry; advances the entry kind's counter.
    pub fn next_name(&mut self, entry: &MediaEntry) -> String {
        let counter = self.counters.next(entry.kind);
        let original_name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let timestamp = entry
            .modified
            .map(|time| DateTime::<Local>::from(time).naive_local());

        format_name(self.mode, entry.kind, counter, &original_name, timestamp)
    }

    /// Reserve a free path for `file_name` inside `directory`.
    ///
    /// `replaces` is the file this one will overwrite in place; it counts as
    /// free even though it exists.
    pub fn reserve(
        &mut self,
        directory: &Path,
        file_name: &str,
        replaces: Option<&Path>,
    ) -> Result<PathBuf, CleanError> {
        let candidate = directory.join(file_name);
        if self.is_free(&candidate, replaces) {
            self.reserved.insert(candidate.clone());
            return Ok(candidate);
        }

        for n in 1..MAX_COLLISION_ATTEMPTS {
            let candidate = directory.join(with_suffix(file_name, n));
            if self.is_free(&candidate, replaces) {
                self.reserved.insert(candidate.clone());
                return Ok(candidate);
            }
        }

        Err(CleanError::NameExhausted(file_name.to_string()))
    }

    fn is_free(&self, candidate: &Path, replaces: Option<&Path>) -> bool {
        if self.reserved.contains(candidate) {
            return false;
        }
        replaces == Some(candidate) || !candidate.exists()
    }
}
