use crate::config::{OutputMode, Settings};
use crate::error::CleanError;
use crate::tools::{MediaEntry, ensure_directory_exists, validate_output_dir};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// Where finished files go and how they are moved into place.
pub trait OutputStrategy: Send + Sync {
    /// Output location reported to the user
    fn output_root(&self) -> &Path;

    /// Folder to exclude from scanning, if any
    fn excluded_dir(&self) -> Option<&Path>;

    fn target_dir(&self, entry: &MediaEntry) -> PathBuf;

    /// Whether the destination may take the place of the source file
    fn replaces_source(&self) -> bool;

    fn prepare(&self) -> std::io::Result<()>;

    /// Move a finished staged file to `destination`.
    fn commit(&self, staged: &Path, destination: &Path, source: &Path) -> Result<()>;
}

/// Cleaned copies collected in one folder; sources are left alone.
#[derive(Debug, Clone)]
pub struct SubfolderOutput {
    output_dir: PathBuf,
}

impl SubfolderOutput {
    #[must_use]
    pub const fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl OutputStrategy for SubfolderOutput {
    fn output_root(&self) -> &Path {
        &self.output_dir
    }

    fn excluded_dir(&self) -> Option<&Path> {
        Some(&self.output_dir)
    }

    fn target_dir(&self, _entry: &MediaEntry) -> PathBuf {
        self.output_dir.clone()
    }

    fn replaces_source(&self) -> bool {
        false
    }

    fn prepare(&self) -> std::io::Result<()> {
        ensure_directory_exists(&self.output_dir)
    }

    fn commit(&self, staged: &Path, destination: &Path, _source: &Path) -> Result<()> {
        fs::rename(staged, destination)
            .with_context(|| format!("Failed to move into {}", destination.display()))
    }
}

/// Each cleaned file replaces its original in the original's folder.
///
/// The original is only touched once the cleaned file is complete: the staged
/// file is renamed onto the destination and, if the name changed, the original
/// is removed afterwards.
#[derive(Debug, Clone)]
pub struct InPlaceOutput {
    input_dir: PathBuf,
}

impl InPlaceOutput {
    #[must_use]
    pub const fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }
}

impl OutputStrategy for InPlaceOutput {
    fn output_root(&self) -> &Path {
        &self.input_dir
    }

    fn excluded_dir(&self) -> Option<&Path> {
        None
    }

    fn target_dir(&self, entry: &MediaEntry) -> PathBuf {
        entry
            .path
            .parent()
            .map_or_else(|| self.input_dir.clone(), Path::to_path_buf)
    }

    fn replaces_source(&self) -> bool {
        true
    }

    fn prepare(&self) -> std::io::Result<()> {
        Ok(())
    }

    fn commit(&self, staged: &Path, destination: &Path, source: &Path) -> Result<()> {
        fs::rename(staged, destination)
            .with_context(|| format!("Failed to replace {}", destination.display()))?;

        if destination != source {
            if let Err(e) = fs::remove_file(source) {
                warn!(
                    "Cleaned copy written to {} but original {} could not be removed: {e}",
                    destination.display(),
                    source.display()
                );
            }
        }
        Ok(())
    }
}

/// `output_folder` may be relative to the input folder or absolute.
pub fn strategy_for(
    settings: &Settings,
    input_dir: &Path,
) -> Result<Box<dyn OutputStrategy>, CleanError> {
    match settings.output_mode {
        OutputMode::Subfolder => {
            let output_dir = input_dir.join(&settings.output_folder);
            validate_output_dir(input_dir, &output_dir)?;
            Ok(Box::new(SubfolderOutput::new(output_dir)))
        }
        OutputMode::InPlace => Ok(Box::new(InPlaceOutput::new(input_dir.to_path_buf()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaKind;
    use tempfile::TempDir;

    fn entry(path: PathBuf) -> MediaEntry {
        MediaEntry {
            path,
            kind: MediaKind::Image,
            modified: None,
        }
    }

    #[test]
    fn test_strategy_for_modes() {
        let input = Path::new("/photos");
        let mut settings = Settings::default();

        let subfolder = strategy_for(&settings, input).unwrap();
        assert_eq!(subfolder.output_root(), Path::new("/photos/NiClean_cleaned"));
        assert_eq!(
            subfolder.target_dir(&entry(PathBuf::from("/photos/trip/a.jpg"))),
            PathBuf::from("/photos/NiClean_cleaned")
        );
        assert!(!subfolder.replaces_source());

        settings.output_mode = OutputMode::InPlace;
        let in_place = strategy_for(&settings, input).unwrap();
        assert_eq!(in_place.output_root(), input);
        assert!(in_place.excluded_dir().is_none());
        assert_eq!(
            in_place.target_dir(&entry(PathBuf::from("/photos/trip/a.jpg"))),
            PathBuf::from("/photos/trip")
        );
    }

    #[test]
    fn test_strategy_for_rejects_output_covering_input() {
        let input = Path::new("/photos");
        for folder in [".", "trip/..", ".."] {
            let settings = Settings {
                output_folder: folder.to_string(),
                ..Settings::default()
            };
            assert!(matches!(
                strategy_for(&settings, input),
                Err(CleanError::OutputCoversInput { .. })
            ));
        }

        let absolute = Settings {
            output_folder: "/exports/clean".to_string(),
            ..Settings::default()
        };
        let strategy = strategy_for(&absolute, input).unwrap();
        assert_eq!(strategy.output_root(), Path::new("/exports/clean"));

        let in_place = Settings {
            output_mode: OutputMode::InPlace,
            output_folder: ".".to_string(),
            ..Settings::default()
        };
        assert!(strategy_for(&in_place, input).is_ok());
    }

    #[test]
    fn test_in_place_commit_removes_renamed_original() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let source = dir.join("holiday.jpg");
        let staged = dir.join("staged.jpg");
        let destination = dir.join("IMG_0001.JPG");
        fs::write(&source, b"original").unwrap();
        fs::write(&staged, b"cleaned").unwrap();

        InPlaceOutput::new(dir.to_path_buf())
            .commit(&staged, &destination, &source)
            .unwrap();

        assert!(!source.exists());
        assert!(!staged.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"cleaned");
    }

    #[test]
    fn test_in_place_commit_over_same_name() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let source = dir.join("IMG_0001.JPG");
        let staged = dir.join("staged.jpg");
        fs::write(&source, b"original").unwrap();
        fs::write(&staged, b"cleaned").unwrap();

        InPlaceOutput::new(dir.to_path_buf())
            .commit(&staged, &source, &source)
            .unwrap();

        assert_eq!(fs::read(&source).unwrap(), b"cleaned");
    }

    #[test]
    fn test_subfolder_prepare_creates_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out");
        SubfolderOutput::new(output.clone()).prepare().unwrap();
        assert!(output.is_dir());
    }
}
