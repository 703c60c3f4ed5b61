//! Cleaning pipeline
//!
//! For each collected file: assign a name, stage a copy (or remux) next to the
//! destination, strip metadata, restore timestamps, clear extended attributes,
//! then move the finished file into place.

use super::name_generator::NameGenerator;
use super::output_strategy::{OutputStrategy, strategy_for};
use super::progress::ProgressSink;
use super::report::{EntryReport, EntryStatus, RunResult};
use crate::config::{MediaKind, Settings};
use crate::error::CleanError;
use crate::tools::{
    EXIFTOOL, ExiftoolCommand, FFMPEG, FfmpegCommand, MediaEntry, Platform, STAGING_PREFIX,
    Toolset, collect_media, run_tool, validate_directory_exists,
};
use anyhow::{Context, Result, bail};
use filetime::FileTime;
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub struct MediaCleaner {
    settings: Settings,
    toolset: Toolset,
    platform: &'static dyn Platform,
}

impl MediaCleaner {
    #[must_use]
    pub const fn new(settings: Settings, toolset: Toolset, platform: &'static dyn Platform) -> Self {
        Self {
            settings,
            toolset,
            platform,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn toolset(&self) -> &Toolset {
        &self.toolset
    }

    /// Clean every media file under `input_dir`.
    ///
    /// Setup problems (missing input, missing tools in strict mode, unusable
    /// output folder) abort before any file is touched. Per-file problems are
    /// recorded in the result and the run continues.
    pub fn run(&self, input_dir: &Path, progress: &dyn ProgressSink) -> Result<RunResult, CleanError> {
        validate_directory_exists(input_dir)?;

        let missing = self.toolset.missing();
        if !missing.is_empty() {
            warn!(
                "Missing tools: {}. Files are still copied and renamed, but metadata stripping is skipped for those types.",
                missing.join(", ")
            );
            if self.settings.strict_tools {
                return Err(CleanError::MissingTools(missing));
            }
        }

        let strategy = strategy_for(&self.settings, input_dir)?;
        let mut result = RunResult::new(
            strategy.output_root().to_path_buf(),
            self.settings.dry_run,
        );

        let entries = collect_media(
            input_dir,
            self.settings.include_subfolders,
            strategy.excluded_dir(),
        );
        if entries.is_empty() {
            info!("No media files found in {}", input_dir.display());
            progress.on_start(0);
            progress.on_finish(&result);
            return Ok(result);
        }
        info!("Found {} media files in {}", entries.len(), input_dir.display());

        if !self.settings.dry_run {
            strategy
                .prepare()
                .map_err(|source| CleanError::OutputUnavailable {
                    path: strategy.output_root().to_path_buf(),
                    source,
                })?;
        }

        progress.on_start(entries.len());
        let mut names = NameGenerator::new(self.settings.naming);

        for entry in &entries {
            let report = self.process_entry(entry, &mut names, strategy.as_ref());
            progress.on_entry(&report);
            result.record(report);
        }

        info!(
            "Done - processed: {}, scrubbed: {}, failed: {}",
            result.processed, result.scrubbed, result.failed
        );
        progress.on_finish(&result);
        Ok(result)
    }

    fn process_entry(
        &self,
        entry: &MediaEntry,
        names: &mut NameGenerator,
        strategy: &dyn OutputStrategy,
    ) -> EntryReport {
        let file_name = names.next_name(entry);
        let replaces = strategy.replaces_source().then_some(entry.path.as_path());
        let destination = match names.reserve(&strategy.target_dir(entry), &file_name, replaces) {
            Ok(destination) => destination,
            Err(e) => {
                warn!("{}: {e}", entry.path.display());
                return EntryReport::failed(entry.path.clone(), e.to_string());
            }
        };

        if self.settings.dry_run {
            info!("[DRY] {} -> {}", entry.path.display(), destination.display());
            return EntryReport {
                source: entry.path.clone(),
                destination: Some(destination),
                status: EntryStatus::Planned,
                message: None,
            };
        }

        match self.write_entry(entry, &destination, strategy) {
            Ok(scrubbed) => {
                debug!("{} -> {}", entry.path.display(), destination.display());
                EntryReport {
                    source: entry.path.clone(),
                    destination: Some(destination),
                    status: if scrubbed {
                        EntryStatus::Cleaned
                    } else {
                        EntryStatus::Unscrubbed
                    },
                    message: None,
                }
            }
            Err(e) => {
                warn!("Skipping {}: {e:#}", entry.path.display());
                EntryReport::failed(entry.path.clone(), format!("{e:#}"))
            }
        }
    }

    /// Returns whether metadata was stripped.
    fn write_entry(
        &self,
        entry: &MediaEntry,
        destination: &Path,
        strategy: &dyn OutputStrategy,
    ) -> Result<bool> {
        let target_dir = destination
            .parent()
            .context("Destination has no parent folder")?;
        let file_name = destination
            .file_name()
            .context("Destination has no file name")?;

        // Removed on drop, whatever happens below
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(target_dir)
            .with_context(|| format!("Failed to create staging folder in {}", target_dir.display()))?;
        let staged = staging.path().join(file_name);

        let scrubbed = match entry.kind {
            MediaKind::Image => self.stage_image(&entry.path, &staged)?,
            MediaKind::Video => self.stage_video(&entry.path, &staged)?,
            MediaKind::Other => bail!("Not a media file"),
        };

        if self.settings.keep_timestamps {
            if let Err(e) = restore_timestamps(&entry.path, &staged) {
                warn!("{}: {e:#}", entry.path.display());
            }
        }

        if let Err(e) = self.platform.clear_extended_attributes(&staged) {
            warn!("{}: {e:#}", entry.path.display());
        }

        strategy.commit(&staged, destination, &entry.path)?;
        Ok(scrubbed)
    }

    fn stage_image(&self, source: &Path, staged: &Path) -> Result<bool> {
        fs::copy(source, staged)
            .with_context(|| format!("Failed to copy {}", source.display()))?;

        let Some(exiftool) = &self.toolset.exiftool else {
            return Ok(false);
        };

        let cmd = ExiftoolCommand::strip_all(exiftool, staged).build_command();
        match run_tool(EXIFTOOL, cmd, self.platform) {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("{}: {e}", source.display());
                Ok(false)
            }
        }
    }

    fn stage_video(&self, source: &Path, staged: &Path) -> Result<bool> {
        let Some(ffmpeg) = &self.toolset.ffmpeg else {
            fs::copy(source, staged)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
            return Ok(false);
        };

        let remux = FfmpegCommand::remux(ffmpeg, source, staged).build_command();
        let remux_error = match run_tool(FFMPEG, remux, self.platform) {
            Ok(_) => return Ok(true),
            Err(e) => e,
        };

        if !self.settings.reencode_fallback {
            return Err(remux_error).context("Metadata removal failed");
        }

        warn!(
            "{}: remux failed ({remux_error}), re-encoding",
            source.display()
        );
        if let Err(e) = fs::remove_file(staged) {
            if e.kind() != ErrorKind::NotFound {
                debug!("Could not remove partial {}: {e}", staged.display());
            }
        }
        let reencode = FfmpegCommand::reencode(ffmpeg, source, staged).build_command();
        run_tool(FFMPEG, reencode, self.platform).context("Re-encode failed")?;
        Ok(true)
    }
}

fn restore_timestamps(source: &Path, staged: &Path) -> Result<()> {
    let metadata = fs::metadata(source)
        .with_context(|| format!("Failed to read timestamps of {}", source.display()))?;
    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(staged, accessed, modified)
        .with_context(|| format!("Failed to set timestamps on {}", staged.display()))
}
