use crate::component::MediaCleaner;
use crate::component::media_cleaner::{ChannelProgress, ProgressBarSink, RunResult};
use crate::error::CleanError;
use anyhow::{Result, anyhow};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Run the cleaner on a worker thread while this thread drives the progress bar.
///
/// The outer error means the worker itself died; the inner one is the run's
/// own outcome.
pub fn run_with_progress(
    cleaner: MediaCleaner,
    input_dir: PathBuf,
) -> Result<Result<RunResult, CleanError>> {
    let (sender, receiver) = mpsc::channel();

    let worker = thread::spawn(move || {
        let progress = ChannelProgress::new(sender);
        cleaner.run(&input_dir, &progress)
    });

    let progress_bar = ProgressBarSink::new();
    for event in receiver {
        progress_bar.apply(&event);
    }
    progress_bar.finish();

    worker
        .join()
        .map_err(|_| anyhow!("cleaning thread stopped unexpectedly"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::tools::Toolset;
    use crate::tools::platform::UnixPlatform;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_worker_result_reaches_caller() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.jpg"), b"jpeg").unwrap();
        fs::write(temp_dir.path().join("b.mp4"), b"mp4").unwrap();

        let cleaner = MediaCleaner::new(Settings::default(), Toolset::none(), &UnixPlatform);
        let result = run_with_progress(cleaner, temp_dir.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(result.processed, 2);
        assert!(temp_dir.path().join("NiClean_cleaned/VID_0001.MP4").exists());
    }

    #[test]
    fn test_setup_error_is_returned_not_panicked() {
        let temp_dir = TempDir::new().unwrap();
        let cleaner = MediaCleaner::new(Settings::default(), Toolset::none(), &UnixPlatform);

        let outcome = run_with_progress(cleaner, temp_dir.path().join("missing")).unwrap();
        assert!(matches!(outcome, Err(CleanError::InputNotFound(_))));
    }
}
