//! Progress reporting for the cleaning loop
//!
//! The driver only talks to [`ProgressSink`]. On the command line the sink is
//! a progress bar; in interactive mode the worker thread forwards events over
//! a channel and the main thread owns the bar.

use super::report::{EntryReport, EntryStatus, RunResult};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc::Sender;

pub trait ProgressSink {
    fn on_start(&self, total: usize);
    fn on_entry(&self, report: &EntryReport);
    fn on_finish(&self, result: &RunResult);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_start(&self, _total: usize) {}
    fn on_entry(&self, _report: &EntryReport) {}
    fn on_finish(&self, _result: &RunResult) {}
}

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started { total: usize },
    Entry(EntryReport),
}

/// Forwards events to another thread
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    #[must_use]
    pub const fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgress {
    fn on_start(&self, total: usize) {
        // Receiver gone means nobody is watching; the run itself continues
        let _ = self.sender.send(ProgressEvent::Started { total });
    }

    fn on_entry(&self, report: &EntryReport) {
        let _ = self.sender.send(ProgressEvent::Entry(report.clone()));
    }

    fn on_finish(&self, _result: &RunResult) {}
}

pub struct ProgressBarSink {
    progress_bar: ProgressBar,
}

impl Default for ProgressBarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarSink {
    #[must_use]
    pub fn new() -> Self {
        let progress_bar = ProgressBar::new(0);
        if let Ok(template) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        ) {
            progress_bar.set_style(template.progress_chars("#>-"));
        }
        Self { progress_bar }
    }

    /// Apply an event received from a worker thread
    pub fn apply(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => self.on_start(*total),
            ProgressEvent::Entry(report) => self.on_entry(report),
        }
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }

    /// A hidden bar (no terminal) swallows `println`, so write straight to stdout.
    fn print_line(&self, line: &str) {
        if self.progress_bar.is_hidden() {
            println!("{line}");
        } else {
            self.progress_bar.println(line);
        }
    }
}

impl ProgressSink for ProgressBarSink {
    fn on_start(&self, total: usize) {
        self.progress_bar.set_length(total as u64);
        self.progress_bar.set_message("cleaning...");
    }

    fn on_entry(&self, report: &EntryReport) {
        let source = display_name(&report.source);
        let destination = report
            .destination
            .as_deref()
            .map(display_name)
            .unwrap_or_default();

        let line = match report.status {
            EntryStatus::Planned => Some(format!("{} {source} -> {destination}", style("[DRY]").cyan())),
            EntryStatus::Unscrubbed => Some(format!(
                "{} {source} -> {destination} (metadata kept)",
                style("[WARN]").yellow()
            )),
            EntryStatus::Failed => Some(format!(
                "{} {source}: {}",
                style("[FAIL]").red(),
                report.message.as_deref().unwrap_or("unknown error")
            )),
            EntryStatus::Cleaned => None,
        };
        if let Some(line) = line {
            self.print_line(&line);
        }

        self.progress_bar.set_message(source);
        self.progress_bar.inc(1);
    }

    fn on_finish(&self, _result: &RunResult) {
        self.finish();
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::mpsc;

    #[test]
    fn test_channel_progress_forwards_events() {
        let (sender, receiver) = mpsc::channel();
        let sink = ChannelProgress::new(sender);

        sink.on_start(2);
        sink.on_entry(&EntryReport::failed(PathBuf::from("a.mov"), "boom".into()));
        drop(sink);

        let events: Vec<ProgressEvent> = receiver.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ProgressEvent::Started { total: 2 }));
        assert!(matches!(
            &events[1],
            ProgressEvent::Entry(report) if report.status == EntryStatus::Failed
        ));
    }

    #[test]
    fn test_channel_progress_survives_dropped_receiver() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);
        let sink = ChannelProgress::new(sender);
        sink.on_start(1);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(std::path::Path::new("/a/b/IMG_0001.JPG")), "IMG_0001.JPG");
    }
}
