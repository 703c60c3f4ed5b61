//! Media cleaner
//!
//! Copies photos and videos, strips their metadata and renames them the way a
//! phone camera would.

mod main;
mod name_generator;
mod output_strategy;
mod progress;
mod report;

pub use main::MediaCleaner;
pub use name_generator::{NameGenerator, format_name, output_extension};
pub use output_strategy::{InPlaceOutput, OutputStrategy, SubfolderOutput, strategy_for};
pub use progress::{ChannelProgress, NoProgress, ProgressBarSink, ProgressEvent, ProgressSink};
pub use report::{EntryReport, EntryStatus, RunResult};
