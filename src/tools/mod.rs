mod exiftool_command;
mod ffmpeg_command;
mod file_scanner;
mod path_validator;
pub mod platform;
mod tool_locator;
mod tool_runner;

pub use exiftool_command::ExiftoolCommand;
pub use ffmpeg_command::{FfmpegCommand, FfmpegMode};
pub use file_scanner::{MediaEntry, STAGING_PREFIX, collect_media};
pub use path_validator::{ensure_directory_exists, validate_directory_exists, validate_output_dir};
pub use platform::{Platform, current_platform};
pub use tool_locator::{EXIFTOOL, FFMPEG, Toolset, default_bundled_dir, locate_tool};
pub use tool_runner::run_tool;
