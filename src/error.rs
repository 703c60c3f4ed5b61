use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Run-level failures that decide the process exit code.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("input folder not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("input path is not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("required tools are missing: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("cannot create output folder {}: {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "output folder {} is the input folder {} or one of its parents",
        .output.display(),
        .input.display()
    )]
    OutputCoversInput { output: PathBuf, input: PathBuf },

    #[error("could not find a free file name for {0}")]
    NameExhausted(String),
}

impl CleanError {
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_)
            | Self::NotADirectory(_)
            | Self::OutputUnavailable { .. }
            | Self::OutputCoversInput { .. } => 2,
            Self::MissingTools(_) => 3,
            Self::NameExhausted(_) => 1,
        }
    }
}

/// Failure of a single external tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {message}")]
    Failed {
        tool: String,
        status: ExitStatus,
        message: String,
    },
}
