use std::path::{Path, PathBuf};
use std::process::Command;

/// Removes every writable tag from a file in place.
pub struct ExiftoolCommand {
    program: PathBuf,
    target_path: PathBuf,
}

impl ExiftoolCommand {
    #[must_use]
    pub fn strip_all(program: &Path, target_path: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            target_path: target_path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        // -P keeps the file modification date
        cmd.args(["-all=", "-overwrite_original", "-P"]);
        cmd.arg(&self.target_path);
        cmd
    }
}
