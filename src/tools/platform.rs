//! Per-OS behaviour behind one trait, chosen once at startup.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

pub trait Platform: Send + Sync {
    fn name(&self) -> &'static str;

    /// File names a bundled tool may have, in lookup order.
    fn executable_candidates(&self, tool: &str) -> Vec<String> {
        vec![tool.to_string()]
    }

    /// Adjust a tool command before it is spawned.
    fn prepare_command(&self, _cmd: &mut Command) {}

    fn clear_extended_attributes(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn open_folder(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

#[derive(Debug, Clone, Copy, Default)]
pub struct MacPlatform;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnixPlatform;

impl Platform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn executable_candidates(&self, tool: &str) -> Vec<String> {
        vec![format!("{tool}.exe"), tool.to_string()]
    }

    fn prepare_command(&self, cmd: &mut Command) {
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
        #[cfg(not(windows))]
        let _ = cmd;
    }

    fn open_folder(&self, path: &Path) -> Result<()> {
        spawn_detached("explorer", path)
    }
}

impl Platform for MacPlatform {
    fn name(&self) -> &'static str {
        "macos"
    }

    /// Drops quarantine and Finder tags inherited from the source file
    fn clear_extended_attributes(&self, path: &Path) -> Result<()> {
        let output = Command::new("xattr")
            .arg("-c")
            .arg(path)
            .output()
            .context("Failed to run xattr")?;
        if !output.status.success() {
            bail!(
                "xattr -c failed on {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    fn open_folder(&self, path: &Path) -> Result<()> {
        spawn_detached("open", path)
    }
}

impl Platform for UnixPlatform {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn open_folder(&self, path: &Path) -> Result<()> {
        spawn_detached("xdg-open", path)
    }
}

fn spawn_detached(program: &str, path: &Path) -> Result<()> {
    Command::new(program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {program}"))?;
    Ok(())
}

#[must_use]
pub fn current_platform() -> &'static dyn Platform {
    if cfg!(windows) {
        &WindowsPlatform
    } else if cfg!(target_os = "macos") {
        &MacPlatform
    } else {
        &UnixPlatform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_prefers_exe_name() {
        assert_eq!(
            WindowsPlatform.executable_candidates("ffmpeg"),
            ["ffmpeg.exe", "ffmpeg"]
        );
    }

    #[test]
    fn test_unix_uses_plain_name() {
        assert_eq!(UnixPlatform.executable_candidates("exiftool"), ["exiftool"]);
        assert!(
            UnixPlatform
                .clear_extended_attributes(Path::new("/nowhere"))
                .is_ok()
        );
    }

    #[test]
    fn test_current_platform_matches_target() {
        let platform = current_platform();
        if cfg!(windows) {
            assert_eq!(platform.name(), "windows");
        } else if cfg!(target_os = "macos") {
            assert_eq!(platform.name(), "macos");
        } else {
            assert_eq!(platform.name(), "unix");
        }
    }
}
