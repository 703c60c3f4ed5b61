use crate::tools::platform::Platform;
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const EXIFTOOL: &str = "exiftool";
pub const FFMPEG: &str = "ffmpeg";

/// Find `tool` in `bundled_dir` first, then on `PATH`.
#[must_use]
pub fn locate_tool(tool: &str, bundled_dir: Option<&Path>, platform: &dyn Platform) -> Option<PathBuf> {
    if let Some(dir) = bundled_dir {
        for candidate in platform.executable_candidates(tool) {
            let path = dir.join(candidate);
            if is_executable(&path) {
                debug!("Using bundled {tool}: {}", path.display());
                return Some(path);
            }
        }
    }

    match which::which(tool) {
        Ok(path) => {
            debug!("Using {tool} from PATH: {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Default bundled tools folder: `tools/` next to the executable.
#[must_use]
pub fn default_bundled_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("tools")))
}

/// External tools available for this run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolset {
    pub exiftool: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
}

impl Toolset {
    #[must_use]
    pub fn discover(bundled_dir: Option<&Path>, platform: &dyn Platform) -> Self {
        let toolset = Self {
            exiftool: locate_tool(EXIFTOOL, bundled_dir, platform),
            ffmpeg: locate_tool(FFMPEG, bundled_dir, platform),
        };
        info!(
            "Tools - exiftool: {}, ffmpeg: {}",
            display_tool(toolset.exiftool.as_deref()),
            display_tool(toolset.ffmpeg.as_deref())
        );
        toolset
    }

    /// A toolset with nothing available; files are only copied and renamed.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            exiftool: None,
            ffmpeg: None,
        }
    }

    #[must_use]
    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.exiftool.is_none() {
            missing.push(format!("{EXIFTOOL} (images)"));
        }
        if self.ffmpeg.is_none() {
            missing.push(format!("{FFMPEG} (videos)"));
        }
        missing
    }
}

fn display_tool(path: Option<&Path>) -> String {
    path.map_or_else(|| "not found".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::platform::UnixPlatform;
    use tempfile::TempDir;

    #[test]
    fn test_missing_lists_absent_tools() {
        assert_eq!(
            Toolset::none().missing(),
            ["exiftool (images)", "ffmpeg (videos)"]
        );

        let toolset = Toolset {
            exiftool: Some(PathBuf::from("/usr/bin/exiftool")),
            ffmpeg: None,
        };
        assert_eq!(toolset.missing(), ["ffmpeg (videos)"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_bundled_tool_wins() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let tool = temp_dir.path().join("niclean-test-tool");
        std::fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let found = locate_tool("niclean-test-tool", Some(temp_dir.path()), &UnixPlatform);
        assert_eq!(found, Some(tool));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_bundled_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("niclean-no-exec"), "data").unwrap();

        let found = locate_tool("niclean-no-exec", Some(temp_dir.path()), &UnixPlatform);
        assert_eq!(found, None);
    }

    #[test]
    fn test_unknown_tool_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let found = locate_tool(
            "niclean-definitely-not-installed",
            Some(temp_dir.path()),
            &UnixPlatform,
        );
        assert!(found.is_none());
    }
}
