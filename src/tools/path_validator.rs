use crate::error::CleanError;
use std::path::{Component, Path, PathBuf};

pub fn validate_directory_exists(path: &Path) -> Result<(), CleanError> {
    if !path.exists() {
        return Err(CleanError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CleanError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// The output folder must not be the input folder or one of its parents,
/// otherwise cleaned files end up back in the scanned tree.
pub fn validate_output_dir(input_dir: &Path, output_dir: &Path) -> Result<(), CleanError> {
    let mut covers_input = normalize_path(input_dir).starts_with(normalize_path(output_dir));

    // Symlinks only show up once both sides exist
    if let (Ok(input), Ok(output)) = (input_dir.canonicalize(), output_dir.canonicalize()) {
        covers_input |= input.starts_with(output);
    }

    if covers_input {
        return Err(CleanError::OutputCoversInput {
            output: output_dir.to_path_buf(),
            input: input_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

pub fn ensure_directory_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_directory_exists() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_directory_exists(temp_dir.path()).is_ok());

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            validate_directory_exists(&missing),
            Err(CleanError::InputNotFound(_))
        ));

        let file = temp_dir.path().join("file.jpg");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            validate_directory_exists(&file),
            Err(CleanError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_output_dir_must_not_cover_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("photos");
        std::fs::create_dir(&input).unwrap();

        for folder in [".", "sub/..", "..", "./"] {
            assert!(
                matches!(
                    validate_output_dir(&input, &input.join(folder)),
                    Err(CleanError::OutputCoversInput { .. })
                ),
                "{folder} should be rejected"
            );
        }

        assert!(validate_output_dir(&input, &input.join("NiClean_cleaned")).is_ok());
        assert!(validate_output_dir(&input, &input.join("a/../clean")).is_ok());
        assert!(validate_output_dir(&input, &temp_dir.path().join("elsewhere")).is_ok());
    }

    #[test]
    fn test_relative_input_is_compared_as_absolute() {
        assert!(validate_output_dir(Path::new("photos"), Path::new("photos/..")).is_err());
        assert!(validate_output_dir(Path::new("photos"), Path::new("photos/out")).is_ok());
    }

    #[test]
    fn test_normalize_path_resolves_dots() {
        let normalized = normalize_path(Path::new("/a/b/./c/../d"));
        assert_eq!(normalized, std::path::absolute("/a/b/d").unwrap());
    }

    #[test]
    fn test_ensure_directory_exists_creates_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/c");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_directory_exists(&nested).unwrap();
    }
}
