use crate::config::types::{CONFIG_FILE_NAMES, SettingsLayer};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Values accepted as `true`; anything else is `false`.
const TRUE_VALUES: &[&str] = &["1", "true", "yes", "y", "on"];

#[must_use]
pub fn parse_bool(value: &str) -> bool {
    TRUE_VALUES.contains(&value.trim().to_lowercase().as_str())
}

/// Parse `key = value` lines into a settings layer.
///
/// Blank lines, `#`/`;` comments and lines without `=` are skipped. Keys are
/// case-insensitive; unknown keys and unparsable values are logged and ignored.
#[must_use]
pub fn parse_config(content: &str) -> SettingsLayer {
    let mut layer = SettingsLayer::default();

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match key.as_str() {
            "naming" => match value.parse() {
                Ok(naming) => layer.naming = Some(naming),
                Err(e) => warn!("Ignoring config value: {e}"),
            },
            "output_mode" => match value.parse() {
                Ok(mode) => layer.output_mode = Some(mode),
                Err(e) => warn!("Ignoring config value: {e}"),
            },
            "output_folder" => layer.output_folder = Some(value.to_string()),
            "include_subfolders" => layer.include_subfolders = Some(parse_bool(value)),
            "dry_run" => layer.dry_run = Some(parse_bool(value)),
            "keep_timestamps" => layer.keep_timestamps = Some(parse_bool(value)),
            "strict_tools" => layer.strict_tools = Some(parse_bool(value)),
            "reencode_fallback" => layer.reencode_fallback = Some(parse_bool(value)),
            _ => warn!("Unknown config key: {key}"),
        }
    }

    layer
}

pub fn load_config_file(path: &Path) -> Result<SettingsLayer> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(parse_config(&String::from_utf8_lossy(&bytes)))
}

/// First known config file found in `search_dirs`, in order.
#[must_use]
pub fn find_config_file(search_dirs: &[&Path]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Load the config layer for a run. An explicit path must be readable; a
/// discovered file that cannot be read only produces a warning.
pub fn load_layer(explicit: Option<&Path>, search_dirs: &[&Path]) -> Result<SettingsLayer> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let Some(path) = find_config_file(search_dirs) else {
        return Ok(SettingsLayer::default());
    };

    match load_config_file(&path) {
        Ok(layer) => Ok(layer),
        Err(e) => {
            warn!("{e:#}");
            Ok(SettingsLayer::default())
        }
    }
}
