use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_OUTPUT_FOLDER: &str = "NiClean_cleaned";

/// Config file names searched for, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["niclean.conf", "NiClean.conf", "mediacleaner.conf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// iPhone style: IMG_0001.JPG
    #[default]
    Sequential,
    /// Android style: IMG_20240101_120000.JPG
    Timestamped,
    /// Keep the source file name
    Original,
}

impl FromStr for NamingMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sequential" | "iphone" => Ok(Self::Sequential),
            "timestamped" | "android" => Ok(Self::Timestamped),
            "original" => Ok(Self::Original),
            other => Err(format!("unknown naming mode: {other}")),
        }
    }
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Timestamped => write!(f, "timestamped"),
            Self::Original => write!(f, "original"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Write cleaned copies into a subfolder of the input
    #[default]
    Subfolder,
    /// Replace each original in its own folder
    InPlace,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "subfolder" => Ok(Self::Subfolder),
            "in-place" | "in_place" | "inplace" | "replace" => Ok(Self::InPlace),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subfolder => write!(f, "subfolder"),
            Self::InPlace => write!(f, "in-place"),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub naming: NamingMode,
    pub output_mode: OutputMode,
    pub output_folder: String,
    pub include_subfolders: bool,
    pub dry_run: bool,
    pub keep_timestamps: bool,
    pub strict_tools: bool,
    pub reencode_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            naming: NamingMode::default(),
            output_mode: OutputMode::default(),
            output_folder: DEFAULT_OUTPUT_FOLDER.to_string(),
            include_subfolders: false,
            dry_run: false,
            keep_timestamps: true,
            strict_tools: false,
            reencode_fallback: false,
        }
    }
}

/// One source of settings (config file, command line). `None` leaves the
/// value of the layer below untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsLayer {
    pub naming: Option<NamingMode>,
    pub output_mode: Option<OutputMode>,
    pub output_folder: Option<String>,
    pub include_subfolders: Option<bool>,
    pub dry_run: Option<bool>,
    pub keep_timestamps: Option<bool>,
    pub strict_tools: Option<bool>,
    pub reencode_fallback: Option<bool>,
}

impl Settings {
    /// Apply layers on top of the defaults; later layers win.
    #[must_use]
    pub fn resolve(layers: &[&SettingsLayer]) -> Self {
        layers
            .iter()
            .fold(Self::default(), |settings, layer| settings.merged(layer))
    }

    #[must_use]
    pub fn merged(mut self, layer: &SettingsLayer) -> Self {
        if let Some(naming) = layer.naming {
            self.naming = naming;
        }
        if let Some(output_mode) = layer.output_mode {
            self.output_mode = output_mode;
        }
        if let Some(folder) = layer.output_folder.as_deref().map(str::trim) {
            if !folder.is_empty() {
                self.output_folder = folder.to_string();
            }
        }
        if let Some(value) = layer.include_subfolders {
            self.include_subfolders = value;
        }
        if let Some(value) = layer.dry_run {
            self.dry_run = value;
        }
        if let Some(value) = layer.keep_timestamps {
            self.keep_timestamps = value;
        }
        if let Some(value) = layer.strict_tools {
            self.strict_tools = value;
        }
        if let Some(value) = layer.reencode_fallback {
            self.reencode_fallback = value;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_mode_aliases() {
        assert_eq!("iphone".parse::<NamingMode>(), Ok(NamingMode::Sequential));
        assert_eq!("Android".parse::<NamingMode>(), Ok(NamingMode::Timestamped));
        assert_eq!(" original ".parse::<NamingMode>(), Ok(NamingMode::Original));
        assert!("nokia".parse::<NamingMode>().is_err());
    }

    #[test]
    fn test_output_mode_aliases() {
        assert_eq!("replace".parse::<OutputMode>(), Ok(OutputMode::InPlace));
        assert_eq!("in_place".parse::<OutputMode>(), Ok(OutputMode::InPlace));
        assert_eq!("Subfolder".parse::<OutputMode>(), Ok(OutputMode::Subfolder));
        assert!("elsewhere".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_resolve_without_layers_gives_defaults() {
        let settings = Settings::resolve(&[]);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output_folder, DEFAULT_OUTPUT_FOLDER);
        assert!(settings.keep_timestamps);
    }

    #[test]
    fn test_later_layer_wins() {
        let file = SettingsLayer {
            naming: Some(NamingMode::Timestamped),
            include_subfolders: Some(true),
            output_folder: Some("from_file".to_string()),
            ..SettingsLayer::default()
        };
        let cli = SettingsLayer {
            naming: Some(NamingMode::Original),
            ..SettingsLayer::default()
        };

        let settings = Settings::resolve(&[&file, &cli]);
        assert_eq!(settings.naming, NamingMode::Original);
        assert!(settings.include_subfolders);
        assert_eq!(settings.output_folder, "from_file");
    }

    #[test]
    fn test_blank_output_folder_is_ignored() {
        let layer = SettingsLayer {
            output_folder: Some("   ".to_string()),
            ..SettingsLayer::default()
        };
        let settings = Settings::resolve(&[&layer]);
        assert_eq!(settings.output_folder, DEFAULT_OUTPUT_FOLDER);
    }
}
