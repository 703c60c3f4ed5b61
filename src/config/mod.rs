pub mod load;
pub mod media_type;
pub mod types;

pub use load::{find_config_file, load_config_file, load_layer, parse_bool, parse_config};
pub use media_type::{IMAGE_EXTENSIONS, MediaKind, VIDEO_EXTENSIONS, classify_extension, classify_path};
pub use types::{
    CONFIG_FILE_NAMES, DEFAULT_OUTPUT_FOLDER, NamingMode, OutputMode, Settings, SettingsLayer,
};
