pub mod catalog;
pub mod config;
pub mod episode;
pub mod error;
pub mod media;
pub mod paths;
pub mod store;
pub mod time;
pub mod view;

pub use catalog::{load_catalog, parse_catalog};
pub use config::{
    CatalogConfig, LoggingConfig, PlayerConfig, PodcastrConfig, UiConfig, WindowConfig,
};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
pub use episode::Episode;
pub use error::{PodcastrError, Result};
pub use media::{MediaEvent, MediaHandle};
pub use paths::{config_dir, config_path, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use store::{PlaybackStore, SharedStore, StoreEvent, SubscriptionId};
pub use time::{format_optional_time, format_time, DurationExt};
pub use view::{
    ControlState, EpisodeCard, MediaState, PlayButton, PlayerView, PlayerViewModel,
    TransportControls,
};
