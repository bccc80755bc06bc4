pub mod app_config;
pub mod config;
pub mod directory;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{
    load_directory, Brand, BrandId, Coordinates, Country, Directory, Location, PartnerType,
    BUNDLED_DIRECTORY_YAML,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read directory file {path}: {source}")]
    DirectoryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse directory file: {0}")]
    DirectoryFileParse(#[from] serde_yaml::Error),

    #[error("directory validation failed: {0}")]
    Validation(String),
}
