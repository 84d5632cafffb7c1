use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use std::{fs, io, path::Path, path::PathBuf};

pub mod compression;
pub mod flat;
pub mod logging;
pub mod output;

pub use compression::CompressionConfig;
pub use flat::{FlatLayer, FlatWorldConfig};
pub use logging::LoggingConfig;
pub use output::OutputConfig;

const CONFIG_ROOT_FOLDER: &str = "config/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Io error: {0}")]
    Io(#[from] io::Error),
    #[error("Couldn't parse config at {path:?}. Reason: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything that tunes how regions get exported.
/// A missing file is created with these defaults.
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
#[serde(default)]
pub struct ExportConfiguration {
    pub logging: LoggingConfig,
    pub compression: CompressionConfig,
    pub output: OutputConfig,
    pub flat: FlatWorldConfig,
}

pub trait LoadConfiguration {
    fn load(exec_dir: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config_dir = exec_dir.join(CONFIG_ROOT_FOLDER);
        if !config_dir.exists() {
            log::debug!("creating new config root folder");
            fs::create_dir_all(&config_dir)?;
        }
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            let file_content = fs::read_to_string(&path)?;
            toml::from_str(&file_content).map_err(|err| ConfigError::Parse {
                path: path.clone(),
                message: err.message().to_string(),
            })?
        } else {
            let content = Self::default();

            if let Err(err) = fs::write(&path, toml::to_string(&content)?) {
                warn!("Couldn't write default config to {:?}. Reason: {}", &path, err);
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadConfiguration for ExportConfiguration {
    fn get_path() -> &'static Path {
        Path::new("export.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.compression.validate()?;
        self.output.validate()?;
        self.flat.validate()
    }
}
