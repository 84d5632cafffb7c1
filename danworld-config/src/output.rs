use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Folder region files are written into, relative to the working directory
    pub folder: PathBuf,
    /// Appended to the export name
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("exports"),
            extension: ".dan".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Invalid("output extension is empty".to_string()));
        }
        Ok(())
    }
}
