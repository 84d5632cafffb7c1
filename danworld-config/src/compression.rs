use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
/// Gzip wrapping of written region files
pub struct CompressionConfig {
    /// Whether region files are gzip compressed
    pub enabled: bool,
    /// A value between 0..9
    /// 1 = Optimize for the best speed of encoding.
    /// 9 = Optimize for the size of data being encoded.
    pub level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: 6,
        }
    }
}

impl CompressionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level > 9 {
            return Err(ConfigError::Invalid(format!(
                "compression level must be within 0..=9, is {}",
                self.level
            )));
        }
        Ok(())
    }
}
