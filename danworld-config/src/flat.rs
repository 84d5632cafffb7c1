use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Layers of a superflat world, bottom first, starting at y = 0
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct FlatWorldConfig {
    pub biome: String,
    pub layers: Vec<FlatLayer>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FlatLayer {
    pub block: String,
    pub height: u32,
    /// Block state properties, e.g. `axis = "y"`
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl FlatLayer {
    pub fn new(block: &str, height: u32) -> Self {
        Self {
            block: block.to_string(),
            height,
            properties: BTreeMap::new(),
        }
    }
}

impl Default for FlatWorldConfig {
    fn default() -> Self {
        Self {
            biome: "plains".to_string(),
            layers: vec![
                FlatLayer::new("bedrock", 1),
                FlatLayer::new("dirt", 2),
                FlatLayer::new("grass_block", 1),
            ],
        }
    }
}

impl FlatWorldConfig {
    /// Layers start at y = 0, so they can reach up to the largest block coordinate
    pub const MAX_HEIGHT: u64 = i32::MAX as u64 + 1;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(layer) = self.layers.iter().find(|layer| layer.height == 0) {
            return Err(ConfigError::Invalid(format!(
                "flat layer {} has no height",
                layer.block
            )));
        }
        let height = self.height();
        if height > Self::MAX_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "flat layers are {height} blocks high, at most {} fit",
                Self::MAX_HEIGHT
            )));
        }
        Ok(())
    }

    /// Total height of all layers
    pub fn height(&self) -> u64 {
        self.layers.iter().map(|layer| u64::from(layer.height)).sum()
    }
}
