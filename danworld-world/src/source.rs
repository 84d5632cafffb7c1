use std::{borrow::Cow, collections::HashMap};

use danworld_util::math::position::BlockPos;

use crate::{biome::Biome, block::BlockProperties};

/// Read access to the world an export is taken from.
///
/// Exports call this once per cell from the exporting thread only.
pub trait WorldSource {
    /// Block identifier, optionally namespaced
    fn block_type(&self, pos: &BlockPos) -> Cow<'_, str>;

    fn biome(&self, pos: &BlockPos) -> Biome;

    fn block_properties(&self, pos: &BlockPos) -> Cow<'_, BlockProperties>;
}

/// A sparse world kept in memory, every unset position holds the fill block
#[derive(Debug, Clone)]
pub struct MemoryWorldSource {
    fill: String,
    biome: Biome,
    blocks: HashMap<BlockPos, String>,
    biomes: HashMap<BlockPos, Biome>,
    properties: HashMap<BlockPos, BlockProperties>,
    empty: BlockProperties,
}

impl MemoryWorldSource {
    pub fn new(fill: impl Into<String>, biome: Biome) -> Self {
        Self {
            fill: fill.into(),
            biome,
            blocks: HashMap::new(),
            biomes: HashMap::new(),
            properties: HashMap::new(),
            empty: BlockProperties::default(),
        }
    }

    pub fn set_block(&mut self, pos: BlockPos, block: impl Into<String>) {
        self.blocks.insert(pos, block.into());
    }

    pub fn set_biome(&mut self, pos: BlockPos, biome: Biome) {
        self.biomes.insert(pos, biome);
    }

    pub fn set_properties(&mut self, pos: BlockPos, properties: BlockProperties) {
        self.properties.insert(pos, properties);
    }
}

impl WorldSource for MemoryWorldSource {
    fn block_type(&self, pos: &BlockPos) -> Cow<'_, str> {
        Cow::Borrowed(self.blocks.get(pos).unwrap_or(&self.fill))
    }

    fn biome(&self, pos: &BlockPos) -> Biome {
        self.biomes.get(pos).copied().unwrap_or(self.biome)
    }

    fn block_properties(&self, pos: &BlockPos) -> Cow<'_, BlockProperties> {
        Cow::Borrowed(self.properties.get(pos).unwrap_or(&self.empty))
    }
}
