use std::borrow::Cow;

use danworld_config::FlatWorldConfig;
use danworld_util::math::position::BlockPos;

use crate::{biome::Biome, block::BlockProperties, source::WorldSource};

const AIR: &str = "air";

/// A superflat world: configured layers from y = 0 upward, air everywhere else
pub struct FlatWorldSource {
    /// Exclusive top of each layer, with its block
    layers: Vec<(u64, String, BlockProperties)>,
    biome: Biome,
    empty: BlockProperties,
}

impl FlatWorldSource {
    pub fn new(config: &FlatWorldConfig) -> Self {
        let mut top = 0u64;
        let layers = config
            .layers
            .iter()
            .map(|layer| {
                top += u64::from(layer.height);
                let properties = BlockProperties::from_state(&layer.block, &layer.properties);
                (top, layer.block.clone(), properties)
            })
            .collect();

        Self {
            layers,
            biome: Biome::from_name(&config.biome),
            empty: BlockProperties::default(),
        }
    }

    fn layer_at(&self, y: i32) -> Option<(&str, &BlockProperties)> {
        let y = u64::try_from(y).ok()?;
        let index = self.layers.partition_point(|(top, _, _)| *top <= y);
        self.layers
            .get(index)
            .map(|(_, block, properties)| (block.as_str(), properties))
    }
}

impl WorldSource for FlatWorldSource {
    fn block_type(&self, pos: &BlockPos) -> Cow<'_, str> {
        match self.layer_at(pos.0.y) {
            Some((block, _)) => Cow::Borrowed(block),
            None => Cow::Borrowed(AIR),
        }
    }

    fn biome(&self, _pos: &BlockPos) -> Biome {
        self.biome
    }

    fn block_properties(&self, pos: &BlockPos) -> Cow<'_, BlockProperties> {
        match self.layer_at(pos.0.y) {
            Some((_, properties)) => Cow::Borrowed(properties),
            None => Cow::Borrowed(&self.empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use danworld_config::{FlatLayer, FlatWorldConfig};
    use danworld_util::math::position::BlockPos;

    use crate::{
        biome::Biome,
        block::{Axis, BlockProperties},
        source::WorldSource,
    };

    use super::FlatWorldSource;

    #[test]
    fn default_layers() {
        let world = FlatWorldSource::new(&FlatWorldConfig::default());
        assert_eq!(world.block_type(&BlockPos::new(0, 0, 0)), "bedrock");
        assert_eq!(world.block_type(&BlockPos::new(5, 1, -3)), "dirt");
        assert_eq!(world.block_type(&BlockPos::new(5, 2, -3)), "dirt");
        assert_eq!(world.block_type(&BlockPos::new(0, 3, 0)), "grass_block");
        assert_eq!(world.block_type(&BlockPos::new(0, 4, 0)), "air");
        assert_eq!(world.block_type(&BlockPos::new(0, -1, 0)), "air");
        assert_eq!(world.biome(&BlockPos::new(0, 0, 0)), Biome::Plains);
    }

    #[test]
    fn tall_layers_are_not_expanded() {
        let config = FlatWorldConfig {
            biome: "plains".to_string(),
            layers: vec![
                FlatLayer::new("stone", 4_000_000_000),
                FlatLayer::new("dirt", 1),
            ],
        };
        let world = FlatWorldSource::new(&config);
        assert_eq!(world.block_type(&BlockPos::new(0, i32::MAX, 0)), "stone");
        assert_eq!(world.block_type(&BlockPos::new(0, -1, 0)), "air");
    }

    #[test]
    fn layer_properties_are_parsed() {
        let mut log = FlatLayer::new("oak_log", 2);
        log.properties.insert("axis".to_string(), "x".to_string());
        let config = FlatWorldConfig {
            biome: "minecraft:desert".to_string(),
            layers: vec![log],
        };
        let world = FlatWorldSource::new(&config);

        assert_eq!(
            *world.block_properties(&BlockPos::new(0, 1, 0)),
            BlockProperties {
                axis: Some(Axis::X),
                ..Default::default()
            }
        );
        assert!(world.block_properties(&BlockPos::new(0, 2, 0)).is_empty());
        assert_eq!(world.biome(&BlockPos::new(0, 0, 0)), Biome::Desert);
    }
}
