use std::collections::BTreeMap;

use log::warn;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::{Axis, BlockFace, Half, RailShape, StairShape};

/// Kind of a tagged value. The discriminant is the 4 bit tag and also the order in which a
/// block's properties are emitted.
#[derive(FromPrimitive, PartialEq, Clone, Copy, Debug, Hash, Eq, PartialOrd, Ord)]
pub enum PropertyKind {
    Axis = 0,
    Age = 1,
    SnowLayers = 2,
    Level = 3,
    Half = 4,
    Facing = 5,
    Waterlogged = 6,
    Rotation = 7,
    Connections = 8,
    Open = 9,
    RailShape = 10,
    StairShape = 11,
}

/// A 4 bit tag and 12 bit payload, stored as one big-endian `u16`
#[derive(PartialEq, Clone, Copy, Debug, Eq)]
pub struct TaggedValue {
    pub kind: PropertyKind,
    pub payload: u16,
}

impl TaggedValue {
    pub const PAYLOAD_MASK: u16 = 0x0FFF;

    pub fn new(kind: PropertyKind, payload: u16) -> Self {
        debug_assert!(
            payload <= Self::PAYLOAD_MASK,
            "{kind:?} payload {payload} does not fit 12 bits"
        );
        Self {
            kind,
            payload: payload & Self::PAYLOAD_MASK,
        }
    }

    pub fn pack(self) -> u16 {
        ((self.kind as u16) << 12) | (self.payload & Self::PAYLOAD_MASK)
    }

    /// `None` for tags 12 to 15, which have no kind
    pub fn unpack(word: u16) -> Option<Self> {
        let kind = PropertyKind::from_u16(word >> 12)?;
        Some(Self {
            kind,
            payload: word & Self::PAYLOAD_MASK,
        })
    }
}

/// The orthogonal block state properties the export format keeps.
///
/// Each field is one capability. `None` means the block does not have it.
#[derive(Default, PartialEq, Clone, Debug, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockProperties {
    pub axis: Option<Axis>,
    pub age: Option<u16>,
    pub layers: Option<u16>,
    pub level: Option<u16>,
    pub half: Option<Half>,
    pub facing: Option<BlockFace>,
    pub waterlogged: Option<bool>,
    pub rotation: Option<BlockFace>,
    /// Faces this block connects to, faces outside [`BlockFace::CONNECTIONS`] are ignored
    pub connections: Option<Vec<BlockFace>>,
    pub open: Option<bool>,
    pub rail_shape: Option<RailShape>,
    pub stair_shape: Option<StairShape>,
}

impl BlockProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Tagged values of this block, in tag order.
    ///
    /// Boolean capabilities only produce a value when they are true. Numbers above 4095 are
    /// skipped.
    pub fn extract(&self) -> Vec<TaggedValue> {
        let mut values = Vec::new();
        let mut push = |kind: PropertyKind, payload: u16| {
            if payload > TaggedValue::PAYLOAD_MASK {
                warn!("Skipping {kind:?} {payload}, it does not fit 12 bits");
            } else {
                values.push(TaggedValue::new(kind, payload));
            }
        };

        if let Some(axis) = self.axis {
            push(PropertyKind::Axis, axis as u16);
        }
        if let Some(age) = self.age {
            push(PropertyKind::Age, age);
        }
        if let Some(layers) = self.layers {
            push(PropertyKind::SnowLayers, layers);
        }
        if let Some(level) = self.level {
            push(PropertyKind::Level, level);
        }
        if let Some(half) = self.half {
            push(PropertyKind::Half, half as u16);
        }
        if let Some(facing) = self.facing {
            push(PropertyKind::Facing, facing.code());
        }
        if self.waterlogged == Some(true) {
            push(PropertyKind::Waterlogged, 1);
        }
        if let Some(rotation) = self.rotation {
            push(PropertyKind::Rotation, rotation.code());
        }
        if let Some(connections) = &self.connections {
            let mask = connections
                .iter()
                .fold(0, |mask, face| mask | face.connection_bit());
            push(PropertyKind::Connections, mask);
        }
        if self.open == Some(true) {
            push(PropertyKind::Open, 1);
        }
        if let Some(shape) = self.rail_shape {
            push(PropertyKind::RailShape, shape as u16);
        }
        if let Some(shape) = self.stair_shape {
            push(PropertyKind::StairShape, shape as u16);
        }

        values
    }

    /// Folds decoded tagged values back into a property set
    pub fn from_tagged(values: &[TaggedValue]) -> Self {
        let mut properties = Self::default();
        for value in values {
            let payload = value.payload;
            match value.kind {
                PropertyKind::Axis => properties.axis = Axis::from_u16(payload),
                PropertyKind::Age => properties.age = Some(payload),
                PropertyKind::SnowLayers => properties.layers = Some(payload),
                PropertyKind::Level => properties.level = Some(payload),
                PropertyKind::Half => properties.half = Half::from_u16(payload),
                PropertyKind::Facing => properties.facing = Some(BlockFace::from_code(payload)),
                PropertyKind::Waterlogged => properties.waterlogged = Some(payload != 0),
                PropertyKind::Rotation => {
                    properties.rotation = Some(BlockFace::from_code(payload))
                }
                PropertyKind::Connections => {
                    properties.connections = Some(
                        BlockFace::CONNECTIONS
                            .into_iter()
                            .filter(|face| payload & face.connection_bit() != 0)
                            .collect(),
                    )
                }
                PropertyKind::Open => properties.open = Some(payload != 0),
                PropertyKind::RailShape => {
                    properties.rail_shape = Some(RailShape::from_code(payload))
                }
                PropertyKind::StairShape => {
                    properties.stair_shape = Some(StairShape::from_code(payload))
                }
            }
        }
        properties
    }

    /// Reads a block state in its textual form, e.g. `facing=north` or `rotation=4`.
    ///
    /// `shape` means a rail shape on rails and a stair shape on everything else.
    /// Keys the format does not store are ignored.
    pub fn from_state(block: &str, state: &BTreeMap<String, String>) -> Self {
        let mut properties = Self::default();
        let mut connections: Option<Vec<BlockFace>> = None;

        for (key, value) in state {
            match key.as_str() {
                "axis" => properties.axis = Axis::from_name(value),
                "age" => properties.age = parse_number(key, value),
                "layers" => properties.layers = parse_number(key, value),
                "level" => properties.level = parse_number(key, value),
                "half" => properties.half = Half::from_name(value),
                "facing" => properties.facing = BlockFace::from_name(value),
                "waterlogged" => properties.waterlogged = parse_flag(value),
                "open" => properties.open = parse_flag(value),
                "rotation" => {
                    properties.rotation = parse_number(key, value)
                        .and_then(|rotation| u8::try_from(rotation).ok())
                        .and_then(BlockFace::from_rotation)
                }
                "shape" if block.contains("rail") => {
                    properties.rail_shape = Some(RailShape::from_name(value))
                }
                "shape" => properties.stair_shape = Some(StairShape::from_name(value)),
                "north" | "south" | "east" | "west" | "up" | "down" => {
                    let faces = connections.get_or_insert_with(Vec::new);
                    // Walls use none/low/tall instead of booleans
                    if !matches!(value.as_str(), "false" | "none") {
                        if let Some(face) = BlockFace::from_name(key) {
                            faces.push(face);
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(mut faces) = connections {
            faces.sort_by_key(|face| face.connection_bit());
            properties.connections = Some(faces);
        }
        properties
    }
}

/// Accepts numbers that fit a tagged value payload
fn parse_number(key: &str, value: &str) -> Option<u16> {
    match value.parse::<u16>() {
        Ok(number) if number <= TaggedValue::PAYLOAD_MASK => Some(number),
        Ok(number) => {
            warn!("Ignoring block state {key}={number}, above {}", TaggedValue::PAYLOAD_MASK);
            None
        }
        Err(_) => {
            warn!("Ignoring block state {key}={value}, not a number");
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::block::{Axis, BlockFace, Half, RailShape, StairShape};

    use super::{BlockProperties, PropertyKind, TaggedValue};

    fn state(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn plain_block_has_no_values() {
        assert!(BlockProperties::default().extract().is_empty());
        assert!(BlockProperties::default().is_empty());
    }

    #[test]
    fn facing_comes_before_waterlogged() {
        let properties = BlockProperties {
            waterlogged: Some(true),
            facing: Some(BlockFace::East),
            ..Default::default()
        };
        let values = properties.extract();
        assert_eq!(
            values,
            vec![
                TaggedValue::new(PropertyKind::Facing, 1),
                TaggedValue::new(PropertyKind::Waterlogged, 1),
            ]
        );
        assert_eq!(values[0].pack(), 0x5001);
        assert_eq!(values[1].pack(), 0x6001);
    }

    #[test]
    fn false_flags_are_not_written() {
        let properties = BlockProperties {
            waterlogged: Some(false),
            open: Some(false),
            ..Default::default()
        };
        assert!(properties.extract().is_empty());
    }

    #[test]
    fn connections_form_a_mask() {
        let properties = BlockProperties {
            connections: Some(vec![BlockFace::North, BlockFace::West, BlockFace::SouthEast]),
            ..Default::default()
        };
        assert_eq!(
            properties.extract(),
            vec![TaggedValue::new(PropertyKind::Connections, 9)]
        );

        let unconnected = BlockProperties {
            connections: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            unconnected.extract(),
            vec![TaggedValue::new(PropertyKind::Connections, 0)]
        );
    }

    #[test]
    fn every_kind_in_tag_order() {
        let properties = BlockProperties {
            axis: Some(Axis::Z),
            age: Some(7),
            layers: Some(3),
            level: Some(15),
            half: Some(Half::Bottom),
            facing: Some(BlockFace::Up),
            waterlogged: Some(true),
            rotation: Some(BlockFace::SouthSouthWest),
            connections: Some(vec![BlockFace::Up, BlockFace::Down]),
            open: Some(true),
            rail_shape: Some(RailShape::SouthWest),
            stair_shape: Some(StairShape::OuterRight),
        };
        let values = properties.extract();
        let tags: Vec<u16> = values.iter().map(|value| value.pack() >> 12).collect();
        assert_eq!(tags, (0..12).collect::<Vec<u16>>());
        let payloads: Vec<u16> = values.iter().map(|value| value.payload).collect();
        assert_eq!(payloads, vec![2, 7, 3, 15, 1, 14, 1, 12, 48, 1, 9, 3]);

        assert_eq!(BlockProperties::from_tagged(&values), properties);
    }

    #[test]
    fn unknown_tags_do_not_unpack() {
        assert_eq!(TaggedValue::unpack(0xC001), None);
        assert_eq!(TaggedValue::unpack(0xF000), None);
        assert_eq!(
            TaggedValue::unpack(0xB004),
            Some(TaggedValue::new(PropertyKind::StairShape, 4))
        );
    }

    #[test]
    fn stairs_from_state() {
        let properties = BlockProperties::from_state(
            "oak_stairs",
            &state(&[
                ("facing", "west"),
                ("half", "top"),
                ("shape", "inner_left"),
                ("waterlogged", "false"),
            ]),
        );
        assert_eq!(properties.facing, Some(BlockFace::West));
        assert_eq!(properties.half, Some(Half::Top));
        assert_eq!(properties.stair_shape, Some(StairShape::InnerLeft));
        assert_eq!(properties.rail_shape, None);
        assert_eq!(properties.waterlogged, Some(false));
    }

    #[test]
    fn rail_shape_depends_on_block() {
        let rail = BlockProperties::from_state(
            "minecraft:powered_rail",
            &state(&[("shape", "ascending_north")]),
        );
        assert_eq!(rail.rail_shape, Some(RailShape::AscendingNorth));
        assert_eq!(rail.stair_shape, None);

        let odd = BlockProperties::from_state("rail", &state(&[("shape", "figure_eight")]));
        assert_eq!(odd.rail_shape, Some(RailShape::EastWest));
    }

    #[test]
    fn sign_rotation_and_fence_connections() {
        let sign = BlockProperties::from_state("oak_sign", &state(&[("rotation", "8")]));
        assert_eq!(sign.rotation, Some(BlockFace::North));

        let wall = BlockProperties::from_state(
            "cobblestone_wall",
            &state(&[("east", "low"), ("north", "none"), ("up", "true"), ("west", "tall")]),
        );
        assert_eq!(
            wall.connections,
            Some(vec![BlockFace::East, BlockFace::West, BlockFace::Up])
        );
    }

    #[test]
    fn oversized_numbers_are_dropped() {
        let water = BlockProperties::from_state("water", &state(&[("level", "5000")]));
        assert_eq!(water.level, None);
        assert!(water.extract().is_empty());

        let widest = BlockProperties::from_state("water", &state(&[("level", "4095")]));
        assert_eq!(
            widest.extract(),
            vec![TaggedValue::new(PropertyKind::Level, 4095)]
        );

        let set_directly = BlockProperties {
            age: Some(5000),
            facing: Some(BlockFace::Up),
            ..Default::default()
        };
        assert_eq!(
            set_directly.extract(),
            vec![TaggedValue::new(PropertyKind::Facing, 14)]
        );
    }

    #[test]
    fn unknown_values_are_ignored() {
        let properties = BlockProperties::from_state(
            "lever",
            &state(&[("facing", "sideways"), ("age", "old"), ("powered", "true")]),
        );
        assert!(properties.is_empty());
    }
}
