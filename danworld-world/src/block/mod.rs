use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

pub mod properties;

pub use properties::{BlockProperties, PropertyKind, TaggedValue};

/// A face or one of the sixteen compass points used by rotatable blocks.
///
/// The discriminants are the on-disk facing codes, ordered alphabetically.
#[derive(FromPrimitive, PartialEq, Clone, Copy, Debug, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockFace {
    Down = 0,
    East = 1,
    EastNorthEast = 2,
    EastSouthEast = 3,
    North = 4,
    NorthEast = 5,
    NorthNorthEast = 6,
    NorthNorthWest = 7,
    NorthWest = 8,
    South = 9,
    SouthEast = 10,
    SouthSouthEast = 11,
    SouthSouthWest = 12,
    SouthWest = 13,
    Up = 14,
    West = 15,
    WestNorthWest = 16,
    WestSouthWest = 17,
    /// The block itself, has no code of its own
    Center = 18,
}

/// Sign rotation `0..16` to compass point, starting at south and turning clockwise
const ROTATIONS: [BlockFace; 16] = [
    BlockFace::South,
    BlockFace::SouthSouthWest,
    BlockFace::SouthWest,
    BlockFace::WestSouthWest,
    BlockFace::West,
    BlockFace::WestNorthWest,
    BlockFace::NorthWest,
    BlockFace::NorthNorthWest,
    BlockFace::North,
    BlockFace::NorthNorthEast,
    BlockFace::NorthEast,
    BlockFace::EastNorthEast,
    BlockFace::East,
    BlockFace::EastSouthEast,
    BlockFace::SouthEast,
    BlockFace::SouthSouthEast,
];

impl BlockFace {
    pub const DEFAULT: BlockFace = BlockFace::North;

    /// Faces that can be stored as a connection
    pub const CONNECTIONS: [BlockFace; 6] = [
        BlockFace::North,
        BlockFace::South,
        BlockFace::East,
        BlockFace::West,
        BlockFace::Up,
        BlockFace::Down,
    ];

    /// Facing code, `Center` has none and is written as [`BlockFace::DEFAULT`]
    pub fn code(self) -> u16 {
        match self {
            BlockFace::Center => Self::DEFAULT as u16,
            face => face as u16,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match Self::from_u16(code) {
            Some(BlockFace::Center) | None => Self::DEFAULT,
            Some(face) => face,
        }
    }

    /// Bit of this face in a connection mask, 0 for faces that cannot connect
    pub const fn connection_bit(self) -> u16 {
        match self {
            BlockFace::North => 1,
            BlockFace::South => 2,
            BlockFace::East => 4,
            BlockFace::West => 8,
            BlockFace::Up => 16,
            BlockFace::Down => 32,
            _ => 0,
        }
    }

    pub fn from_rotation(rotation: u8) -> Option<Self> {
        ROTATIONS.get(rotation as usize).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let face = match name.to_ascii_lowercase().as_str() {
            "down" => BlockFace::Down,
            "east" => BlockFace::East,
            "east_north_east" => BlockFace::EastNorthEast,
            "east_south_east" => BlockFace::EastSouthEast,
            "north" => BlockFace::North,
            "north_east" => BlockFace::NorthEast,
            "north_north_east" => BlockFace::NorthNorthEast,
            "north_north_west" => BlockFace::NorthNorthWest,
            "north_west" => BlockFace::NorthWest,
            "south" => BlockFace::South,
            "south_east" => BlockFace::SouthEast,
            "south_south_east" => BlockFace::SouthSouthEast,
            "south_south_west" => BlockFace::SouthSouthWest,
            "south_west" => BlockFace::SouthWest,
            "up" => BlockFace::Up,
            "west" => BlockFace::West,
            "west_north_west" => BlockFace::WestNorthWest,
            "west_south_west" => BlockFace::WestSouthWest,
            "self" | "center" => BlockFace::Center,
            _ => return None,
        };
        Some(face)
    }
}

#[derive(FromPrimitive, PartialEq, Clone, Copy, Debug, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }
}

#[derive(FromPrimitive, PartialEq, Clone, Copy, Debug, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top = 0,
    Bottom = 1,
}

impl Half {
    /// Doors and tall plants call their halves upper and lower
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "top" | "upper" => Some(Half::Top),
            "bottom" | "lower" => Some(Half::Bottom),
            _ => None,
        }
    }
}

#[derive(FromPrimitive, PartialEq, Clone, Copy, Debug, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RailShape {
    AscendingEast = 0,
    AscendingNorth = 1,
    AscendingSouth = 2,
    AscendingWest = 3,
    EastWest = 4,
    NorthEast = 5,
    NorthSouth = 6,
    NorthWest = 7,
    SouthEast = 8,
    SouthWest = 9,
}

impl RailShape {
    pub const DEFAULT: RailShape = RailShape::EastWest;

    pub fn from_code(code: u16) -> Self {
        Self::from_u16(code).unwrap_or(Self::DEFAULT)
    }

    /// Unknown shapes become [`RailShape::DEFAULT`]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "ascending_east" => RailShape::AscendingEast,
            "ascending_north" => RailShape::AscendingNorth,
            "ascending_south" => RailShape::AscendingSouth,
            "ascending_west" => RailShape::AscendingWest,
            "east_west" => RailShape::EastWest,
            "north_east" => RailShape::NorthEast,
            "north_south" => RailShape::NorthSouth,
            "north_west" => RailShape::NorthWest,
            "south_east" => RailShape::SouthEast,
            "south_west" => RailShape::SouthWest,
            _ => Self::DEFAULT,
        }
    }
}

#[derive(FromPrimitive, PartialEq, Clone, Copy, Debug, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairShape {
    InnerLeft = 0,
    InnerRight = 1,
    OuterLeft = 2,
    OuterRight = 3,
    Straight = 4,
}

impl StairShape {
    pub const DEFAULT: StairShape = StairShape::Straight;

    pub fn from_code(code: u16) -> Self {
        Self::from_u16(code).unwrap_or(Self::DEFAULT)
    }

    /// Unknown shapes become [`StairShape::DEFAULT`]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "inner_left" => StairShape::InnerLeft,
            "inner_right" => StairShape::InnerRight,
            "outer_left" => StairShape::OuterLeft,
            "outer_right" => StairShape::OuterRight,
            "straight" => StairShape::Straight,
            _ => Self::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockFace, RailShape, StairShape};

    #[test]
    fn facing_codes_are_total() {
        for code in 0..18u16 {
            assert_eq!(BlockFace::from_code(code).code(), code);
        }
        assert_eq!(BlockFace::Down.code(), 0);
        assert_eq!(BlockFace::North.code(), 4);
        assert_eq!(BlockFace::Up.code(), 14);
        assert_eq!(BlockFace::WestSouthWest.code(), 17);
    }

    #[test]
    fn center_and_unknown_use_north() {
        assert_eq!(BlockFace::Center.code(), BlockFace::North.code());
        assert_eq!(BlockFace::from_code(18), BlockFace::North);
        assert_eq!(BlockFace::from_code(4000), BlockFace::North);
    }

    #[test]
    fn rotation_turns_clockwise_from_south() {
        assert_eq!(BlockFace::from_rotation(0), Some(BlockFace::South));
        assert_eq!(BlockFace::from_rotation(4), Some(BlockFace::West));
        assert_eq!(BlockFace::from_rotation(8), Some(BlockFace::North));
        assert_eq!(BlockFace::from_rotation(15), Some(BlockFace::SouthSouthEast));
        assert_eq!(BlockFace::from_rotation(16), None);
    }

    #[test]
    fn connection_bits_are_distinct() {
        let mask = BlockFace::CONNECTIONS
            .iter()
            .fold(0, |mask, face| mask | face.connection_bit());
        assert_eq!(mask, 0b11_1111);
        assert_eq!(BlockFace::NorthEast.connection_bit(), 0);
    }

    #[test]
    fn shape_fallbacks() {
        assert_eq!(RailShape::from_name("north_south"), RailShape::NorthSouth);
        assert_eq!(RailShape::from_name("loop"), RailShape::EastWest);
        assert_eq!(RailShape::EastWest as u16, 4);
        assert_eq!(StairShape::from_name("outer_left"), StairShape::OuterLeft);
        assert_eq!(StairShape::from_name("spiral"), StairShape::Straight);
        assert_eq!(StairShape::from_code(9), StairShape::Straight);
    }
}
