pub mod biome;
pub mod block;
pub mod chunk;
pub mod generation;
pub mod region;
pub mod sink;
pub mod source;

/// Identifier written for cells past the selection's maximum corner
pub const VOID_AIR: &str = "void_air";

/// Identification string at the start of every region stream
pub const FORMAT_TAG: &str = "DanWorld";
pub const FORMAT_VERSION: u8 = 1;

/// Number of cells in a 16x16x16 section
pub const SECTION_VOLUME: usize = 4096;
