use danworld_io::{DanWriteExt, WritingError};
use danworld_util::{
    math::{position::BlockPos, selection::Selection, vector3::Vector3},
    strip_namespace,
};

use crate::{
    biome::Biome,
    block::{BlockProperties, TaggedValue},
    source::WorldSource,
    SECTION_VOLUME, VOID_AIR,
};

pub mod palette;

pub use palette::{Palette, PaletteOverflow};

/// Index of a cell inside the block and biome streams, which are ordered y, then x, then z
pub const fn cell_index(x: usize, y: usize, z: usize) -> usize {
    (y << 8) | (x << 4) | z
}

/// Tagged values of a single cell, addressed by its local coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub values: Vec<TaggedValue>,
}

impl PropertyRecord {
    /// At most 15 values fit the 4 bit count
    pub const MAX_VALUES: usize = 15;

    /// `x:4 | y:4 | z:4 | count:4`
    pub fn header(&self) -> u16 {
        debug_assert!(self.values.len() <= Self::MAX_VALUES);
        (u16::from(self.x & 15) << 12)
            | (u16::from(self.y & 15) << 8)
            | (u16::from(self.z & 15) << 4)
            | (self.values.len() as u16 & 15)
    }

    /// Splits a header word into the cell coordinates and the value count
    pub fn split_header(word: u16) -> (u8, u8, u8, usize) {
        (
            (word >> 12) as u8 & 15,
            (word >> 8) as u8 & 15,
            (word >> 4) as u8 & 15,
            (word & 15) as usize,
        )
    }

    pub fn properties(&self) -> BlockProperties {
        BlockProperties::from_tagged(&self.values)
    }

    fn write(&self, write: &mut impl DanWriteExt) -> Result<(), WritingError> {
        write.write_u16_be(self.header())?;
        for value in &self.values {
            write.write_u16_be(value.pack())?;
        }
        Ok(())
    }
}

/// One sampled 16x16x16 section, ready to be written
#[derive(Debug)]
pub struct SectionRecord {
    pub palette: Palette,
    /// Palette index per cell
    pub blocks: Box<[u8]>,
    /// Biome code per cell
    pub biomes: Box<[u8]>,
    pub properties: Vec<PropertyRecord>,
}

impl SectionRecord {
    /// Reads every cell of the section whose lowest corner is `origin`.
    ///
    /// Cells past the selection's maximum corner become [`VOID_AIR`] in the default biome
    /// without properties; the world is not consulted for them.
    pub fn sample<W: WorldSource + ?Sized>(
        world: &W,
        selection: &Selection,
        origin: BlockPos,
    ) -> Result<Self, PaletteOverflow> {
        let mut palette = Palette::default();
        let mut blocks = vec![0u8; SECTION_VOLUME].into_boxed_slice();
        let mut biomes = vec![Biome::DEFAULT.code(); SECTION_VOLUME].into_boxed_slice();
        let mut properties = Vec::new();

        for y in 0..16 {
            for x in 0..16 {
                for z in 0..16 {
                    let index = cell_index(x, y, z);
                    let pos = origin.offset(Vector3::new(x as i32, y as i32, z as i32));

                    if selection.exceeds_max(&pos) {
                        blocks[index] = palette.index_of(VOID_AIR)?;
                        continue;
                    }

                    let block = world.block_type(&pos);
                    blocks[index] = palette.index_of(strip_namespace(&block))?;
                    biomes[index] = world.biome(&pos).code();

                    let values = world.block_properties(&pos).extract();
                    if !values.is_empty() {
                        properties.push(PropertyRecord {
                            x: x as u8,
                            y: y as u8,
                            z: z as u8,
                            values,
                        });
                    }
                }
            }
        }

        Ok(Self {
            palette,
            blocks,
            biomes,
            properties,
        })
    }

    pub fn write(&self, write: &mut impl DanWriteExt) -> Result<(), WritingError> {
        self.palette.write(write)?;
        write.write_u16_be(self.blocks.len() as u16)?;
        write.write_slice(&self.blocks)?;
        write.write_slice(&self.biomes)?;
        write.write_u16_be(self.properties.len() as u16)?;
        for record in &self.properties {
            record.write(write)?;
        }
        Ok(())
    }
}
