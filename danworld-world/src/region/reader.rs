use std::{fs, io::Read, path::Path};

use log::{debug, warn};

use danworld_io::{compress::is_gzip, compress::read_gzip, DanReadExt};

use crate::{
    biome::Biome,
    block::{BlockProperties, TaggedValue},
    chunk::{cell_index, PropertyRecord},
    FORMAT_TAG, FORMAT_VERSION, SECTION_VOLUME,
};

use super::ImportError;

/// A decoded region stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedRegion {
    pub version: u8,
    pub width: u16,
    pub depth: u16,
    /// In stream order, x outer and z inner
    pub chunks: Vec<ExportedChunk>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedChunk {
    pub x: i16,
    pub z: i16,
    pub sections: Vec<ExportedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSection {
    pub palette: Vec<String>,
    pub blocks: Box<[u8]>,
    pub biomes: Vec<Biome>,
    pub properties: Vec<PropertyRecord>,
}

impl ExportedSection {
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> Option<&str> {
        let index = *self.blocks.get(cell_index(x, y, z))?;
        self.palette.get(index as usize).map(String::as_str)
    }

    pub fn biome_at(&self, x: usize, y: usize, z: usize) -> Biome {
        self.biomes
            .get(cell_index(x, y, z))
            .copied()
            .unwrap_or(Biome::DEFAULT)
    }

    pub fn properties_at(&self, x: usize, y: usize, z: usize) -> Option<BlockProperties> {
        self.properties
            .iter()
            .find(|record| (record.x as usize, record.y as usize, record.z as usize) == (x, y, z))
            .map(PropertyRecord::properties)
    }

    fn read(read: &mut impl Read) -> Result<Self, ImportError> {
        let palette_size = read.get_u8_be()?;
        let palette = (0..palette_size)
            .map(|_| read.get_string())
            .collect::<Result<Vec<_>, _>>()?;

        let cells = read.get_u16_be()? as usize;
        if cells != SECTION_VOLUME {
            warn!("Section holds {cells} cells instead of {SECTION_VOLUME}");
        }
        let blocks = read.read_boxed_slice(cells)?;
        if let Some(index) = blocks.iter().find(|&&index| index as usize >= palette.len()) {
            warn!("Palette index {index} is outside of a palette of {}", palette.len());
        }
        let biomes = read
            .read_boxed_slice(cells)?
            .iter()
            .map(|&code| Biome::from_code(code))
            .collect();

        let record_count = read.get_u16_be()?;
        let mut properties = Vec::with_capacity(record_count as usize);
        for _ in 0..record_count {
            let (x, y, z, count) = PropertyRecord::split_header(read.get_u16_be()?);
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                let word = read.get_u16_be()?;
                match TaggedValue::unpack(word) {
                    Some(value) => values.push(value),
                    None => warn!("Skipping property with unknown tag {}", word >> 12),
                }
            }
            properties.push(PropertyRecord { x, y, z, values });
        }

        Ok(Self {
            palette,
            blocks,
            biomes,
            properties,
        })
    }
}

impl ExportedChunk {
    fn read(read: &mut impl Read) -> Result<Self, ImportError> {
        let x = read.get_i16_be()?;
        let z = read.get_i16_be()?;
        let section_count = read.get_u8_be()?;
        debug!("Reading chunk column {x}, {z} with {section_count} sections");

        let sections = (0..section_count)
            .map(|_| ExportedSection::read(&mut *read))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { x, z, sections })
    }
}

impl ExportedRegion {
    /// Decodes an uncompressed region stream
    pub fn read(mut read: impl Read) -> Result<Self, ImportError> {
        let tag = read.get_string()?;
        if tag != FORMAT_TAG {
            return Err(ImportError::BadMagic(tag));
        }
        let version = read.get_u8_be()?;
        if version != FORMAT_VERSION {
            return Err(ImportError::UnsupportedVersion(version));
        }
        let width = read.get_u16_be()?;
        let depth = read.get_u16_be()?;

        // Sizes come from the stream, so chunks are only allocated as they are read
        let columns = width as usize * depth as usize;
        let mut chunks = Vec::new();
        for _ in 0..columns {
            chunks.push(ExportedChunk::read(&mut read)?);
        }

        Ok(Self {
            version,
            width,
            depth,
            chunks,
        })
    }

    /// Loads a region file, gzip compressed or not
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let raw = fs::read(path)?;
        if is_gzip(&raw) {
            let data = read_gzip(&raw[..])?;
            Self::read(&data[..])
        } else {
            Self::read(&raw[..])
        }
    }
}
