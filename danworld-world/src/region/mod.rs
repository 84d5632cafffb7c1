use bytes::BufMut;
use log::{debug, info, trace};
use thiserror::Error;

use danworld_io::{DanWriteExt, ReadingError, WritingError};
use danworld_util::math::selection::{Selection, SelectionError, SelectionExtent};

use crate::{chunk::SectionRecord, source::WorldSource, FORMAT_TAG, FORMAT_VERSION, SECTION_VOLUME};

pub mod reader;

pub use reader::{ExportedChunk, ExportedRegion, ExportedSection};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Malformed selection: {0}")]
    MalformedSelection(#[from] SelectionError),
    #[error(
        "Section {section} of chunk {chunk_x}, {chunk_z} has {size} block types, more than a palette can index"
    )]
    PaletteOverflow {
        chunk_x: u16,
        chunk_z: u16,
        section: u8,
        size: usize,
    },
    #[error("Encoding error: {0}")]
    Encoding(#[from] WritingError),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Not a region export, found tag {0:?}")]
    BadMagic(String),
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u8),
    #[error("Reading error: {0}")]
    Reading(#[from] ReadingError),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identification, version and size in chunk columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionHeader {
    pub version: u8,
    pub width: u16,
    pub depth: u16,
}

impl RegionHeader {
    pub fn new(extent: &SelectionExtent) -> Self {
        Self {
            version: FORMAT_VERSION,
            width: extent.width,
            depth: extent.depth,
        }
    }

    pub fn to_bytes(self) -> Box<[u8]> {
        let mut bytes = Vec::with_capacity(1 + FORMAT_TAG.len() + 5);

        bytes.put_u8(FORMAT_TAG.len() as u8);
        bytes.put_slice(FORMAT_TAG.as_bytes());
        bytes.put_u8(self.version);
        bytes.put_u16(self.width);
        bytes.put_u16(self.depth);

        bytes.into_boxed_slice()
    }
}

/// Serializes every block of `selection` into one region stream.
///
/// Chunk columns are written x outer, z inner, each holding its sections bottom up. The
/// selection is validated before anything is written and the buffer is dropped on any
/// error, so callers either get a complete stream or nothing.
pub fn export_region<W: WorldSource + ?Sized>(
    world: &W,
    selection: &Selection,
) -> Result<Vec<u8>, ExportError> {
    let extent = selection.validate()?;
    info!(
        "Exporting {selection} as {}x{} chunks of {} sections",
        extent.width, extent.depth, extent.sections
    );

    let columns = extent.width as usize * extent.depth as usize;
    let mut data = Vec::with_capacity(columns * extent.sections as usize * SECTION_VOLUME * 2);
    data.write_slice(&RegionHeader::new(&extent).to_bytes())?;

    for chunk_x in 0..extent.width {
        for chunk_z in 0..extent.depth {
            write_chunk(world, selection, &extent, chunk_x, chunk_z, &mut data)?;
        }
    }

    info!("Exported {selection} into {} bytes", data.len());
    Ok(data)
}

fn write_chunk<W: WorldSource + ?Sized>(
    world: &W,
    selection: &Selection,
    extent: &SelectionExtent,
    chunk_x: u16,
    chunk_z: u16,
    data: &mut Vec<u8>,
) -> Result<(), ExportError> {
    debug!("Writing chunk column {chunk_x}, {chunk_z}");
    // Both fit, validation caps them at i16::MAX
    data.write_i16_be(chunk_x as i16)?;
    data.write_i16_be(chunk_z as i16)?;
    data.write_u8_be(extent.sections)?;

    for section in 0..extent.sections {
        let origin =
            selection.section_origin(i32::from(chunk_x), i32::from(chunk_z), i32::from(section));
        let record = SectionRecord::sample(world, selection, origin).map_err(|err| {
            ExportError::PaletteOverflow {
                chunk_x,
                chunk_z,
                section,
                size: err.size,
            }
        })?;
        trace!(
            "Section {section} at {origin}: palette {:?}, {} property records",
            record.palette.iter().collect::<Vec<_>>(),
            record.properties.len()
        );
        record.write(data)?;
    }
    Ok(())
}
