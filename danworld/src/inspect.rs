use serde::Serialize;

use danworld_world::region::{ExportedChunk, ExportedRegion, ExportedSection};

#[derive(Serialize)]
pub struct RegionSummary {
    pub version: u8,
    pub width: u16,
    pub depth: u16,
    pub chunks: Vec<ChunkSummary>,
}

#[derive(Serialize)]
pub struct ChunkSummary {
    pub x: i16,
    pub z: i16,
    pub sections: Vec<SectionSummary>,
}

#[derive(Serialize)]
pub struct SectionSummary {
    pub palette: Vec<String>,
    pub property_records: usize,
}

impl From<&ExportedSection> for SectionSummary {
    fn from(section: &ExportedSection) -> Self {
        Self {
            palette: section.palette.clone(),
            property_records: section.properties.len(),
        }
    }
}

impl From<&ExportedChunk> for ChunkSummary {
    fn from(chunk: &ExportedChunk) -> Self {
        Self {
            x: chunk.x,
            z: chunk.z,
            sections: chunk.sections.iter().map(SectionSummary::from).collect(),
        }
    }
}

impl From<&ExportedRegion> for RegionSummary {
    fn from(region: &ExportedRegion) -> Self {
        Self {
            version: region.version,
            width: region.width,
            depth: region.depth,
            chunks: region.chunks.iter().map(ChunkSummary::from).collect(),
        }
    }
}
