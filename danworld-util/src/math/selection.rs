use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    ceil_div,
    position::{BlockPos, ParsePositionError},
    vector3::Vector3,
    SECTION_SIZE,
};

/// An axis-aligned box of blocks captured for one export. Both corners are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub min: BlockPos,
    pub max: BlockPos,
}

/// Size of a validated selection, in the units used by the export format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionExtent {
    /// Chunk columns along x
    pub width: u16,
    /// Chunk columns along z
    pub depth: u16,
    /// Vertical sections per chunk column
    pub sections: u8,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selection minimum ({min}) is above its maximum ({max})")]
    Inverted { min: BlockPos, max: BlockPos },
    #[error("Selection spans no volume along the {0} axis")]
    Empty(char),
    #[error("Selection is too large along the {axis} axis ({size} > {limit})")]
    TooLarge { axis: char, size: i64, limit: i64 },
    #[error("Sections along the {axis} axis would end at {end}, past the last block coordinate")]
    OutOfRange { axis: char, end: i64 },
    #[error("Invalid selection corner: {0}")]
    Parse(#[from] ParsePositionError),
}

impl Selection {
    /// The largest chunk index that still fits the signed 16 bit chunk coordinate
    pub const MAX_CHUNKS: i64 = i16::MAX as i64;
    pub const MAX_SECTIONS: i64 = u8::MAX as i64;

    pub const fn new(min: BlockPos, max: BlockPos) -> Self {
        Self { min, max }
    }

    /// Builds a selection from two `x:y:z` corners
    pub fn from_corners(min: &str, max: &str) -> Result<Self, SelectionError> {
        Ok(Self::new(min.parse()?, max.parse()?))
    }

    /// `max - min` on every axis, computed without overflow
    pub fn span(&self) -> Vector3<i64> {
        let min = self.min.0;
        let max = self.max.0;
        Vector3::new(
            i64::from(max.x) - i64::from(min.x),
            i64::from(max.y) - i64::from(min.y),
            i64::from(max.z) - i64::from(min.z),
        )
    }

    pub fn width_in_chunks(&self) -> i64 {
        ceil_div(self.span().x.abs(), i64::from(SECTION_SIZE))
    }

    pub fn depth_in_chunks(&self) -> i64 {
        ceil_div(self.span().z.abs(), i64::from(SECTION_SIZE))
    }

    pub fn section_count(&self) -> i64 {
        ceil_div(self.span().y, i64::from(SECTION_SIZE))
    }

    /// Rejects boxes that would produce an empty, negative or unrepresentable export
    pub fn validate(&self) -> Result<SelectionExtent, SelectionError> {
        if !self.min.0.all_le(&self.max.0) {
            return Err(SelectionError::Inverted {
                min: self.min,
                max: self.max,
            });
        }

        let span = self.span();
        for (axis, size) in [('x', span.x), ('y', span.y), ('z', span.z)] {
            if size == 0 {
                return Err(SelectionError::Empty(axis));
            }
        }

        let width = Self::check_limit('x', self.width_in_chunks(), Self::MAX_CHUNKS)?;
        let depth = Self::check_limit('z', self.depth_in_chunks(), Self::MAX_CHUNKS)?;
        let sections = Self::check_limit('y', self.section_count(), Self::MAX_SECTIONS)?;

        // Every sampled cell, including the padding of the last section, must be addressable
        let min = self.min.0;
        for (axis, start, count) in [
            ('x', min.x, width),
            ('y', min.y, sections),
            ('z', min.z, depth),
        ] {
            let end = i64::from(start) + count * i64::from(SECTION_SIZE) - 1;
            if end > i64::from(i32::MAX) {
                return Err(SelectionError::OutOfRange { axis, end });
            }
        }

        Ok(SelectionExtent {
            width: width as u16,
            depth: depth as u16,
            sections: sections as u8,
        })
    }

    fn check_limit(axis: char, size: i64, limit: i64) -> Result<i64, SelectionError> {
        if size > limit {
            Err(SelectionError::TooLarge { axis, size, limit })
        } else {
            Ok(size)
        }
    }

    /// Inclusive on both corners
    pub fn contains(&self, pos: &BlockPos) -> bool {
        self.min.0.all_le(&pos.0) && pos.0.all_le(&self.max.0)
    }

    /// True if the position lies past the maximum corner on any axis
    pub fn exceeds_max(&self, pos: &BlockPos) -> bool {
        pos.0.any_gt(&self.max.0)
    }

    /// World position of the lowest corner of a section, given its chunk column and height
    /// index relative to this selection
    pub fn section_origin(&self, chunk_x: i32, chunk_z: i32, section_y: i32) -> BlockPos {
        self.min.offset(Vector3::new(chunk_x, section_y, chunk_z) * SECTION_SIZE)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} -> {}:{}:{}",
            self.min.0.x, self.min.0.y, self.min.0.z, self.max.0.x, self.max.0.y, self.max.0.z
        )
    }
}
