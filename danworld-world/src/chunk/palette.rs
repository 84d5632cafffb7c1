use indexmap::IndexSet;
use thiserror::Error;

use danworld_io::{DanWriteExt, WritingError};

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Palette needs {size} entries but an index must fit in one byte (at most {max})", max = Palette::MAX_ENTRIES)]
pub struct PaletteOverflow {
    pub size: usize,
}

/// Distinct block identifiers of one section, in order of first occurrence
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: IndexSet<String>,
}

impl Palette {
    pub const MAX_ENTRIES: usize = u8::MAX as usize;

    /// Index of `identifier`, adding it if this is its first occurrence
    pub fn index_of(&mut self, identifier: &str) -> Result<u8, PaletteOverflow> {
        let index = match self.entries.get_index_of(identifier) {
            Some(index) => index,
            None => {
                if self.entries.len() >= Self::MAX_ENTRIES {
                    return Err(PaletteOverflow {
                        size: self.entries.len() + 1,
                    });
                }
                self.entries.insert_full(identifier.to_owned()).0
            }
        };
        // Never above MAX_ENTRIES - 1
        Ok(index as u8)
    }

    /// Deduplicates a sequence of identifiers. Returns the palette and, per identifier, its index.
    pub fn from_identifiers<'a, I>(identifiers: I) -> Result<(Self, Vec<u8>), PaletteOverflow>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut palette = Self::default();
        let indices = identifiers
            .into_iter()
            .map(|identifier| palette.index_of(identifier))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((palette, indices))
    }

    pub fn get(&self, index: u8) -> Option<&str> {
        self.entries.get_index(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entry count as one byte, then each entry as a length-prefixed string
    pub fn write(&self, write: &mut impl DanWriteExt) -> Result<(), WritingError> {
        write.write_u8_be(self.entries.len() as u8)?;
        for entry in &self.entries {
            write.write_string(entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Palette, PaletteOverflow};

    #[test]
    fn first_occurrence_order() {
        let (palette, indices) =
            Palette::from_identifiers(["dirt", "stone", "dirt", "air", "stone"]).unwrap();
        assert_eq!(palette.iter().collect::<Vec<_>>(), vec!["dirt", "stone", "air"]);
        assert_eq!(indices, vec![0, 1, 0, 2, 1]);
        for (identifier, index) in ["dirt", "stone", "dirt", "air", "stone"].iter().zip(indices) {
            assert_eq!(palette.get(index), Some(*identifier));
        }
    }

    #[test]
    fn full_palette_fits() {
        let names: Vec<String> = (0..255).map(|i| format!("block_{i}")).collect();
        let (palette, indices) =
            Palette::from_identifiers(names.iter().map(String::as_str)).unwrap();
        assert_eq!(palette.len(), 255);
        assert_eq!(indices.last(), Some(&254));

        let mut buf = Vec::new();
        palette.write(&mut buf).unwrap();
        assert_eq!(buf[0], 255);
    }

    #[test]
    fn overflow_is_an_error() {
        let names: Vec<String> = (0..256).map(|i| format!("block_{i}")).collect();
        assert_eq!(
            Palette::from_identifiers(names.iter().map(String::as_str)),
            Err(PaletteOverflow { size: 256 })
        );
    }

    #[test]
    fn repeated_identifiers_never_overflow() {
        let mut palette = Palette::default();
        for _ in 0..4096 {
            assert_eq!(palette.index_of("stone"), Ok(0));
        }
        assert_eq!(palette.len(), 1);
    }
}
