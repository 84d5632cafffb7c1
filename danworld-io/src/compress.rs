use std::io::{self, Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Writes `data` gzip compressed into `output`.
///
/// The encoder is finished before returning, so `output` holds a complete gzip member.
pub fn write_gzip(data: &[u8], output: impl Write, level: u32) -> io::Result<()> {
    let mut encoder = GzEncoder::new(output, Compression::new(level));
    encoder.write_all(data)?;
    encoder.finish()?;
    Ok(())
}

/// Reads an entire gzip stream into memory
pub fn read_gzip(input: impl Read) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(input);
    let mut data = Vec::new();
    decoder.read_to_end(&mut data)?;
    Ok(data)
}

/// Checks for the gzip member header
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}
