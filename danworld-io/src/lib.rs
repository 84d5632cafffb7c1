use std::io::{Read, Write};

use thiserror::Error;

pub mod compress;

/// Longest string the one byte length prefix can describe
pub const MAX_STRING_LENGTH: usize = u8::MAX as usize;

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("incomplete: {0}")]
    Incomplete(String),
    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),
}

#[derive(Debug, Error)]
pub enum WritingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("String of {0} bytes does not fit a one byte length prefix")]
    StringTooLong(usize),
}

/// Big-endian primitives of the export format. There are no variable-length integers.
pub trait DanReadExt {
    fn get_u8_be(&mut self) -> Result<u8, ReadingError>;
    fn get_i16_be(&mut self) -> Result<i16, ReadingError>;
    fn get_u16_be(&mut self) -> Result<u16, ReadingError>;
    fn read_boxed_slice(&mut self, count: usize) -> Result<Box<[u8]>, ReadingError>;

    /// One length byte followed by that many UTF-8 bytes
    fn get_string(&mut self) -> Result<String, ReadingError>;
}

impl<R: Read> DanReadExt for R {
    fn get_u8_be(&mut self) -> Result<u8, ReadingError> {
        let mut buf = [0u8];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(u8::from_be_bytes(buf))
    }

    fn get_i16_be(&mut self) -> Result<i16, ReadingError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(i16::from_be_bytes(buf))
    }

    fn get_u16_be(&mut self) -> Result<u16, ReadingError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(u16::from_be_bytes(buf))
    }

    fn read_boxed_slice(&mut self, count: usize) -> Result<Box<[u8]>, ReadingError> {
        let mut buf = vec![0u8; count];
        self.read_exact(&mut buf)
            .map_err(|err| ReadingError::Incomplete(err.to_string()))?;

        Ok(buf.into())
    }

    fn get_string(&mut self) -> Result<String, ReadingError> {
        let size = self.get_u8_be()? as usize;
        let data = self.read_boxed_slice(size)?;
        String::from_utf8(data.into()).map_err(|e| ReadingError::InvalidUtf8(e.to_string()))
    }
}

pub trait DanWriteExt {
    fn write_u8_be(&mut self, data: u8) -> Result<(), WritingError>;
    fn write_i16_be(&mut self, data: i16) -> Result<(), WritingError>;
    fn write_u16_be(&mut self, data: u16) -> Result<(), WritingError>;
    fn write_slice(&mut self, data: &[u8]) -> Result<(), WritingError>;

    /// One length byte followed by the raw UTF-8 bytes, no terminator
    fn write_string(&mut self, data: &str) -> Result<(), WritingError>;
}

impl<W: Write> DanWriteExt for W {
    fn write_u8_be(&mut self, data: u8) -> Result<(), WritingError> {
        self.write_all(&data.to_be_bytes())
            .map_err(WritingError::IoError)
    }

    fn write_i16_be(&mut self, data: i16) -> Result<(), WritingError> {
        self.write_all(&data.to_be_bytes())
            .map_err(WritingError::IoError)
    }

    fn write_u16_be(&mut self, data: u16) -> Result<(), WritingError> {
        self.write_all(&data.to_be_bytes())
            .map_err(WritingError::IoError)
    }

    fn write_slice(&mut self, data: &[u8]) -> Result<(), WritingError> {
        self.write_all(data).map_err(WritingError::IoError)
    }

    fn write_string(&mut self, data: &str) -> Result<(), WritingError> {
        let bytes = data.as_bytes();
        let len = u8::try_from(bytes.len()).map_err(|_| WritingError::StringTooLong(bytes.len()))?;
        self.write_u8_be(len)?;
        self.write_slice(bytes)
    }
}
