use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::trace;

use danworld_config::{CompressionConfig, OutputConfig};
use danworld_io::compress::write_gzip;
use danworld_util::math::selection::Selection;

use crate::{
    region::{export_region, ExportError},
    source::WorldSource,
};

/// Receives finished region streams
pub trait ExportSink {
    fn accept(&mut self, name: &str, data: &[u8]) -> io::Result<()>;
}

/// Appends `extension` unless `name` already ends with it
pub fn with_extension(name: &str, extension: &str) -> String {
    if name.ends_with(extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}

/// Writes each export into its own file inside a folder, gzip compressed when configured
pub struct FileSink {
    folder: PathBuf,
    extension: String,
    compression: Option<u32>,
}

impl FileSink {
    pub fn new(folder: impl Into<PathBuf>, extension: &str, compression: Option<u32>) -> Self {
        Self {
            folder: folder.into(),
            extension: extension.to_string(),
            compression,
        }
    }

    pub fn from_config(output: &OutputConfig, compression: &CompressionConfig) -> Self {
        Self::new(
            &output.folder,
            &output.extension,
            compression.enabled.then_some(compression.level),
        )
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.folder.join(with_extension(name, &self.extension))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let file = File::create(path)?;
        let mut write = BufWriter::new(file);
        match self.compression {
            Some(level) => write_gzip(data, &mut write, level)?,
            None => write.write_all(data)?,
        }
        write.flush()?;
        write.get_ref().sync_all()
    }
}

impl ExportSink for FileSink {
    fn accept(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.folder)?;
        let path = self.file_path(name);
        let temp_path = path.with_extension("tmp");
        trace!("Writing tmp file to disk: {:?}", temp_path);

        if let Err(err) = self.write_file(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        // The file only appears under its real name once it is complete
        fs::rename(&temp_path, &path)?;

        trace!("Wrote file to Disk: {:?}", path);
        Ok(())
    }
}

/// Exports `selection` and hands the stream to `sink` under `name`.
///
/// Nothing reaches the sink if encoding fails.
pub fn export_to_sink<W, S>(
    world: &W,
    selection: &Selection,
    name: &str,
    sink: &mut S,
) -> Result<(), ExportError>
where
    W: WorldSource + ?Sized,
    S: ExportSink + ?Sized,
{
    let data = export_region(world, selection)?;
    sink.accept(name, &data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, io};

    use danworld_util::math::{position::BlockPos, selection::Selection};
    use temp_dir::TempDir;

    use crate::{
        biome::Biome,
        region::{ExportError, ExportedRegion},
        source::MemoryWorldSource,
    };

    use super::{export_to_sink, with_extension, ExportSink, FileSink};

    struct FailingSink;

    impl ExportSink for FailingSink {
        fn accept(&mut self, _name: &str, _data: &[u8]) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        accepted: Vec<String>,
    }

    impl ExportSink for RecordingSink {
        fn accept(&mut self, name: &str, _data: &[u8]) -> io::Result<()> {
            self.accepted.push(name.to_string());
            Ok(())
        }
    }

    fn one_chunk() -> Selection {
        Selection::new(BlockPos::new(0, 0, 0), BlockPos::new(16, 16, 16))
    }

    #[test]
    fn extension_is_added_once() {
        assert_eq!(with_extension("spawn", ".dan"), "spawn.dan");
        assert_eq!(with_extension("spawn.dan", ".dan"), "spawn.dan");
    }

    #[test]
    fn gzip_file_loads_back() {
        let _ = env_logger::try_init();

        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("exports");
        let mut sink = FileSink::new(&folder, ".dan", Some(6));
        let world = MemoryWorldSource::new("stone", Biome::Plains);

        export_to_sink(&world, &one_chunk(), "spawn", &mut sink).unwrap();

        let path = folder.join("spawn.dan");
        assert!(path.exists());
        assert!(!folder.join("spawn.tmp").exists());
        let raw = fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);

        let region = ExportedRegion::load(&path).unwrap();
        assert_eq!(region.chunks[0].sections[0].palette, vec!["stone"]);
    }

    #[test]
    fn uncompressed_file_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(temp_dir.path(), ".dan", None);
        let world = MemoryWorldSource::new("dirt", Biome::Plains);

        export_to_sink(&world, &one_chunk(), "raw.dan", &mut sink).unwrap();

        let path = temp_dir.path().join("raw.dan");
        assert_eq!(fs::read(&path).unwrap()[0], 8);
        let region = ExportedRegion::load(&path).unwrap();
        assert_eq!(region.chunks[0].sections[0].palette, vec!["dirt"]);
    }

    #[test]
    fn sink_failure_is_reported() {
        let world = MemoryWorldSource::new("stone", Biome::Plains);
        assert!(matches!(
            export_to_sink(&world, &one_chunk(), "spawn", &mut FailingSink),
            Err(ExportError::Io(_))
        ));
    }

    #[test]
    fn failed_export_reaches_no_sink() {
        let world = MemoryWorldSource::new("stone", Biome::Plains);
        let inverted = Selection::new(BlockPos::new(16, 16, 16), BlockPos::new(0, 0, 0));
        let mut sink = RecordingSink::default();

        assert!(export_to_sink(&world, &inverted, "spawn", &mut sink).is_err());
        assert!(sink.accepted.is_empty());

        export_to_sink(&world, &one_chunk(), "spawn", &mut sink).unwrap();
        assert_eq!(sink.accepted, vec!["spawn"]);
    }
}
