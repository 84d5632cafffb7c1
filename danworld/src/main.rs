use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use danworld_config::{ConfigError, ExportConfiguration, LoadConfiguration, LoggingConfig};
use danworld_util::math::selection::{Selection, SelectionError};
use danworld_world::{
    generation::FlatWorldSource,
    region::{ExportError, ExportedRegion, ImportError},
    sink::{export_to_sink, FileSink},
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use thiserror::Error;

mod inspect;

use inspect::RegionSummary;

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "usage:
  danworld export <name> <x:y:z> <x:y:z>
  danworld inspect <file>";

#[derive(Debug, PartialEq)]
enum Command {
    Export { name: String, selection: Selection },
    Inspect { file: String },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Couldn't load config: {0}")]
    Config(#[from] ConfigError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Couldn't read region: {0}")]
    Import(#[from] ImportError),
    #[error("Couldn't write summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Io error: {0}")]
    Io(#[from] io::Error),
}

fn parse_args(args: &[String]) -> Result<Command, CliError> {
    match args {
        [command, name, min, max] if command == "export" => Ok(Command::Export {
            name: name.clone(),
            selection: Selection::from_corners(min, max)?,
        }),
        [command, file] if command == "inspect" => Ok(Command::Inspect { file: file.clone() }),
        [] => Err(CliError::Usage("missing command".to_string())),
        [command, ..] => Err(CliError::Usage(format!(
            "unknown command or wrong arguments for `{command}`"
        ))),
    }
}

fn init_log(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }

    let mut builder = ConfigBuilder::new();
    builder.set_thread_level(LevelFilter::Off);
    if !config.timestamp {
        builder.set_time_level(LevelFilter::Off);
    }
    let color = if config.color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    if TermLogger::init(config.level, builder.build(), TerminalMode::Mixed, color).is_err() {
        eprintln!("A logger was already installed");
    }
}

fn export(config: &ExportConfiguration, name: &str, selection: &Selection) -> Result<(), CliError> {
    let time = Instant::now();
    let world = FlatWorldSource::new(&config.flat);
    let mut sink = FileSink::from_config(&config.output, &config.compression);

    export_to_sink(&world, selection, name, &mut sink)?;

    log::info!(
        "Exported {} to {:?}, took {}ms",
        selection,
        sink.file_path(name),
        time.elapsed().as_millis()
    );
    Ok(())
}

/// Accepts a path, or the name of an export inside the output folder
fn resolve_region_path(config: &ExportConfiguration, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.exists() {
        path.to_path_buf()
    } else {
        FileSink::from_config(&config.output, &config.compression).file_path(file)
    }
}

fn inspect(config: &ExportConfiguration, file: &str) -> Result<(), CliError> {
    let path = resolve_region_path(config, file);
    let region = ExportedRegion::load(&path)?;
    log::debug!("Loaded {:?}", path);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &RegionSummary::from(&region))?;
    writeln!(stdout)?;
    Ok(())
}

fn run(config: &ExportConfiguration, args: &[String]) -> Result<(), CliError> {
    match parse_args(args)? {
        Command::Export { name, selection } => export(config, &name, &selection),
        Command::Inspect { file } => inspect(config, &file),
    }
}

fn main() -> ExitCode {
    let exec_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("Couldn't determine the working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match ExportConfiguration::load(&exec_dir) {
        Ok(config) => config,
        Err(err) => {
            init_log(&LoggingConfig::default());
            log::error!("{}", CliError::from(err));
            return ExitCode::FAILURE;
        }
    };
    init_log(&config.logging);
    log::debug!("Running danworld {CARGO_PKG_VERSION}");

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use danworld_util::math::{position::BlockPos, selection::Selection};

    use super::{parse_args, CliError, Command};

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn export_command() {
        assert_eq!(
            parse_args(&args(&["export", "spawn", "-16:0:-16", "16:64:16"])).unwrap(),
            Command::Export {
                name: "spawn".to_string(),
                selection: Selection::new(BlockPos::new(-16, 0, -16), BlockPos::new(16, 64, 16)),
            }
        );
    }

    #[test]
    fn inspect_command() {
        assert_eq!(
            parse_args(&args(&["inspect", "spawn.dan"])).unwrap(),
            Command::Inspect {
                file: "spawn.dan".to_string()
            }
        );
    }

    #[test]
    fn bad_arguments() {
        assert!(matches!(parse_args(&[]), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(&args(&["export", "spawn"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&args(&["export", "spawn", "0:0", "1:1:1"])),
            Err(CliError::Selection(_))
        ));
    }
}
