use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};
use tempfile::NamedTempFile;

use vk_cpp_generator::{GenConfig, VkRegistry, Result};

/// Generates a type-safe C++ header from the Vulkan XML registry
#[derive(Parser, Debug)]
#[command(name = "vk_cpp_generator", version)]
struct Cli {
    /// The registry file, usually vk.xml
    spec_file: PathBuf,

    /// Write the header here instead of to stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// C++ namespace of the generated declarations
    #[arg(long, default_value = "vk")]
    namespace: String,

    /// Log more; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8
}

/// Writes log records to stderr, so they never end up in a header written to stdout.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let tag = match record.level() {
                Level::Error => "ERROR",
                Level::Warn  => "WARNING",
                Level::Info  => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE"
            };
            eprintln!("[{}] {}", tag, record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    // Only fails if a logger is already installed
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let xml = fs::read(&cli.spec_file)?;
    let registry = VkRegistry::new(&xml)?;
    let config = GenConfig {
        namespace: &cli.namespace,
        ..GenConfig::default()
    };

    // Rendered completely before the output is touched
    let header = registry.gen_cpp(config)?;
    match cli.output {
        Some(ref path) => {
            write_atomically(path, header.as_bytes())?;
            log::info!("wrote {} bytes to {}", header.len(), path.display());
        }
        None           => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(header.as_bytes())?;
            lock.flush()?;
        }
    }
    Ok(())
}

/// Writes `contents` to a temporary file next to `path` and renames it over `path`, so `path`
/// either keeps its old contents or gets all of the new ones.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _                                        => Path::new(".")
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {}: {}", e.stage(), e);
        process::exit(1);
    }
}
