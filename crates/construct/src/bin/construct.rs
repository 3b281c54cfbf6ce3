//! Command line entry point: writes a starting archive file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use construct::{write_archive, ConstructConfig, ConstructResult, Edition, TITLE};
use tracing::Level;

#[derive(Parser)]
#[command(name = "construct", version, about = "Create the initial archive file of a new game")]
struct Cli {
    /// Target file (default: archive.dat)
    #[arg(long)]
    file: Option<PathBuf>,
    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level to assemble
    #[arg(long)]
    level: Option<u16>,
    /// Name stored in the archive
    #[arg(long)]
    name: Option<String>,
    /// Produce the floppy edition (no CD-only blocks)
    #[arg(long)]
    floppy: bool,
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> ConstructResult<ConstructConfig> {
        let mut config = match &self.config {
            Some(path) => ConstructConfig::from_toml(path)?,
            None => ConstructConfig::default(),
        };
        if let Some(file) = &self.file {
            config.file.clone_from(file);
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(name) = &self.name {
            config.archive_name.clone_from(name);
        }
        if self.floppy {
            config.edition = Edition::Floppy;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> ConstructResult<()> {
    let config = cli.config()?;
    let summary = write_archive(&config.file, &config.plan())?;
    println!(
        "{}: wrote {} ({} chunks, {} bytes)",
        TITLE,
        config.file.display(),
        summary.chunk_count,
        summary.file_size
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Archive generation failed: {}", e);
            eprintln!("construct: {e}");
            ExitCode::FAILURE
        }
    }
}
