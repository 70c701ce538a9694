//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod art;
mod pattern;
mod series;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::schema::MAX_PREVIEW_SCALE;
use crate::config::{self, BeadConfig, CliOverrides};

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// beadgrid - Turn images into bead and pixel-art patterns
#[derive(Parser)]
#[command(name = "beadgrid")]
#[command(about = "beadgrid - Convert images into palette-constrained bead patterns and pixel art")]
#[command(version)]
pub struct Cli {
    /// Log pipeline decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: nearest beadgrid.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match an image against a color database and write a bead pattern
    Pattern {
        /// Source image (any format the image crate decodes)
        image: PathBuf,

        /// Color database JSON (default: [pattern].database from config)
        database: Option<PathBuf>,

        /// Grid width in cells (default: 50)
        #[arg(short, long)]
        width: Option<u32>,

        /// Series to use (default: the series with the most colors)
        #[arg(short, long)]
        series: Option<String>,

        /// Pattern document path or directory (default: {image}_pattern.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render the matched pattern to this PNG
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Preview pixels per cell (1-64, default: 8)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PREVIEW_SCALE as i64))]
        scale: Option<u32>,

        /// Don't draw cell borders in the preview
        #[arg(long)]
        no_grid: bool,
    },
    /// Reduce an image to free pixel art with a limited number of colors
    Art {
        /// Source image
        image: PathBuf,

        /// Grid width in cells (default: 150)
        #[arg(short, long)]
        width: Option<u32>,

        /// Maximum number of colors (2-256, default: 48)
        #[arg(short, long)]
        colors: Option<usize>,

        /// Output PNG path or directory (default: {image}_art.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixels per cell (1-64, default: 8)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PREVIEW_SCALE as i64))]
        scale: Option<u32>,

        /// Don't draw cell borders
        #[arg(long)]
        no_grid: bool,
    },
    /// List the series in a color database, most colors first
    Series {
        /// Color database JSON (default: [pattern].database from config)
        database: Option<PathBuf>,
    },
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or pipeline info with
/// `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "beadgrid=info"
    } else {
        "beadgrid=warn"
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();
}

/// Load config, apply CLI overrides and re-validate the result.
fn load_settings(path: Option<&Path>, overrides: &CliOverrides) -> Result<BeadConfig, ExitCode> {
    let mut settings = config::load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    config::merge_cli_overrides(&mut settings, overrides);

    let errors = settings.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(settings)
}

/// Database from the command line, falling back to the config.
fn database_path(arg: Option<PathBuf>, settings: &BeadConfig) -> Result<PathBuf, ExitCode> {
    arg.or_else(|| settings.pattern.database.clone())
        .ok_or_else(|| {
            eprintln!(
                "Error: no color database given \
                 (pass a path or set [pattern].database in beadgrid.toml)"
            );
            ExitCode::from(EXIT_INVALID_ARGS)
        })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Pattern {
            image,
            database,
            width,
            series,
            output,
            preview,
            scale,
            no_grid,
        } => {
            let overrides = CliOverrides {
                pattern_width: width,
                series,
                scale,
                grid: no_grid.then_some(false),
                ..Default::default()
            };
            load_settings(config_path, &overrides).and_then(|settings| {
                let database = database_path(database, &settings)?;
                Ok(pattern::run_pattern(
                    &image,
                    &database,
                    output.as_deref(),
                    preview.as_deref(),
                    &settings,
                ))
            })
        }
        Commands::Art {
            image,
            width,
            colors,
            output,
            scale,
            no_grid,
        } => {
            let overrides = CliOverrides {
                art_width: width,
                colors,
                scale,
                grid: no_grid.then_some(false),
                ..Default::default()
            };
            load_settings(config_path, &overrides)
                .map(|settings| art::run_art(&image, output.as_deref(), &settings))
        }
        Commands::Series { database } => {
            load_settings(config_path, &CliOverrides::default()).and_then(|settings| {
                let database = database_path(database, &settings)?;
                Ok(series::run_series(&database))
            })
        }
    };

    result.unwrap_or_else(|code| code)
}
