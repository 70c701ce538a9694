//! beadgrid - Command-line tool for turning images into bead patterns and pixel art

use std::process::ExitCode;

use beadgrid::cli;

fn main() -> ExitCode {
    cli::run()
}
