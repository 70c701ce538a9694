//! Series command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::database::ColorDatabase;
use crate::series::list_series;

/// Execute the series command
pub fn run_series(database_path: &Path) -> ExitCode {
    let db = match ColorDatabase::load(database_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error: '{}': {}", database_path.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let series = list_series(&db);
    if series.is_empty() {
        println!("No series found in {}", database_path.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("{:<32} {:>6}", "SERIES", "COLORS");
    for entry in &series {
        println!("{:<32} {:>6}", entry.title, entry.count);
    }
    ExitCode::from(EXIT_SUCCESS)
}
