//! Pattern command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::BeadConfig;
use crate::database::ColorDatabase;
use crate::output::{self, PreviewStyle};
use crate::pipeline::{convert_pattern, Pattern, PatternOptions};

/// Execute the pattern command
pub fn run_pattern(
    image_path: &Path,
    database_path: &Path,
    output: Option<&Path>,
    preview: Option<&Path>,
    settings: &BeadConfig,
) -> ExitCode {
    let db = match ColorDatabase::load(database_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error: '{}': {}", database_path.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let image = match output::load_image(image_path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: '{}': {}", image_path.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let options = PatternOptions {
        width: settings.pattern.width,
        series: settings.pattern.series.clone(),
    };
    let pattern = match convert_pattern(&image, &db, &options) {
        Ok(pattern) => pattern,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Some(warning) = pattern.warning() {
        eprintln!("Warning: {}", warning);
    }

    let output_path = output::generate_output_path(image_path, "_pattern", "json", output);
    if let Err(e) = output::write_pattern_json(&pattern, &output_path) {
        eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if let Some(preview_path) = preview {
        let style = PreviewStyle {
            scale: settings.preview.scale,
            grid_color: settings.preview.grid.then(|| settings.preview.grid_rgb()),
        };
        let rendered = output::render_preview(&pattern.colors(), style);
        if let Err(e) = output::save_png(&rendered, preview_path) {
            eprintln!("Error: Failed to write '{}': {}", preview_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Preview: {}", preview_path.display());
    }

    print_summary(&pattern, &output_path);
    ExitCode::from(EXIT_SUCCESS)
}

fn print_summary(pattern: &Pattern, output_path: &Path) {
    println!(
        "Pattern: {} ({}x{})",
        output_path.display(),
        pattern.width(),
        pattern.height()
    );
    println!(
        "Series: {} ({} mode)",
        pattern.selection.series, pattern.selection.mode
    );
    println!(
        "Palette: {} colors, {} used",
        pattern.palette.len(),
        pattern.usage.used()
    );
    println!();
    println!(
        "  {:<12} {:<24} {:<8} {:>6}",
        "NAME", "SERIES", "HEX", "COUNT"
    );
    for line in pattern.bill_of_materials() {
        println!(
            "  {:<12} {:<24} {:<8} {:>6}",
            line.name, line.series, line.hex, line.count
        );
    }
    println!(
        "  {:<12} {:<24} {:<8} {:>6}",
        "",
        "",
        "TOTAL",
        pattern.usage.total()
    );
}
