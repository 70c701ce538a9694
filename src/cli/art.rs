//! Art command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::BeadConfig;
use crate::output::{self, PreviewStyle};
use crate::pipeline::convert_art;
use crate::quantize::distinct_colors;

/// Execute the art command
pub fn run_art(image_path: &Path, output: Option<&Path>, settings: &BeadConfig) -> ExitCode {
    let image = match output::load_image(image_path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: '{}': {}", image_path.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let art = match convert_art(&image, settings.art.width, settings.art.colors) {
        Ok(art) => art,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let style = PreviewStyle {
        scale: settings.preview.scale,
        grid_color: settings.preview.grid.then(|| settings.preview.grid_rgb()),
    };
    let output_path = output::generate_output_path(image_path, "_art", "png", output);
    if let Err(e) = output::save_png(&output::render_preview(&art, style), &output_path) {
        eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Art: {} ({}x{}, {} colors)",
        output_path.display(),
        art.width(),
        art.height(),
        distinct_colors(&art)
    );
    ExitCode::from(EXIT_SUCCESS)
}
