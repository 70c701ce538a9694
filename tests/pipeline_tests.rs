//! Integration tests for the library pipeline
//!
//! Exercise the public API from database text and generated images through
//! to matched grids and bills of materials.

use beadgrid::color::Rgb;
use beadgrid::database::ColorDatabase;
use beadgrid::grid::downsample;
use beadgrid::matcher::{match_grid, match_grid_par, nearest};
use beadgrid::palette::build_palette;
use beadgrid::pipeline::{convert_art, convert_pattern, PatternOptions};
use beadgrid::quantize::distinct_colors;
use beadgrid::series::{list_series, select_series, MatchMode};
use beadgrid::PatternError;
use image::RgbImage;

const MIXED_DB: &str = r##"{
    "ff0000": [
        {"colorName": "H-R", "colorTitle": "Hama"},
        {"colorName": "M-R", "colorTitle": "Mard-221"}
    ],
    "00ff00": [
        {"colorName": "M-G", "colorTitle": "Mard-221"}
    ],
    "#0000FF": [
        {"colorName": "X-B", "colorTitle": "Brand Mard-221"},
        {"colorName": "H-B", "colorTitle": "Hama"}
    ],
    "ffffff": [
        {"colorName": "M-W", "colorTitle": "Mard-221"}
    ],
    "000000": [
        {"colorName": "M-W", "colorTitle": "Mard-221"}
    ],
    "not-a-color": [
        {"colorName": "?", "colorTitle": "Mard-221"}
    ]
}"##;

fn checkerboard(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / 10 + y / 10) % 2 == 0 {
            image::Rgb([250, 10, 10])
        } else {
            image::Rgb([10, 10, 250])
        }
    })
}

#[test]
fn test_end_to_end_two_cells() {
    let db = ColorDatabase::from_json_str(
        r#"{"ff0000":[{"colorName":"R1","colorTitle":"A"}],
            "00ff00":[{"colorName":"G1","colorTitle":"A"}]}"#,
    )
    .unwrap();
    let image = RgbImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 255, 0])
        }
    });

    let options = PatternOptions {
        width: 2,
        series: Some("A".to_string()),
    };
    let pattern = convert_pattern(&image, &db, &options).unwrap();

    assert_eq!(pattern.names().cells(), &["R1".to_string(), "G1".to_string()]);
    let bom: Vec<(String, usize)> = pattern
        .bill_of_materials()
        .into_iter()
        .map(|e| (e.name, e.count))
        .collect();
    assert_eq!(bom, vec![("R1".to_string(), 1), ("G1".to_string(), 1)]);
}

#[test]
fn test_mixed_database_series_listing() {
    let db = ColorDatabase::from_json_str(MIXED_DB).unwrap();
    assert_eq!(db.skipped_keys(), &["not-a-color".to_string()]);

    let listed: Vec<(String, usize)> = list_series(&db)
        .into_iter()
        .map(|s| (s.title, s.count))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Mard-221".to_string(), 4),
            ("Hama".to_string(), 2),
            ("Brand Mard-221".to_string(), 1)
        ]
    );
}

#[test]
fn test_strict_palette_excludes_substring_titles_and_duplicates() {
    let db = ColorDatabase::from_json_str(MIXED_DB).unwrap();

    let (palette, selection) = build_palette(&db, None).unwrap();
    assert_eq!(selection.series, "Mard-221");
    assert_eq!(selection.mode, MatchMode::Strict);

    let names: Vec<&str> = palette.iter().map(|e| e.display_name.as_str()).collect();
    // No X-B from "Brand Mard-221"; the second M-W (black) is dropped
    assert_eq!(names, vec!["M-R", "M-G", "M-W"]);
    assert_eq!(palette.by_name("M-W").unwrap().rgb, Rgb::WHITE);
}

#[test]
fn test_fuzzy_palette_prefers_exact_then_substring() {
    let db = ColorDatabase::from_json_str(MIXED_DB).unwrap();

    let selection = select_series(&db, Some("Mard")).unwrap();
    assert_eq!(selection.mode, MatchMode::Fuzzy);
    assert!(selection.warning().is_some());

    let (palette, _) = build_palette(&db, Some("Mard")).unwrap();
    let names: Vec<&str> = palette.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(names, vec!["M-R", "M-G", "X-B", "M-W"]);
}

#[test]
fn test_pattern_tally_matches_grid_size() {
    let db = ColorDatabase::from_json_str(MIXED_DB).unwrap();
    let options = PatternOptions {
        width: 40,
        series: Some("Hama".to_string()),
    };

    let pattern = convert_pattern(&checkerboard(200, 100), &db, &options).unwrap();
    assert_eq!((pattern.width(), pattern.height()), (40, 20));
    assert_eq!(pattern.usage.total(), 800);
    assert_eq!(pattern.usage.count_of(&pattern.palette, "H-R"), Some(400));
    assert_eq!(pattern.usage.count_of(&pattern.palette, "H-B"), Some(400));
}

#[test]
fn test_parallel_matching_is_deterministic() {
    let db = ColorDatabase::from_json_str(MIXED_DB).unwrap();
    let (palette, _) = build_palette(&db, Some("Mard")).unwrap();
    let image = RgbImage::from_fn(123, 77, |x, y| {
        image::Rgb([(x * 2) as u8, (y * 3) as u8, ((x + y) % 256) as u8])
    });
    let grid = downsample(&image, 61).unwrap();

    let sequential = match_grid(&grid, &palette).unwrap();
    for _ in 0..4 {
        assert_eq!(match_grid_par(&grid, &palette).as_ref(), Some(&sequential));
    }
    for (color, &index) in grid.cells().iter().zip(sequential.cells()) {
        assert_eq!(nearest(*color, &palette), Some(index));
    }
}

#[test]
fn test_missing_series_reports_series_and_mode() {
    let db = ColorDatabase::from_json_str(MIXED_DB).unwrap();
    let options = PatternOptions {
        width: 10,
        series: Some("Perler".to_string()),
    };

    let err = convert_pattern(&checkerboard(20, 20), &db, &options).unwrap_err();
    assert!(matches!(err, PatternError::EmptyPalette { mode: MatchMode::Fuzzy, .. }));
    assert!(err.to_string().contains("'Perler'"));
}

#[test]
fn test_database_without_titles() {
    let db = ColorDatabase::from_json_str(r#"{"ff0000": [{"colorName": "R1"}]}"#).unwrap();
    let options = PatternOptions {
        width: 10,
        series: None,
    };
    let err = convert_pattern(&checkerboard(20, 20), &db, &options).unwrap_err();
    assert_eq!(err, PatternError::EmptyDatabase);
}

#[test]
fn test_art_mode() {
    let art = convert_art(&checkerboard(100, 100), 20, 2).unwrap();
    assert_eq!((art.width(), art.height()), (20, 20));
    assert_eq!(distinct_colors(&art), 2);
}
