//! Criterion benchmarks for beadgrid critical paths
//!
//! Benchmarks the performance-sensitive stages:
//! - Database: JSON loading
//! - Palette: series selection and palette building
//! - Downsample: nearest-neighbor grid sampling
//! - Matcher: sequential and parallel nearest-color matching
//! - Quantize: median cut for art mode

use beadgrid::database::ColorDatabase;
use beadgrid::grid::{downsample, PixelGrid};
use beadgrid::matcher::{match_grid, match_grid_par};
use beadgrid::palette::{build_palette, Palette};
use beadgrid::quantize::quantize;
use beadgrid::tally::tally;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::RgbImage;

// =============================================================================
// Test Data Generators
// =============================================================================

const SERIES: [&str; 4] = ["Mard-221", "Hama Midi", "Perler", "Artkal S"];

/// Generate a color database with `colors` keys, each listed by every series
fn make_database_json(colors: usize) -> String {
    let entries: Vec<String> = (0..colors)
        .map(|i| {
            let records: Vec<String> = SERIES
                .iter()
                .enumerate()
                .map(|(s, title)| {
                    format!(
                        r#"{{"colorName": "{}{:03}", "colorTitle": "{}"}}"#,
                        s, i, title
                    )
                })
                .collect();
            format!(
                r#""{:02x}{:02x}{:02x}": [{}]"#,
                (i * 37) % 256,
                (i * 91) % 256,
                (i * 53) % 256,
                records.join(", ")
            )
        })
        .collect();
    format!("{{{}}}", entries.join(",\n"))
}

/// Generate a smooth gradient image
fn make_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 256) as u8,
        ])
    })
}

fn make_palette(colors: usize) -> Palette {
    let db = ColorDatabase::from_json_str(&make_database_json(colors)).expect("valid database");
    build_palette(&db, Some("Mard-221")).expect("non-empty palette").0
}

fn make_grid(width: u32) -> PixelGrid {
    downsample(&make_image(1200, 900), width).expect("valid dimensions")
}

// =============================================================================
// Database and Palette Benchmarks
// =============================================================================

fn bench_database(c: &mut Criterion) {
    let mut group = c.benchmark_group("database");

    for colors in [64, 256, 1024].iter() {
        let json = make_database_json(*colors);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_json_str", colors), &json, |b, json| {
            b.iter(|| ColorDatabase::from_json_str(black_box(json)))
        });
    }

    group.finish();
}

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");
    let db = ColorDatabase::from_json_str(&make_database_json(512)).expect("valid database");

    group.bench_function("build_strict", |b| {
        b.iter(|| build_palette(black_box(&db), Some("Mard-221")))
    });
    group.bench_function("build_fuzzy", |b| {
        b.iter(|| build_palette(black_box(&db), Some("Hama")))
    });
    group.bench_function("build_auto", |b| {
        b.iter(|| build_palette(black_box(&db), None))
    });

    group.finish();
}

// =============================================================================
// Downsample Benchmarks
// =============================================================================

fn bench_downsample(c: &mut Criterion) {
    let mut group = c.benchmark_group("downsample");
    let image = make_image(1200, 900);

    for width in [50, 150, 400].iter() {
        group.bench_with_input(BenchmarkId::new("1200x900", width), width, |b, &width| {
            b.iter(|| downsample(black_box(&image), width))
        });
    }

    group.finish();
}

// =============================================================================
// Matcher Benchmarks
// =============================================================================

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");

    for (width, colors) in [(50, 48), (150, 48), (150, 256)].iter() {
        let grid = make_grid(*width);
        let palette = make_palette(*colors);
        let id = format!("{}x{}_{}colors", grid.width(), grid.height(), palette.len());

        group.throughput(Throughput::Elements(grid.len() as u64));
        group.bench_function(BenchmarkId::new("sequential", &id), |b| {
            b.iter(|| match_grid(black_box(&grid), black_box(&palette)))
        });
        group.bench_function(BenchmarkId::new("parallel", &id), |b| {
            b.iter(|| match_grid_par(black_box(&grid), black_box(&palette)))
        });
    }

    let grid = make_grid(150);
    let palette = make_palette(128);
    let matched = match_grid(&grid, &palette).expect("non-empty palette");
    group.bench_function("tally_150", |b| {
        b.iter(|| tally(black_box(&matched), &palette))
    });

    group.finish();
}

// =============================================================================
// Quantize Benchmarks
// =============================================================================

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");
    let grid = make_grid(150);

    for colors in [8, 48, 256].iter() {
        group.bench_with_input(
            BenchmarkId::new("median_cut_150", colors),
            colors,
            |b, &colors| b.iter(|| quantize(black_box(&grid), colors)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_database,
    bench_palette,
    bench_downsample,
    bench_matcher,
    bench_quantize
);
criterion_main!(benches);
