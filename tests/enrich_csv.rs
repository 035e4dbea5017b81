//! Integration tests for the `renrich` binary.
//!
//! Every test runs offline: the API key is explicitly removed from the
//! environment, so the calorie stage exercises its degraded path (every
//! lookup records the "no data" marker) while the rest of the pipeline
//! produces real values.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const INPUT_CSV: &str = "\
recipe_name,cuisine_path,prep_time,cook_time,total_time,directions,ingredients
Pancakes,/Desserts/Cakes/,PT10M,PT15M,PT25M,Mix. Fry. Serve.,\"['2 cups flour', '1 egg']\"
Carbonara,/World Cuisine/Italian/,10,20,30,Boil. Toss.,bacon; egg; cheese
Sorbet,/Desserts/Frozen/,5,0,5,Freeze.,\"['fruit']\"
";

fn run_renrich(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_renrich"))
        .args(args)
        .env_remove("FDC_API_KEY")
        .output()
        .expect("run renrich")
}

fn load_output(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("open output CSV");
    let headers = reader
        .headers()
        .expect("read headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("read row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}

fn cell<'a>(headers: &[String], rows: &'a [Vec<String>], row: usize, name: &str) -> &'a str {
    let col = headers
        .iter()
        .position(|h| h == name)
        .unwrap_or_else(|| panic!("missing column {name}"));
    &rows[row][col]
}

#[test]
fn enrich_without_api_key_appends_every_derived_column() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("recipes.csv");
    let output = dir.path().join("enriched.csv");
    let cache = dir.path().join("fdc_cache.json");
    std::fs::write(&input, INPUT_CSV).expect("write input");

    let result = run_renrich(&[
        "enrich",
        input.to_str().expect("utf-8 path"),
        output.to_str().expect("utf-8 path"),
        "--max-rows",
        "2",
        "--cache",
        cache.to_str().expect("utf-8 path"),
    ]);
    assert!(
        result.status.success(),
        "enrich failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let (headers, rows) = load_output(&output);
    assert_eq!(rows.len(), 3, "row order and count preserved");
    assert_eq!(headers.last().map(String::as_str), Some("total_calories_usda"));

    // time standardization
    assert_eq!(cell(&headers, &rows, 0, "prep_time_minutes"), "10");
    assert_eq!(cell(&headers, &rows, 0, "total_time_minutes"), "25");
    assert_eq!(cell(&headers, &rows, 1, "total_time_minutes"), "30");

    // classification
    assert_eq!(cell(&headers, &rows, 0, "course"), "dessert");
    assert_eq!(cell(&headers, &rows, 1, "course"), "main");
    assert_eq!(cell(&headers, &rows, 0, "cuisine_type"), "N/A");
    assert_eq!(cell(&headers, &rows, 1, "cuisine_type"), "italian");

    // dietary flags
    assert_eq!(cell(&headers, &rows, 0, "Vegetarian"), "true");
    assert_eq!(cell(&headers, &rows, 0, "Egg_Free"), "false");
    assert_eq!(cell(&headers, &rows, 1, "Vegetarian"), "false");

    // difficulty: 25 minutes x 3 steps
    assert_eq!(cell(&headers, &rows, 0, "difficulty_score"), "75.00");
    assert_eq!(cell(&headers, &rows, 0, "difficulty"), "easy");

    // calorie totals degrade to 0.0 without a key; rows beyond the
    // budget stay blank
    assert_eq!(cell(&headers, &rows, 0, "total_calories_usda"), "0.0");
    assert_eq!(cell(&headers, &rows, 1, "total_calories_usda"), "0.0");
    assert_eq!(cell(&headers, &rows, 2, "total_calories_usda"), "");
}

#[test]
fn enrich_persists_no_data_markers_in_the_cache() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("recipes.csv");
    let output = dir.path().join("enriched.csv");
    let cache = dir.path().join("fdc_cache.json");
    std::fs::write(&input, INPUT_CSV).expect("write input");

    let result = run_renrich(&[
        "calories",
        input.to_str().expect("utf-8 path"),
        output.to_str().expect("utf-8 path"),
        "--max-rows",
        "2",
        "--cache",
        cache.to_str().expect("utf-8 path"),
    ]);
    assert!(result.status.success());

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&cache).expect("read cache"))
            .expect("parse cache");
    let entries = stored.as_object().expect("cache is an object");
    for key in ["flour", "egg", "bacon", "cheese"] {
        assert!(
            entries.get(key).is_some_and(serde_json::Value::is_null),
            "expected a null marker for {key}, cache was {stored}"
        );
    }
    // the third row is beyond the budget, so its ingredient never resolves
    assert!(entries.get("fruit").is_none());
}

#[test]
fn enrich_succeeds_without_an_ingredients_column() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("recipes.csv");
    let output = dir.path().join("enriched.csv");
    let cache = dir.path().join("fdc_cache.json");
    std::fs::write(&input, "recipe_name,total_time\nToast,5\n").expect("write input");

    let result = run_renrich(&[
        "enrich",
        input.to_str().expect("utf-8 path"),
        output.to_str().expect("utf-8 path"),
        "--cache",
        cache.to_str().expect("utf-8 path"),
    ]);
    assert!(
        result.status.success(),
        "enrich failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let (headers, rows) = load_output(&output);
    assert_eq!(cell(&headers, &rows, 0, "total_calories_usda"), "");
    assert!(!cache.exists(), "no cache I/O without the ingredients column");
}

#[test]
fn analyze_reports_on_an_enriched_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("recipes.csv");
    let output = dir.path().join("enriched.csv");
    let cache = dir.path().join("fdc_cache.json");
    std::fs::write(&input, INPUT_CSV).expect("write input");

    let enrich = run_renrich(&[
        "enrich",
        input.to_str().expect("utf-8 path"),
        output.to_str().expect("utf-8 path"),
        "--cache",
        cache.to_str().expect("utf-8 path"),
    ]);
    assert!(enrich.status.success());

    let analyze = run_renrich(&["analyze", output.to_str().expect("utf-8 path")]);
    assert!(analyze.status.success());
    let stdout = String::from_utf8_lossy(&analyze.stdout);
    assert!(stdout.contains("Calorie analysis"), "stdout was: {stdout}");
    assert!(stdout.contains("Difficulty counts:"), "stdout was: {stdout}");
    assert!(stdout.contains("easy: 3"), "stdout was: {stdout}");
}
