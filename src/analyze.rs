//! Summary statistics over an enriched dataset.
//!
//! Read-only reporting: calorie distribution with the recipes at the
//! extremes, difficulty label counts, and difficulty-score spread. Missing
//! columns are reported, not treated as errors, so the command is safe to
//! point at partially enriched files.

use crate::calories::CALORIE_COLUMN;
use crate::difficulty::{BUCKET_COLUMN, SCORE_COLUMN};
use crate::table::Table;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

pub fn run_analyze(input: &Path) -> Result<()> {
    let table = Table::load_csv(input)?;
    report_numeric_column(&table, CALORIE_COLUMN, "Calorie analysis");
    report_difficulty_counts(&table);
    report_numeric_column(&table, SCORE_COLUMN, "Difficulty score analysis");
    Ok(())
}

/// Non-empty numeric cells of a column as (row, value) pairs.
fn numeric_cells(table: &Table, col: usize) -> Vec<(usize, f64)> {
    (0..table.row_count())
        .filter_map(|row| {
            table
                .cell(row, col)
                .trim()
                .parse::<f64>()
                .ok()
                .map(|value| (row, value))
        })
        .collect()
}

/// Interpolated percentile over sorted values, pandas-style.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * q;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = position - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}

fn recipe_label(table: &Table, row: usize) -> String {
    match table.column_index("recipe_name") {
        Some(col) => table.cell(row, col).to_string(),
        None => "N/A".to_string(),
    }
}

fn report_numeric_column(table: &Table, column: &str, title: &str) {
    let Some(col) = table.column_index(column) else {
        println!("{title}: column '{column}' not found");
        return;
    };
    let cells = numeric_cells(table, col);
    if cells.is_empty() {
        println!("{title}: no numeric values in '{column}'");
        return;
    }

    let mut sorted: Vec<f64> = cells.iter().map(|&(_, value)| value).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let median = percentile(&sorted, 0.5);

    let (Some(&(min_row, min_value)), Some(&(max_row, max_value)), Some(&(median_row, _))) = (
        cells.iter().min_by(|a, b| a.1.total_cmp(&b.1)),
        cells.iter().max_by(|a, b| a.1.total_cmp(&b.1)),
        cells
            .iter()
            .min_by(|a, b| (a.1 - median).abs().total_cmp(&(b.1 - median).abs())),
    ) else {
        return;
    };

    println!("{title} ({} rows):", sorted.len());
    println!("  mean: {mean:.2}");
    println!(
        "  median: {median:.2} ({} at row {median_row})",
        recipe_label(table, median_row)
    );
    println!("  25th percentile: {:.2}", percentile(&sorted, 0.25));
    println!("  75th percentile: {:.2}", percentile(&sorted, 0.75));
    println!(
        "  min: {min_value:.2} ({} at row {min_row})",
        recipe_label(table, min_row)
    );
    println!(
        "  max: {max_value:.2} ({} at row {max_row})",
        recipe_label(table, max_row)
    );
}

fn report_difficulty_counts(table: &Table) {
    let Some(col) = table.column_index(BUCKET_COLUMN) else {
        println!("Difficulty counts: column '{BUCKET_COLUMN}' not found");
        return;
    };
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in 0..table.row_count() {
        let label = table.cell(row, col).trim();
        if !label.is_empty() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    println!("Difficulty counts:");
    for (label, count) in counts {
        println!("  {label}: {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_between_values() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 0.5), 25.0);
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 1.0), 40.0);
        assert_eq!(percentile(&sorted, 0.25), 17.5);
    }

    #[test]
    fn numeric_cells_skip_blanks_and_garbage() {
        let mut table = Table::new(vec!["total_calories_usda".to_string()]);
        table.push_row(vec!["470.0".to_string()]);
        table.push_row(vec![String::new()]);
        table.push_row(vec!["n/a".to_string()]);
        table.push_row(vec!["12.5".to_string()]);
        let cells = numeric_cells(&table, 0);
        assert_eq!(cells, vec![(0, 470.0), (3, 12.5)]);
    }
}
