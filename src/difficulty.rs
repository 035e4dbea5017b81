//! Difficulty scoring: total minutes times direction count.
//!
//! The score is a coarse effort proxy, bucketed into easy/medium/hard with
//! fixed thresholds.

use crate::table::Table;
use crate::util::{item_text, parse_list_literal};
use anyhow::Result;

pub const SCORE_COLUMN: &str = "difficulty_score";
pub const BUCKET_COLUMN: &str = "difficulty";

/// Count direction steps: list literals count their non-blank items, text
/// splits on newlines with a period fallback.
pub fn count_steps(value: &str) -> usize {
    let text = value.trim();
    if text.is_empty() {
        return 0;
    }
    if let Some(items) = parse_list_literal(text) {
        return items
            .iter()
            .filter(|item| !item_text(item).trim().is_empty())
            .count();
    }
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if lines.len() > 1 {
        return lines.len();
    }
    text.split('.')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .count()
}

pub fn bucket_for_score(score: f64) -> &'static str {
    if score < 200.0 {
        "easy"
    } else if score < 600.0 {
        "medium"
    } else {
        "hard"
    }
}

fn minutes_cell(value: &str) -> f64 {
    value.trim().parse::<f64>().map(|v| v.max(0.0)).unwrap_or(0.0)
}

/// Append `difficulty_score` and `difficulty`. Minutes prefer the
/// standardized `total_time_minutes` column, falling back to a raw
/// `total_time`; directions are located by name. Missing columns
/// contribute zero, which lands every row in the easy bucket.
pub fn add_difficulty(table: &mut Table) -> Result<()> {
    let minutes_col = table
        .column_index("total_time_minutes")
        .or_else(|| table.column_index("total_time"));
    let directions_col = table
        .column_index("directions")
        .or_else(|| {
            table
                .columns_containing(&["direction", "instruction", "step"])
                .first()
                .copied()
        });

    let mut scores = Vec::with_capacity(table.row_count());
    let mut buckets = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let minutes = minutes_col.map_or(0.0, |col| minutes_cell(table.cell(row, col)));
        let steps = directions_col.map_or(0, |col| count_steps(table.cell(row, col)));
        let score = (minutes * steps as f64 * 100.0).round() / 100.0;
        scores.push(format!("{score:.2}"));
        buckets.push(bucket_for_score(score).to_string());
    }
    table.add_column(SCORE_COLUMN, scores)?;
    table.add_column(BUCKET_COLUMN, buckets)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_list_literal_steps() {
        assert_eq!(count_steps(r#"["mix", "bake", "cool"]"#), 3);
        assert_eq!(count_steps("['mix', 'bake', '', 'serve']"), 3);
    }

    #[test]
    fn counts_newline_steps_with_period_fallback() {
        assert_eq!(count_steps("Mix the batter.\nBake it.\nServe."), 3);
        assert_eq!(count_steps("Mix the batter. Bake it. Serve warm."), 3);
        assert_eq!(count_steps(""), 0);
    }

    #[test]
    fn scores_and_buckets_rows() {
        let mut table = Table::new(vec![
            "total_time_minutes".to_string(),
            "directions".to_string(),
        ]);
        table.push_row(vec!["30".to_string(), "Mix.\nBake.".to_string()]);
        table.push_row(vec!["100".to_string(), "Mix.\nBake.\nRest.\nServe.".to_string()]);
        table.push_row(vec!["200".to_string(), "['a','b','c','d']".to_string()]);
        add_difficulty(&mut table).expect("difficulty");

        let score = table.column_index(SCORE_COLUMN).expect("score column");
        let bucket = table.column_index(BUCKET_COLUMN).expect("bucket column");
        assert_eq!(table.cell(0, score), "60.00");
        assert_eq!(table.cell(0, bucket), "easy");
        assert_eq!(table.cell(1, score), "400.00");
        assert_eq!(table.cell(1, bucket), "medium");
        assert_eq!(table.cell(2, score), "800.00");
        assert_eq!(table.cell(2, bucket), "hard");
    }

    #[test]
    fn missing_columns_score_zero() {
        let mut table = Table::new(vec!["recipe_name".to_string()]);
        table.push_row(vec!["Toast".to_string()]);
        add_difficulty(&mut table).expect("difficulty");

        let score = table.column_index(SCORE_COLUMN).expect("score column");
        let bucket = table.column_index(BUCKET_COLUMN).expect("bucket column");
        assert_eq!(table.cell(0, score), "0.00");
        assert_eq!(table.cell(0, bucket), "easy");
    }
}
