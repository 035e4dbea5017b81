//! Time-column standardization.
//!
//! Recipe exports mix bare numbers, ISO-8601-style durations, and free
//! text ("1 hr 30 mins"). Everything is reduced to integer minutes, with
//! blank or unparsable cells treated as zero rather than errors.

use crate::table::Table;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^pt(?:(\d+(?:\.\d+)?)h)?(?:(\d+(?:\.\d+)?)m)?").unwrap())
}

fn hour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:h|hr|hour|hours)").unwrap())
}

fn minute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:m|min|mins|minute|minutes)").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").unwrap())
}

fn captured_number(caps: &regex::Captures, group: usize) -> f64 {
    caps.get(group)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse one duration cell into whole minutes. Never fails; anything
/// unusable is zero.
pub fn parse_time_to_minutes(value: &str) -> u32 {
    let text = value.trim().to_lowercase();
    if text.is_empty() || matches!(text.as_str(), "none" | "nan" | "null") {
        return 0;
    }
    if let Ok(number) = text.parse::<f64>() {
        return number.max(0.0).round() as u32;
    }
    if let Some(caps) = iso_re().captures(&text) {
        if caps.get(1).is_some() || caps.get(2).is_some() {
            let hours = captured_number(&caps, 1);
            let minutes = captured_number(&caps, 2);
            return (hours * 60.0 + minutes).round() as u32;
        }
    }

    let hours = hour_re()
        .captures(&text)
        .map(|caps| captured_number(&caps, 1));
    let minutes = minute_re()
        .captures(&text)
        .map(|caps| captured_number(&caps, 1));
    if hours.is_none() && minutes.is_none() {
        return number_re()
            .find(&text)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|m| m.round() as u32)
            .unwrap_or(0);
    }
    (hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0)).round() as u32
}

/// Add `prep_time_minutes`, `cook_time_minutes`, and `total_time_minutes`.
/// A missing source column contributes zeros; a missing `total_time` is
/// reconstructed as prep + cook.
pub fn standardize_times(table: &mut Table) -> Result<()> {
    let prep = minutes_column(table, "prep_time");
    let cook = minutes_column(table, "cook_time");
    let total = match table.column_index("total_time") {
        Some(_) => minutes_column(table, "total_time"),
        None => prep.iter().zip(&cook).map(|(p, c)| p + c).collect(),
    };

    table.add_column("prep_time_minutes", to_cells(&prep))?;
    table.add_column("cook_time_minutes", to_cells(&cook))?;
    table.add_column("total_time_minutes", to_cells(&total))?;
    Ok(())
}

fn minutes_column(table: &Table, name: &str) -> Vec<u32> {
    match table.column_index(name) {
        Some(idx) => (0..table.row_count())
            .map(|row| parse_time_to_minutes(table.cell(row, idx)))
            .collect(),
        None => vec![0; table.row_count()],
    }
}

fn to_cells(minutes: &[u32]) -> Vec<String> {
    minutes.iter().map(u32::to_string).collect()
}
