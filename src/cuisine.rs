//! Course and cuisine-type classification from the `cuisine_path` column.
//!
//! Both classifiers are plain keyword matchers over a normalized form of
//! the path text. Rows without a usable path get the default label; a
//! dataset without any cuisine column still enriches cleanly.

use crate::table::Table;
use anyhow::Result;

pub const COURSE_COLUMN: &str = "course";
pub const CUISINE_TYPE_COLUMN: &str = "cuisine_type";

const DESSERT_KEYWORDS: &[&str] = &["dessert", "pie", "cake", "cookie", "sweet"];
const MAIN_KEYWORDS: &[&str] = &[
    "main", "meat", "poultry", "seafood", "bbq", "grilling", "cuisine", "everyday",
];
const APPETIZER_KEYWORDS: &[&str] = &["appetizer", "snack", "salad", "side", "bread", "soup"];

/// Controlled cuisine vocabulary, first match wins. Multi-word cuisines
/// carry their spaced form as the match pattern.
const CUISINE_PATTERNS: &[(&str, &str)] = &[
    ("american", "american"),
    ("chinese", "chinese"),
    ("japanese", "japanese"),
    ("korean", "korean"),
    ("thai", "thai"),
    ("vietnamese", "vietnamese"),
    ("indian", "indian"),
    ("middle eastern", "middle_eastern"),
    ("mediterranean", "mediterranean"),
    ("italian", "italian"),
    ("french", "french"),
    ("spanish", "spanish"),
    ("mexican", "mexican"),
    ("latin american", "latin_american"),
    ("african", "african"),
    ("caribbean", "caribbean"),
    ("british", "british"),
    ("german", "german"),
    ("nordic", "nordic"),
];

/// lowercase, trim, collapse whitespace, accept `>` and `|` as separators.
fn normalized_path(path: &str) -> String {
    path.to_lowercase()
        .replace(['>', '|'], "/")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn top_level_segment(path: &str) -> Option<String> {
    let text = normalized_path(path);
    let trimmed = text.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .split('/')
            .next()
            .unwrap_or(trimmed)
            .trim()
            .to_string(),
    )
}

fn has_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Course label for one path cell: dessert keywords win, then main-dish,
/// then appetizer; anything else defaults to a main.
pub fn course_for_path(path: &str) -> &'static str {
    let Some(top) = top_level_segment(path) else {
        return "main";
    };
    if has_any(&top, DESSERT_KEYWORDS) {
        "dessert"
    } else if has_any(&top, MAIN_KEYWORDS) {
        "main"
    } else if has_any(&top, APPETIZER_KEYWORDS) {
        "appetizer"
    } else {
        "main"
    }
}

/// Controlled cuisine token for one path cell, or `N/A`.
pub fn cuisine_type_for_path(path: &str) -> &'static str {
    let text = normalized_path(path);
    if text.is_empty() {
        return "N/A";
    }
    for &(pattern, token) in CUISINE_PATTERNS {
        if text.contains(pattern) {
            return token;
        }
    }
    "N/A"
}

/// Append the `course` column, keying off `cuisine_path` or the first
/// column naming a cuisine. No such column labels every row `main`.
pub fn add_course(table: &mut Table) -> Result<()> {
    let col = table
        .column_index("cuisine_path")
        .or_else(|| table.find_column(&["cuisine"]));
    let values = match col {
        Some(idx) => (0..table.row_count())
            .map(|row| course_for_path(table.cell(row, idx)).to_string())
            .collect(),
        None => vec!["main".to_string(); table.row_count()],
    };
    table.add_column(COURSE_COLUMN, values)
}

/// Append the `cuisine_type` column from the `cuisine_path`-like column.
/// No such column labels every row `N/A`.
pub fn add_cuisine_type(table: &mut Table) -> Result<()> {
    let col = table
        .column_index("cuisine_path")
        .or_else(|| table.find_column(&["cuisine", "path"]));
    let values = match col {
        Some(idx) => (0..table.row_count())
            .map(|row| cuisine_type_for_path(table.cell(row, idx)).to_string())
            .collect(),
        None => vec!["N/A".to_string(); table.row_count()],
    };
    table.add_column(CUISINE_TYPE_COLUMN, values)
}
