//! Dietary flag tagging from ingredient keywords.
//!
//! Six boolean columns inferred from keyword presence in the combined
//! ingredient/title/cuisine text of each row. Keyword absence is the only
//! evidence, so the flags are best-effort labels, not guarantees.

use crate::table::Table;
use anyhow::Result;

const MEAT_KEYWORDS: &[&str] = &["chicken", "beef", "pork", "bacon", "lamb", "turkey", "duck"];
const SEAFOOD_KEYWORDS: &[&str] = &["fish", "salmon", "shrimp", "tuna", "crab", "lobster"];
const DAIRY_KEYWORDS: &[&str] = &["milk", "cheese", "butter", "cream", "yogurt"];
const EGG_KEYWORDS: &[&str] = &["egg", "eggs"];
const NUT_KEYWORDS: &[&str] = &[
    "almond", "walnut", "cashew", "peanut", "pecan", "pistachio", "hazelnut",
];

pub const FLAG_COLUMNS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Pescatarian",
    "Dairy_Free",
    "Nut_Free",
    "Egg_Free",
];

fn has_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Flags for one row's combined lowercase text, in [`FLAG_COLUMNS`] order.
pub fn flags_for_text(text: &str) -> [bool; 6] {
    let meat = has_any(text, MEAT_KEYWORDS);
    let seafood = has_any(text, SEAFOOD_KEYWORDS);
    let dairy = has_any(text, DAIRY_KEYWORDS);
    let egg = has_any(text, EGG_KEYWORDS);
    let nuts = has_any(text, NUT_KEYWORDS);
    [
        !meat,                // Vegetarian
        !(meat || dairy || egg), // Vegan
        seafood && !meat,     // Pescatarian
        !dairy,               // Dairy_Free
        !nuts,                // Nut_Free
        !egg,                 // Egg_Free
    ]
}

/// Append the six dietary columns. The combined text is drawn from every
/// column whose name mentions ingredients, the title, or the cuisine; a
/// dataset with none of those gets blank flags rather than an error.
pub fn add_dietary_flags(table: &mut Table) -> Result<()> {
    let text_cols = table.columns_containing(&["ingredient", "title", "cuisine"]);
    if text_cols.is_empty() {
        eprintln!("dietary: no ingredient/title/cuisine columns found, leaving flags blank");
        for name in FLAG_COLUMNS {
            table.add_column(name, vec![String::new(); table.row_count()])?;
        }
        return Ok(());
    }

    let mut columns: Vec<Vec<String>> = (0..FLAG_COLUMNS.len())
        .map(|_| Vec::with_capacity(table.row_count()))
        .collect();
    for row in 0..table.row_count() {
        let combined = text_cols
            .iter()
            .map(|&col| table.cell(row, col))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        for (values, flag) in columns.iter_mut().zip(flags_for_text(&combined)) {
            values.push(flag.to_string());
        }
    }
    for (name, values) in FLAG_COLUMNS.iter().zip(columns) {
        table.add_column(name, values)?;
    }
    Ok(())
}
