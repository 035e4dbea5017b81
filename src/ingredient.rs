//! Ingredient text normalization.
//!
//! Raw ingredient cells arrive in several shapes: plain text, a serialized
//! list (JSON or Python-style), or structured records carrying a `name`
//! field. This module flattens a cell into ordered entries and reduces each
//! entry to a short lowercase lookup phrase with quantities, unit words, and
//! punctuation stripped. The final key derivation is pluggable so the
//! head-noun heuristic can be swapped without touching the pipeline.

use crate::util::{item_text, parse_list_literal};
use regex::Regex;
use std::sync::OnceLock;

/// Measure words removed from ingredient phrases, whole-word only.
const UNIT_WORDS: &[&str] = &[
    "cup", "cups", "tbsp", "tablespoon", "tsp", "teaspoon", "oz", "ounce", "ounces", "gram",
    "grams", "ml", "kg", "pinch", "clove", "cloves", "slice", "slices", "can", "cans", "package",
    "packages",
];

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([^)]*\)").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+/\d+|\d+").unwrap())
}

fn unit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"\b(?:{})\b", UNIT_WORDS.join("|"))).unwrap())
}

fn punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\.:-]").unwrap())
}

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Rule for deriving the lookup key from a cleaned ingredient phrase.
pub trait KeyStrategy {
    fn derive_key(&self, cleaned: &str) -> String;
}

/// Default key rule: keep the trailing tokens of the cleaned phrase. The
/// tail usually carries the head noun ("all purpose flour" → "purpose
/// flour"), though phrases ending in a qualifier defeat it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TailTokenKey;

impl KeyStrategy for TailTokenKey {
    fn derive_key(&self, cleaned: &str) -> String {
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        match tokens.len() {
            0 => String::new(),
            1 => tokens[0].to_string(),
            n => tokens[n - 2..].join(" "),
        }
    }
}

/// Reduce one raw ingredient entry to its cleaned lowercase phrase.
pub fn clean_ingredient(raw: &str) -> String {
    let text = raw.to_lowercase();
    let text = paren_re().replace_all(&text, "");
    let text = number_re().replace_all(&text, "");
    let text = unit_re().replace_all(&text, " ");
    let text = punct_re().replace_all(&text, " ");
    let text = space_re().replace_all(&text, " ");
    text.trim().to_string()
}

/// Clean an entry and derive its lookup key. Empty input yields an empty
/// key; callers skip those rather than looking them up.
pub fn normalize_ingredient(raw: &str, strategy: &dyn KeyStrategy) -> String {
    strategy.derive_key(&clean_ingredient(raw))
}

/// Flatten an ingredients cell into individual raw entries.
///
/// List literals are decoded with `name` fields preferred for structured
/// records; anything that fails to decode falls back to naive splitting on
/// commas and semicolons. Never fails; an unusable cell yields no entries.
pub fn parse_ingredient_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Some(items) = parse_list_literal(trimmed) {
        return items.iter().map(item_text).collect();
    }
    trimmed
        .split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
