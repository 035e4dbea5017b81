//! Per-row calorie totals from cached nutrient lookups.
//!
//! The driver walks a bounded prefix of the dataset, the aggregator walks a
//! bounded prefix of each row's ingredient list, and every lookup funnels
//! through the cache so a phrase costs at most one network call per store
//! lifetime. Lookup failures contribute nothing to a total; they never fail
//! the row or the run.

use crate::cache::{CacheStore, CalorieCache};
use crate::ingredient::{normalize_ingredient, parse_ingredient_list, KeyStrategy, TailTokenKey};
use crate::nutrient::NutrientSource;
use crate::table::Table;
use anyhow::Result;

/// Column appended by the driver.
pub const CALORIE_COLUMN: &str = "total_calories_usda";

/// Ingredients considered per row. Later entries contribute proportionally
/// less to a headline total, and each one is a potential network call.
pub const MAX_INGREDIENTS_PER_ROW: usize = 3;

const PROGRESS_INTERVAL: usize = 100;

/// Total kcal for one ingredients cell.
///
/// Takes at most `max_ingredients` entries; empty keys are skipped without
/// touching the cache. A cache miss resolves once and records the outcome,
/// including the "no data" marker.
pub fn row_total(
    raw_value: &str,
    source: &dyn NutrientSource,
    cache: &mut CalorieCache,
    strategy: &dyn KeyStrategy,
    max_ingredients: usize,
) -> f64 {
    let mut total = 0.0;
    for raw in parse_ingredient_list(raw_value).iter().take(max_ingredients) {
        let key = normalize_ingredient(raw, strategy);
        if key.is_empty() {
            continue;
        }
        let kcal = match cache.get(&key) {
            Some(cached) => cached,
            None => {
                let resolved = source.energy_kcal(&key);
                cache.record(&key, resolved);
                resolved
            }
        };
        if let Some(kcal) = kcal {
            total += kcal;
        }
    }
    total
}

/// Append [`CALORIE_COLUMN`] to the table.
///
/// Rows with index `>= max_rows` get an empty "not computed" cell. A
/// missing ingredients column degrades to an all-empty column with no
/// cache I/O at all; the run still succeeds. Otherwise the cache is loaded
/// once up front and saved once after the batch, even when individual
/// lookups failed along the way.
pub fn add_calorie_totals(
    table: &mut Table,
    ingredients_col: &str,
    max_rows: Option<usize>,
    source: &dyn NutrientSource,
    store: &CacheStore,
) -> Result<()> {
    let Some(col) = table.column_index(ingredients_col) else {
        eprintln!("calories: ingredients column '{ingredients_col}' not found, skipping lookups");
        let empties = vec![String::new(); table.row_count()];
        table.add_column(CALORIE_COLUMN, empties)?;
        return Ok(());
    };

    let strategy = TailTokenKey;
    let mut cache = store.load();
    let preloaded = cache.len();
    let limit = max_rows.unwrap_or(table.row_count());

    let mut values = Vec::with_capacity(table.row_count());
    for i in 0..table.row_count() {
        if i >= limit {
            values.push(String::new());
            continue;
        }
        if i % PROGRESS_INTERVAL == 0 {
            eprintln!("calories: processing row {i}/{limit}");
        }
        let total = row_total(
            table.cell(i, col),
            source,
            &mut cache,
            &strategy,
            MAX_INGREDIENTS_PER_ROW,
        );
        values.push(format!("{total:.1}"));
    }

    table.add_column(CALORIE_COLUMN, values)?;
    store.save(&cache)?;
    tracing::info!(
        rows = limit.min(table.row_count()),
        cache_entries = cache.len(),
        new_entries = cache.len() - preloaded,
        "calorie enrichment complete"
    );
    Ok(())
}
