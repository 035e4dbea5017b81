//! File-in / file-out orchestration of the enrichment stages.
//!
//! The orchestrator is deliberately thin: each stage appends its columns
//! and degrades internally, so sequencing is the only policy here. The
//! calorie stage runs last because it is the only one that can spend
//! network time.

use crate::cache::CacheStore;
use crate::calories::add_calorie_totals;
use crate::cli::{CaloriesArgs, EnrichArgs};
use crate::cuisine::{add_course, add_cuisine_type};
use crate::dietary::add_dietary_flags;
use crate::difficulty::add_difficulty;
use crate::nutrient::{resolve_api_key, FdcClient};
use crate::table::Table;
use crate::times::standardize_times;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Run the full pipeline: times, dietary flags, course, cuisine type,
/// difficulty, then calorie totals.
pub fn run_enrich(args: &EnrichArgs) -> Result<()> {
    let mut table = Table::load_csv(&args.input)?;
    eprintln!(
        "enrich: loaded {} rows from {}",
        table.row_count(),
        args.input.display()
    );

    standardize_times(&mut table)?;
    // dietary flags read the source text columns, so they run before the
    // classifiers append their derived labels
    add_dietary_flags(&mut table)?;
    add_course(&mut table)?;
    add_cuisine_type(&mut table)?;
    add_difficulty(&mut table)?;
    calorie_stage(
        &mut table,
        &args.ingredients_col,
        args.max_rows,
        args.api_key.clone(),
        args.cache.clone(),
    )?;

    table.store_csv(&args.output)?;
    eprintln!("enrich: wrote {}", args.output.display());
    Ok(())
}

/// Run only the calorie stage over an existing CSV.
pub fn run_calories(args: &CaloriesArgs) -> Result<()> {
    let mut table = Table::load_csv(&args.input)?;
    calorie_stage(
        &mut table,
        &args.ingredients_col,
        args.max_rows,
        args.api_key.clone(),
        args.cache.clone(),
    )?;
    table.store_csv(&args.output)?;
    eprintln!("calories: wrote {}", args.output.display());
    Ok(())
}

fn calorie_stage(
    table: &mut Table,
    ingredients_col: &str,
    max_rows: Option<usize>,
    api_key: Option<String>,
    cache: Option<PathBuf>,
) -> Result<()> {
    let api_key = resolve_api_key(api_key);
    if api_key.is_none() {
        eprintln!("calories: no API key configured, every lookup will record no data");
    }
    let client = FdcClient::new(api_key);
    let store = CacheStore::new(resolve_cache_path(cache)?);
    add_calorie_totals(table, ingredients_col, max_rows, &client, &store)
}

/// Explicit path first, else a fixed spot under the platform data dir.
fn resolve_cache_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let data_dir = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow!("cannot determine a data directory for the calorie cache"))?;
    Ok(data_dir.join("recipe-enrich").join("fdc_cache.json"))
}
