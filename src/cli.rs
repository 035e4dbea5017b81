//! CLI argument parsing for the enrichment pipeline.
//!
//! The CLI is intentionally thin: subcommands map one-to-one onto the
//! pipeline entry points so the same core logic can be reused elsewhere.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint for the recipe enrichment workflow.
#[derive(Parser, Debug)]
#[command(
    name = "renrich",
    version,
    about = "Recipe dataset enrichment: derived nutrition and classification columns",
    after_help = "Examples:\n  renrich enrich recipes.csv recipes.enriched.csv\n  renrich enrich recipes.csv out.csv --max-rows 500 --api-key $FDC_API_KEY\n  renrich calories recipes.csv out.csv --cache ./fdc_cache.json\n  renrich analyze recipes.enriched.csv",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Enrich(EnrichArgs),
    Calories(CaloriesArgs),
    Analyze(AnalyzeArgs),
}

/// Full pipeline: time standardization, course/cuisine classification,
/// dietary flags, difficulty scoring, and calorie totals.
#[derive(Parser, Debug)]
#[command(about = "Enrich a recipe CSV with every derived column")]
pub struct EnrichArgs {
    /// Input recipe CSV
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV with derived columns appended
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Name of the ingredients column used for calorie totals
    #[arg(long, value_name = "NAME", default_value = "ingredients")]
    pub ingredients_col: String,

    /// Only the first N rows get calorie totals; later rows are left blank
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,

    /// Calorie lookup cache location (defaults under the platform data dir)
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// FoodData Central API key (falls back to FDC_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Calorie stage only, for datasets already carrying the other columns.
#[derive(Parser, Debug)]
#[command(about = "Append calorie totals to a recipe CSV")]
pub struct CaloriesArgs {
    /// Input recipe CSV
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV with the calorie column appended
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Name of the ingredients column used for calorie totals
    #[arg(long, value_name = "NAME", default_value = "ingredients")]
    pub ingredients_col: String,

    /// Only the first N rows get calorie totals; later rows are left blank
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,

    /// Calorie lookup cache location (defaults under the platform data dir)
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// FoodData Central API key (falls back to FDC_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Summary statistics over an enriched CSV.
#[derive(Parser, Debug)]
#[command(about = "Report calorie and difficulty statistics for an enriched CSV")]
pub struct AnalyzeArgs {
    /// Enriched recipe CSV
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}
