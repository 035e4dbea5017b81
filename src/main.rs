use anyhow::Result;
use clap::Parser;

mod analyze;
mod cache;
mod calories;
mod cli;
mod cuisine;
mod dietary;
mod difficulty;
mod ingredient;
mod nutrient;
mod pipeline;
mod table;
mod times;
mod util;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    match args.command {
        Command::Enrich(args) => pipeline::run_enrich(&args),
        Command::Calories(args) => pipeline::run_calories(&args),
        Command::Analyze(args) => analyze::run_analyze(&args.input),
    }
}
