//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod logging;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::{Config, Mode};
use error::CliError;
use executor::Executor;
use inputs::InputLocator;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        tracing::debug!(error = ?e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    tracing::debug!(?config, "resolved config");

    let locator = InputLocator::new(config.inputs_dir.clone(), config.example);
    let formatter = OutputFormatter::new(config.quiet);

    match config.mode {
        Mode::Single { year, day, part } => {
            let executor = Executor::new(build_registry(&[])?, locator);
            let result = executor.run_single(year, day, part)?;
            formatter.print_result(&result);
        }
        Mode::All { year_filter, tags } => {
            let executor = Executor::new(build_registry(&tags)?, locator);
            let work_items = executor.collect_work_items(year_filter);
            if work_items.is_empty() {
                println!("No solvers found matching the specified filters.");
                return Ok(());
            }

            let mut results = Vec::new();
            executor.run_all(&work_items, |result| {
                formatter.print_result(&result);
                results.push(result);
            });
            formatter.print_summary(&results);
        }
    }

    Ok(())
}

/// Build registry with tag filtering; a solver must carry every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
