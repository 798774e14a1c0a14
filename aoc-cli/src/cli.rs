//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Year used when `--year` is not given to `run`
pub const DEFAULT_YEAR: u16 = 2025;

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve one part of one day
    Run(RunArgs),
    /// Solve every registered day matching the filters
    All(AllArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Day as two digits, e.g. 01
    pub day: String,

    /// Part to solve
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: u8,

    /// Puzzle year
    #[arg(short, long, default_value_t = DEFAULT_YEAR)]
    pub year: u16,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(clap::Args, Debug)]
pub struct AllArgs {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Directory holding `{year}/dayDD.txt` inputs [env: AOC_INPUTS_DIR, default: inputs]
    #[arg(long)]
    pub inputs_dir: Option<PathBuf>,

    /// Use the example input (`dayDD_example.txt`) instead of the real one
    #[arg(long)]
    pub example: bool,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let args = Args::try_parse_from(["aoc", "run", "07", "2"]).unwrap();
        let Command::Run(run) = args.command else {
            panic!("expected run");
        };
        assert_eq!((run.day.as_str(), run.part, run.year), ("07", 2, DEFAULT_YEAR));
        assert!(!run.input.example && !run.input.quiet);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_part_range_is_checked() {
        assert!(Args::try_parse_from(["aoc", "run", "01", "3"]).is_err());
        assert!(Args::try_parse_from(["aoc", "run", "01", "0"]).is_err());
    }

    #[test]
    fn test_all_with_tags_and_global_verbosity() {
        let args = Args::try_parse_from(["aoc", "all", "--tags", "grid,dp", "-vv", "--example"]).unwrap();
        let Command::All(all) = args.command else {
            panic!("expected all");
        };
        assert_eq!(all.tags, vec!["grid", "dp"]);
        assert!(all.input.example);
        assert_eq!(args.verbose, 2);
    }
}
