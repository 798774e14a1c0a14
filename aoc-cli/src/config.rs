//! Configuration resolution from CLI args

use crate::cli::{Args, Command, InputArgs};
use crate::error::CliError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the inputs directory
pub const INPUTS_DIR_ENV: &str = "AOC_INPUTS_DIR";

/// Inputs directory used when neither the flag nor the env var is set
pub const DEFAULT_INPUTS_DIR: &str = "inputs";

/// What to solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One part of one day
    Single { year: u16, day: u8, part: u8 },
    /// Every registered solver passing the filters
    All { year_filter: Option<u16>, tags: Vec<String> },
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub mode: Mode,
    /// Root of the `{year}/dayDD.txt` tree
    pub inputs_dir: PathBuf,
    /// Whether to read example inputs
    pub example: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args and the process environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::resolve(args, std::env::var_os(INPUTS_DIR_ENV))
    }

    /// Build config from CLI args, taking the inputs directory env value explicitly
    pub fn resolve(args: Args, env_inputs_dir: Option<OsString>) -> Result<Self, CliError> {
        let (mode, input) = match args.command {
            Command::Run(run) => {
                let day = parse_day(&run.day)?;
                (
                    Mode::Single {
                        year: run.year,
                        day,
                        part: run.part,
                    },
                    run.input,
                )
            }
            Command::All(all) => (
                Mode::All {
                    year_filter: all.year,
                    tags: all.tags,
                },
                all.input,
            ),
        };

        let InputArgs {
            inputs_dir,
            example,
            quiet,
        } = input;
        let inputs_dir = inputs_dir
            .or_else(|| env_inputs_dir.filter(|dir| !dir.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUTS_DIR));
        let inputs_dir = expand_tilde(&inputs_dir);
        // A missing directory is reported per input; a file in its place is a setup mistake.
        if inputs_dir.exists() && !inputs_dir.is_dir() {
            return Err(CliError::Config(format!(
                "inputs directory {} is not a directory",
                inputs_dir.display()
            )));
        }

        Ok(Config {
            mode,
            inputs_dir,
            example,
            quiet,
        })
    }
}

/// Validate a day argument: exactly two ASCII digits, then 1..=25.
pub fn parse_day(raw: &str) -> Result<u8, CliError> {
    let bytes = raw.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(CliError::InvalidDay(raw.to_string()));
    }
    let day = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    if !(1..=25).contains(&day) {
        return Err(CliError::DayOutOfRange(day));
    }
    Ok(day)
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use proptest::prelude::*;

    fn resolve(argv: &[&str], env: Option<&str>) -> Result<Config, CliError> {
        let args = Args::try_parse_from(argv).unwrap();
        Config::resolve(args, env.map(OsString::from))
    }

    #[test]
    fn test_parse_day_accepts_two_digit_days() {
        assert_eq!(parse_day("01").unwrap(), 1);
        assert_eq!(parse_day("25").unwrap(), 25);
    }

    #[test]
    fn test_parse_day_checks_format_before_range() {
        assert!(matches!(parse_day("1"), Err(CliError::InvalidDay(_))));
        assert!(matches!(parse_day("001"), Err(CliError::InvalidDay(_))));
        assert!(matches!(parse_day("a1"), Err(CliError::InvalidDay(_))));
        assert!(matches!(parse_day("+1"), Err(CliError::InvalidDay(_))));
        assert!(matches!(parse_day("00"), Err(CliError::DayOutOfRange(0))));
        assert!(matches!(parse_day("26"), Err(CliError::DayOutOfRange(26))));
    }

    #[test]
    fn test_inputs_dir_precedence() {
        let flag = resolve(&["aoc", "run", "01", "1", "--inputs-dir", "/flag"], Some("/env")).unwrap();
        assert_eq!(flag.inputs_dir, PathBuf::from("/flag"));

        let env = resolve(&["aoc", "run", "01", "1"], Some("/env")).unwrap();
        assert_eq!(env.inputs_dir, PathBuf::from("/env"));

        let default = resolve(&["aoc", "run", "01", "1"], None).unwrap();
        assert_eq!(default.inputs_dir, PathBuf::from(DEFAULT_INPUTS_DIR));

        let empty_env = resolve(&["aoc", "run", "01", "1"], Some("")).unwrap();
        assert_eq!(empty_env.inputs_dir, PathBuf::from(DEFAULT_INPUTS_DIR));
    }

    #[test]
    fn test_inputs_dir_must_not_be_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let result = resolve(&["aoc", "run", "01", "1", "--inputs-dir", path], None);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_tilde_expansion() {
        let config = resolve(&["aoc", "all", "--inputs-dir", "~/aoc"], None).unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.inputs_dir, home.join("aoc"));
        }
        assert_eq!(expand_tilde(Path::new("rel/~x")), PathBuf::from("rel/~x"));
    }

    #[test]
    fn test_modes() {
        let single = resolve(&["aoc", "run", "12", "2", "--year", "2024", "-q"], None).unwrap();
        assert_eq!(single.mode, Mode::Single { year: 2024, day: 12, part: 2 });
        assert!(single.quiet);

        let all = resolve(&["aoc", "all", "-t", "grid", "-v"], None).unwrap();
        assert_eq!(
            all.mode,
            Mode::All {
                year_filter: None,
                tags: vec!["grid".to_string()]
            }
        );
    }

    proptest! {
        #[test]
        fn prop_two_digit_days_round_trip(day in 1u8..=25) {
            prop_assert_eq!(parse_day(&format!("{day:02}")).unwrap(), day);
        }

        #[test]
        fn prop_other_lengths_are_invalid(raw in "[0-9]{0,1}|[0-9]{3,5}") {
            prop_assert!(matches!(parse_day(&raw), Err(CliError::InvalidDay(_))));
        }
    }
}
