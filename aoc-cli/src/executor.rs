//! Sequential executor for running solvers

use crate::error::CliError;
use crate::inputs::InputLocator;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// Errors are shared by every part that failed for the same reason
    pub answer: Result<String, Arc<CliError>>,
    /// Set on the first part solved from a freshly parsed input
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs solvers one after another in (year, day, part) order
pub struct Executor {
    registry: SolverRegistry,
    locator: InputLocator,
}

impl Executor {
    pub fn new(registry: SolverRegistry, locator: InputLocator) -> Self {
        Self { registry, locator }
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self, year_filter: Option<u16>) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| year_filter.is_none_or(|y| info.year == y))
            .filter(|info| info.parts > 0)
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: 1..=info.parts,
            })
            .collect()
    }

    /// Solve one part, failing fast on any error.
    ///
    /// The input file is checked before the registry so a missing file is
    /// reported even when no solver exists for the day.
    pub fn run_single(&self, year: u16, day: u8, part: u8) -> Result<SolverResult, CliError> {
        tracing::info!(year, day, part, "running day");
        let path = self.locator.locate(year, day, part)?;
        let input = InputLocator::read(&path)?;

        let mut solver = self.registry.create_solver(year, day, &input)?;
        let solved = solver.solve(part)?;
        Ok(SolverResult {
            year,
            day,
            part,
            answer: Ok(solved.answer.clone()),
            parse_duration: Some(solver.parse_duration()),
            solve_duration: solved.duration(),
        })
    }

    /// Solve every part of every work item, handing each result to `on_result`.
    ///
    /// Failures become error results; later work still runs. Parts sharing an
    /// input file share one parsed solver instance.
    pub fn run_all(&self, work_items: &[WorkItem], mut on_result: impl FnMut(SolverResult)) {
        for work in work_items {
            tracing::info!(year = work.year, day = work.day, "running day");
            let by_path = work
                .parts
                .clone()
                .map(|part| (self.locator.path_for(work.year, work.day, part), part))
                .chunk_by(|(path, _)| path.clone());

            for (path, group) in &by_path {
                let parts: Vec<u8> = group.map(|(_, part)| part).collect();
                match self.solve_parts(work.year, work.day, &path, &parts) {
                    Ok(results) => results.into_iter().for_each(&mut on_result),
                    Err(e) => {
                        tracing::warn!(year = work.year, day = work.day, error = %e, "solver did not run");
                        let e = Arc::new(e);
                        for &part in &parts {
                            on_result(error_result(work.year, work.day, part, Arc::clone(&e)));
                        }
                    }
                }
            }
        }
    }

    fn solve_parts(&self, year: u16, day: u8, path: &Path, parts: &[u8]) -> Result<Vec<SolverResult>, CliError> {
        if !path.is_file() {
            return Err(CliError::InputNotFound(path.to_path_buf()));
        }
        let input = InputLocator::read(path)?;
        let mut solver = self.registry.create_solver(year, day, &input)?;

        Ok(parts
            .iter()
            .enumerate()
            .map(|(idx, &part)| {
                let mut result = solve_part(year, day, part, &mut *solver);
                if idx == 0 {
                    result.parse_duration = Some(solver.parse_duration());
                }
                result
            })
            .collect())
    }
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration: None,
        },
        Err(e) => error_result(year, day, part, Arc::new(e.into())),
    }
}

fn error_result(year: u16, day: u8, part: u8, error: Arc<CliError>) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{SolverError, SolverRegistryBuilder};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Links the day solvers into the test binary.
    use aoc_solutions as _;

    fn repo_inputs() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../inputs")
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_all_plugins()
            .unwrap()
            .build()
    }

    #[test]
    fn test_run_single_example() {
        let executor = Executor::new(registry(), InputLocator::new(repo_inputs(), true));
        let result = executor.run_single(2025, 1, 2).unwrap();
        assert_eq!(result.answer.unwrap(), "6");
        assert!(result.parse_duration.is_some());
    }

    #[test]
    fn test_run_single_reports_missing_input_before_missing_solver() {
        let temp = TempDir::new().unwrap();
        let executor = Executor::new(registry(), InputLocator::new(temp.path().to_path_buf(), false));
        assert!(matches!(executor.run_single(2025, 20, 1), Err(CliError::InputNotFound(_))));

        fs::create_dir_all(temp.path().join("2025")).unwrap();
        fs::write(temp.path().join("2025/day20.txt"), "x").unwrap();
        assert!(matches!(
            executor.run_single(2025, 20, 1),
            Err(CliError::Solver(SolverError::NotFound(2025, 20)))
        ));
    }

    #[test]
    fn test_run_single_surfaces_parse_errors() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2025")).unwrap();
        fs::write(temp.path().join("2025/day01.txt"), "L10\nQ5\n").unwrap();
        let executor = Executor::new(registry(), InputLocator::new(temp.path().to_path_buf(), false));
        assert!(matches!(
            executor.run_single(2025, 1, 1),
            Err(CliError::Solver(SolverError::ParseError(_)))
        ));
    }

    #[test]
    fn test_collect_work_items_filters_by_year() {
        let executor = Executor::new(registry(), InputLocator::new(repo_inputs(), true));
        let items = executor.collect_work_items(Some(2025));
        assert_eq!(items.len(), 12);
        assert_eq!(items[0], WorkItem { year: 2025, day: 1, parts: 1..=2 });
        assert!(executor.collect_work_items(Some(2015)).is_empty());
    }

    #[test]
    fn test_run_all_examples_in_order() {
        let executor = Executor::new(registry(), InputLocator::new(repo_inputs(), true));
        let items = executor.collect_work_items(Some(2025));
        let mut results = Vec::new();
        executor.run_all(&items, |r| results.push(r));

        let keys: Vec<_> = results.iter().map(|r| (r.day, r.part)).collect();
        let expected: Vec<_> = (1..=12).flat_map(|day| [(day, 1), (day, 2)]).collect();
        assert_eq!(keys, expected);

        // Day 11 part 2 reads its own example file.
        let day11: Vec<_> = results.iter().filter(|r| r.day == 11).map(|r| r.answer.as_deref().ok()).collect();
        assert_eq!(day11, vec![Some("5"), Some("2")]);
    }

    #[test]
    fn test_run_all_turns_missing_inputs_into_error_results() {
        let temp = TempDir::new().unwrap();
        let executor = Executor::new(registry(), InputLocator::new(temp.path().to_path_buf(), false));
        let items = vec![WorkItem { year: 2025, day: 4, parts: 1..=2 }];
        let mut results = Vec::new();
        executor.run_all(&items, |r| results.push(r));

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(r.answer.as_ref().map_err(|e| e.as_ref()), Err(CliError::InputNotFound(_)))));
    }
}
