//! Property-based tests for registry lookups

use aoc_solver::{
    AocParser, ParseError, RegisterableSolver, RegistrationError, SolveError, Solver,
    SolverError, SolverRegistryBuilder,
};
use proptest::prelude::*;

struct WordCount;

impl AocParser for WordCount {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.split_whitespace().collect())
    }
}

impl Solver for WordCount {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        match part {
            1 => Ok(shared.len().to_string()),
            2 => Ok(shared.iter().map(|w| w.len()).max().unwrap_or(0).to_string()),
            _ => Err(SolveError::PartNotImplemented(part)),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Only the registered key resolves; every other valid key reports NotFound.
    #[test]
    fn prop_lookup_only_hits_registered_key(
        year in 2015u16..=2034,
        day in 1u8..=25,
        query_year in 2015u16..=2034,
        query_day in 1u8..=25,
    ) {
        let registry = WordCount
            .register_with(SolverRegistryBuilder::new(), year, day)
            .unwrap()
            .build();

        let result = registry.create_solver(query_year, query_day, "a bb ccc");
        if (query_year, query_day) == (year, day) {
            let mut solver = result.unwrap();
            prop_assert_eq!(solver.solve(1).unwrap().answer, "3");
            prop_assert_eq!(solver.solve(2).unwrap().answer, "3");
        } else {
            prop_assert!(matches!(result, Err(SolverError::NotFound(y, d)) if y == query_year && d == query_day));
        }
    }

    /// Keys outside the storage range are refused at registration.
    #[test]
    fn prop_invalid_keys_rejected(day in prop_oneof![Just(0u8), 26u8..=255]) {
        let result = WordCount.register_with(SolverRegistryBuilder::new(), 2025, day);
        prop_assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2025, d)) if d == day));
    }

    /// Fresh instances over the same input agree.
    #[test]
    fn prop_fresh_instances_agree(words in prop::collection::vec("[a-z]{1,8}", 0..20), part in 1u8..=2) {
        let input = words.join(" ");
        let registry = WordCount
            .register_with(SolverRegistryBuilder::new(), 2025, 1)
            .unwrap()
            .build();

        let first = registry.create_solver(2025, 1, &input).unwrap().solve(part).unwrap().answer;
        let second = registry.create_solver(2025, 1, &input).unwrap().solve(part).unwrap().answer;
        prop_assert_eq!(first, second);
    }
}
