//! Advent of Code Solver Library
//!
//! Traits and plumbing shared by every day-solver: parsing, per-part solving,
//! timing, and an explicit registry mapping a (year, day) key to a solver.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder, register_solver};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Calories;
//!
//! impl AocParser for Calories {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<u32>().to_string())
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! register_solver!(builder, Calories, 2025, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2025, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "3");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Key Concepts
//!
//! - [`AocParser`] turns the raw input into `SharedData`.
//! - [`PartSolver<N>`] answers part `N`; `#[derive(AocSolver)]` wires the parts
//!   into a [`Solver`] with a `PARTS` count.
//! - [`DynSolver`] is the type-erased, timed view the registry returns.
//! - `#[derive(AutoRegisterSolver)]` with `#[aoc(year = .., day = ..)]` submits a
//!   [`SolverPlugin`]; [`SolverRegistryBuilder::register_all_plugins`] collects them.

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, DAYS_PER_YEAR, LAST_YEAR,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

#[doc(hidden)]
pub use registry::instantiate as __instantiate;

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
