//! Helpers shared by several day solvers.

pub mod dp_cache;
pub mod grid;
pub mod parse;
