//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains actual puzzle solutions organized by year.
//! Each solution uses the `AutoRegisterSolver` derive macro for automatic
//! plugin registration with the solver framework, so a registry built with
//! `register_all_plugins` finds every day without further wiring.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
