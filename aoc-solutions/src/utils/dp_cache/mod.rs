//! Memoised evaluation of recurrences over a DAG of states.
//!
//! Day 10 uses it for the joltage halving recursion, day 11 for counting paths
//! through the device graph.
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` states, grows on demand
//! - [`HashMapBackend`]: any hashable state such as `(node, flags)` or a vector
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Monotone lattice paths from the origin to `(r, c)`.
//! struct Lattice;
//!
//! impl DpProblem for Lattice {
//!     type Index = (u32, u32);
//!     type Value = u64;
//!
//!     fn deps(&self, &(r, c): &(u32, u32)) -> Vec<(u32, u32)> {
//!         let mut deps = Vec::new();
//!         if r > 0 { deps.push((r - 1, c)); }
//!         if c > 0 { deps.push((r, c - 1)); }
//!         deps
//!     }
//!
//!     fn compute(&self, _: &(u32, u32), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::new(HashMapBackend::new(), Lattice);
//! assert_eq!(cache.get(&(4, 4)).unwrap(), 70);
//! assert_eq!(cache.cached_len(), 25);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::{DependencyCycle, DpCache};
pub use problem::DpProblem;
