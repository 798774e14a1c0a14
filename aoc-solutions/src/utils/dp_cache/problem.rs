//! Recurrence definitions evaluated by [`DpCache`](super::DpCache).

/// A recurrence over a DAG of states.
///
/// `deps` names the states a state is built from; `compute` combines their
/// values. A state with no dependencies is a base case.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// /// Ways to climb `n` steps taking one or two at a time.
/// struct Stairs;
///
/// impl DpProblem for Stairs {
///     type Index = usize;
///     type Value = u64;
///
///     fn deps(&self, &n: &usize) -> Vec<usize> {
///         (1..=2).filter_map(|step| n.checked_sub(step)).collect()
///     }
///
///     fn compute(&self, _n: &usize, ways: Vec<u64>) -> u64 {
///         if ways.is_empty() { 1 } else { ways.iter().sum() }
///     }
/// }
///
/// let cache = DpCache::new(VecBackend::new(), Stairs);
/// assert_eq!(cache.get(&5).unwrap(), 8);
/// ```
pub trait DpProblem {
    /// State key.
    type Index: Clone + PartialEq;
    /// Value memoised per state.
    type Value: Clone;

    /// States `index` depends on, in the order `compute` receives their values.
    fn deps(&self, index: &Self::Index) -> Vec<Self::Index>;

    /// Value of `index` given the values of its dependencies.
    fn compute(&self, index: &Self::Index, deps: Vec<Self::Value>) -> Self::Value;
}
