//! Single-threaded memoising evaluator.

use std::cell::RefCell;

use thiserror::Error;

use super::backend::Backend;
use super::problem::DpProblem;

/// A state was reached again while its own dependencies were being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dependency cycle detected {depth} states deep")]
pub struct DependencyCycle {
    /// Number of states under evaluation when the repeat was found
    pub depth: usize,
}

/// Lazily evaluates a [`DpProblem`], computing each state at most once.
///
/// Dependencies resolve recursively, so the recursion depth follows the
/// longest dependency chain. States on the current chain are tracked and a
/// repeat is reported as [`DependencyCycle`] instead of recursing forever.
pub struct DpCache<P: DpProblem, B> {
    problem: P,
    backend: RefCell<B>,
    in_progress: RefCell<Vec<P::Index>>,
}

impl<P, B> DpCache<P, B>
where
    P: DpProblem,
    B: Backend<P::Index, P::Value>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            problem,
            backend: RefCell::new(backend),
            in_progress: RefCell::new(Vec::new()),
        }
    }

    /// Value for `index`, computing it and any missing dependencies first.
    ///
    /// A failed lookup leaves every value computed before the cycle cached.
    pub fn get(&self, index: &P::Index) -> Result<P::Value, DependencyCycle> {
        if let Some(value) = self.backend.borrow().get(index) {
            return Ok(value.clone());
        }

        {
            let mut chain = self.in_progress.borrow_mut();
            if chain.contains(index) {
                return Err(DependencyCycle { depth: chain.len() });
            }
            chain.push(index.clone());
        }

        // No borrow is held while dependencies resolve.
        let deps: Result<Vec<_>, _> = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect();
        self.in_progress.borrow_mut().pop();
        let deps = deps?;

        Ok(self
            .backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, deps))
            .clone())
    }

    /// Number of states computed so far.
    pub fn cached_len(&self) -> usize {
        self.backend.borrow().len()
    }
}
