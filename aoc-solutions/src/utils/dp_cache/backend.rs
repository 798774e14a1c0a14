//! Storage for memoised values.

use std::collections::HashMap;
use std::hash::Hash;

/// Where a [`DpCache`](super::DpCache) keeps computed values.
///
/// `get_or_insert` never overwrites: `f` runs only when `index` is missing.
pub trait Backend<I, V> {
    fn get(&self, index: &I) -> Option<&V>;

    /// Value for `index`, storing `f()` first if there is none.
    fn get_or_insert<F: FnOnce() -> V>(&mut self, index: I, f: F) -> &V;

    /// Number of stored values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense storage for `usize` states; grows to the largest index seen.
#[derive(Debug)]
pub struct VecBackend<V> {
    slots: Vec<Option<V>>,
    filled: usize,
}

impl<V> VecBackend<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            filled: 0,
        }
    }
}

impl<V> Default for VecBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Backend<usize, V> for VecBackend<V> {
    fn get(&self, index: &usize) -> Option<&V> {
        self.slots.get(*index).and_then(Option::as_ref)
    }

    fn get_or_insert<F: FnOnce() -> V>(&mut self, index: usize, f: F) -> &V {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        let slot = &mut self.slots[index];
        if slot.is_none() {
            self.filled += 1;
        }
        slot.get_or_insert_with(f)
    }

    fn len(&self) -> usize {
        self.filled
    }
}

/// Sparse storage for any hashable state.
#[derive(Debug)]
pub struct HashMapBackend<I, V> {
    values: HashMap<I, V>,
}

impl<I, V> HashMapBackend<I, V> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<I, V> Default for HashMapBackend<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, V> Backend<I, V> for HashMapBackend<I, V> {
    fn get(&self, index: &I) -> Option<&V> {
        self.values.get(index)
    }

    fn get_or_insert<F: FnOnce() -> V>(&mut self, index: I, f: F) -> &V {
        self.values.entry(index).or_insert_with(f)
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}
