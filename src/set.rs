//! Membership sets for handle bookkeeping.

use std::collections::HashSet;
use std::hash::Hash;

/// Boolean-witness set over item handles.
///
/// The coordinator keeps two of these: the waiting set and the in-progress
/// set. Insert and delete are idempotent; the set is only ever consulted
/// for membership, never iterated.
#[derive(Debug)]
pub struct HandleSet<H> {
    handles: HashSet<H>,
}

impl<H: Eq + Hash> HandleSet<H> {
    pub fn new() -> Self {
        Self { handles: HashSet::new() }
    }

    pub fn has(&self, handle: &H) -> bool {
        self.handles.contains(handle)
    }

    pub fn insert(&mut self, handle: H) {
        self.handles.insert(handle);
    }

    pub fn delete(&mut self, handle: &H) {
        self.handles.remove(handle);
    }
}

impl<H: Eq + Hash> Default for HandleSet<H> {
    fn default() -> Self {
        Self::new()
    }
}
