//! Work item facets.

use std::hash::Hash;

/// The two read-only facets the queue needs from a unit of work.
///
/// Two items with equal handles are the same logical work: the queue tracks
/// which identity is pending and never merges payloads. Items are opaque to
/// the queue; it only moves them between its own bookkeeping structures and
/// never mutates them.
pub trait WorkItem {
    /// Stable identity used for deduplication and checkout tracking.
    type Handle: Eq + Hash + Clone;

    /// The item's identity.
    fn handle(&self) -> Self::Handle;

    /// Dispatch ranking. Higher values are served earlier.
    fn priority(&self) -> i64;
}
