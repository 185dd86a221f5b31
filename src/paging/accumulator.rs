//! Merging fetched pages into the accumulated list.

use std::collections::HashSet;

use super::Identified;

/// Merge a freshly fetched page into `existing`.
///
/// Page 1 is a fresh query and replaces everything. Later pages append the
/// incoming items whose id is not already present, keeping existing order
/// and arrival order of the new items.
pub fn merge<T: Identified>(existing: Vec<T>, incoming: Vec<T>, page: u32) -> Vec<T> {
    if page <= 1 {
        return incoming;
    }

    let mut seen: HashSet<T::Id> = existing.iter().map(|item| item.id().clone()).collect();
    let mut merged = existing;
    merged.reserve(incoming.len());
    for item in incoming {
        if seen.insert(item.id().clone()) {
            merged.push(item);
        }
    }
    merged
}
