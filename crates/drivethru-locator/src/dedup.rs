use std::collections::hash_map::Entry;
use std::collections::HashMap;

use drivethru_core::{DedupKey, FranchiseCandidate};

/// Removes duplicate candidates, keeping the **last** occurrence of each key.
///
/// A later candidate overwrites the slot of an earlier one with the same key,
/// so keys come out in first-seen order carrying last-seen values. Callers
/// should treat the order as unspecified. Candidates with an empty key share
/// a single slot.
#[must_use]
pub fn dedup_last_write_wins<I>(candidates: I, key: DedupKey) -> Vec<FranchiseCandidate>
where
    I: IntoIterator<Item = FranchiseCandidate>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<FranchiseCandidate> = Vec::new();

    for candidate in candidates {
        match slots.entry(key.key_of(&candidate).to_owned()) {
            Entry::Occupied(slot) => unique[*slot.get()] = candidate,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(candidate);
            }
        }
    }

    unique
}

/// Truncates to at most `cap` results; `None` leaves the list untouched.
#[must_use]
pub fn apply_cap(
    mut results: Vec<FranchiseCandidate>,
    cap: Option<usize>,
) -> Vec<FranchiseCandidate> {
    if let Some(cap) = cap {
        results.truncate(cap);
    }
    results
}
