use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::pool::{ContentPool, ContentRecord, RecordId};

/// Pick the record that fills a vacated slot.
///
/// Candidates are pool records never displayed and not currently on screen.
/// Same-group candidates win; ties break uniformly at random (the injected
/// rng keeps this reproducible). An empty candidate set returns None and the
/// slot stays vacant — the normal terminal condition once the pool runs dry.
pub fn select<'a>(
    vacating: &ContentRecord,
    pool: &'a ContentPool,
    displayed: &HashSet<RecordId>,
    visible: &HashSet<RecordId>,
    rng: &mut StdRng,
) -> Option<&'a ContentRecord> {
    let candidates: Vec<&ContentRecord> = pool
        .all()
        .iter()
        .filter(|record| !displayed.contains(&record.id) && !visible.contains(&record.id))
        .collect();

    let same_group: Vec<&ContentRecord> = candidates
        .iter()
        .copied()
        .filter(|record| record.group_key == vacating.group_key)
        .collect();

    if !same_group.is_empty() {
        return same_group.choose(rng).copied();
    }

    candidates.choose(rng).copied()
}
