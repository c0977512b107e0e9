//! Availability aggregation — union of selections across participants.
//!
//! Inverts the per-participant selection sets into a per-slot attendance
//! set. The computation is a pure union, so it is commutative over
//! participants and idempotent under redelivery: the aggregator can be
//! re-run from scratch or incrementally, against fresh or stale input, and
//! always lands on the same mapping for the same selection state.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::Slot;

/// Union per-participant selection sets into a per-slot attendance set.
///
/// A slot appears in the result iff at least one participant currently
/// marks it; a participant appears at most once per slot (set semantics).
/// No participant's membership can be affected by another participant's
/// input — each id only ever enters slots drawn from its own set.
pub fn aggregate(
    sets: &BTreeMap<String, BTreeSet<Slot>>,
) -> BTreeMap<Slot, BTreeSet<String>> {
    let mut aggregated: BTreeMap<Slot, BTreeSet<String>> = BTreeMap::new();

    for (participant_id, slots) in sets {
        for slot in slots {
            aggregated
                .entry(slot.clone())
                .or_default()
                .insert(participant_id.clone());
        }
    }

    aggregated
}
