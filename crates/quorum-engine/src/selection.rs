//! Per-participant slot selections — the only mutable state in the engine.
//!
//! Each participant owns an independent set of slots they marked as
//! available. Writes are last-write-wins per participant: a replace call
//! fully determines that participant's set, and a toggle call fully
//! determines membership of one slot. Different participants' partitions
//! are disjoint, so concurrent writers never conflict structurally.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{QuorumError, Result};
use crate::grid::Slot;
use crate::roster::Roster;

/// Arena of participant-keyed slot sets.
///
/// `BTreeMap`/`BTreeSet` keep iteration order deterministic, which the
/// aggregation layer relies on for reproducible output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    sets: BTreeMap<String, BTreeSet<Slot>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one slot in a participant's selection.
    ///
    /// Idempotent: marking an already-marked slot, or clearing an already
    /// clear one, is a no-op.
    ///
    /// # Errors
    /// Returns [`QuorumError::UnknownParticipant`] when `participant_id`
    /// is not on the roster. Callers should refresh their roster and retry.
    pub fn set_selection(
        &mut self,
        roster: &Roster,
        participant_id: &str,
        slot: Slot,
        present: bool,
    ) -> Result<()> {
        self.check_member(roster, participant_id)?;

        let set = self.sets.entry(participant_id.to_string()).or_default();
        if present {
            set.insert(slot);
        } else {
            set.remove(&slot);
        }
        Ok(())
    }

    /// Replace a participant's entire selection set.
    ///
    /// Last-write-wins: whatever was stored for this participant before is
    /// discarded. Re-applying the same set any number of times leaves the
    /// store unchanged.
    ///
    /// # Errors
    /// Returns [`QuorumError::UnknownParticipant`] when `participant_id`
    /// is not on the roster.
    pub fn replace_selections(
        &mut self,
        roster: &Roster,
        participant_id: &str,
        slots: BTreeSet<Slot>,
    ) -> Result<()> {
        self.check_member(roster, participant_id)?;
        self.sets.insert(participant_id.to_string(), slots);
        Ok(())
    }

    /// Drop a participant's partition entirely (the purge half of the
    /// removal policy). Removing an absent participant is a no-op.
    pub fn remove_participant(&mut self, participant_id: &str) {
        self.sets.remove(participant_id);
    }

    /// The per-participant selection sets, the aggregator's input.
    pub fn sets(&self) -> &BTreeMap<String, BTreeSet<Slot>> {
        &self.sets
    }

    /// A single participant's current set, if they have written one.
    pub fn participant_slots(&self, participant_id: &str) -> Option<&BTreeSet<Slot>> {
        self.sets.get(participant_id)
    }

    /// Whether a participant currently marks the given slot.
    pub fn is_selected(&self, participant_id: &str, slot: &Slot) -> bool {
        self.sets
            .get(participant_id)
            .is_some_and(|set| set.contains(slot))
    }

    fn check_member(&self, roster: &Roster, participant_id: &str) -> Result<()> {
        if roster.contains(participant_id) {
            Ok(())
        } else {
            Err(QuorumError::UnknownParticipant(participant_id.to_string()))
        }
    }
}
