//! Snapshot boundary — the wire shapes exchanged with the Event Store and
//! the rendering layer.
//!
//! Selections travel flattened: one row per participant-slot pair,
//! semantically a participant → slot-set mapping. A snapshot bundles the
//! event, the roster in join order, and the current rows; ranking a
//! snapshot runs the whole pipeline (group → aggregate → rank) in one
//! call. Transport and persistence of these shapes are out of scope.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::event::Event;
use crate::grid::Slot;
use crate::rank::{rank, RankedSlot};
use crate::roster::Participant;

/// One flattened selection mark: this participant can attend this slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectionRow {
    pub participant_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl SelectionRow {
    pub fn slot(&self) -> Slot {
        Slot {
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// The full state of one event as delivered by the Event Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub event: Event,
    /// Roster in join order (join index = position).
    pub participants: Vec<Participant>,
    /// Flattened per-slot markings for every participant.
    pub selections: Vec<SelectionRow>,
}

/// Group flattened rows into the per-participant selection sets.
///
/// Duplicate rows collapse (set semantics), and row order is irrelevant —
/// redelivering or reordering rows yields the same mapping. Rows are
/// grouped for whatever participant ids they carry; ids unknown to the
/// roster are dropped later, at rank time.
pub fn selection_sets(rows: &[SelectionRow]) -> BTreeMap<String, BTreeSet<Slot>> {
    let mut sets: BTreeMap<String, BTreeSet<Slot>> = BTreeMap::new();
    for row in rows {
        sets.entry(row.participant_id.clone())
            .or_default()
            .insert(row.slot());
    }
    sets
}

/// Flatten per-participant sets back into wire rows, in deterministic
/// (participant, slot) order.
pub fn flatten_selections(sets: &BTreeMap<String, BTreeSet<Slot>>) -> Vec<SelectionRow> {
    sets.iter()
        .flat_map(|(participant_id, slots)| {
            slots.iter().map(move |slot| SelectionRow {
                participant_id: participant_id.clone(),
                date: slot.date,
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
            })
        })
        .collect()
}

/// Rank a snapshot: group its rows, aggregate, and order by attendance.
///
/// Safe to call on every delivery, however stale or redundant — the
/// pipeline is pure, and rows for participants no longer on the roster
/// simply stop contributing.
pub fn rank_snapshot(snapshot: &EventSnapshot) -> Vec<RankedSlot> {
    let sets = selection_sets(&snapshot.selections);
    let aggregated = aggregate(&sets);
    rank(&aggregated, &snapshot.participants)
}
