//! Slot ranking and conflict classification — the externally consumed view.
//!
//! Turns the aggregated per-slot attendance sets into an ordered list of
//! ranked slots: best-attended first, deterministic tie-break, and a
//! coarse three-tier "conflict level" summarizing what fraction of the
//! roster can attend. The ranking is rebuilt in full on every call — it is
//! a view over the aggregation, never stored.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grid::Slot;
use crate::roster::Participant;

/// How contested a slot is, as a fraction of the roster that can attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictLevel {
    /// At least 80% of the roster can attend.
    High,
    /// At least 50% of the roster can attend.
    Medium,
    /// Fewer than half can attend (or the roster is empty).
    Low,
}

impl ConflictLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictLevel::High => "high",
            ConflictLevel::Medium => "medium",
            ConflictLevel::Low => "low",
        }
    }
}

impl fmt::Display for ConflictLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify attendance against the roster size.
///
/// Thresholds are inclusive on the lower bound: ratio ≥ 0.8 is high,
/// ratio ≥ 0.5 is medium, anything below is low. An empty roster makes
/// every slot low by definition — never a division error.
pub fn classify_conflict(participant_count: usize, total_participants: usize) -> ConflictLevel {
    if total_participants == 0 {
        return ConflictLevel::Low;
    }
    let ratio = participant_count as f64 / total_participants as f64;
    if ratio >= 0.8 {
        ConflictLevel::High
    } else if ratio >= 0.5 {
        ConflictLevel::Medium
    } else {
        ConflictLevel::Low
    }
}

/// One entry of the ranked output view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSlot {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    /// Attending roster members, in deterministic (set) order.
    pub participant_ids: Vec<String>,
    pub participant_count: usize,
    /// Display names resolved from the roster, in the same order as
    /// `participant_ids`.
    pub participant_names: Vec<String>,
    pub conflict_level: ConflictLevel,
}

/// Rank aggregated slots by attendance.
///
/// Ids that are no longer on the roster are dropped silently — a
/// participant removed mid-session simply stops contributing to ids,
/// names, and counts. Slots left with zero attendees are excluded from the
/// output entirely.
///
/// Ordering: `participant_count` descending, then `start_time` ascending
/// (lexicographic equals chronological for zero-padded times), then `date`
/// ascending for cross-day ties.
pub fn rank(
    aggregated: &BTreeMap<Slot, BTreeSet<String>>,
    participants: &[Participant],
) -> Vec<RankedSlot> {
    let total = participants.len();

    let mut ranked: Vec<RankedSlot> = aggregated
        .iter()
        .filter_map(|(slot, ids)| {
            let mut participant_ids = Vec::new();
            let mut participant_names = Vec::new();
            for id in ids {
                if let Some(member) = participants.iter().find(|p| &p.id == id) {
                    participant_ids.push(member.id.clone());
                    participant_names.push(member.name.clone());
                }
            }

            if participant_ids.is_empty() {
                return None;
            }

            let participant_count = participant_ids.len();
            Some(RankedSlot {
                date: slot.date,
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                participant_ids,
                participant_count,
                participant_names,
                conflict_level: classify_conflict(participant_count, total),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.participant_count
            .cmp(&a.participant_count)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.date.cmp(&b.date))
    });

    ranked
}
