//! Participant roster — who has joined an event, in join order.
//!
//! Names are the natural key within an event: joining again with a name
//! that is already on the roster returns the existing participant instead
//! of creating a duplicate. Colors are assigned deterministically from the
//! join order, cycling through a fixed palette.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed display palette, indexed by join order modulo its length.
pub const PARTICIPANT_COLORS: [&str; 7] = [
    "#8B5CF6", // purple
    "#EC4899", // pink
    "#3B82F6", // blue
    "#06B6D4", // light blue
    "#14B8A6", // turquoise
    "#F59E0B", // yellow
    "#10B981", // green
];

/// Color for the participant joining at `join_index` (0-based).
pub fn participant_color(join_index: usize) -> &'static str {
    PARTICIPANT_COLORS[join_index % PARTICIPANT_COLORS.len()]
}

/// One member of an event's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Display name — unique within the roster.
    pub name: String,
    /// Palette color assigned at join time from the join order.
    pub color: String,
    /// Join timestamp, supplied by the store.
    pub joined_at: DateTime<Utc>,
}

/// An event's participants in join order.
///
/// The join index of a member is its position in the list; the roster size
/// is the denominator of the conflict-level ratio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    members: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a roster from members already in join order, e.g. from a
    /// stored snapshot. Colors are taken as-is.
    pub fn from_members(members: Vec<Participant>) -> Self {
        Roster { members }
    }

    /// Join the roster, or return the existing member with the same name.
    ///
    /// `id` and `joined_at` are only consumed for a genuinely new member;
    /// a rejoin returns the original participant unchanged, so a rejoin is
    /// idempotent and never reshuffles colors.
    pub fn join(
        &mut self,
        id: impl Into<String>,
        name: &str,
        joined_at: DateTime<Utc>,
    ) -> Participant {
        if let Some(existing) = self.members.iter().find(|p| p.name == name) {
            return existing.clone();
        }

        let participant = Participant {
            id: id.into(),
            name: name.to_string(),
            color: participant_color(self.members.len()).to_string(),
            joined_at,
        };
        self.members.push(participant.clone());
        participant
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.members.iter().find(|p| p.id == id)
    }

    /// Members in join order.
    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove a member by id, returning it if present.
    ///
    /// Later members keep their already-assigned colors; only future joins
    /// see the shrunken roster length.
    pub fn remove(&mut self, id: &str) -> Option<Participant> {
        let index = self.members.iter().position(|p| p.id == id)?;
        Some(self.members.remove(index))
    }
}
