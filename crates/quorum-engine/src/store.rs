//! In-process Event Store — the live-collaboration boundary around the
//! engine.
//!
//! [`EventState`] holds one event's roster and selections behind a typed
//! facade with a recomputed ranked view. [`MemoryEventStore`] keeps many
//! events, assigns ids, and delivers the full current [`EventSnapshot`] to
//! subscribers on every roster or selection change. Delivery is
//! at-least-once and unordered by contract; the aggregation pipeline's
//! idempotence and commutativity are what make that safe, so subscribers
//! simply re-rank whatever snapshot arrives.
//!
//! A networked store implementing the same surface is out of scope here;
//! its failures belong to the transport layer, not to this contract.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::error::{QuorumError, Result};
use crate::event::{Event, Timeframe};
use crate::grid::{generate_grid, Slot};
use crate::rank::{rank, RankedSlot};
use crate::roster::{Participant, Roster};
use crate::selection::SelectionStore;
use crate::snapshot::{flatten_selections, EventSnapshot};

/// What happens to a departing participant's stored selections.
///
/// Under either policy the participant stops counting toward ranked output
/// the moment they leave the roster; the policies differ only in whether
/// the stored rows survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Delete the participant's selections with them. A later rejoin
    /// starts from a clean slate.
    #[default]
    Purge,
    /// Keep the rows in storage (visible in snapshots, never in counts).
    Retain,
}

/// One event's complete mutable state: roster plus selections.
///
/// All writes go through roster-checked methods; reads are recomputed
/// views. Usable standalone for single-event embedding, and as the
/// per-event unit inside [`MemoryEventStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventState {
    event: Event,
    roster: Roster,
    selections: SelectionStore,
}

impl EventState {
    pub fn new(event: Event) -> Self {
        EventState {
            event,
            roster: Roster::new(),
            selections: SelectionStore::new(),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    /// Join by name, or return the existing member (see [`Roster::join`]).
    pub fn join(
        &mut self,
        id: impl Into<String>,
        name: &str,
        joined_at: DateTime<Utc>,
    ) -> Participant {
        self.roster.join(id, name, joined_at)
    }

    /// Toggle one slot for a participant.
    pub fn set_selection(&mut self, participant_id: &str, slot: Slot, present: bool) -> Result<()> {
        self.selections
            .set_selection(&self.roster, participant_id, slot, present)
    }

    /// Replace a participant's whole selection set (last-write-wins).
    pub fn replace_selections(&mut self, participant_id: &str, slots: BTreeSet<Slot>) -> Result<()> {
        self.selections
            .replace_selections(&self.roster, participant_id, slots)
    }

    /// Remove a participant from the roster, applying the given policy to
    /// their stored selections.
    ///
    /// # Errors
    /// Returns [`QuorumError::UnknownParticipant`] if the id is not on the
    /// roster.
    pub fn remove_participant(
        &mut self,
        participant_id: &str,
        policy: RemovalPolicy,
    ) -> Result<Participant> {
        let removed = self
            .roster
            .remove(participant_id)
            .ok_or_else(|| QuorumError::UnknownParticipant(participant_id.to_string()))?;
        if policy == RemovalPolicy::Purge {
            self.selections.remove_participant(participant_id);
        }
        Ok(removed)
    }

    /// The canonical slot grid for one day of this event.
    pub fn grid_for(&self, date: NaiveDate) -> Vec<Slot> {
        generate_grid(date, self.event.duration, self.event.timeframe)
    }

    /// The current ranked view: aggregate the selections, then order by
    /// attendance. Cheap (bounded by grid size), recomputed on every call.
    pub fn ranked(&self) -> Vec<RankedSlot> {
        let aggregated = aggregate(self.selections.sets());
        rank(&aggregated, self.roster.members())
    }

    /// Snapshot the full state in the wire shape.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            event: self.event.clone(),
            participants: self.roster.members().to_vec(),
            selections: flatten_selections(self.selections.sets()),
        }
    }
}

type ChangeCallback = Arc<dyn Fn(&EventSnapshot) + Send + Sync>;

struct EventEntry {
    state: EventState,
    subscribers: Vec<(u64, ChangeCallback)>,
}

#[derive(Default)]
struct StoreInner {
    events: BTreeMap<String, EventEntry>,
    next_event: u64,
    next_participant: u64,
    next_subscription: u64,
}

/// In-memory, thread-safe Event Store with live-update subscriptions.
///
/// Clones share the same underlying store. A single mutex guards the
/// state; change callbacks run after the guard is released, so a callback
/// may re-enter the store (to write a reaction, take a snapshot, or
/// unsubscribe) without deadlocking.
#[derive(Clone, Default)]
pub struct MemoryEventStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event with a store-assigned sequential id.
    ///
    /// # Errors
    /// Returns [`QuorumError::InvalidDuration`] when the duration does not
    /// fit the timeframe window.
    pub fn create_event(
        &self,
        name: &str,
        description: Option<String>,
        duration: u32,
        timeframe: Timeframe,
    ) -> Result<Event> {
        let mut inner = self.lock();
        let id = format!("evt-{}", inner.next_event);
        let event = Event::new(id, name, description, duration, timeframe, Utc::now())?;
        inner.next_event += 1;
        inner.events.insert(
            event.id.clone(),
            EventEntry {
                state: EventState::new(event.clone()),
                subscribers: Vec::new(),
            },
        );
        Ok(event)
    }

    /// Look up an event by id.
    pub fn event(&self, event_id: &str) -> Result<Event> {
        let inner = self.lock();
        let entry = Self::entry(&inner, event_id)?;
        Ok(entry.state.event().clone())
    }

    /// Snapshot an event's full current state.
    pub fn snapshot(&self, event_id: &str) -> Result<EventSnapshot> {
        let inner = self.lock();
        let entry = Self::entry(&inner, event_id)?;
        Ok(entry.state.snapshot())
    }

    /// Join an event by name, or return the existing member with that
    /// name. Notifies subscribers either way (the roster is the ratio
    /// denominator, and redundant delivery is harmless).
    pub fn join(&self, event_id: &str, name: &str) -> Result<Participant> {
        let (participant, snapshot, callbacks) = {
            let mut inner = self.lock();
            let id = format!("p-{}", inner.next_participant);
            let (participant, grew, snapshot, callbacks) = {
                let entry = Self::entry_mut(&mut inner, event_id)?;
                let before = entry.state.roster().len();
                let participant = entry.state.join(id.as_str(), name, Utc::now());
                let grew = entry.state.roster().len() > before;
                (participant, grew, entry.state.snapshot(), Self::callbacks(entry))
            };
            // The id counter only advances for genuinely new members.
            if grew {
                inner.next_participant += 1;
            }
            (participant, snapshot, callbacks)
        };
        Self::deliver(&callbacks, &snapshot);
        Ok(participant)
    }

    /// Persist a replace-style selection update for one participant.
    ///
    /// # Errors
    /// [`QuorumError::UnknownEvent`] / [`QuorumError::UnknownParticipant`]
    /// for ids the store does not know; both are recoverable by refreshing
    /// and retrying.
    pub fn write_selection(
        &self,
        event_id: &str,
        participant_id: &str,
        slots: &[Slot],
    ) -> Result<()> {
        self.mutate(event_id, |state| {
            state.replace_selections(participant_id, slots.iter().cloned().collect())
        })
    }

    /// Toggle a single slot for one participant.
    pub fn toggle_selection(
        &self,
        event_id: &str,
        participant_id: &str,
        slot: Slot,
        present: bool,
    ) -> Result<()> {
        self.mutate(event_id, |state| {
            state.set_selection(participant_id, slot, present)
        })
    }

    /// Remove a participant, applying the selection policy.
    pub fn remove_participant(
        &self,
        event_id: &str,
        participant_id: &str,
        policy: RemovalPolicy,
    ) -> Result<Participant> {
        self.mutate(event_id, |state| {
            state.remove_participant(participant_id, policy)
        })
    }

    /// Register a change callback for one event.
    ///
    /// The callback receives the current snapshot immediately, then a
    /// fresh snapshot after every roster or selection change, until the
    /// returned [`Subscription`] is dropped or explicitly unsubscribed.
    /// Delivery is at-least-once: subscribers must tolerate redundant
    /// snapshots, which the ranking pipeline does by construction.
    pub fn subscribe<F>(&self, event_id: &str, on_change: F) -> Result<Subscription>
    where
        F: Fn(&EventSnapshot) + Send + Sync + 'static,
    {
        let callback: ChangeCallback = Arc::new(on_change);
        let (id, snapshot) = {
            let mut inner = self.lock();
            let sub_id = inner.next_subscription;
            inner.next_subscription += 1;
            let entry = Self::entry_mut(&mut inner, event_id)?;
            entry.subscribers.push((sub_id, Arc::clone(&callback)));
            (sub_id, entry.state.snapshot())
        };
        // Initial delivery happens outside the lock, like every other.
        callback(&snapshot);
        Ok(Subscription {
            inner: Arc::clone(&self.inner),
            event_id: event_id.to_string(),
            id,
        })
    }

    /// Run a mutation against one event, then notify its subscribers with
    /// the resulting snapshot. Callbacks are cloned out and invoked after
    /// the guard drops.
    fn mutate<T>(
        &self,
        event_id: &str,
        op: impl FnOnce(&mut EventState) -> Result<T>,
    ) -> Result<T> {
        let (value, snapshot, callbacks) = {
            let mut inner = self.lock();
            let entry = Self::entry_mut(&mut inner, event_id)?;
            let value = op(&mut entry.state)?;
            (value, entry.state.snapshot(), Self::callbacks(entry))
        };
        Self::deliver(&callbacks, &snapshot);
        Ok(value)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("event store mutex poisoned")
    }

    fn entry<'a>(inner: &'a StoreInner, event_id: &str) -> Result<&'a EventEntry> {
        inner
            .events
            .get(event_id)
            .ok_or_else(|| QuorumError::UnknownEvent(event_id.to_string()))
    }

    fn entry_mut<'a>(inner: &'a mut StoreInner, event_id: &str) -> Result<&'a mut EventEntry> {
        inner
            .events
            .get_mut(event_id)
            .ok_or_else(|| QuorumError::UnknownEvent(event_id.to_string()))
    }

    fn callbacks(entry: &EventEntry) -> Vec<ChangeCallback> {
        entry.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }

    fn deliver(callbacks: &[ChangeCallback], snapshot: &EventSnapshot) {
        for callback in callbacks {
            callback(snapshot);
        }
    }
}

/// Handle for an active subscription. Dropping it (or calling
/// [`Subscription::unsubscribe`]) deregisters the callback; nothing is
/// delivered afterwards.
pub struct Subscription {
    inner: Arc<Mutex<StoreInner>>,
    event_id: String,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the deregistration.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(entry) = inner.events.get_mut(&self.event_id) {
                entry.subscribers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
