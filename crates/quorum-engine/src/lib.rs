//! # quorum-engine
//!
//! Availability aggregation and slot ranking for group scheduling.
//!
//! Participants independently mark availability on a shared calendar grid;
//! the engine computes which slots the most people can attend. Per-
//! participant updates are last-write-wins over an owned selection set,
//! and the cross-participant merge is a pure union — so aggregation is
//! commutative and idempotent, and live collaboration needs no
//! coordination between writers. The engine itself performs no I/O.
//!
//! ## Modules
//!
//! - [`event`] — immutable event model and daypart windows
//! - [`grid`] — canonical slot grid for a day (duration × daypart)
//! - [`roster`] — participants, join-by-name, color palette
//! - [`selection`] — per-participant selection sets (last-write-wins)
//! - [`aggregate`] — union of selections across participants, keyed by slot
//! - [`rank`] — attendance ranking and conflict-level classification
//! - [`snapshot`] — wire shapes and the snapshot → ranked pipeline
//! - [`store`] — in-memory Event Store with live-update subscriptions
//! - [`error`] — error types

pub mod aggregate;
pub mod error;
pub mod event;
pub mod grid;
pub mod rank;
pub mod roster;
pub mod selection;
pub mod snapshot;
pub mod store;

pub use aggregate::aggregate;
pub use error::QuorumError;
pub use event::{Event, Timeframe};
pub use grid::{generate_grid, Slot};
pub use rank::{classify_conflict, rank, ConflictLevel, RankedSlot};
pub use roster::{participant_color, Participant, Roster, PARTICIPANT_COLORS};
pub use selection::SelectionStore;
pub use snapshot::{rank_snapshot, selection_sets, EventSnapshot, SelectionRow};
pub use store::{EventState, MemoryEventStore, RemovalPolicy, Subscription};
