//! Slot grid generation — the canonical candidate slots for a calendar day.
//!
//! Given a meeting duration and a daypart window, produces one slot per
//! integer start hour that still fits inside the window. The generator is a
//! pure function: same inputs, same ordered output, no side effects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::Timeframe;

/// A fixed-length candidate meeting interval on a specific date.
///
/// `start_time` and `end_time` are zero-padded `HH:MM` strings, so their
/// lexicographic order equals chronological order. The derived `Ord`
/// (date, then start, then end) makes `Slot` usable directly as the
/// aggregation map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl Slot {
    /// Build a slot from a start hour and duration on the given date.
    pub fn at_hour(date: NaiveDate, hour: u32, duration: u32) -> Self {
        Slot {
            date,
            start_time: format!("{:02}:00", hour),
            end_time: format!("{:02}:00", hour + duration),
        }
    }
}

/// Generate the ordered slot grid for one day.
///
/// Produces one slot per integer hour `h` in
/// `[start_hour, end_hour - duration]` inclusive, so the slot count is
/// `max(0, end_hour - start_hour - duration + 1)`.
///
/// A duration of zero, or one longer than the window, yields an empty grid
/// rather than an error: "no slots fit" is a legitimate, displayable
/// outcome. Callers that need to reject such durations up front do so at
/// event creation via [`Event::new`](crate::event::Event::new).
pub fn generate_grid(date: NaiveDate, duration: u32, timeframe: Timeframe) -> Vec<Slot> {
    let (start_hour, end_hour) = timeframe.hours();

    if duration == 0 || duration > end_hour - start_hour {
        return Vec::new();
    }

    (start_hour..=end_hour - duration)
        .map(|hour| Slot::at_hour(date, hour, duration))
        .collect()
}
