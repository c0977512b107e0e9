//! Event model — the immutable description of what is being scheduled.
//!
//! An event fixes a meeting duration (whole hours) and a daypart window;
//! together they determine the canonical slot grid for every calendar day.
//! Events never change after creation — participants and selections carry
//! all of the mutable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QuorumError, Result};

/// Named daypart bounding slot generation.
///
/// Each variant maps to a fixed `[start_hour, end_hour)` window of naive
/// local wall-clock hours. There is no timezone handling anywhere in the
/// engine: a window is the same wall-clock range for every viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    /// 08:00–12:00
    Morning,
    /// 12:00–17:00
    #[default]
    Afternoon,
    /// 17:00–22:00
    Evening,
    /// 08:00–22:00
    AllDay,
}

impl Timeframe {
    /// The `[start_hour, end_hour)` window for this daypart.
    pub fn hours(self) -> (u32, u32) {
        match self {
            Timeframe::Morning => (8, 12),
            Timeframe::Afternoon => (12, 17),
            Timeframe::Evening => (17, 22),
            Timeframe::AllDay => (8, 22),
        }
    }

    /// Window length in hours — the longest duration that still fits.
    pub fn span(self) -> u32 {
        let (start, end) = self.hours();
        end - start
    }

    /// Wire name of this daypart (`morning`, `afternoon`, `evening`,
    /// `all-day`), matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Morning => "morning",
            Timeframe::Afternoon => "afternoon",
            Timeframe::Evening => "evening",
            Timeframe::AllDay => "all-day",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Timeframe::Morning),
            "afternoon" => Ok(Timeframe::Afternoon),
            "evening" => Ok(Timeframe::Evening),
            "all-day" => Ok(Timeframe::AllDay),
            other => Err(format!(
                "unknown timeframe '{}' (expected morning, afternoon, evening, or all-day)",
                other
            )),
        }
    }
}

/// An event being scheduled. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Meeting length in whole hours. Always `1..=timeframe.span()`.
    pub duration: u32,
    /// Daypart window bounding the slot grid.
    pub timeframe: Timeframe,
    /// Creation timestamp, supplied by the store.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create an event, validating the duration against the daypart window.
    ///
    /// # Errors
    /// Returns [`QuorumError::InvalidDuration`] when `duration` is zero or
    /// longer than the window. The grid generator itself never errors — a
    /// duration that passed this check can still produce a small grid, but
    /// never an empty one.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        duration: u32,
        timeframe: Timeframe,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if duration == 0 || duration > timeframe.span() {
            return Err(QuorumError::InvalidDuration {
                duration,
                timeframe,
            });
        }
        Ok(Event {
            id: id.into(),
            name: name.into(),
            description,
            duration,
            timeframe,
            created_at,
        })
    }
}
