//! WASM bindings for quorum-engine.
//!
//! Exposes slot grid generation, snapshot ranking, and conflict
//! classification to JavaScript via `wasm-bindgen`. All complex types are
//! passed as JSON strings; the browser app deserializes the ranked view
//! straight into its calendar components.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p quorum-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/quorum_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use quorum_engine::event::Timeframe;
use quorum_engine::snapshot::EventSnapshot;
use quorum_engine::{classify_conflict, generate_grid, rank_snapshot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse the string-typed inputs crossing the boundary
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` date string.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Parse a timeframe wire name (`morning`, `afternoon`, `evening`,
/// `all-day`).
fn parse_timeframe(s: &str) -> Result<Timeframe, JsValue> {
    s.parse().map_err(|e: String| JsValue::from_str(&e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the canonical slot grid for one day.
///
/// Returns a JSON string containing an array of
/// `{date, start_time, end_time}` objects, chronologically ordered. A
/// duration that does not fit the window yields `[]`, not an error.
///
/// # Arguments
/// - `date` -- Calendar day as `YYYY-MM-DD`
/// - `duration_hours` -- Meeting length in whole hours
/// - `timeframe` -- Daypart name (`morning`, `afternoon`, `evening`, `all-day`)
#[wasm_bindgen(js_name = "generateGrid")]
pub fn generate_grid_json(
    date: &str,
    duration_hours: u32,
    timeframe: &str,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let timeframe = parse_timeframe(timeframe)?;

    let slots = generate_grid(date, duration_hours, timeframe);

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Rank an event snapshot by attendance.
///
/// `snapshot_json` must be a JSON object with `event`, `participants`, and
/// `selections` (flattened per-slot rows), as delivered by the Event
/// Store. Returns a JSON string containing the ordered array of ranked
/// slots: best-attended first, each with ids, resolved names, count, and
/// conflict level.
#[wasm_bindgen(js_name = "rankEvent")]
pub fn rank_event(snapshot_json: &str) -> Result<String, JsValue> {
    let snapshot: EventSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid snapshot JSON: {}", e)))?;

    let ranked = rank_snapshot(&snapshot);

    serde_json::to_string(&ranked)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Classify attendance against the roster size.
///
/// Returns `"high"`, `"medium"`, or `"low"`; an empty roster is always
/// `"low"`.
#[wasm_bindgen(js_name = "conflictLevel")]
pub fn conflict_level(participant_count: u32, total_participants: u32) -> String {
    classify_conflict(participant_count as usize, total_participants as usize)
        .as_str()
        .to_string()
}
