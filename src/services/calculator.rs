//! Rescue calculation engine.
//!
//! Given the raw itinerary rows and the calculation parameters, this module
//! computes per-driver capacity against the last-stop deadline, classifies
//! drivers as behind or ahead, and aggregates the fleet summary. The
//! computation is pure: "now" is an explicit input, so identical inputs
//! always produce identical output.

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::types::{
    CalculationParams, CalculationResult, DriverCalculated, FleetSummary, PaceSource, ShiftMeta,
};

// Fixed column positions of the itinerary export. Purely positional, no
// header-name lookup.
const COL_ROUTE_ID: usize = 0;
const COL_DRIVER_NAME: usize = 1;
const COL_COMPLETED: usize = 11;
const COL_REMAINING: usize = 12;
const COL_PACE: usize = 14;

/// Minimum cell count for a row to be considered at all.
const MIN_ROW_CELLS: usize = 12;

// Late-shift pace penalty. Within the last 2.5 hours traffic and fatigue
// cost roughly 15%, within the last 4 hours roughly 8%. Step function,
// strict `<` at both boundaries.
const CRUNCH_WINDOW_HOURS: f64 = 2.5;
const CRUNCH_FACTOR: f64 = 0.85;
const WINDDOWN_WINDOW_HOURS: f64 = 4.0;
const WINDDOWN_FACTOR: f64 = 0.92;

/// A raw row after per-cell parse and validation, before any numeric logic.
#[derive(Debug, Clone, PartialEq)]
struct ParsedRow {
    route_id: Option<String>,
    name: String,
    completed: i32,
    remaining: i32,
    /// Per-driver pace cell, parsed but not yet validated as positive.
    file_pace: Option<f64>,
}

/// Time budget shared by all drivers in one invocation.
#[derive(Debug, Clone)]
struct TimeBudget {
    deadline: NaiveDateTime,
    hours_remaining: f64,
}

// ---------------------------------------------------------------------------
// Time budget
// ---------------------------------------------------------------------------

/// Anchor the shift end to today, roll it forward a day when it is already
/// in the past (shifts crossing midnight), subtract the buffer, and clamp
/// the remaining time at zero. A deadline already passed is not an error —
/// it yields zero capacity for everyone.
fn resolve_time_budget(params: &CalculationParams, now: NaiveDateTime) -> TimeBudget {
    let mut shift_end = now.date().and_time(params.shift_end_time);
    if shift_end < now {
        shift_end += Duration::days(1);
    }

    let deadline = shift_end - Duration::minutes(params.buffer_minutes as i64);
    let hours_remaining = (deadline - now).num_milliseconds().max(0) as f64 / 3_600_000.0;

    TimeBudget {
        deadline,
        hours_remaining,
    }
}

/// Global pace multiplier modeling fatigue/traffic degradation near the
/// deadline. Exact boundary values fall into the less-penalized branch.
pub fn efficiency_factor(hours_remaining: f64, smart_adjustment: bool) -> f64 {
    if !smart_adjustment {
        return 1.0;
    }
    if hours_remaining < CRUNCH_WINDOW_HOURS {
        CRUNCH_FACTOR
    } else if hours_remaining < WINDDOWN_WINDOW_HOURS {
        WINDDOWN_FACTOR
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Row extraction
// ---------------------------------------------------------------------------

fn parse_count(cell: &str) -> Option<i32> {
    let value = cell.trim().parse::<i32>().ok()?;
    (value >= 0).then_some(value)
}

/// Parse-and-validate a single raw row. Returns `None` for rows that must
/// be skipped: too few cells, empty driver name, or stop counts that do not
/// parse as non-negative integers.
fn parse_row(row: &[String]) -> Option<ParsedRow> {
    if row.len() < MIN_ROW_CELLS {
        return None;
    }

    let name = row.get(COL_DRIVER_NAME)?.trim().replace('"', "");
    if name.is_empty() {
        return None;
    }

    let completed = parse_count(row.get(COL_COMPLETED)?)?;
    let remaining = parse_count(row.get(COL_REMAINING)?)?;

    let route_id = row
        .get(COL_ROUTE_ID)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let file_pace = row.get(COL_PACE).and_then(|s| s.trim().parse::<f64>().ok());

    Some(ParsedRow {
        route_id,
        name,
        completed,
        remaining,
        file_pace,
    })
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Compute per-driver rescue records, the fleet summary, and shift metadata.
///
/// Row 0 is a header and always skipped. Malformed rows are skipped silently
/// — partial-file corruption must not block analysis of the valid rows — so
/// an empty result set is legitimate. Never panics on input data.
pub fn calculate_driver_stats(
    raw_rows: &[Vec<String>],
    params: &CalculationParams,
    now: NaiveDateTime,
) -> CalculationResult {
    let budget = resolve_time_budget(params, now);
    let factor = efficiency_factor(budget.hours_remaining, params.smart_adjustment);

    let mut drivers: Vec<DriverCalculated> = Vec::new();

    for (index, row) in raw_rows.iter().enumerate().skip(1) {
        let Some(parsed) = parse_row(row) else {
            debug!("Skipping malformed itinerary row {}", index);
            continue;
        };

        // Pace resolution: a requested per-row pace must parse as strictly
        // positive, otherwise the fleet default applies.
        let (pace, pace_source) = match parsed.file_pace {
            Some(p) if params.use_individual_pace && p > 0.0 => (p, PaceSource::File),
            _ => (params.default_pace, PaceSource::Default),
        };

        // The penalty applies only to capacity/ETA math; the nominal pace
        // is what gets reported.
        let effective_pace = pace * factor;

        let (can_complete, eta) = if effective_pace > 0.0 {
            let can = (budget.hours_remaining * effective_pace).floor() as i32;
            let eta_seconds = (parsed.remaining as f64 / effective_pace * 3600.0).round() as i64;
            let eta = (now + Duration::seconds(eta_seconds)).format("%H:%M").to_string();
            (can, Some(eta))
        } else {
            // Degenerate pace: the driver finishes nothing and the route is
            // unreachable.
            (0, None)
        };

        let diff = parsed.remaining - can_complete;
        let total = parsed.completed + parsed.remaining;
        let progress = if total > 0 {
            ((parsed.completed as f64 / total as f64) * 100.0).round() as i32
        } else {
            0
        };

        drivers.push(DriverCalculated {
            id: format!("row-{}", index),
            route_id: parsed
                .route_id
                .unwrap_or_else(|| format!("RT-{}", 100 + index)),
            name: parsed.name,
            completed: parsed.completed,
            remaining: parsed.remaining,
            total,
            progress,
            can_complete,
            diff,
            pace,
            pace_source,
            eta,
        });
    }

    let summary = summarize(&drivers);

    CalculationResult {
        drivers,
        summary,
        meta: ShiftMeta {
            hours_remaining: budget.hours_remaining,
            deadline: budget.deadline.format("%H:%M").to_string(),
        },
    }
}

/// Partition drivers by sign of `diff` and compute the fleet counters.
/// Every driver lands in exactly one partition.
fn summarize(drivers: &[DriverCalculated]) -> FleetSummary {
    let mut summary = FleetSummary {
        total_drivers: drivers.len() as i32,
        total_rescue_needed: 0,
        total_stops_to_rescue: 0,
        total_stops_available: 0,
    };

    for driver in drivers {
        if driver.diff > 0 {
            summary.total_rescue_needed += 1;
            summary.total_stops_to_rescue += driver.diff;
        } else {
            summary.total_stops_available += -driver.diff;
        }
    }

    summary
}

// ===========================================================================
// Tests
// ===========================================================================
