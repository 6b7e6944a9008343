//! Driver record and fleet summary types

use serde::{Deserialize, Serialize};

/// Which pace value was used for a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaceSource {
    /// Fleet-default pace from the calculation parameters.
    Default,
    /// Per-driver pace taken from the itinerary file.
    File,
}

impl PaceSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaceSource::Default => "default",
            PaceSource::File => "file",
        }
    }
}

/// Computed record for a single driver (one per valid input row).
///
/// Never mutated after creation — a parameter change discards and rebuilds
/// the full set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverCalculated {
    /// Stable per-row token (`row-{index}`).
    pub id: String,
    /// Route identifier from column 0, or a synthesized placeholder.
    pub route_id: String,
    /// Driver name, trimmed and quote-stripped.
    pub name: String,
    pub completed: i32,
    pub remaining: i32,
    /// Always `completed + remaining`.
    pub total: i32,
    /// Integer percentage 0–100; 0 when the route has no stops at all.
    pub progress: i32,
    /// Stops this driver is projected to finish before the deadline,
    /// at the penalty-adjusted pace.
    pub can_complete: i32,
    /// `remaining - can_complete`. Positive means rescue needed.
    pub diff: i32,
    /// Nominal pace (stops/hour) before the smart-adjustment penalty.
    pub pace: f64,
    pub pace_source: PaceSource,
    /// Projected finish time (`HH:MM`), or `None` when the effective pace
    /// is not positive and the route is unreachable.
    pub eta: Option<String>,
}

impl DriverCalculated {
    /// True when the driver is projected to finish short of their stops.
    pub fn needs_rescue(&self) -> bool {
        self.diff > 0
    }

    /// Surplus capacity in stops for on-pace/ahead drivers (0 when behind).
    pub fn surplus(&self) -> i32 {
        if self.diff <= 0 { -self.diff } else { 0 }
    }
}

/// Fleet-wide counters derived from the full driver set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_drivers: i32,
    /// Drivers with a positive diff.
    pub total_rescue_needed: i32,
    /// Sum of positive diffs.
    pub total_stops_to_rescue: i32,
    /// Sum of |diff| over drivers with a non-positive diff.
    pub total_stops_available: i32,
}

/// Shift-timing metadata, computed once per invocation and shared by all
/// drivers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftMeta {
    /// Hours until the last-stop deadline, clamped to zero.
    pub hours_remaining: f64,
    /// Last-stop deadline formatted `HH:MM` (shift end minus buffer).
    pub deadline: String,
}

/// Full output of one rescue calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub drivers: Vec<DriverCalculated>,
    pub summary: FleetSummary,
    pub meta: ShiftMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_driver(diff: i32) -> DriverCalculated {
        DriverCalculated {
            id: "row-1".to_string(),
            route_id: "R1".to_string(),
            name: "Alice".to_string(),
            completed: 40,
            remaining: 20,
            total: 60,
            progress: 67,
            can_complete: 20 - diff,
            diff,
            pace: 20.0,
            pace_source: PaceSource::Default,
            eta: Some("18:45".to_string()),
        }
    }

    #[test]
    fn test_needs_rescue_only_for_positive_diff() {
        assert!(sample_driver(5).needs_rescue());
        assert!(!sample_driver(0).needs_rescue());
        assert!(!sample_driver(-3).needs_rescue());
    }

    #[test]
    fn test_surplus_is_zero_for_behind_drivers() {
        assert_eq!(sample_driver(5).surplus(), 0);
        assert_eq!(sample_driver(0).surplus(), 0);
        assert_eq!(sample_driver(-7).surplus(), 7);
    }

    #[test]
    fn test_driver_serializes_camel_case() {
        let json = serde_json::to_string(&sample_driver(2)).unwrap();
        assert!(json.contains("\"routeId\":\"R1\""));
        assert!(json.contains("\"canComplete\""));
        assert!(json.contains("\"paceSource\":\"default\""));
    }

    #[test]
    fn test_pace_source_round_trip() {
        let json = serde_json::to_string(&PaceSource::File).unwrap();
        assert_eq!(json, "\"file\"");
        let back: PaceSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PaceSource::File);
        assert_eq!(PaceSource::Default.as_str(), "default");
    }
}
