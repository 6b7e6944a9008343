//! Calculation parameter types

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Parameters for a single rescue calculation.
///
/// Immutable per invocation — changing any field means recomputing the
/// whole result set from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationParams {
    /// Nominal end of shift (wall-clock hour/minute).
    pub shift_end_time: NaiveTime,
    /// Fleet-default pace in stops per hour.
    pub default_pace: f64,
    /// Safety buffer subtracted from shift end to get the last-stop deadline.
    pub buffer_minutes: u32,
    /// When true, a valid per-row pace value overrides the default.
    pub use_individual_pace: bool,
    /// Enables the late-shift fatigue/traffic pace penalty.
    pub smart_adjustment: bool,
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            shift_end_time: defaults::default_shift_end(),
            default_pace: defaults::DEFAULT_PACE,
            buffer_minutes: defaults::DEFAULT_BUFFER_MINUTES,
            use_individual_pace: false,
            smart_adjustment: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_app_defaults() {
        let params = CalculationParams::default();
        assert_eq!(params.shift_end_time, NaiveTime::from_hms_opt(20, 5, 0).unwrap());
        assert_eq!(params.default_pace, 20.0);
        assert_eq!(params.buffer_minutes, 30);
        assert!(!params.use_individual_pace);
        assert!(params.smart_adjustment);
    }

    #[test]
    fn test_params_serialize_camel_case() {
        let params = CalculationParams::default();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"shiftEndTime\""));
        assert!(json.contains("\"defaultPace\""));
        assert!(json.contains("\"bufferMinutes\""));
        assert!(json.contains("\"useIndividualPace\""));
        assert!(json.contains("\"smartAdjustment\""));
    }
}
