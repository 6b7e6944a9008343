use chrono::NaiveTime;

/// Fleet-default pace in stops per hour.
pub const DEFAULT_PACE: f64 = 20.0;

/// Safety buffer before shift end, in minutes.
pub const DEFAULT_BUFFER_MINUTES: u32 = 30;

pub fn default_shift_end() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 5, 0).expect("valid static default shift end")
}
