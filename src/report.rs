//! Plain-text rendering of calculation results.

use crate::types::{CalculationResult, DriverCalculated, PaceSource};

/// Render the driver table and fleet summary for stdout. Drivers are listed
/// worst-first (largest deficit at the top); a `*` after the pace marks a
/// per-driver value taken from the file.
pub fn render_report(result: &CalculationResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Last-stop deadline {} ({:.2} h remaining)\n\n",
        result.meta.deadline, result.meta.hours_remaining
    ));

    out.push_str(&format!(
        "{:<10} {:<20} {:>5} {:>5} {:>5} {:>7} {:>5} {:>5}  {}\n",
        "ROUTE", "DRIVER", "DONE", "LEFT", "PROG", "PACE", "CAP", "DIFF", "ETA"
    ));

    let mut drivers: Vec<&DriverCalculated> = result.drivers.iter().collect();
    drivers.sort_by(|a, b| b.diff.cmp(&a.diff));

    for d in drivers {
        let pace = match d.pace_source {
            PaceSource::File => format!("{:.1}*", d.pace),
            PaceSource::Default => format!("{:.1}", d.pace),
        };
        out.push_str(&format!(
            "{:<10} {:<20} {:>5} {:>5} {:>4}% {:>7} {:>5} {:>+5}  {}\n",
            d.route_id,
            d.name,
            d.completed,
            d.remaining,
            d.progress,
            pace,
            d.can_complete,
            d.diff,
            d.eta.as_deref().unwrap_or("—"),
        ));
    }

    let s = &result.summary;
    out.push_str(&format!(
        "\nDrivers: {}   Needing rescue: {}   Stops to rescue: {}   Surplus capacity: {}\n",
        s.total_drivers, s.total_rescue_needed, s.total_stops_to_rescue, s.total_stops_available
    ));

    out
}
