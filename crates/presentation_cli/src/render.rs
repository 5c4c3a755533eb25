//! Text rendering of plans and estimates for the terminal

use application::{GeocodedPlace, JourneyPlan};
use domain::{HoursMinutes, JourneyEstimate};

const LABEL_WIDTH: usize = 22;

fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {label:<LABEL_WIDTH$}{value}")
}

/// Metrics block shared by `plan` and `estimate`
pub fn render_estimate(estimate: &JourneyEstimate) -> String {
    let mut lines = vec![
        "📊 Route data".to_string(),
        row("Distance:", format!("{:.2} km", estimate.total_distance_km)),
        row("Driving:", estimate.driving_text()),
        row("Total (with breaks):", estimate.adjusted_text()),
        row("Departure:", estimate.departure_time.format("%H:%M")),
        row("Estimated arrival:", estimate.estimated_arrival),
    ];

    if estimate.rest_break_count > 0 {
        lines.push(row(
            "Rest breaks:",
            format!(
                "{} ({})",
                estimate.rest_break_count,
                HoursMinutes::from_hours(estimate.break_hours())
            ),
        ));
    }

    lines.push(String::new());
    if estimate.mandatory_daily_rest_applied {
        let daily_rest = HoursMinutes::from_hours(
            estimate.total_duration_with_daily_rest_hours - estimate.adjusted_duration_hours,
        );
        lines.push(format!(
            "⚠️  Mandatory daily rest added ({daily_rest}). Adjusted total: {}",
            estimate.total_text()
        ));
    } else {
        lines.push("🟢 The journey fits in a single working shift.".to_string());
    }

    lines.join("\n")
}

fn place_row(label: &str, place: &GeocodedPlace) -> String {
    row(
        label,
        format!("{}  ({})", place.display_name(), place.coordinate),
    )
}

/// Full plan: metrics, places in order, route summary
pub fn render_plan(plan: &JourneyPlan) -> String {
    let mut lines = vec![render_estimate(&plan.estimate), String::new()];

    lines.push("🗺️  Route".to_string());
    lines.push(place_row("Origin:", &plan.origin));
    for (i, stop) in plan.stops.iter().enumerate() {
        lines.push(place_row(&format!("Stop {}:", i + 1), stop));
    }
    lines.push(place_row("Destination:", &plan.destination));
    lines.push(row(
        "Polyline:",
        format!("{} points ({})", plan.route.geometry.len(), plan.profile),
    ));

    lines.join("\n")
}
