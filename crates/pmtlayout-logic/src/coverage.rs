//! Coverage targeting: converts a coverage fraction into a sensor count
//! and back.

use std::f64::consts::PI;

/// Photosensitive area of one sensor.
pub fn active_area(active_diameter: f64) -> f64 {
    let radius = active_diameter / 2.0;
    PI * radius * radius
}

/// Sensors needed to reach `desired_coverage` of `total_wall_area`.
///
/// Rounds up, so the target always meets or exceeds the requested
/// coverage. Zero if either area is zero; saturates at `u64::MAX`.
pub fn target_count(desired_coverage: f64, total_wall_area: f64, active_area: f64) -> u64 {
    if total_wall_area <= 0.0 || active_area <= 0.0 {
        return 0;
    }
    (desired_coverage * total_wall_area / active_area).ceil() as u64
}

/// Fraction of wall area covered by `placed` sensors.
pub fn achieved_coverage(placed: u64, active_area: f64, total_wall_area: f64) -> f64 {
    if placed == 0 || total_wall_area <= 0.0 {
        return 0.0;
    }
    placed as f64 * active_area / total_wall_area
}
