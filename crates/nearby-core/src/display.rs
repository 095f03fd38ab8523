const METERS_IN_KM: f64 = 1000.0;

/// Human-readable distance: whole meters below 1 km, otherwise km with one
/// decimal.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < METERS_IN_KM {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / METERS_IN_KM)
    }
}
