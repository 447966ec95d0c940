/// Rounds a value to the given number of decimal places.
///
/// Halves round away from zero, matching half-up rounding for the signed
/// deltas and distances produced by the forecast engine.
///
/// # Arguments
///
/// * 'value' - the value to round
/// * 'places' - number of decimal places to keep
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
