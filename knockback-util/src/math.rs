/// Rounds `value` to `places` decimal places, halfway cases away from zero.
#[must_use]
pub fn round(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
