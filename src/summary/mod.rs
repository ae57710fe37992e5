pub mod attendance;
pub mod results;
pub mod subjects;

/// Dashboard values are rounded to 2 decimal places at the aggregation edge;
/// stored percentages stay unrounded.
pub(crate) fn round_to_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
