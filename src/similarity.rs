use crate::errors::ForecastError;
use crate::models::observation::Observation;
use crate::rounding::round_to;
use crate::windows::{Window, WINDOW_COUNT};

/// Selects the candidate window closest to the present-year observations.
///
/// Every window is scored against the present-year list and the one with
/// the smallest distance wins. The scored pairs are kept in an explicit
/// list and ranked with a stable ascending sort, so when two windows round
/// to the same distance the lower-numbered one is chosen. The original
/// implementation collapsed equal distances into a single map slot, which
/// silently dropped one of the candidates; results can differ there.
///
/// # Arguments
///
/// * 'windows' - candidate windows from the previous-year slice
/// * 'present_year' - present-year records, two per day, ascending
pub fn select_best_window<'a>(windows: &'a [Window], present_year: &[Observation])
                              -> Result<&'a Window, ForecastError> {

    let mut distances: Vec<(f64, usize)> = windows
        .iter()
        .map(|w| (window_distance(w, present_year), w.number))
        .collect();
    distances.sort_by(|a, b| a.0.total_cmp(&b.0));

    let best = distances
        .first()
        .ok_or(ForecastError::WindowCount { got: 0, expected: WINDOW_COUNT })?
        .1;

    windows
        .iter()
        .find(|w| w.number == best)
        .ok_or(ForecastError::WindowCount { got: 0, expected: WINDOW_COUNT })
}

/// Euclidean distance between a window and the present-year records.
///
/// Each date contributes the squared differences of its morning/noon
/// averages for humidity, pressure and temperature; both sides are
/// consumed in lockstep, two records per date in ascending date order.
/// The distance is rounded half-up to 4 decimals, the precision the
/// selection works at.
fn window_distance(window: &Window, present_year: &[Observation]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0;
    for observations in window.days.values() {
        let avg_humidity_present = (present_year[count].humidity + present_year[count + 1].humidity) / 2.0;
        let avg_pressure_present = (present_year[count].pressure + present_year[count + 1].pressure) / 2.0;
        let avg_temp_present = (present_year[count].temperature + present_year[count + 1].temperature) / 2.0;
        let avg_humidity_window = (observations[0].humidity + observations[1].humidity) / 2.0;
        let avg_pressure_window = (observations[0].pressure + observations[1].pressure) / 2.0;
        let avg_temp_window = (observations[0].temperature + observations[1].temperature) / 2.0;

        sum += (avg_humidity_window - avg_humidity_present).powi(2)
            + (avg_pressure_window - avg_pressure_present).powi(2)
            + (avg_temp_window - avg_temp_present).powi(2);
        count += 2;
    }

    round_to(sum.sqrt(), 4)
}
