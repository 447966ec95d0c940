use std::collections::BTreeMap;
use chrono::NaiveDate;
use crate::errors::ForecastError;
use crate::models::observation::Observation;

/// Number of candidate windows a previous-year slice must yield
pub const WINDOW_COUNT: usize = 8;

/// Number of distinct dates each candidate window must hold
pub const WINDOW_SIZE: usize = 7;

/// One candidate analog window drawn from the previous-year slice
pub struct Window {
    pub number: usize,
    pub days: BTreeMap<NaiveDate, Vec<Observation>>,
}

impl Window {
    /// Returns all records of the window as a single list, ascending by date
    /// with the morning record of each day before the noon record
    pub fn flatten(&self) -> Vec<Observation> {
        self.days.values().flatten().cloned().collect()
    }
}

/// Splits a previous-year slice into overlapping candidate windows.
///
/// The slice holds two records per day in ascending date and time order. The
/// window start slides forward one day (two records) at a time, and each
/// window collects the morning and noon pair of the following days grouped
/// by date. The arithmetic is sensitive to the exact slice length: a 28
/// record slice yields 8 windows of 7 dates each, and anything else means
/// the caller selected the wrong archive range, so the run must stop.
///
/// # Arguments
///
/// * 'records' - previous-year slice, two records per day, ascending
pub fn partition(records: &[Observation]) -> Result<Vec<Window>, ForecastError> {
    let total_size = records.len();
    let number_of_days = total_size / 2;
    let mut windows: Vec<Window> = Vec::new();

    let mut i = 0;
    while i + number_of_days <= total_size {
        let mut days: BTreeMap<NaiveDate, Vec<Observation>> = BTreeMap::new();
        let mut j = 0;
        while j + 1 < number_of_days {
            put_to_window(&mut days, records[i + j].clone());
            put_to_window(&mut days, records[i + j + 1].clone());
            j += 2;
        }
        validate_window_size(days.len())?;
        windows.push(Window { number: windows.len(), days });
        i += 2;
    }
    validate_window_count(windows.len())?;

    Ok(windows)
}

/// Groups a record into a window under its date
fn put_to_window(days: &mut BTreeMap<NaiveDate, Vec<Observation>>, observation: Observation) {
    days.entry(observation.date).or_default().push(observation);
}

fn validate_window_size(size: usize) -> Result<(), ForecastError> {
    if size != WINDOW_SIZE {
        Err(ForecastError::WindowSize { got: size, expected: WINDOW_SIZE })
    } else {
        Ok(())
    }
}

fn validate_window_count(count: usize) -> Result<(), ForecastError> {
    if count != WINDOW_COUNT {
        Err(ForecastError::WindowCount { got: count, expected: WINDOW_COUNT })
    } else {
        Ok(())
    }
}
