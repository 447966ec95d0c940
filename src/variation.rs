use crate::errors::ForecastError;
use crate::models::observation::{DayTime, Observation};

/// Per-field change between two time-adjacent observations, tagged with the
/// time of day it applies to. Vectors live for one forecast iteration only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariationVector {
    pub time: DayTime,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// Extracts the mean morning and noon day-over-day variation from a record list.
///
/// The list alternates morning and noon records in date order, so morning
/// deltas compare positions 0,2,4,.. pairwise and noon deltas positions
/// 1,3,5,... Each delta carries the time of day of the later record and the
/// mean is taken per field over each sub-sequence.
///
/// # Arguments
///
/// * 'records' - alternating morning/noon records, ascending by date
pub fn mean_variation(records: &[Observation]) -> [VariationVector; 2] {
    let morning_vectors = variation_vectors(records, 0, 2);
    let noon_vectors = variation_vectors(records, 1, 3);

    [
        mean_of(&morning_vectors, DayTime::Morning),
        mean_of(&noon_vectors, DayTime::Noon),
    ]
}

/// Blends the previous-year and present-year mean variations by averaging
/// the morning vectors together and the noon vectors together, per field.
///
/// Both lists are length 2 by construction; a mismatch means the extraction
/// above went wrong and the run must stop.
///
/// # Arguments
///
/// * 'previous_year' - mean variation extracted from the analog window
/// * 'present_year' - mean variation extracted from the recent records
pub fn blend(previous_year: &[VariationVector], present_year: &[VariationVector])
             -> Result<Vec<VariationVector>, ForecastError> {

    if previous_year.len() != present_year.len() {
        return Err(ForecastError::VectorSizeMismatch {
            previous: previous_year.len(),
            present: present_year.len(),
        });
    }

    Ok(previous_year
        .iter()
        .zip(present_year)
        .map(|(previous, present)| VariationVector {
            time: previous.time,
            temperature: (previous.temperature + present.temperature) / 2.0,
            humidity: (previous.humidity + present.humidity) / 2.0,
            pressure: (previous.pressure + present.pressure) / 2.0,
        })
        .collect())
}

/// Builds the delta sub-sequence starting at the given position, comparing
/// every record two steps apart against its predecessor
fn variation_vectors(records: &[Observation], start: usize, next: usize) -> Vec<VariationVector> {
    let mut vectors: Vec<VariationVector> = Vec::new();
    if records.len() <= start {
        return vectors;
    }

    let mut first = &records[start];
    let mut i = next;
    while i < records.len() {
        let second = &records[i];
        vectors.push(VariationVector {
            time: second.time,
            temperature: second.temperature - first.temperature,
            humidity: second.humidity - first.humidity,
            pressure: second.pressure - first.pressure,
        });
        first = second;
        i += 2;
    }

    vectors
}

/// Arithmetic mean per field over a delta sub-sequence
fn mean_of(vectors: &[VariationVector], time: DayTime) -> VariationVector {
    let mut mean = VariationVector { time, temperature: 0.0, humidity: 0.0, pressure: 0.0 };
    if vectors.is_empty() {
        return mean;
    }

    for vector in vectors {
        mean.temperature += vector.temperature;
        mean.humidity += vector.humidity;
        mean.pressure += vector.pressure;
        mean.time = vector.time;
    }
    let n = vectors.len() as f64;
    mean.temperature /= n;
    mean.humidity /= n;
    mean.pressure /= n;

    mean
}
