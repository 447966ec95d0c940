use std::io::Write;
use chrono::NaiveDate;
use log::{debug, info};
use crate::archive::Archive;
use crate::errors::ForecastError;
use crate::models::observation::{Condition, Observation};
use crate::rounding::round_to;
use crate::similarity::select_best_window;
use crate::variation::{blend, mean_variation, VariationVector};
use crate::windows::partition;

/// Number of consecutive days to forecast
pub const FORECAST_DAYS: usize = 5;

/// Day-offset range, back from the latest archived date, for the
/// present-year window (7 days, latest date included)
const PRESENT_RANGE: (i64, i64) = (0, 7);

/// Day-offset range for the previous-year analog slice (14 days roughly one
/// year back, same season with some slack). Assumes the archive holds a full
/// pair for every date in the range; no leap year compensation is applied.
const PREVIOUS_RANGE: (i64, i64) = (358, 372);

/// Drives the analog forecast over the archive, one day at a time.
///
/// The predictor owns the archive for the duration of a run; every
/// iteration reads the state the previous one wrote, so the latest date
/// advances by exactly one calendar day per predicted day.
pub struct Predictor {
    archive: Archive,
}

impl Predictor {
    /// Returns a Predictor over the given archive
    ///
    /// # Arguments
    ///
    /// * 'archive' - ingested history, two observations per date
    pub fn new(archive: Archive) -> Predictor {
        Predictor { archive }
    }

    /// Access to the archive, including any predicted days appended so far
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Predicts the weather for five consecutive days.
    ///
    /// Each iteration gathers the present-year window and the previous-year
    /// analog slice relative to the latest archived date, derives the blended
    /// variation, applies it to the latest day's pair and appends the result
    /// to the archive, so later days build on earlier predictions. Predicted
    /// records are written to the output sink as they are produced; on a
    /// validation failure the run aborts and records already written stay.
    ///
    /// # Arguments
    ///
    /// * 'out' - sink the pipe-delimited forecast records are written to
    pub fn predict_five_days(&mut self, out: &mut impl Write) -> Result<(), ForecastError> {
        for _ in 0..FORECAST_DAYS {
            let latest = self.archive.latest_date().ok_or(ForecastError::EmptyArchive)?;
            debug!("latest archived date before prediction: {}", latest);

            let present_year = self.archive
                .records_in_offset_range(latest, PRESENT_RANGE.0, PRESENT_RANGE.1);
            let previous_year = self.archive
                .records_in_offset_range(latest, PREVIOUS_RANGE.0, PREVIOUS_RANGE.1);
            validate_input_size(&present_year, 7)?;
            validate_input_size(&previous_year, 14)?;

            let variation = predicted_variation(&present_year, &previous_year)?;
            self.apply_variation(latest, &variation, out)?;
        }
        info!("completed prediction of {} days", FORECAST_DAYS);

        Ok(())
    }

    /// Produces one forecast day by adding the blended variation to the
    /// latest day's pair, and appends it to the archive under the next
    /// calendar date
    ///
    /// # Arguments
    ///
    /// * 'latest' - the day the variation is applied to
    /// * 'variation' - blended morning and noon variation vectors
    /// * 'out' - sink the predicted records are written to
    fn apply_variation(&mut self, latest: NaiveDate, variation: &[VariationVector],
                       out: &mut impl Write) -> Result<(), ForecastError> {

        let prediction_date = latest.succ_opt().ok_or(ForecastError::DateRange)?;
        info!("prediction date: {}", prediction_date);

        let previous_day = self.archive
            .day(latest)
            .ok_or(ForecastError::EmptyArchive)?
            .to_vec();

        let mut prediction_day: Vec<Observation> = Vec::new();
        for previous in &previous_day {
            for vector in variation.iter().filter(|v| v.time == previous.time) {
                let temperature = round_to(previous.temperature + vector.temperature, 2);
                let humidity = round_to(previous.humidity + vector.humidity, 2);
                let pressure = round_to(previous.pressure + vector.pressure, 2);

                let observation = Observation {
                    location: previous.location.clone(),
                    lat: previous.lat,
                    long: previous.long,
                    elevation: previous.elevation,
                    date: prediction_date,
                    time: previous.time,
                    temperature,
                    humidity,
                    pressure,
                    condition: Some(find_condition(temperature, pressure, humidity)),
                };

                writeln!(out, "{}", observation)?;
                info!("predicted: {}", observation);
                prediction_day.push(observation);
            }
        }
        self.archive.insert_day(prediction_date, prediction_day);

        Ok(())
    }
}

/// Runs the analog matching pipeline for one iteration and returns the
/// blended morning/noon variation
///
/// # Arguments
///
/// * 'present_year' - 14 records covering the last 7 archived days
/// * 'previous_year' - 28 records covering the 14-day analog slice
fn predicted_variation(present_year: &[Observation], previous_year: &[Observation])
                       -> Result<Vec<VariationVector>, ForecastError> {

    let windows = partition(previous_year)?;
    let best = select_best_window(&windows, present_year)?;
    debug!("best matching window number: {}", best.number);

    let previous_mean = mean_variation(&best.flatten());
    let present_mean = mean_variation(present_year);

    blend(&previous_mean, &present_mean)
}

/// Checks that a gathered record list covers the expected number of days,
/// guarding against gaps in the archive
fn validate_input_size(records: &[Observation], expected: usize) -> Result<(), ForecastError> {
    let days = records.len() / 2;
    if days != expected {
        Err(ForecastError::InputSize { got: days, expected })
    } else {
        Ok(())
    }
}

/// Derives the sky condition from the predicted values. The boundaries come
/// from observed historical weather patterns; the first matching rule wins.
///
/// # Arguments
///
/// * 'temperature' - predicted temperature in degrees C
/// * 'pressure' - predicted pressure in hPa
/// * 'humidity' - predicted relative humidity in percent
fn find_condition(temperature: f64, pressure: f64, humidity: f64) -> Condition {
    if temperature <= 5.0 {
        Condition::Snowy
    } else if temperature > 5.0 && temperature <= 15.0 {
        Condition::Cold
    } else if temperature >= 23.0 && humidity < 80.0 && pressure >= 1005.0 {
        Condition::Sunny
    } else if (temperature > 15.0 && temperature < 23.0)
        && (humidity >= 36.0 && humidity < 80.0)
        && pressure >= 1005.0 {
        Condition::MostlySunny
    } else if humidity > 85.0 || pressure < 1005.0 {
        Condition::Rainy
    } else if humidity >= 80.0 && humidity < 85.0 {
        Condition::Cloudy
    } else {
        Condition::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use crate::models::observation::DayTime;

    fn observation(date: NaiveDate, time: DayTime, temperature: f64, humidity: f64, pressure: f64) -> Observation {
        Observation {
            location: "CANBERRA".to_string(),
            lat: -35.31,
            long: 149.2,
            elevation: 577.0,
            date,
            time,
            temperature,
            humidity,
            pressure,
            condition: None,
        }
    }

    /// Archive with the 7 present-year days ending at `latest` and an
    /// 18-day previous-year block covering the [358, 372) offsets of all
    /// five forecast iterations
    fn seeded_archive(latest: NaiveDate) -> Archive {
        let mut archive = Archive::new();

        for offset in 0..7u64 {
            let date = latest.checked_sub_days(Days::new(offset)).unwrap();
            let base = 18.0 + offset as f64 * 0.4;
            archive.add(observation(date, DayTime::Morning, base, 55.0 + offset as f64, 1011.0));
            archive.add(observation(date, DayTime::Noon, base + 5.0, 45.0 + offset as f64, 1009.5));
        }

        for offset in 354..372u64 {
            let date = latest.checked_sub_days(Days::new(offset)).unwrap();
            let base = 16.0 + (offset % 9) as f64 * 0.5;
            archive.add(observation(date, DayTime::Morning, base, 58.0 + (offset % 5) as f64, 1012.0));
            archive.add(observation(date, DayTime::Noon, base + 6.0, 47.0 + (offset % 5) as f64, 1010.0));
        }

        archive
    }

    #[test]
    fn five_iterations_append_five_consecutive_days() {
        let latest = NaiveDate::from_ymd_opt(2017, 11, 30).unwrap();
        let mut predictor = Predictor::new(seeded_archive(latest));
        let mut out: Vec<u8> = Vec::new();

        predictor.predict_five_days(&mut out).unwrap();

        let archive = predictor.archive();
        assert_eq!(archive.len(), 7 + 18 + 5);
        assert_eq!(archive.latest_date(), Some(latest.checked_add_days(Days::new(5)).unwrap()));
        for day in 1..=5u64 {
            let date = latest.checked_add_days(Days::new(day)).unwrap();
            let pair = archive.day(date).unwrap();
            assert_eq!(pair.len(), 2);
            assert_eq!(pair[0].time, DayTime::Morning);
            assert_eq!(pair[1].time, DayTime::Noon);
            assert!(pair.iter().all(|o| o.condition.is_some()));
        }

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.split('|').count() == 9));
    }

    #[test]
    fn first_day_temperature_matches_blended_variation() {
        let latest = NaiveDate::from_ymd_opt(2017, 11, 30).unwrap();
        let archive = seeded_archive(latest);

        let present_year = archive.records_in_offset_range(latest, PRESENT_RANGE.0, PRESENT_RANGE.1);
        let previous_year = archive.records_in_offset_range(latest, PREVIOUS_RANGE.0, PREVIOUS_RANGE.1);
        let variation = predicted_variation(&present_year, &previous_year).unwrap();
        let previous_morning = archive.day(latest).unwrap()[0].clone();

        let mut predictor = Predictor::new(archive);
        let mut out: Vec<u8> = Vec::new();
        predictor.predict_five_days(&mut out).unwrap();

        let predicted = &predictor.archive()
            .day(latest.checked_add_days(Days::new(1)).unwrap())
            .unwrap()[0];
        assert_eq!(predicted.time, DayTime::Morning);
        assert_eq!(
            predicted.temperature,
            round_to(previous_morning.temperature + variation[0].temperature, 2)
        );
    }

    #[test]
    fn forecast_runs_are_deterministic() {
        let latest = NaiveDate::from_ymd_opt(2017, 11, 30).unwrap();

        let mut first_out: Vec<u8> = Vec::new();
        Predictor::new(seeded_archive(latest)).predict_five_days(&mut first_out).unwrap();
        let mut second_out: Vec<u8> = Vec::new();
        Predictor::new(seeded_archive(latest)).predict_five_days(&mut second_out).unwrap();

        assert_eq!(first_out, second_out);
    }

    #[test]
    fn short_present_year_window_fails_input_size() {
        let latest = NaiveDate::from_ymd_opt(2017, 11, 30).unwrap();
        let mut archive = Archive::new();

        for offset in 0..5u64 {
            let date = latest.checked_sub_days(Days::new(offset)).unwrap();
            archive.add(observation(date, DayTime::Morning, 18.0, 55.0, 1011.0));
            archive.add(observation(date, DayTime::Noon, 23.0, 45.0, 1009.0));
        }

        let mut out: Vec<u8> = Vec::new();
        let result = Predictor::new(archive).predict_five_days(&mut out);

        assert!(matches!(result, Err(ForecastError::InputSize { got: 5, expected: 7 })));
        assert!(out.is_empty());
    }

    #[test]
    fn zero_variation_reproduces_the_previous_day() {
        let latest = NaiveDate::from_ymd_opt(2017, 11, 30).unwrap();
        let mut archive = Archive::new();
        archive.add(observation(latest, DayTime::Morning, 18.25, 55.5, 1011.75));
        archive.add(observation(latest, DayTime::Noon, 23.5, 45.25, 1009.5));

        let zero = [
            VariationVector { time: DayTime::Morning, temperature: 0.0, humidity: 0.0, pressure: 0.0 },
            VariationVector { time: DayTime::Noon, temperature: 0.0, humidity: 0.0, pressure: 0.0 },
        ];
        let mut predictor = Predictor::new(archive);
        let mut out: Vec<u8> = Vec::new();
        predictor.apply_variation(latest, &zero, &mut out).unwrap();

        let next = latest.checked_add_days(Days::new(1)).unwrap();
        let predicted = predictor.archive().day(next).unwrap();
        assert_eq!(predicted[0].temperature, 18.25);
        assert_eq!(predicted[0].humidity, 55.5);
        assert_eq!(predicted[0].pressure, 1011.75);
        assert_eq!(predicted[1].temperature, 23.5);
    }

    #[test]
    fn condition_boundaries_follow_the_priority_order() {
        assert_eq!(find_condition(5.0, 1010.0, 50.0), Condition::Snowy);
        assert_eq!(find_condition(5.01, 1010.0, 50.0), Condition::Cold);
        assert_eq!(find_condition(23.0, 1005.0, 79.0), Condition::Sunny);
        assert_eq!(find_condition(18.0, 1010.0, 36.0), Condition::MostlySunny);
        // humidity above 85 overrides the cloudy band
        assert_eq!(find_condition(18.0, 1010.0, 85.01), Condition::Rainy);
        assert_eq!(find_condition(25.0, 1004.99, 50.0), Condition::Rainy);
        assert_eq!(find_condition(18.0, 1010.0, 82.0), Condition::Cloudy);
        assert_eq!(find_condition(18.0, 1010.0, 30.0), Condition::NotFound);
    }
}
