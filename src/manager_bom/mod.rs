pub mod errors;

use std::time::Duration;
use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};
use ureq::Agent;
use crate::manager_bom::errors::BomError;
use crate::models::observation::{DayTime, Observation};
use crate::models::station::Station;

/// URL template for the daily weather observation csv files
const BASE_URL: &str = "http://www.bom.gov.au/climate/dwo/#MONYR#/text/#STATIONID#.#MONYR#.csv";

/// Struct for downloading observation history from the BOM climate archive
pub struct Bom {
    agent: Agent,
    station: Station,
}

impl Bom {
    /// Returns a Bom struct ready for fetching observation history for the
    /// given station
    ///
    /// # Arguments
    ///
    /// * 'station' - the observation station to download for
    pub fn new(station: Station) -> Bom {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Bom { agent, station }
    }

    /// Downloads the five observation months the prediction needs: the
    /// current and previous month of this year, and last year's months
    /// around the same season. Records of today and future dates are
    /// skipped since those are the days being predicted.
    pub fn download_history(&self) -> Result<Vec<Observation>, BomError> {
        let today = Local::now().date_naive();
        let mut observations: Vec<Observation> = Vec::new();

        for month in history_months(today) {
            let url = BASE_URL
                .replace("#STATIONID#", self.station.station_id)
                .replace("#MONYR#", &month);
            info!("downloading observation history from {}", url);

            let csv = self.agent
                .get(url.as_str())
                .call()?
                .body_mut()
                .read_to_string()?;

            for line in csv.lines() {
                if let Some(pair) = self.parse_row(line, today)? {
                    observations.extend(pair);
                }
            }
        }
        debug!("downloaded {} observations", observations.len());

        Ok(observations)
    }

    /// Parses one csv row into the morning and noon observation of its date.
    ///
    /// Data rows start with a comma (the leading column is empty); anything
    /// else is preamble or header and is skipped. The 9am temperature,
    /// humidity and pressure sit at columns 10, 11 and 15, the 3pm values at
    /// 16, 17 and 21.
    ///
    /// # Arguments
    ///
    /// * 'line' - one raw csv line
    /// * 'today' - rows on or after this date are skipped
    fn parse_row(&self, line: &str, today: NaiveDate) -> Result<Option<[Observation; 2]>, BomError> {
        if !line.starts_with(',') {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 22 || fields[1].starts_with('"') {
            return Ok(None);
        }

        let date = NaiveDate::parse_from_str(fields[1], "%Y-%m-%d")?;
        if date >= today {
            return Ok(None);
        }

        let morning = self.observation(date, DayTime::Morning, fields[10], fields[11], fields[15])?;
        let noon = self.observation(date, DayTime::Noon, fields[16], fields[17], fields[21])?;

        Ok(Some([morning, noon]))
    }

    /// Builds one observation from the raw measurement fields of a row
    fn observation(&self, date: NaiveDate, time: DayTime,
                   temperature: &str, humidity: &str, pressure: &str)
                   -> Result<Observation, BomError> {
        Ok(Observation {
            location: self.station.name.to_string(),
            lat: self.station.lat,
            long: self.station.long,
            elevation: self.station.elevation,
            date,
            time,
            temperature: temperature.trim().parse()?,
            humidity: humidity.trim().parse()?,
            pressure: pressure.trim().parse()?,
            condition: None,
        })
    }
}

/// Returns the five download months in yyyyMM form: current month, previous
/// month, and the previous year's surrounding months
///
/// # Arguments
///
/// * 'today' - the date the months are derived from
fn history_months(today: NaiveDate) -> Vec<String> {
    vec![
        year_month(today, 0, 0),
        year_month(today, 0, -1),
        year_month(today, -1, -1),
        year_month(today, -1, 1),
        year_month(today, -1, 0),
    ]
}

/// Formats the month a number of years and months away from the given date
fn year_month(today: NaiveDate, diff_years: i32, diff_months: i32) -> String {
    let months = today.year() * 12 + today.month0() as i32 + diff_years * 12 + diff_months;
    format!("{}{:02}", months.div_euclid(12), months.rem_euclid(12) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::station;

    #[test]
    fn history_months_cover_both_years() {
        let today = NaiveDate::from_ymd_opt(2017, 11, 14).unwrap();

        assert_eq!(
            history_months(today),
            vec!["201711", "201710", "201610", "201612", "201611"]
        );
    }

    #[test]
    fn year_month_wraps_around_january() {
        let today = NaiveDate::from_ymd_opt(2018, 1, 5).unwrap();

        assert_eq!(year_month(today, 0, -1), "201712");
        assert_eq!(year_month(today, -1, 1), "201702");
    }

    #[test]
    fn data_row_parses_to_a_morning_and_noon_pair() {
        let bom = Bom::new(station::lookup("CANBERRA").unwrap());
        let today = NaiveDate::from_ymd_opt(2017, 11, 14).unwrap();
        let line = ",2017-11-02,18.5,29.7,0,8.4,10.7,NNW,46,15:01,\
                    21.2,31,1,N,20,1012.3,27.6,17,1,NNW,31,1008.9";

        let pair = bom.parse_row(line, today).unwrap().unwrap();

        assert_eq!(pair[0].time, DayTime::Morning);
        assert_eq!(pair[0].temperature, 21.2);
        assert_eq!(pair[0].humidity, 31.0);
        assert_eq!(pair[0].pressure, 1012.3);
        assert_eq!(pair[1].time, DayTime::Noon);
        assert_eq!(pair[1].temperature, 27.6);
        assert_eq!(pair[1].pressure, 1008.9);
        assert_eq!(pair[1].location, "CANBERRA");
    }

    #[test]
    fn header_and_future_rows_are_skipped() {
        let bom = Bom::new(station::lookup("CANBERRA").unwrap());
        let today = NaiveDate::from_ymd_opt(2017, 11, 14).unwrap();

        assert!(bom.parse_row("\"Prepared at 16:00 UTC\"", today).unwrap().is_none());
        assert!(bom.parse_row(",\"Date\",Min,Max", today).unwrap().is_none());
        let future = ",2017-11-14,18.5,29.7,0,8.4,10.7,NNW,46,15:01,\
                      21.2,31,1,N,20,1012.3,27.6,17,1,NNW,31,1008.9";
        assert!(bom.parse_row(future, today).unwrap().is_none());
    }
}
