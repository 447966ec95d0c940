use std::collections::BTreeMap;
use chrono::NaiveDate;
use crate::models::observation::Observation;

/// Date-keyed store of daily observation pairs.
///
/// Holds the ingested history and grows by exactly one day per forecast
/// iteration. The prediction loop is the only writer while a forecast run
/// is in progress; entries are never removed.
pub struct Archive {
    days: BTreeMap<NaiveDate, Vec<Observation>>,
}

impl Archive {
    /// Returns a new empty Archive
    pub fn new() -> Archive {
        Archive { days: BTreeMap::new() }
    }

    /// Adds a single observation under its own date
    ///
    /// # Arguments
    ///
    /// * 'observation' - the observation to store
    pub fn add(&mut self, observation: Observation) {
        self.days.entry(observation.date).or_default().push(observation);
    }

    /// Inserts a full day of observations under the given date
    ///
    /// # Arguments
    ///
    /// * 'date' - the date to store the day under
    /// * 'observations' - morning and noon records for that date
    pub fn insert_day(&mut self, date: NaiveDate, observations: Vec<Observation>) {
        self.days.insert(date, observations);
    }

    /// Returns the latest date present in the archive, or None if empty
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Returns the observations stored for a date
    ///
    /// # Arguments
    ///
    /// * 'date' - the date to look up
    pub fn day(&self, date: NaiveDate) -> Option<&[Observation]> {
        self.days.get(&date).map(|observations| observations.as_slice())
    }

    /// Collects all records whose day offset from the reference date falls
    /// within the half open range [begin, end), ascending by date and time
    ///
    /// # Arguments
    ///
    /// * 'reference' - date the offsets are counted back from
    /// * 'begin' - first day offset included
    /// * 'end' - first day offset excluded
    pub fn records_in_offset_range(&self, reference: NaiveDate, begin: i64, end: i64) -> Vec<Observation> {
        let mut records: Vec<Observation> = Vec::new();
        for (date, observations) in &self.days {
            let day_diff = (reference - *date).num_days();
            if day_diff >= begin && day_diff < end {
                records.extend(observations.iter().cloned());
            }
        }
        records.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));

        records
    }

    /// Number of dates held in the archive
    pub fn len(&self) -> usize {
        self.days.len()
    }
}
