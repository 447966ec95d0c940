use std::fmt;
use chrono::NaiveDate;

/// The two fixed observation times per day. Every list the algorithm consumes
/// alternates morning and noon records in date order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum DayTime {
    Morning,
    Noon,
}

/// Implementation of the Display Trait, renders the fixed clock suffix used
/// in the pipe-delimited output records
impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DayTime::Morning => write!(f, "09:00:00Z"),
            DayTime::Noon    => write!(f, "15:00:00Z"),
        }
    }
}

/// Sky condition derived for predicted records
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Condition {
    Snowy,
    Cold,
    Sunny,
    MostlySunny,
    Rainy,
    Cloudy,
    NotFound,
}

/// Implementation of the Display Trait, renders the historical wire words
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::Snowy       => write!(f, "SNOWY"),
            Condition::Cold        => write!(f, "COLD"),
            Condition::Sunny       => write!(f, "SUNNY"),
            Condition::MostlySunny => write!(f, "MOSTLY SUNNY"),
            Condition::Rainy       => write!(f, "RAINY"),
            Condition::Cloudy      => write!(f, "CLOUDY"),
            Condition::NotFound    => write!(f, "NOT FOUND"),
        }
    }
}

/// One weather measurement at a specific location and time of day.
///
/// Historical observations are created once on ingestion and never change.
/// Predicted observations additionally carry a sky condition.
#[derive(Clone, Debug)]
pub struct Observation {
    pub location: String,
    pub lat: f64,
    pub long: f64,
    pub elevation: f64,
    pub date: NaiveDate,
    pub time: DayTime,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub condition: Option<Condition>,
}

/// Implementation of the Display Trait, renders the pipe-delimited output record
impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}|{}|{}|{}|{}T{}|{}|{}|{}|{}",
               self.location, self.lat, self.long, self.elevation,
               self.date.format("%Y-%m-%d"), self.time,
               self.temperature, self.humidity, self.pressure,
               self.condition.map(|c| c.to_string()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_renders_pipe_record() {
        let observation = Observation {
            location: "CANBERRA".to_string(),
            lat: -35.31,
            long: 149.2,
            elevation: 577.0,
            date: NaiveDate::from_ymd_opt(2017, 11, 14).unwrap(),
            time: DayTime::Noon,
            temperature: 24.3,
            humidity: 42.0,
            pressure: 1012.4,
            condition: Some(Condition::Sunny),
        };

        assert_eq!(
            observation.to_string(),
            "CANBERRA|-35.31|149.2|577|2017-11-14T15:00:00Z|24.3|42|1012.4|SUNNY"
        );
    }

    #[test]
    fn morning_sorts_before_noon() {
        assert!(DayTime::Morning < DayTime::Noon);
    }
}
