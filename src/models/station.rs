/// One BOM observation station from the location lookup table
#[derive(Clone)]
pub struct Station {
    pub name: &'static str,
    pub station_id: &'static str,
    pub lat: f64,
    pub long: f64,
    pub elevation: f64,
}

/// Stations with a daily observation feed in the BOM climate archive
const STATIONS: [Station; 9] = [
    Station { name: "CANBERRA",  station_id: "IDCJDW2801", lat: -35.31, long: 149.2,  elevation: 577.0 },
    Station { name: "SYDNEY",    station_id: "IDCJDW2124", lat: -33.86, long: 151.21, elevation: 39.0 },
    Station { name: "MELBOURNE", station_id: "IDCJDW3050", lat: -37.81, long: 144.97, elevation: 31.0 },
    Station { name: "BRISBANE",  station_id: "IDCJDW4019", lat: -27.48, long: 153.04, elevation: 8.0 },
    Station { name: "PERTH",     station_id: "IDCJDW6111", lat: -31.96, long: 115.87, elevation: 25.0 },
    Station { name: "ADELAIDE",  station_id: "IDCJDW5081", lat: -34.92, long: 138.62, elevation: 48.0 },
    Station { name: "HOBART",    station_id: "IDCJDW7021", lat: -42.89, long: 147.33, elevation: 51.0 },
    Station { name: "DARWIN",    station_id: "IDCJDW8014", lat: -12.42, long: 130.89, elevation: 30.0 },
    Station { name: "GOLDCOAST", station_id: "IDCJDW4050", lat: -28.0,  long: 153.43, elevation: 9.0 },
];

/// Returns the station matching the given location name, if any
///
/// # Arguments
///
/// * 'name' - location name, matched case-insensitively
pub fn lookup(name: &str) -> Option<Station> {
    let name = name.to_uppercase();
    STATIONS.iter().find(|s| s.name == name).cloned()
}

/// Returns the names of all supported locations
pub fn station_names() -> Vec<&'static str> {
    STATIONS.iter().map(|s| s.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("canberra").map(|s| s.station_id), Some("IDCJDW2801"));
    }

    #[test]
    fn unknown_location_is_none() {
        assert!(lookup("ATLANTIS").is_none());
    }
}
