//! Fixture builders shared by unit tests.

use pitwall_domain::{Driver, DriverId, Race, RaceId, RaceResult};
use pitwall_persistence::RaceDataset;

pub fn driver(id: DriverId, reference: &str, surname: &str, code: Option<&str>) -> Driver {
    Driver {
        id,
        reference: reference.to_string(),
        code: code.map(str::to_string),
        forename: "Test".to_string(),
        surname: surname.to_string(),
        date_of_birth: None,
        nationality: None,
    }
}

pub fn named(
    id: DriverId,
    reference: &str,
    forename: &str,
    surname: &str,
    code: Option<&str>,
) -> Driver {
    Driver {
        forename: forename.to_string(),
        ..driver(id, reference, surname, code)
    }
}

pub fn race(id: RaceId, year: i32, round: u32) -> Race {
    Race {
        id,
        year,
        round,
        circuit_id: 1,
        name: format!("Grand Prix {year}-{round}"),
        date: None,
    }
}

pub fn result(
    race_id: RaceId,
    driver_id: DriverId,
    grid: u32,
    position_order: Option<u32>,
) -> RaceResult {
    RaceResult {
        race_id,
        driver_id,
        grid,
        position_order,
        points: None,
    }
}

pub fn scored(
    race_id: RaceId,
    driver_id: DriverId,
    grid: u32,
    position_order: u32,
    points: f64,
) -> RaceResult {
    RaceResult {
        points: Some(points),
        ..result(race_id, driver_id, grid, Some(position_order))
    }
}

pub fn dataset(drivers: Vec<Driver>, races: Vec<Race>, results: Vec<RaceResult>) -> RaceDataset {
    RaceDataset::new(drivers, races, results, Vec::new()).unwrap()
}
