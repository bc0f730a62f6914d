//! Loading a CSV data directory end to end.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use pitwall_persistence::{
    CsvConfig, CsvRepository, DatasetStore, PersistenceError, RaceDataRepository, load_csv_dir,
};

const DRIVERS: &str = "\
driverId,driverRef,number,code,forename,surname,dob,nationality,url
1,hamilton,44,HAM,Lewis,Hamilton,1985-01-07,British,http://en.wikipedia.org/wiki/Lewis_Hamilton
4,alonso,14,ALO,Fernando,Alonso,1981-07-29,Spanish,http://en.wikipedia.org/wiki/Fernando_Alonso
";

const RACES: &str = "\
raceId,year,round,circuitId,name,date,time,url
1,2009,1,1,Australian Grand Prix,2009-03-29,06:00:00,http://x
2,2009,2,2,Malaysian Grand Prix,2009-04-05,09:00:00,http://x
";

const RESULTS: &str = "\
resultId,raceId,driverId,constructorId,number,grid,position,positionText,positionOrder,points,laps,time,milliseconds,fastestLap,rank,fastestLapTime,fastestLapSpeed,statusId
1,1,1,1,22,18,\\N,D,20,0,58,\\N,\\N,\\N,\\N,\\N,\\N,2
2,1,4,4,7,12,5,5,5,4,58,\\N,\\N,\\N,\\N,\\N,\\N,1
3,2,1,1,22,9,7,7,7,1,31,\\N,\\N,\\N,\\N,\\N,\\N,1
4,2,4,4,7,0,11,11,11,0,31,\\N,\\N,\\N,\\N,\\N,\\N,1
5,3,4,4,7,3,1,1,1,10,56,\\N,\\N,\\N,\\N,\\N,\\N,1
";

const CIRCUITS: &str = "\
circuitId,circuitRef,name,location,country,lat,lng,alt,url
1,albert_park,Albert Park Grand Prix Circuit,Melbourne,Australia,-37.8497,144.968,10,http://x
2,sepang,Sepang International Circuit,Kuala Lumpur,Malaysia,2.76083,101.738,18,http://x
";

fn write_dir(dir: &Path, drivers: &str) {
    fs::write(dir.join("drivers.csv"), drivers).unwrap();
    fs::write(dir.join("races.csv"), RACES).unwrap();
    fs::write(dir.join("results.csv"), RESULTS).unwrap();
    fs::write(dir.join("circuits.csv"), CIRCUITS).unwrap();
}

#[test]
fn test_load_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_dir(dir.path(), DRIVERS);

    let dataset = load_csv_dir(dir.path()).unwrap();

    assert_eq!(dataset.drivers().len(), 2);
    assert_eq!(dataset.races().len(), 2);
    // Result 5 points at race 3, which is not in the race table
    assert_eq!(dataset.results().len(), 4);
    assert_eq!(dataset.circuit(2).unwrap().reference, "sepang");

    let alonso: Vec<_> = dataset.results_for(4).collect();
    assert_eq!(alonso.len(), 2);
    assert_eq!(alonso[1].grid, 0);
    assert_eq!(alonso[1].adjusted_grid(), 20);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    write_dir(dir.path(), DRIVERS);
    fs::remove_file(dir.path().join("results.csv")).unwrap();

    let err = load_csv_dir(dir.path()).unwrap_err();
    assert!(matches!(err, PersistenceError::Io { ref path, .. } if path.ends_with("results.csv")));
}

#[test]
fn test_custom_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write_dir(dir.path(), DRIVERS);
    fs::rename(dir.path().join("drivers.csv"), dir.path().join("pilots.csv")).unwrap();

    let config = CsvConfig {
        drivers_file: "pilots.csv".to_string(),
        ..CsvConfig::new(dir.path())
    };
    let repo = CsvRepository::new(config);
    assert!(repo.describe().contains(&dir.path().display().to_string()));
    assert_eq!(repo.load().unwrap().drivers().len(), 2);
}

#[test]
fn test_generated_driver_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut drivers = String::from("driverId,driverRef,code,forename,surname,dob\n");
    for id in 1..=50 {
        let forename: String = FirstName().fake();
        let surname: String = LastName().fake();
        writeln!(
            drivers,
            "{id},{}_{id},\\N,{forename},{surname},\\N",
            surname.to_lowercase()
        )
        .unwrap();
    }
    write_dir(dir.path(), &drivers);

    let store = DatasetStore::new(CsvRepository::new(CsvConfig::new(dir.path())));
    let dataset = store.snapshot().unwrap();
    assert_eq!(dataset.drivers().len(), 50);
    assert!(dataset.drivers().iter().all(|d| d.code.is_none()));
    // Results for drivers 1 and 4 still resolve against the generated table
    assert_eq!(dataset.results().len(), 4);
    assert_eq!(store.cache_stats().misses, 1);
}
