//! # CSV Repository
//!
//! Reads the Ergast-style `drivers`, `races`, `results` and `circuits`
//! tables. Extra columns are ignored; `\N` and empty fields are nulls.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use pitwall_domain::{Circuit, Driver, PIT_LANE_GRID, Race, RaceResult, is_null_marker};

use crate::dataset::RaceDataset;
use crate::error::{PersistenceError, Result};
use crate::repository::RaceDataRepository;

const DRIVER_COLUMNS: &[&str] = &["driverId", "driverRef", "code", "forename", "surname"];
const RACE_COLUMNS: &[&str] = &["raceId", "year", "round", "circuitId", "name"];
const RESULT_COLUMNS: &[&str] = &["raceId", "driverId", "grid", "positionOrder", "points"];
const CIRCUIT_COLUMNS: &[&str] = &["circuitId", "circuitRef", "name"];

/// File layout of a CSV data directory
#[derive(Debug, Clone)]
pub struct CsvConfig {
    pub data_dir: PathBuf,
    pub drivers_file: String,
    pub races_file: String,
    pub results_file: String,
    pub circuits_file: String,
}

impl CsvConfig {
    /// Standard file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            drivers_file: "drivers.csv".to_string(),
            races_file: "races.csv".to_string(),
            results_file: "results.csv".to_string(),
            circuits_file: "circuits.csv".to_string(),
        }
    }
}

/// Repository reading a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    config: CsvConfig,
}

impl CsvRepository {
    #[must_use]
    pub const fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CsvConfig {
        &self.config
    }
}

impl RaceDataRepository for CsvRepository {
    fn describe(&self) -> String {
        format!("CSV directory {}", self.config.data_dir.display())
    }

    fn load(&self) -> Result<RaceDataset> {
        let cfg = &self.config;
        let drivers = read_drivers(open(&cfg.path(&cfg.drivers_file))?)?;
        let races = read_races(open(&cfg.path(&cfg.races_file))?)?;
        let results = read_results(open(&cfg.path(&cfg.results_file))?)?;
        let circuits = read_circuits(open(&cfg.path(&cfg.circuits_file))?)?;

        tracing::debug!(data_dir = %cfg.data_dir.display(), "CSV tables parsed");
        RaceDataset::new(drivers, races, results, circuits)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source,
    })
}

// =============================================================================
// TABLE READERS
// =============================================================================

/// Parse a `drivers` table.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed row.
pub fn read_drivers<R: Read>(reader: R) -> Result<Vec<Driver>> {
    let records: Vec<DriverRecord> = read_table("drivers", reader, DRIVER_COLUMNS)?;
    Ok(records.into_iter().map(Driver::from).collect())
}

/// Parse a `races` table.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed row.
pub fn read_races<R: Read>(reader: R) -> Result<Vec<Race>> {
    let records: Vec<RaceRecord> = read_table("races", reader, RACE_COLUMNS)?;
    Ok(records.into_iter().map(Race::from).collect())
}

/// Parse a `results` table.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed row.
pub fn read_results<R: Read>(reader: R) -> Result<Vec<RaceResult>> {
    let records: Vec<ResultRecord> = read_table("results", reader, RESULT_COLUMNS)?;
    Ok(records.into_iter().map(RaceResult::from).collect())
}

/// Parse a `circuits` table.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed row.
pub fn read_circuits<R: Read>(reader: R) -> Result<Vec<Circuit>> {
    let records: Vec<CircuitRecord> = read_table("circuits", reader, CIRCUIT_COLUMNS)?;
    Ok(records.into_iter().map(Circuit::from).collect())
}

fn read_table<R, T>(table: &str, reader: R, required: &[&str]) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| PersistenceError::csv(table, &e))?
        .clone();
    if let Some(column) = required
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(PersistenceError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        });
    }

    let rows = rdr
        .deserialize()
        .map(|row| row.map_err(|e| PersistenceError::csv(table, &e)))
        .collect::<Result<Vec<T>>>()?;

    tracing::debug!(table, rows = rows.len(), "Table loaded");
    Ok(rows)
}

// =============================================================================
// ROW RECORDS
// =============================================================================

#[derive(Debug, Deserialize)]
struct DriverRecord {
    #[serde(rename = "driverId")]
    id: u32,
    #[serde(rename = "driverRef")]
    reference: String,
    #[serde(default, deserialize_with = "nullable")]
    code: Option<String>,
    forename: String,
    surname: String,
    #[serde(default, deserialize_with = "lenient_date")]
    dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    nationality: Option<String>,
}

impl From<DriverRecord> for Driver {
    fn from(r: DriverRecord) -> Self {
        Self {
            id: r.id,
            reference: r.reference,
            code: r.code,
            forename: r.forename,
            surname: r.surname,
            date_of_birth: r.dob,
            nationality: r.nationality,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RaceRecord {
    #[serde(rename = "raceId")]
    id: u32,
    year: i32,
    round: u32,
    #[serde(rename = "circuitId")]
    circuit_id: u32,
    name: String,
    #[serde(default, deserialize_with = "nullable")]
    date: Option<NaiveDate>,
}

impl From<RaceRecord> for Race {
    fn from(r: RaceRecord) -> Self {
        Self {
            id: r.id,
            year: r.year,
            round: r.round,
            circuit_id: r.circuit_id,
            name: r.name,
            date: r.date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultRecord {
    #[serde(rename = "raceId")]
    race_id: u32,
    #[serde(rename = "driverId")]
    driver_id: u32,
    #[serde(default, deserialize_with = "nullable")]
    grid: Option<u32>,
    #[serde(rename = "positionOrder", default, deserialize_with = "nullable")]
    position_order: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    points: Option<f64>,
}

impl From<ResultRecord> for RaceResult {
    fn from(r: ResultRecord) -> Self {
        Self {
            race_id: r.race_id,
            driver_id: r.driver_id,
            grid: r.grid.unwrap_or(PIT_LANE_GRID),
            position_order: r.position_order,
            points: r.points,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CircuitRecord {
    #[serde(rename = "circuitId")]
    id: u32,
    #[serde(rename = "circuitRef")]
    reference: String,
    name: String,
    #[serde(default, deserialize_with = "nullable")]
    location: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    country: Option<String>,
}

impl From<CircuitRecord> for Circuit {
    fn from(r: CircuitRecord) -> Self {
        Self {
            id: r.id,
            reference: r.reference,
            name: r.name,
            location: r.location,
            country: r.country,
        }
    }
}

// =============================================================================
// FIELD DESERIALIZERS
// =============================================================================

/// `\N` or empty -> `None`, anything else must parse.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) if !is_null_marker(&value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Unparseable dates become `None` instead of failing the row.
fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !is_null_marker(value))
        .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()))
}
