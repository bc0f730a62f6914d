//! End-to-end head-to-head scenarios against in-memory and CSV datasets.

use std::fs;
use std::sync::Arc;
use std::thread;

use fake::Fake;
use fake::faker::name::en::LastName;
use pitwall_analytics::{AnalyticsError, H2hEngine, final_advantage};
use pitwall_domain::{Driver, Race, RaceResult, YearRange};
use pitwall_persistence::{DatasetStore, InMemoryRepository, RaceDataRepository, load_csv_dir};

fn driver(id: u32, reference: &str, forename: &str, surname: &str, code: Option<&str>) -> Driver {
    Driver {
        id,
        reference: reference.to_string(),
        code: code.map(str::to_string),
        forename: forename.to_string(),
        surname: surname.to_string(),
        date_of_birth: None,
        nationality: None,
    }
}

fn race(id: u32, year: i32, round: u32) -> Race {
    Race {
        id,
        year,
        round,
        circuit_id: 1,
        name: format!("Race {id}"),
        date: None,
    }
}

fn entry(race_id: u32, driver_id: u32, grid: u32, position_order: Option<u32>) -> RaceResult {
    RaceResult {
        race_id,
        driver_id,
        grid,
        position_order,
        points: position_order.map(|p| f64::from(26_u32.saturating_sub(p))),
    }
}

/// Two drivers over three races in 2020-2021: A finishes [1, 3, 2], B [2, 1, 4].
fn engine() -> H2hEngine {
    let repo = InMemoryRepository::new(
        vec![
            driver(1, "max_verstappen", "Max", "Verstappen", Some("VER")),
            driver(2, "hamilton", "Lewis", "Hamilton", Some("HAM")),
            driver(3, "verstappen", "Jos", "Verstappen", None),
            driver(4, "bottas", "Valtteri", "Bottas", Some("BOT")),
        ],
        vec![race(100, 2020, 1), race(101, 2020, 2), race(102, 2021, 1)],
        vec![
            entry(100, 1, 1, Some(1)),
            entry(100, 2, 0, Some(2)),
            entry(101, 1, 2, Some(3)),
            entry(101, 2, 1, Some(1)),
            entry(102, 1, 3, Some(2)),
            entry(102, 2, 2, Some(4)),
            entry(102, 4, 5, None),
        ],
        Vec::new(),
    );
    let store = DatasetStore::new(repo);
    H2hEngine::new(store.snapshot().unwrap())
}

#[test]
fn test_resolver_exact_and_fallback() {
    let engine = engine();

    // Two exact surname matches: table order decides
    assert_eq!(engine.resolve_driver("verstappen").unwrap().id, 1);
    assert_eq!(engine.resolve_driver("Jos Verstappen").unwrap().id, 3);
    assert_eq!(engine.resolve_driver("VER").unwrap().id, 1);
    assert_eq!(engine.resolve_driver("  Max Verstappen ").unwrap().id, 1);
    // Substring tier, first in table order
    assert_eq!(engine.resolve_driver("stapp").unwrap().id, 1);
    assert_eq!(engine.resolve_driver("bot").unwrap().full_name, "Valtteri Bottas");

    for query in ["schumacher", "", "   "] {
        assert!(matches!(
            engine.resolve_driver(query),
            Err(AnalyticsError::NotFound { .. })
        ));
    }
}

#[test]
fn test_resolver_exactness_for_every_driver() {
    let engine = engine();
    // Jos's reference equals Max's surname, so Max (earlier in the table) wins it
    let shadowed = |d: &&Driver| d.reference == "verstappen";

    for driver in engine.dataset().drivers().iter().filter(|d| !shadowed(d)) {
        let mut queries = vec![driver.reference.clone(), driver.full_name()];
        queries.extend(driver.code().map(str::to_string));
        for query in queries {
            assert_eq!(engine.resolve_driver(&query).unwrap().id, driver.id, "{query}");
        }
    }
}

#[test]
fn test_catalog_counts_distinct_races() {
    let engine = engine();
    let catalog = engine.build_catalog();
    let dataset = engine.dataset();

    assert_eq!(catalog.len(), dataset.drivers().len());
    for entry in catalog.iter() {
        let mut races: Vec<_> = dataset
            .results_for(entry.driver_id)
            .map(|r| r.race_id)
            .collect();
        races.sort_unstable();
        races.dedup();
        assert_eq!(entry.starts_count, races.len());
    }
    assert!(catalog.windows(2).all(|w| w[0].starts_count >= w[1].starts_count));
    assert_eq!(catalog[0].reference, "max_verstappen");
    assert_eq!(catalog[3].starts_count, 0);
}

#[test]
fn test_end_to_end_comparison() {
    let report = engine()
        .compare_queries("VER", "hamilton", YearRange::all())
        .unwrap();
    let summary = &report.summary;

    assert_eq!(summary.wins_a(), 2);
    assert_eq!(summary.wins_b(), 1);
    assert_eq!(summary.ties(), 0);
    assert_eq!(
        summary.wins_a() + summary.wins_b() + summary.ties(),
        report.rows.len()
    );

    let cumulative: Vec<_> = report.series.iter().map(|p| p.cumulative).collect();
    assert_eq!(cumulative, vec![1, 0, 1]);
    assert_eq!(report.series.len(), report.rows.len());
    assert_eq!(
        final_advantage(&report.series),
        i64::try_from(summary.wins_a()).unwrap() - i64::try_from(summary.wins_b()).unwrap()
    );
    assert!(report.series.windows(2).all(|w| w[0].key <= w[1].key));
    assert_eq!(report.series[0].label, "2020-1");

    // Hamilton's pit-lane start in race 100 counts as slot 20
    assert!(report.rows.iter().all(|r| r.adjusted_grid_a > 0 && r.adjusted_grid_b > 0));
    assert!((summary.driver_b.mean_grid - 23.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.driver_b.best_result, 1);
}

#[test]
fn test_year_filter() {
    let engine = engine();

    let report = engine
        .compare_head_to_head(1, 2, YearRange::new(Some(2021), None).unwrap())
        .unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.summary.wins_a(), 1);

    let err = engine
        .compare_head_to_head(1, 2, YearRange::new(Some(2022), Some(2023)).unwrap())
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::NoCommonRaces { .. }));
    assert_eq!(err.error_code(), "NO_COMMON_RACES");
}

#[test]
fn test_unclassified_pair_has_no_valid_comparisons() {
    let engine = engine();
    // Bottas shares race 102 with both, but is never classified
    let err = engine
        .compare_head_to_head(1, 4, YearRange::all())
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::NoValidComparisons { .. }));
    assert!(err.is_recoverable());

    // Jos never raced
    assert!(matches!(
        engine.compare_head_to_head(1, 3, YearRange::all()),
        Err(AnalyticsError::NoCommonRaces { .. })
    ));
}

#[test]
fn test_shared_races_never_classified_for_either_driver() {
    let repo = InMemoryRepository::new(
        vec![
            driver(1, "prost", "Alain", "Prost", Some("PRO")),
            driver(2, "senna", "Ayrton", "Senna", Some("SEN")),
        ],
        vec![race(200, 1989, 1), race(201, 1989, 2)],
        vec![
            entry(200, 1, 2, None),
            entry(200, 2, 1, None),
            entry(201, 1, 1, None),
            entry(201, 2, 0, None),
        ],
        Vec::new(),
    );
    let engine = H2hEngine::new(Arc::new(repo.load().unwrap()));

    let err = engine
        .compare_queries("PRO", "SEN", YearRange::all())
        .unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::NoValidComparisons { driver_a: 1, driver_b: 2 }
    ));
    assert_eq!(err.error_code(), "NO_VALID_COMPARISONS");
}

#[test]
fn test_driver_against_self_is_all_ties() {
    let report = engine()
        .compare_head_to_head(2, 2, YearRange::all())
        .unwrap();
    assert_eq!(report.summary.ties(), 3);
    assert_eq!(report.summary.wins_a() + report.summary.wins_b(), 0);
    assert!(report.series.iter().all(|p| p.cumulative == 0));
}

#[test]
fn test_concurrent_queries_share_engine() {
    let engine = Arc::new(engine());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let (a, b) = if i % 2 == 0 { ("VER", "HAM") } else { ("HAM", "VER") };
                let report = engine.compare_queries(a, b, YearRange::all()).unwrap();
                (i, report.summary.wins_a(), report.summary.wins_b())
            })
        })
        .collect();

    for handle in handles {
        let (i, wins_a, wins_b) = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!((wins_a, wins_b), (2, 1));
        } else {
            assert_eq!((wins_a, wins_b), (1, 2));
        }
    }
}

#[test]
fn test_generated_field_wins_partition() {
    let drivers: Vec<Driver> = (1..=12)
        .map(|id| {
            let surname: String = LastName().fake();
            driver(id, &format!("driver_{id}"), "Gen", &surname, None)
        })
        .collect();
    let races: Vec<Race> = (1..=6)
        .map(|id| race(id, 1990 + i32::try_from(id % 3).unwrap(), id))
        .collect();
    let mut results = Vec::new();
    for race in &races {
        for (slot, driver) in drivers.iter().enumerate() {
            let slot = u32::try_from(slot).unwrap();
            let position = (slot + race.id) % 12 + 1;
            let classified = (driver.id + race.id) % 5 != 0;
            results.push(entry(race.id, driver.id, position % 4, classified.then_some(position)));
        }
    }

    let repo = InMemoryRepository::new(drivers, races, results, Vec::new());
    let engine = H2hEngine::new(Arc::new(repo.load().unwrap()));

    for (a, b) in [(1, 2), (3, 7), (5, 11), (12, 4)] {
        match engine.compare_head_to_head(a, b, YearRange::all()) {
            Ok(report) => {
                let s = &report.summary;
                assert_eq!(s.wins_a() + s.wins_b() + s.ties(), report.rows.len());
                assert_eq!(s.ties(), 0);
                assert!(report.rows.iter().all(|r| r.adjusted_grid_a != 0));
            }
            Err(err) => assert!(matches!(err, AnalyticsError::NoValidComparisons { .. })),
        }
    }
}

#[test]
fn test_csv_directory_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("drivers.csv"),
        "driverId,driverRef,number,code,forename,surname,dob,nationality,url\n\
         1,senna,\\N,\\N,Ayrton,Senna,1960-03-21,Brazilian,http://x\n\
         2,prost,\\N,\\N,Alain,Prost,1955-02-24,French,http://x\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("races.csv"),
        "raceId,year,round,circuitId,name,date,time,url\n\
         1,1988,2,1,San Marino Grand Prix,1988-05-01,\\N,http://x\n\
         2,1988,1,2,Brazilian Grand Prix,1988-04-03,\\N,http://x\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("results.csv"),
        "resultId,raceId,driverId,grid,position,positionOrder,points\n\
         1,1,1,1,1,1,9\n\
         2,1,2,2,2,2,6\n\
         3,2,1,0,\\N,20,0\n\
         4,2,2,5,1,1,9\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("circuits.csv"),
        "circuitId,circuitRef,name,location,country\n\
         1,imola,Imola,Imola,Italy\n\
         2,jacarepagua,Jacarepagua,Rio de Janeiro,Brazil\n",
    )
    .unwrap();

    let engine = H2hEngine::new(Arc::new(load_csv_dir(dir.path()).unwrap()));
    let report = engine
        .compare_queries("Ayrton Senna", "prost", YearRange::all())
        .unwrap();

    assert_eq!((report.summary.wins_a(), report.summary.wins_b()), (1, 1));
    // Round 1 (Brazil) comes first despite its higher race id
    let labels: Vec<_> = report.series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["1988-1", "1988-2"]);
    assert_eq!(report.series[0].cumulative, -1);
    assert_eq!(report.series[1].cumulative, 0);
    assert!((report.summary.driver_a.mean_grid - 10.5).abs() < 1e-9);

    let md = report.to_markdown();
    assert!(md.contains("# H2H: Ayrton Senna vs Alain Prost"));
}
