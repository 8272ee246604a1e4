//! Integration tests: per-site CSV files into a Dataset.

use std::fs;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use hydrofill_calendar::DailyAxis;
use hydrofill_gapfill::{Dataset, Quantity};
use hydrofill_io::{ColumnMapping, IoError, MGD_TO_M3_PER_S, load_dataset};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dataset(sites: &[&str], quantities: &[Quantity]) -> Dataset {
    let axis = DailyAxis::new(ymd(2000, 1, 1), ymd(2000, 12, 31)).unwrap();
    Dataset::new(
        axis,
        sites.iter().map(|s| s.to_string()).collect(),
        quantities.to_vec(),
    )
    .unwrap()
}

#[test]
fn loads_every_site_and_converts_flow() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("Davis.csv"),
        "Date,flow mgd,NO3 mg/L N,PO4 mg/L P\n\
         2000-01-01,5.0,20.1,\n\
         2000-01-02,5.5,,3.2\n\
         1999-12-31,4.0,19.0,2.0\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Tracy.csv"),
        "Date,flow mgd\n2000-06-15 00:00:00,9\n",
    )
    .unwrap();

    let mut ds = dataset(
        &["Davis", "Tracy"],
        &[Quantity::Flow, Quantity::No3Conc, Quantity::Po4Conc],
    );
    let summary = load_dataset(dir.path(), &mut ds, &ColumnMapping::default()).unwrap();

    assert_eq!(summary.sites.len(), 2);
    let davis = &summary.sites[0];
    assert_eq!(davis.site, "Davis");
    assert_eq!(davis.n_rows, 3);
    assert_eq!(davis.n_samples, 4);
    assert_eq!(davis.n_outside, 3);
    assert_eq!(summary.n_samples(), 5);
    assert_eq!(summary.n_outside(), 3);
    assert!(summary.sites[1].missing_columns.contains(&"PO4 mg/L P".to_string()));

    let flow = ds.get("Davis", Quantity::Flow).unwrap();
    assert_relative_eq!(flow.values()[0], 5.0 * MGD_TO_M3_PER_S);
    assert_relative_eq!(flow.values()[1], 5.5 * MGD_TO_M3_PER_S);
    assert!(flow.values()[2].is_nan());

    let po4 = ds.get("Davis", Quantity::Po4Conc).unwrap();
    assert_eq!(po4.values()[1], 3.2);
    assert_eq!(po4.n_valid(), 1);

    let tracy = ds.get("Tracy", Quantity::Flow).unwrap();
    let june_15 = ds.axis().index_of(ymd(2000, 6, 15)).unwrap();
    assert_relative_eq!(tracy.values()[june_15], 9.0 * MGD_TO_M3_PER_S);
    assert_eq!(ds.get("Tracy", Quantity::No3Conc).unwrap().n_valid(), 0);
}

#[test]
fn duplicate_dates_keep_the_later_row() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("Manteca.csv"),
        "Date,NH3 mg/L N\n2000-03-01,1.0\n2000-03-01,2.0\n",
    )
    .unwrap();
    let mut ds = dataset(&["Manteca"], &[Quantity::Nh3Conc]);
    load_dataset(dir.path(), &mut ds, &ColumnMapping::default()).unwrap();
    let idx = ds.axis().index_of(ymd(2000, 3, 1)).unwrap();
    assert_eq!(ds.get("Manteca", Quantity::Nh3Conc).unwrap().values()[idx], 2.0);
}

#[test]
fn untracked_quantities_are_ignored() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("Stockton.csv"),
        "Date,flow mgd,NO2 mg/L N\n2000-01-01,1,0.4\n",
    )
    .unwrap();
    let mut ds = dataset(&["Stockton"], &[Quantity::No2Conc]);
    let summary = load_dataset(dir.path(), &mut ds, &ColumnMapping::default()).unwrap();
    assert_eq!(summary.n_samples(), 1);
}

#[test]
fn missing_site_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut ds = dataset(&["Sacramento"], &[Quantity::Flow]);
    let err = load_dataset(dir.path(), &mut ds, &ColumnMapping::default()).unwrap_err();
    match err {
        IoError::FileNotFound { path } => assert!(path.ends_with("Sacramento.csv")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn invalid_mapping_is_rejected_before_reading() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut ds = dataset(&["Sacramento"], &[Quantity::Flow]);
    let err = load_dataset(dir.path(), &mut ds, &ColumnMapping::new(" ")).unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}
