//! Integration tests for taxi-output.

use std::collections::BTreeMap;

use tempfile::TempDir;

use taxi_fleet::make_taxis;
use taxi_region::ManhattanRegion;
use taxi_training::EpisodeLog;

use crate::csv::CsvLogWriter;
use crate::observer::CsvTrainingObserver;
use crate::snapshot::{load_fleet, save_fleet};

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn sample_log(run_count: u64, day: u32) -> EpisodeLog {
    let mut size_histogram = BTreeMap::new();
    size_histogram.insert(4, 3);
    size_histogram.insert(5, 2);
    EpisodeLog {
        run_count,
        day,
        size_histogram,
        requests: 10,
        timeouts: 1,
        timeout_percent: 10.0,
        mean_dispatch: 42.0,
        mean_pickup: 120.0,
        mean_wait: 162.0,
    }
}

#[test]
fn csv_file_created_with_header() {
    let dir = tmp();
    let mut w = CsvLogWriter::new(dir.path()).unwrap();
    w.finish().unwrap();

    let contents = std::fs::read_to_string(dir.path().join("training_log.csv")).unwrap();
    assert!(contents.starts_with("run_count,day,size_histogram,requests,timeouts"));
}

#[test]
fn csv_rows_round_trip_through_a_reader() {
    let dir = tmp();
    let mut w = CsvLogWriter::new(dir.path()).unwrap();
    w.write_log(&sample_log(1, 1)).unwrap();
    w.write_log(&sample_log(2, 2)).unwrap();
    w.finish().unwrap();

    let mut reader = csv::Reader::from_path(dir.path().join("training_log.csv")).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][2], "4:3;5:2");
    assert_eq!(&rows[1][0], "2");
}

#[test]
fn csv_finish_is_idempotent() {
    let dir = tmp();
    let mut w = CsvLogWriter::new(dir.path()).unwrap();
    w.finish().unwrap();
    w.finish().unwrap();
}

#[test]
fn csv_training_observer_writes_one_row_per_episode() {
    let dir = tmp();
    let writer = CsvLogWriter::new(dir.path()).unwrap();
    let mut obs = CsvTrainingObserver::new(writer);

    use taxi_training::TrainingObserver;
    obs.on_episode_end(&sample_log(1, 1));
    obs.on_episode_end(&sample_log(2, 2));
    assert!(obs.take_error().is_none());

    let mut writer = obs.into_writer();
    writer.finish().unwrap();
    let mut reader = csv::Reader::from_path(dir.path().join("training_log.csv")).unwrap();
    assert_eq!(reader.records().count(), 2);
}

#[test]
fn fleet_snapshot_round_trips_learned_state() {
    let region = ManhattanRegion::new();
    let mut taxis = make_taxis(3, 4, 16, &region, 7);
    taxis[0].q_table.set(4, 2, 9.5);
    taxis[0].p_explore = 0.3;
    taxis[1].s_table.update(4, 10.0);
    taxis[1].s_table.update(4, 20.0);

    let dir = tmp();
    let path = dir.path().join("fleet.json");
    save_fleet(&path, 1234, &taxis).unwrap();

    let (run_count, mut restored) = load_fleet(&path).unwrap();
    assert_eq!(run_count, 1234);
    assert_eq!(restored.len(), 3);
    assert_eq!(restored[0].q_table.get(4)[2], 9.5);
    assert!((restored[0].p_explore - 0.3).abs() < 1e-9);
    assert_eq!(restored[1].s_table.mean(4), Some(15.0));
    assert_eq!(restored[1].s_table.count(4), 2);
    assert_eq!(restored[0].id, taxis[0].id);
    assert_eq!(restored[0].position, taxis[0].position);
}

#[test]
fn fleet_snapshot_preserves_seat_capacity() {
    let region = ManhattanRegion::new();
    let mut taxis = make_taxis(1, 4, 16, &region, 11);
    taxis[0].size = 7;

    let dir = tmp();
    let path = dir.path().join("fleet.json");
    save_fleet(&path, 0, &taxis).unwrap();

    let (_, restored) = load_fleet(&path).unwrap();
    assert_eq!(restored[0].size, 7);
    assert_eq!(restored[0].q_table.maxsize(), 16);
}

#[test]
fn load_fleet_errors_on_missing_file() {
    let dir = tmp();
    let result = load_fleet(&dir.path().join("nonexistent.json"));
    assert!(result.is_err());
}
