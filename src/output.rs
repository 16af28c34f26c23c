//! Persistence of closed trips: per-trip CSV rows and JSON summary, plus a
//! combined GeoJSON overlay.

use anyhow::Result;
use tracing::{debug, info};

use crate::overlay::FeatureCollection;
use crate::segmenter::Trip;
use csv::WriterBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const OVERLAY_FILE: &str = "trips.geojson";

pub fn trip_rows_path(dir: &Path, trip: &Trip) -> PathBuf {
    dir.join(format!("trip_{}.csv", trip.number))
}

pub fn trip_summary_path(dir: &Path, trip: &Trip) -> PathBuf {
    dir.join(format!("trip_{}.json", trip.number))
}

/// Logs a trip summary using Rust's debug pretty-print format.
pub fn print_pretty(trip: &Trip) {
    debug!("{} {:#?}", trip.name(), trip.summary());
}

/// Logs a trip summary as pretty-printed JSON.
pub fn print_json(trip: &Trip) -> Result<()> {
    info!(
        "{}: {}",
        trip.name(),
        serde_json::to_string_pretty(&trip.summary())?
    );
    Ok(())
}

/// Writes the kept points of a trip as `device_id,lat,lon,timestamp` rows.
pub fn write_trip_rows(dir: &Path, trip: &Trip) -> Result<PathBuf> {
    let path = trip_rows_path(dir, trip);
    debug!(path = %path.display(), rows = trip.points().len(), "Writing trip rows");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_writer(File::create(&path)?);

    for point in trip.points() {
        writer.serialize(point.as_row())?;
    }
    writer.flush()?;

    Ok(path)
}

/// Writes the summary statistics of a trip as pretty JSON.
pub fn write_trip_summary(dir: &Path, trip: &Trip) -> Result<PathBuf> {
    let path = trip_summary_path(dir, trip);
    debug!(path = %path.display(), "Writing trip summary");

    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, &trip.summary())?;

    Ok(path)
}

/// Writes the combined overlay of all trips.
pub fn write_overlay(dir: &Path, overlay: &FeatureCollection) -> Result<PathBuf> {
    let path = dir.join(OVERLAY_FILE);
    debug!(path = %path.display(), features = overlay.features.len(), "Writing overlay");

    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, overlay)?;

    Ok(path)
}

/// Emits every trip in order, then the overlay, into `dir`.
#[tracing::instrument(skip_all, fields(dir = %dir.display(), trips = trips.len()))]
pub fn emit_all(dir: &Path, trips: &[Trip]) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut overlay = FeatureCollection::default();
    for trip in trips {
        write_trip_rows(dir, trip)?;
        write_trip_summary(dir, trip)?;
        overlay.push(trip);
        print_pretty(trip);
    }
    write_overlay(dir, &overlay)?;

    info!("Trip files written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;
    use crate::segmenter::SegmenterConfig;
    use crate::pipeline::run;
    use crate::validate::Rejection;
    use std::env;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir); // clean up any prior run
        dir
    }

    fn sample_trips() -> Vec<Trip> {
        let records = vec![
            RawRecord::new(2, "dev1", "0.0", "0.0", "2024-01-01T00:00:00"),
            RawRecord::new(3, "dev1", "0.010", "0.0", "2024-01-01T00:10:00"),
            RawRecord::new(4, "dev1", "0.027", "0.0", "2024-01-01T00:15:00"),
            RawRecord::new(5, "dev1", "0.030", "0.0", "2024-01-01T00:20:00"),
        ];
        run(&records, &SegmenterConfig::default(), &mut Vec::<Rejection>::new()).trips
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        for trip in sample_trips() {
            print_pretty(&trip);
        }
    }

    #[test]
    fn test_print_json_does_not_panic() {
        for trip in sample_trips() {
            print_json(&trip).unwrap();
        }
    }

    #[test]
    fn test_write_trip_rows_has_header_and_rows() {
        let dir = temp_dir("trip_calculator_test_rows");
        fs::create_dir_all(&dir).unwrap();
        let trips = sample_trips();

        let path = write_trip_rows(&dir, &trips[0]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();

        assert_eq!(lines[0], "device_id,lat,lon,timestamp");
        assert_eq!(lines.len(), 1 + trips[0].points().len());
        assert_eq!(lines[1], "dev1,0.0,0.0,2024-01-01T00:00:00");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_emit_all_writes_every_file() {
        let dir = temp_dir("trip_calculator_test_emit");
        let trips = sample_trips();
        assert_eq!(trips.len(), 2);

        emit_all(&dir, &trips).unwrap();

        for n in 1..=2 {
            assert!(dir.join(format!("trip_{n}.csv")).exists());
            assert!(dir.join(format!("trip_{n}.json")).exists());
        }

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("trip_1.json")).unwrap()).unwrap();
        assert_eq!(summary["total_duration"], 15.0);
        assert!(summary["avg_speed_kmh"].as_f64().unwrap() > 0.0);

        let overlay: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(OVERLAY_FILE)).unwrap()).unwrap();
        assert_eq!(overlay["features"].as_array().unwrap().len(), 2);
        assert_eq!(overlay["features"][1]["properties"]["name"], "Trip 2");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_emit_all_with_no_trips_writes_empty_overlay() {
        let dir = temp_dir("trip_calculator_test_empty");
        emit_all(&dir, &[]).unwrap();

        let overlay: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(OVERLAY_FILE)).unwrap()).unwrap();
        assert_eq!(overlay["type"], "FeatureCollection");
        assert!(overlay["features"].as_array().unwrap().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}
