//! Raw input rows and validated GPS points.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One unvalidated input row, as read from the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Identifier used in diagnostics (the physical line number for CSV input).
    pub line: u64,
    pub device_id: String,
    pub latitude: String,
    pub longitude: String,
    pub timestamp: String,
}

impl RawRecord {
    pub fn new(
        line: u64,
        device_id: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            line,
            device_id: device_id.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A validated GPS observation. Immutable once built by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Absolute instant, normalised to UTC.
    pub timestamp: NaiveDateTime,
    /// Source text of each field, written back verbatim in trip rows.
    pub latitude_text: String,
    pub longitude_text: String,
    pub timestamp_text: String,
}

/// Output row for a kept point: `device_id,lat,lon,timestamp`.
#[derive(Debug, Serialize)]
pub struct PointRow<'a> {
    pub device_id: &'a str,
    pub lat: &'a str,
    pub lon: &'a str,
    pub timestamp: &'a str,
}

impl Point {
    pub fn as_row(&self) -> PointRow<'_> {
        PointRow {
            device_id: &self.device_id,
            lat: &self.latitude_text,
            lon: &self.longitude_text,
            timestamp: &self.timestamp_text,
        }
    }

    /// Minutes elapsed from `earlier` to `self`.
    pub fn minutes_since(&self, earlier: &Point) -> f64 {
        let elapsed = self.timestamp - earlier.timestamp;
        match elapsed.num_microseconds() {
            Some(us) => us as f64 / 60_000_000.0,
            None => elapsed.num_milliseconds() as f64 / 60_000.0,
        }
    }

    pub fn distance_km(&self, other: &Point) -> f64 {
        crate::geo::haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y%m%dT%H%M%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

// chrono needs minutes; hour-only forms are parsed with ":00" appended.
const HOUR_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parses an ISO-8601 date-time into a UTC instant.
///
/// Timestamps carrying an offset are converted to UTC; naive timestamps are
/// taken as UTC already. Extended and basic forms are accepted, down to
/// hour precision. A bare date means midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt);
    }

    let with_minutes = format!("{text}:00");
    if let Some(dt) = HOUR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&with_minutes, fmt).ok())
    {
        return Some(dt);
    }

    ["%Y-%m-%d", "%Y%m%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
