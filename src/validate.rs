//! Per-record validation of raw input rows.
//!
//! Checks run in a fixed order (latitude, longitude, timestamp) and stop at
//! the first failure. Rejections are reported to a [`DiagnosticSink`] and the
//! record is dropped; validation itself never fails the run.

use serde::Serialize;
use tracing::error;

use crate::logging::REJECTS_TARGET;
use crate::record::{Point, RawRecord, parse_timestamp};

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("Invalid Latitude data.")]
    InvalidLatitude,
    #[error("Latitude data out of range.")]
    LatitudeOutOfRange,
    #[error("Invalid Longitude data.")]
    InvalidLongitude,
    #[error("Longitude data out of range.")]
    LongitudeOutOfRange,
    #[error("Invalid Timestamp data.")]
    InvalidTimestamp,
}

impl RejectReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::InvalidLatitude => "invalid_latitude",
            RejectReason::LatitudeOutOfRange => "latitude_out_of_range",
            RejectReason::InvalidLongitude => "invalid_longitude",
            RejectReason::LongitudeOutOfRange => "longitude_out_of_range",
            RejectReason::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// A dropped record with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub line: u64,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn message(&self) -> String {
        format!("Error record at line {}: {}", self.line, self.reason)
    }
}

/// Receives every rejection, in input order.
pub trait DiagnosticSink {
    fn reject(&mut self, rejection: &Rejection);
}

/// Logs rejections through `tracing` under the `rejects` target.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub count: usize,
}

impl DiagnosticSink for TracingSink {
    fn reject(&mut self, rejection: &Rejection) {
        self.count += 1;
        error!(
            target: REJECTS_TARGET,
            line = rejection.line,
            reason = rejection.reason.code(),
            "{}",
            rejection.message()
        );
    }
}

impl DiagnosticSink for Vec<Rejection> {
    fn reject(&mut self, rejection: &Rejection) {
        self.push(rejection.clone());
    }
}

/// Parses a coordinate bounded by `[-limit, limit]` degrees.
fn parse_coordinate(
    text: &str,
    limit: f64,
    invalid: RejectReason,
    out_of_range: RejectReason,
) -> Result<f64, RejectReason> {
    let value: f64 = text.trim().parse().map_err(|_| invalid)?;
    if value.is_nan() {
        return Err(invalid);
    }
    if value < -limit || value > limit {
        return Err(out_of_range);
    }
    Ok(value)
}

/// Validates one record without reporting.
pub fn check_record(record: &RawRecord) -> Result<Point, RejectReason> {
    let latitude = parse_coordinate(
        &record.latitude,
        90.0,
        RejectReason::InvalidLatitude,
        RejectReason::LatitudeOutOfRange,
    )?;
    let longitude = parse_coordinate(
        &record.longitude,
        180.0,
        RejectReason::InvalidLongitude,
        RejectReason::LongitudeOutOfRange,
    )?;
    let timestamp = parse_timestamp(&record.timestamp).ok_or(RejectReason::InvalidTimestamp)?;

    Ok(Point {
        device_id: record.device_id.clone(),
        latitude,
        longitude,
        timestamp,
        latitude_text: record.latitude.clone(),
        longitude_text: record.longitude.clone(),
        timestamp_text: record.timestamp.clone(),
    })
}

/// Validates one record, reporting a rejection to `sink`.
pub fn validate_record(record: &RawRecord, sink: &mut impl DiagnosticSink) -> Option<Point> {
    match check_record(record) {
        Ok(point) => Some(point),
        Err(reason) => {
            sink.reject(&Rejection {
                line: record.line,
                reason,
            });
            None
        }
    }
}

/// Validates every record in order, keeping the accepted ones.
pub fn validate_all(records: &[RawRecord], sink: &mut impl DiagnosticSink) -> Vec<Point> {
    records
        .iter()
        .filter_map(|r| validate_record(r, sink))
        .collect()
}
