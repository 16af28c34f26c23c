//! Validate, order and segment one device's records.

use tracing::info;

use crate::record::RawRecord;
use crate::segmenter::{SegmenterConfig, Trip, segment};
use crate::validate::{DiagnosticSink, validate_all};

/// Result of a full run over one input.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub trips: Vec<Trip>,
    pub accepted: usize,
    pub rejected: usize,
}

/// Runs the whole engine: every record is validated in input order, accepted
/// points are stable-sorted by instant, then segmented into trips.
pub fn run(
    records: &[RawRecord],
    config: &SegmenterConfig,
    sink: &mut impl DiagnosticSink,
) -> RunReport {
    let mut points = validate_all(records, sink);
    let accepted = points.len();
    let rejected = records.len() - accepted;

    points.sort_by_key(|p| p.timestamp);
    let trips = segment(points, *config);

    info!(accepted, rejected, trips = trips.len(), "Segmentation finished");

    RunReport {
        trips,
        accepted,
        rejected,
    }
}
