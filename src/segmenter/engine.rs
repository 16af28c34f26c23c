use tracing::debug;

use crate::record::Point;
use crate::segmenter::config::SegmenterConfig;
use crate::segmenter::trip::Trip;
use crate::stats::segment_speed_kmh;

/// State of the trip currently being built.
#[derive(Debug)]
struct Scan {
    trip: Trip,
    /// Last scanned point; per-segment measurements start here.
    previous: Point,
    /// Last non-degenerate segment speed. Kept across zero-duration segments.
    speed_kmh: f64,
}

impl Scan {
    fn start(number: usize, anchor: Point) -> Self {
        Self {
            trip: Trip::open(number, anchor.clone()),
            previous: anchor,
            speed_kmh: 0.0,
        }
    }
}

impl SegmenterConfig {
    /// Whether `point` lies beyond either threshold, measured from `anchor`.
    pub fn crosses_boundary(&self, anchor: &Point, point: &Point) -> bool {
        anchor.distance_km(point) > self.max_displacement_km
            || point.minutes_since(anchor) > self.max_gap_minutes
    }
}

/// Streaming trip segmenter for one device's time-sorted points.
///
/// Feed points in order with [`Segmenter::ingest`]; a closed trip is returned
/// whenever a boundary is crossed and when the final point arrives.
#[derive(Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    scan: Option<Scan>,
    next_number: usize,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            scan: None,
            next_number: 1,
        }
    }

    fn start(&mut self, anchor: Point) -> Scan {
        let scan = Scan::start(self.next_number, anchor);
        self.next_number += 1;
        scan
    }

    /// Scans one point. `is_final` must be set on the last point of the input.
    ///
    /// Returns the trip that this point closed, if any.
    pub fn ingest(&mut self, point: Point, is_final: bool) -> Option<Trip> {
        let Some(scan) = self.scan.as_mut() else {
            let scan = self.start(point);
            if is_final {
                return Some(scan.trip);
            }
            self.scan = Some(scan);
            return None;
        };

        let distance_km = scan.previous.distance_km(&point);
        let minutes = point.minutes_since(&scan.previous);
        if let Some(speed) = segment_speed_kmh(distance_km, minutes) {
            scan.speed_kmh = speed;
        }

        if is_final {
            scan.trip.push(point, distance_km, minutes, scan.speed_kmh);
            let closed = self.scan.take().map(|s| s.trip);
            if let Some(trip) = &closed {
                debug!(
                    trip = trip.number,
                    points = trip.points().len(),
                    "Trip closed at end of input"
                );
            }
            return closed;
        }

        if self.config.crosses_boundary(scan.trip.anchor(), &point) {
            scan.trip.push(point.clone(), distance_km, minutes, scan.speed_kmh);
            let next = Scan::start(self.next_number, point);
            self.next_number += 1;
            let closed = std::mem::replace(scan, next).trip;
            debug!(
                trip = closed.number,
                points = closed.points().len(),
                "Trip closed at boundary"
            );
            return Some(closed);
        }

        scan.trip.push(point.clone(), distance_km, minutes, scan.speed_kmh);
        scan.previous = point;
        None
    }

    /// Closes the open trip, if any. Only needed when the last point was not
    /// flagged as final.
    pub fn finish(&mut self) -> Option<Trip> {
        self.scan.take().map(|s| s.trip)
    }
}

/// Segments a whole time-sorted sequence, flagging its last point as final.
pub fn segment(points: impl IntoIterator<Item = Point>, config: SegmenterConfig) -> Vec<Trip> {
    let mut segmenter = Segmenter::new(config);
    let mut trips = Vec::new();
    let mut points = points.into_iter().peekable();

    while let Some(point) = points.next() {
        let is_final = points.peek().is_none();
        if let Some(trip) = segmenter.ingest(point, is_final) {
            trips.push(trip);
        }
    }
    trips.extend(segmenter.finish());

    trips
}
