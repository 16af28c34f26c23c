use crate::record::Point;
use crate::stats::{TripStats, TripSummary};

/// One movement episode: its kept points in order, plus running statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// 1-based, in emission order.
    pub number: usize,
    points: Vec<Point>,
    stats: TripStats,
}

impl Trip {
    /// Opens a trip on its anchor point, with zeroed statistics.
    pub(crate) fn open(number: usize, anchor: Point) -> Self {
        Self {
            number,
            points: vec![anchor],
            stats: TripStats::default(),
        }
    }

    /// Appends a kept point together with the segment that reached it.
    pub(crate) fn push(&mut self, point: Point, distance_km: f64, minutes: f64, speed_kmh: f64) {
        self.stats.add_segment(distance_km, minutes, speed_kmh);
        self.points.push(point);
    }

    /// First point of the trip.
    pub fn anchor(&self) -> &Point {
        &self.points[0]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn stats(&self) -> &TripStats {
        &self.stats
    }

    pub fn summary(&self) -> TripSummary {
        self.stats.summary()
    }

    /// `(latitude, longitude)` of every kept point, in order.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.latitude, p.longitude))
            .collect()
    }

    pub fn name(&self) -> String {
        format!("Trip {}", self.number)
    }
}
