use serde::Serialize;

/// Running statistics for one trip, advanced one segment at a time.
///
/// Every field only grows as segments are added.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripStats {
    pub total_distance_km: f64,
    pub total_duration_min: f64,
    pub max_speed_kmh: f64,
}

/// Serialized per-trip summary, keyed the way downstream consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripSummary {
    #[serde(rename = "total_distance")]
    pub total_distance_km: f64,
    #[serde(rename = "total_duration")]
    pub total_duration_min: f64,
    /// `None` when the trip has zero duration.
    pub avg_speed_kmh: Option<f64>,
    pub max_speed_kmh: f64,
}

impl TripStats {
    /// Adds one segment of `distance_km` over `minutes`, observed at `speed_kmh`.
    pub fn add_segment(&mut self, distance_km: f64, minutes: f64, speed_kmh: f64) {
        self.total_distance_km += distance_km;
        self.total_duration_min += minutes;
        if speed_kmh > self.max_speed_kmh {
            self.max_speed_kmh = speed_kmh;
        }
    }

    /// Average speed over the whole trip, undefined for a zero-duration trip.
    pub fn avg_speed_kmh(&self) -> Option<f64> {
        if self.total_duration_min > 0.0 {
            Some(60.0 * self.total_distance_km / self.total_duration_min)
        } else {
            None
        }
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary {
            total_distance_km: self.total_distance_km,
            total_duration_min: self.total_duration_min,
            avg_speed_kmh: self.avg_speed_kmh(),
            max_speed_kmh: self.max_speed_kmh,
        }
    }
}

/// Speed in km/h for a segment, `None` when the segment has no duration.
pub fn segment_speed_kmh(distance_km: f64, minutes: f64) -> Option<f64> {
    if minutes > 0.0 {
        Some(60.0 * distance_km / minutes)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_speed_with_zero_duration() {
        let stats = TripStats::default();
        assert_eq!(stats.avg_speed_kmh(), None);
        assert_eq!(stats.summary().avg_speed_kmh, None);
    }

    #[test]
    fn test_add_segment_accumulates() {
        let mut stats = TripStats::default();
        stats.add_segment(1.0, 2.0, 30.0);
        stats.add_segment(3.0, 2.0, 90.0);
        stats.add_segment(0.5, 1.0, 30.0);

        assert_eq!(stats.total_distance_km, 4.5);
        assert_eq!(stats.total_duration_min, 5.0);
        assert_eq!(stats.max_speed_kmh, 90.0);
        assert_eq!(stats.avg_speed_kmh(), Some(54.0));
    }

    #[test]
    fn test_segment_speed() {
        assert_eq!(segment_speed_kmh(1.0, 1.0), Some(60.0));
        assert_eq!(segment_speed_kmh(1.0, 0.0), None);
    }

    #[test]
    fn test_summary_serializes_null_average() {
        let json = serde_json::to_value(TripStats::default().summary()).unwrap();
        assert_eq!(json["avg_speed_kmh"], serde_json::Value::Null);
        assert_eq!(json["total_distance"], 0.0);
        assert_eq!(json["total_duration"], 0.0);
        assert_eq!(json["max_speed_kmh"], 0.0);
    }
}
