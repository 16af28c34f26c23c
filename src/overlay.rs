//! GeoJSON overlay combining every trip as a coloured line.

use serde::Serialize;

use crate::segmenter::Trip;

/// Colour for a trip, derived only from its number.
///
/// The modulus is `0xFFFFFF` (2^24 - 1), not 2^24, to keep the colours of
/// existing overlays; the two differ only from trip 16,777,215 on.
pub fn trip_color(number: usize) -> String {
    format!("#{:06X}", number % 0xFF_FFFF)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Positions as `[lon, lat]`.
    LineString { coordinates: Vec<[f64; 2]> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct TripFeature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

impl TripFeature {
    pub fn from_trip(trip: &Trip) -> Self {
        let coordinates = trip
            .coordinates()
            .into_iter()
            .map(|(lat, lon)| [lon, lat])
            .collect();

        TripFeature {
            properties: FeatureProperties {
                name: trip.name(),
                color: trip_color(trip.number),
            },
            geometry: Geometry::LineString { coordinates },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<TripFeature>,
}

impl FeatureCollection {
    pub fn from_trips(trips: &[Trip]) -> Self {
        Self {
            features: trips.iter().map(TripFeature::from_trip).collect(),
        }
    }

    pub fn push(&mut self, trip: &Trip) {
        self.features.push(TripFeature::from_trip(trip));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Point;
    use crate::segmenter::{SegmenterConfig, segment};
    use chrono::NaiveDate;

    fn pt(lat: f64, lon: f64, minute: u32) -> Point {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, minute, 0)
            .unwrap();
        Point {
            device_id: "dev1".into(),
            latitude: lat,
            longitude: lon,
            timestamp,
            latitude_text: lat.to_string(),
            longitude_text: lon.to_string(),
            timestamp_text: timestamp.to_string(),
        }
    }

    #[test]
    fn test_trip_color() {
        assert_eq!(trip_color(1), "#000001");
        assert_eq!(trip_color(255), "#0000FF");
        assert_eq!(trip_color(0xABCDE), "#0ABCDE");
        assert_eq!(trip_color(0xFF_FFFF), "#000000");
    }

    #[test]
    fn test_feature_json_shape() {
        let trips = segment(
            vec![pt(10.0, 20.0, 0), pt(10.001, 20.002, 1)],
            SegmenterConfig::default(),
        );
        let collection = FeatureCollection::from_trips(&trips);
        let json = serde_json::to_value(&collection).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        let feature = &json["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["properties"]["name"], "Trip 1");
        assert_eq!(feature["properties"]["color"], "#000001");
        assert_eq!(feature["geometry"]["type"], "LineString");
        assert_eq!(feature["geometry"]["coordinates"][0][0], 20.0);
        assert_eq!(feature["geometry"]["coordinates"][0][1], 10.0);
        assert_eq!(feature["geometry"]["coordinates"][1][0], 20.002);
    }

    #[test]
    fn test_empty_collection() {
        let json = serde_json::to_value(FeatureCollection::default()).unwrap();
        assert_eq!(json["features"].as_array().unwrap().len(), 0);
    }
}
