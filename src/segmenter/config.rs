use anyhow::Result;
use serde::Deserialize;

/// Thresholds for the trip boundary test. Both comparisons are strict.
///
/// Can be loaded from a JSON file:
/// ```json
/// { "max_displacement_km": 2.0, "max_gap_minutes": 25.0 }
/// ```
/// Missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Displacement from the anchor, in km, beyond which a trip ends.
    pub max_displacement_km: f64,
    /// Elapsed minutes since the anchor beyond which a trip ends.
    pub max_gap_minutes: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_displacement_km: 2.0,
            max_gap_minutes: 25.0,
        }
    }
}

impl SegmenterConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_overrides(
        mut self,
        max_displacement_km: Option<f64>,
        max_gap_minutes: Option<f64>,
    ) -> Self {
        if let Some(km) = max_displacement_km {
            self.max_displacement_km = km;
        }
        if let Some(minutes) = max_gap_minutes {
            self.max_gap_minutes = minutes;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = SegmenterConfig::default();
        assert_eq!(config.max_displacement_km, 2.0);
        assert_eq!(config.max_gap_minutes, 25.0);
    }

    #[test]
    fn test_load_partial_file() {
        let path = format!("{}/trip_calculator_test_config.json", env::temp_dir().display());
        fs::write(&path, r#"{ "max_gap_minutes": 10 }"#).unwrap();

        let config = SegmenterConfig::load(&path).unwrap();
        assert_eq!(config.max_displacement_km, 2.0);
        assert_eq!(config.max_gap_minutes, 10.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SegmenterConfig::load("/nonexistent/trip_calculator.json").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = SegmenterConfig::default().with_overrides(Some(5.0), None);
        assert_eq!(config.max_displacement_km, 5.0);
        assert_eq!(config.max_gap_minutes, 25.0);
    }
}
