//! Session configuration.
//!
//! A `RadarConfig` is owned by the caller and is read-only for the lifetime of a
//! session. It can be built in code or loaded from a JSON document; every field
//! is optional in JSON and falls back to its default.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, Result};
use crate::tracker::MotionConfig;

/// Display unit for reported speeds.
///
/// Raw displacement divided by the pixels-per-unit calibration is treated as
/// meters per second; the unit only scales that base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "cm/s")]
    CentimetersPerSecond,
}

impl SpeedUnit {
    /// Multiplicative factor from the m/s base value to this unit.
    #[inline]
    pub fn factor(&self) -> f64 {
        match self {
            Self::KilometersPerHour => 3.6,
            Self::MetersPerSecond => 1.0,
            Self::CentimetersPerSecond => 100.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::KilometersPerHour => "km/h",
            Self::MetersPerSecond => "m/s",
            Self::CentimetersPerSecond => "cm/s",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedUnit {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "km/h" => Ok(Self::KilometersPerHour),
            "m/s" => Ok(Self::MetersPerSecond),
            "cm/s" => Ok(Self::CentimetersPerSecond),
            other => Err(RadarError::UnknownUnit(other.to_string())),
        }
    }
}

/// Parameters forwarded untouched to the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Minimum detection confidence.
    pub confidence: f32,
    /// Square inference input size in pixels.
    pub input_size: u32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            confidence: 0.3,
            input_size: 256,
        }
    }
}

/// Configuration for a radar session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub unit: SpeedUnit,
    /// Calibration scalar: pixels per meter.
    pub pixels_per_unit: f64,
    pub grid_spacing_px: u32,
    /// Minimum wall-clock interval between detector calls.
    pub inference_interval_secs: f64,
    /// Significance gate: slower tracks are not reported.
    pub min_reported_speed: f64,
    /// Drop tracks unseen for longer than this. `None` keeps every track until
    /// the session ends.
    pub idle_eviction_secs: Option<f64>,
    /// Font used for annotation text. Without one only shapes are drawn.
    pub font_path: Option<PathBuf>,
    pub detector: DetectorParams,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            unit: SpeedUnit::default(),
            pixels_per_unit: 35.0,
            grid_spacing_px: 50,
            inference_interval_secs: 0.15,
            min_reported_speed: 1.2,
            idle_eviction_secs: None,
            font_path: None,
            detector: DetectorParams::default(),
        }
    }
}

impl RadarConfig {
    pub const PIXELS_PER_UNIT_RANGE: (f64, f64) = (10.0, 100.0);
    pub const GRID_SPACING_RANGE: (u32, u32) = (10, 200);

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RadarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the ranges the presentation layer is expected to enforce.
    pub fn validate(&self) -> Result<()> {
        let (ppu_min, ppu_max) = Self::PIXELS_PER_UNIT_RANGE;
        if !(ppu_min..=ppu_max).contains(&self.pixels_per_unit) {
            return Err(RadarError::InvalidConfig {
                field: "pixels_per_unit",
                value: self.pixels_per_unit.to_string(),
                expected: "a value in [10, 100]",
            });
        }

        let (grid_min, grid_max) = Self::GRID_SPACING_RANGE;
        if !(grid_min..=grid_max).contains(&self.grid_spacing_px) {
            return Err(RadarError::InvalidConfig {
                field: "grid_spacing_px",
                value: self.grid_spacing_px.to_string(),
                expected: "a value in [10, 200]",
            });
        }

        if !self.inference_interval_secs.is_finite() || self.inference_interval_secs < 0.0 {
            return Err(RadarError::InvalidConfig {
                field: "inference_interval_secs",
                value: self.inference_interval_secs.to_string(),
                expected: "a non-negative number of seconds",
            });
        }

        if !self.min_reported_speed.is_finite() || self.min_reported_speed < 0.0 {
            return Err(RadarError::InvalidConfig {
                field: "min_reported_speed",
                value: self.min_reported_speed.to_string(),
                expected: "a non-negative speed",
            });
        }

        if let Some(idle) = self.idle_eviction_secs {
            if !idle.is_finite() || idle <= 0.0 {
                return Err(RadarError::InvalidConfig {
                    field: "idle_eviction_secs",
                    value: idle.to_string(),
                    expected: "a positive number of seconds",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.detector.confidence) {
            return Err(RadarError::InvalidConfig {
                field: "detector.confidence",
                value: self.detector.confidence.to_string(),
                expected: "a value in [0, 1]",
            });
        }

        Ok(())
    }

    /// Motion estimator settings with the unit resolved to its factor.
    pub fn motion(&self) -> MotionConfig {
        MotionConfig {
            pixels_per_unit: self.pixels_per_unit,
            unit_factor: self.unit.factor(),
            min_reported_speed: self.min_reported_speed,
            idle_eviction_secs: self.idle_eviction_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factors() {
        assert_eq!(SpeedUnit::KilometersPerHour.factor(), 3.6);
        assert_eq!(SpeedUnit::MetersPerSecond.factor(), 1.0);
        assert_eq!(SpeedUnit::CentimetersPerSecond.factor(), 100.0);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("m/s".parse::<SpeedUnit>().unwrap(), SpeedUnit::MetersPerSecond);
        assert_eq!(" cm/s ".parse::<SpeedUnit>().unwrap(), SpeedUnit::CentimetersPerSecond);
        assert!(matches!(
            "mph".parse::<SpeedUnit>(),
            Err(RadarError::UnknownUnit(u)) if u == "mph"
        ));
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = RadarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.unit, SpeedUnit::KilometersPerHour);
        assert_eq!(config.grid_spacing_px, 50);
        assert_eq!(config.pixels_per_unit, 35.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RadarConfig::from_json_str(
            r#"{ "unit": "cm/s", "grid_spacing_px": 80, "idle_eviction_secs": 5.0 }"#,
        )
        .unwrap();
        assert_eq!(config.unit, SpeedUnit::CentimetersPerSecond);
        assert_eq!(config.grid_spacing_px, 80);
        assert_eq!(config.idle_eviction_secs, Some(5.0));
        assert_eq!(config.pixels_per_unit, 35.0);
        assert_eq!(config.detector, DetectorParams::default());
    }

    #[test]
    fn test_json_round_trip_keeps_unit_label() {
        let json = RadarConfig::default().to_json_pretty().unwrap();
        assert!(json.contains("\"km/h\""));
        assert_eq!(RadarConfig::from_json_str(&json).unwrap(), RadarConfig::default());
    }

    #[test]
    fn test_out_of_range_grid_is_rejected() {
        let err = RadarConfig::from_json_str(r#"{ "grid_spacing_px": 5 }"#).unwrap_err();
        assert!(matches!(
            err,
            RadarError::InvalidConfig {
                field: "grid_spacing_px",
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_calibration_is_rejected() {
        let config = RadarConfig {
            pixels_per_unit: 150.0,
            ..RadarConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RadarError::InvalidConfig {
                field: "pixels_per_unit",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_unit_in_json_fails_to_parse() {
        let err = RadarConfig::from_json_str(r#"{ "unit": "mph" }"#).unwrap_err();
        assert!(matches!(err, RadarError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RadarConfig::load("/definitely/not/here.json").unwrap_err();
        match err {
            RadarError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_motion_resolves_unit_factor() {
        let config = RadarConfig {
            unit: SpeedUnit::CentimetersPerSecond,
            ..RadarConfig::default()
        };
        let motion = config.motion();
        assert_eq!(motion.unit_factor, 100.0);
        assert_eq!(motion.pixels_per_unit, 35.0);
        assert_eq!(motion.min_reported_speed, 1.2);
    }
}
