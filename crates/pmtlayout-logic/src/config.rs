//! Layout configuration: box geometry, sensor spec, coverage target.
//!
//! All lengths are millimetres. Defaults describe a 20-inch PMT in a
//! 10.5 × 35.1 × 9.6 m detector at 20% coverage.
//!
//! ```
//! use pmtlayout_logic::config::{validate_config, BoxDimensions, LayoutConfig};
//!
//! let mut config = LayoutConfig::default();
//! config.box_dims = "1000,2000,3000".parse::<BoxDimensions>().unwrap();
//! assert!(validate_config(&config).is_empty());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical diameter of a 20-inch PMT.
pub const DEFAULT_PHYSICAL_DIAMETER_MM: f64 = 20.0 * 25.4;
/// Photocathode diameter of a typical 20-inch PMT.
pub const DEFAULT_ACTIVE_DIAMETER_MM: f64 = 460.0;
pub const DEFAULT_STANDOFF_MM: f64 = 0.0;
pub const DEFAULT_EDGE_GAP_MM: f64 = 0.0;
pub const DEFAULT_COVERAGE: f64 = 0.20;
pub const DEFAULT_BOX_DIMS_MM: [f64; 3] = [10_500.0, 35_100.0, 9_600.0];

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Dimension string did not contain exactly three values.
    #[error("box dimensions need exactly 3 values (Lx,Ly,Lz), got {0}")]
    WrongDimensionCount(usize),
    /// A dimension value was not a number.
    #[error("box dimension {0:?} is not a number")]
    NonNumericDimension(String),
    /// A dimension was zero, negative, or not finite.
    #[error("box dimension {axis} must be positive, got {value}")]
    NonPositiveDimension { axis: char, value: f64 },
    #[error("PMT physical diameter must be positive, got {0}")]
    InvalidPhysicalDiameter(f64),
    #[error("PMT active diameter must be positive, got {0}")]
    InvalidActiveDiameter(f64),
    #[error("standoff distance must be non-negative, got {0}")]
    NegativeStandoff(f64),
    #[error("edge gap must be non-negative, got {0}")]
    NegativeEdgeGap(f64),
    /// Coverage must lie in [0, 1].
    #[error("desired coverage must be within 0.0..=1.0, got {0}")]
    CoverageOutOfRange(f64),
}

/// Full (not half) box extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
}

impl BoxDimensions {
    /// Build from three lengths, rejecting non-positive or non-finite ones.
    pub fn new(lx: f64, ly: f64, lz: f64) -> Result<Self, ConfigError> {
        let dims = Self { lx, ly, lz };
        match dims.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(dims),
        }
    }

    /// Extents as `[Lx, Ly, Lz]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.lx, self.ly, self.lz]
    }

    /// Half extents `[Lx/2, Ly/2, Lz/2]`.
    pub fn half_extents(&self) -> [f64; 3] {
        self.as_array().map(|d| d / 2.0)
    }

    fn validate(&self) -> Vec<ConfigError> {
        ['x', 'y', 'z']
            .into_iter()
            .zip(self.as_array())
            .filter(|(_, value)| !(value.is_finite() && *value > 0.0))
            .map(|(axis, value)| ConfigError::NonPositiveDimension { axis, value })
            .collect()
    }
}

impl Default for BoxDimensions {
    fn default() -> Self {
        let [lx, ly, lz] = DEFAULT_BOX_DIMS_MM;
        Self { lx, ly, lz }
    }
}

impl FromStr for BoxDimensions {
    type Err = ConfigError;

    /// Parse `"Lx,Ly,Lz"`. Whitespace around values is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ConfigError::WrongDimensionCount(parts.len()));
        }
        let mut values = [0.0; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| ConfigError::NonNumericDimension(part.to_string()))?;
        }
        Self::new(values[0], values[1], values[2])
    }
}

impl std::fmt::Display for BoxDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.lx, self.ly, self.lz)
    }
}

/// Sensor dimensions and mounting clearances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSpec {
    /// Mounting footprint diameter.
    pub physical_diameter: f64,
    /// Photosensitive diameter (used for coverage).
    pub active_diameter: f64,
    /// Distance from the sensor edge to the wall it is mounted on.
    pub standoff: f64,
    /// Minimum distance from the sensor edge to the edge of its face.
    pub edge_gap: f64,
}

impl SensorSpec {
    pub fn physical_radius(&self) -> f64 {
        self.physical_diameter / 2.0
    }

    /// Distance from the wall plane to the sensor center.
    pub fn center_offset(&self) -> f64 {
        self.physical_radius() + self.standoff
    }
}

impl Default for SensorSpec {
    fn default() -> Self {
        Self {
            physical_diameter: DEFAULT_PHYSICAL_DIAMETER_MM,
            active_diameter: DEFAULT_ACTIVE_DIAMETER_MM,
            standoff: DEFAULT_STANDOFF_MM,
            edge_gap: DEFAULT_EDGE_GAP_MM,
        }
    }
}

/// Everything needed to generate a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub box_dims: BoxDimensions,
    pub sensor: SensorSpec,
    /// Target fraction of wall area covered by active sensor area.
    pub desired_coverage: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_dims: BoxDimensions::default(),
            sensor: SensorSpec::default(),
            desired_coverage: DEFAULT_COVERAGE,
        }
    }
}

/// Validate a layout configuration, returning all errors found.
pub fn validate_config(config: &LayoutConfig) -> Vec<ConfigError> {
    let mut errors = config.box_dims.validate();
    let sensor = &config.sensor;

    if !(sensor.physical_diameter.is_finite() && sensor.physical_diameter > 0.0) {
        errors.push(ConfigError::InvalidPhysicalDiameter(
            sensor.physical_diameter,
        ));
    }
    if !(sensor.active_diameter.is_finite() && sensor.active_diameter > 0.0) {
        errors.push(ConfigError::InvalidActiveDiameter(sensor.active_diameter));
    }
    if !(sensor.standoff.is_finite() && sensor.standoff >= 0.0) {
        errors.push(ConfigError::NegativeStandoff(sensor.standoff));
    }
    if !(sensor.edge_gap.is_finite() && sensor.edge_gap >= 0.0) {
        errors.push(ConfigError::NegativeEdgeGap(sensor.edge_gap));
    }
    if !(0.0..=1.0).contains(&config.desired_coverage) {
        errors.push(ConfigError::CoverageOutOfRange(config.desired_coverage));
    }

    errors
}
