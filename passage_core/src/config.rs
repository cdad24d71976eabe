//! # Calculation Configuration
//!
//! The numeric model behind the calculator: permitted depths, the fixed
//! installation angle, offset constants, input bounds and the table of
//! manufacturable passage-height bands.
//!
//! The built-in table is available as [`DEFAULT_CONFIG`]. Store variants with
//! different input bounds can be loaded from TOML or JSON; any key left out
//! falls back to the built-in value.
//!
//! ## TOML Example
//!
//! ```toml
//! depths = [2.0, 2.5, 3.0]
//!
//! [limits]
//! max_passage_height = 2500
//! wall_profile = { min = 2300, max = 3200 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use passage_core::config::{CalculationConfig, DEFAULT_CONFIG};
//!
//! assert_eq!(DEFAULT_CONFIG.ranges.len(), 12);
//!
//! let config = CalculationConfig::from_toml_str("depths = [2.0, 3.0]").unwrap();
//! assert_eq!(config.depths, vec![2.0, 3.0]);
//! assert_eq!(config.limits.max_passage_height, 2500);
//! ```

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::FormType;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Degrees, Radians};

/// Tolerance used when matching a depth against the permitted set (meters)
const DEPTH_TOLERANCE: f64 = 1e-9;

/// Built-in calculation table, created on first use and never mutated.
pub static DEFAULT_CONFIG: Lazy<CalculationConfig> = Lazy::new(CalculationConfig::default);

// ============================================================================
// Passage Ranges
// ============================================================================

/// A closed interval of manufacturable passage heights in millimeters.
///
/// Serializes as a two-element array, e.g. `[2280, 2320]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct PassageRange {
    pub min: i32,
    pub max: i32,
}

impl PassageRange {
    pub const fn new(min: i32, max: i32) -> Self {
        PassageRange { min, max }
    }

    /// Whether `value` lies inside the interval (both ends inclusive)
    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Distance from `value` to the nearer interval boundary
    pub fn boundary_distance(&self, value: i32) -> i32 {
        (value - self.min).abs().min((value - self.max).abs())
    }
}

impl From<[i32; 2]> for PassageRange {
    fn from([min, max]: [i32; 2]) -> Self {
        PassageRange { min, max }
    }
}

impl From<PassageRange> for [i32; 2] {
    fn from(range: PassageRange) -> Self {
        [range.min, range.max]
    }
}

impl std::fmt::Display for PassageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} mm", self.min, self.max)
    }
}

// ============================================================================
// Offsets and Limits
// ============================================================================

/// Fixed offsets applied by the geometry, all in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// First profile allowance added to the inside depth
    pub depth_primary: f64,
    /// Second profile allowance added to the inside depth
    pub depth_secondary: f64,
    /// Allowance between the wall profile and the gutter
    pub wall_to_gutter: f64,
    /// Vertical offset of a recessed (sloped) rail system
    pub rail_slope: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Adjustments {
            depth_primary: 4.59,
            depth_secondary: 7.0,
            wall_to_gutter: 1.0,
            rail_slope: 18.0,
        }
    }
}

/// Inclusive min/max bounds for a form's main input, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: i32,
    pub max: i32,
}

impl InputBounds {
    pub const fn new(min: i32, max: i32) -> Self {
        InputBounds { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Caps and input bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Highest passage height reachable from a wall-profile input (mm)
    pub max_passage_height: i32,
    /// Bounds of the wall-profile height field
    pub wall_profile: InputBounds,
    /// Bounds of the bottom-gutter height field
    pub gutter_height: InputBounds,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_passage_height: 2500,
            wall_profile: InputBounds::new(2259, 3278),
            gutter_height: InputBounds::new(1701, 2500),
        }
    }
}

// ============================================================================
// Calculation Config
// ============================================================================

/// Immutable calculation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Permitted depths in meters, ascending
    pub depths: Vec<f64>,
    /// Installation angle of the roof in degrees
    pub angle_deg: f64,
    pub adjustments: Adjustments,
    pub limits: Limits,
    /// Manufacturable passage-height bands, ascending and disjoint
    pub ranges: Vec<PassageRange>,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        CalculationConfig {
            depths: vec![2.0, 2.5, 3.0, 3.5, 4.0],
            angle_deg: 8.0,
            adjustments: Adjustments::default(),
            limits: Limits::default(),
            ranges: vec![
                PassageRange::new(1980, 2020),
                PassageRange::new(2030, 2070),
                PassageRange::new(2080, 2120),
                PassageRange::new(2130, 2170),
                PassageRange::new(2180, 2220),
                PassageRange::new(2230, 2270),
                PassageRange::new(2280, 2320),
                PassageRange::new(2330, 2370),
                PassageRange::new(2380, 2420),
                PassageRange::new(2480, 2520),
                PassageRange::new(2580, 2620),
                PassageRange::new(2680, 2720),
            ],
        }
    }
}

impl CalculationConfig {
    /// Installation angle in radians
    pub fn angle(&self) -> Radians {
        Degrees(self.angle_deg).into()
    }

    /// Whether `depth_m` is one of the permitted depths
    pub fn is_permitted_depth(&self, depth_m: f64) -> bool {
        self.depths
            .iter()
            .any(|d| (d - depth_m).abs() < DEPTH_TOLERANCE)
    }

    /// Bounds of the main input for a form type
    pub fn bounds(&self, form_type: FormType) -> InputBounds {
        match form_type {
            FormType::WallProfile => self.limits.wall_profile,
            FormType::GutterHeight => self.limits.gutter_height,
        }
    }

    /// Check the table invariants.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.angle_deg.is_finite() || self.angle_deg <= 0.0 || self.angle_deg >= 90.0 {
            return Err(CalcError::invalid_config(format!(
                "angle_deg must be between 0 and 90, got {}",
                self.angle_deg
            )));
        }

        if self.depths.is_empty() {
            return Err(CalcError::invalid_config("at least one depth is required"));
        }
        if self.depths.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(CalcError::invalid_config("depths must be positive"));
        }
        if self.depths.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CalcError::invalid_config("depths must be strictly ascending"));
        }

        for range in &self.ranges {
            if range.min > range.max {
                return Err(CalcError::invalid_config(format!(
                    "range [{}, {}] has min above max",
                    range.min, range.max
                )));
            }
        }
        if let Some(w) = self.ranges.windows(2).find(|w| w[0].max >= w[1].min) {
            return Err(CalcError::invalid_config(format!(
                "ranges [{}, {}] and [{}, {}] overlap or are out of order",
                w[0].min, w[0].max, w[1].min, w[1].max
            )));
        }

        for (name, bounds) in [
            ("wall_profile", self.limits.wall_profile),
            ("gutter_height", self.limits.gutter_height),
        ] {
            if bounds.min > bounds.max {
                return Err(CalcError::invalid_config(format!(
                    "{} bounds have min {} above max {}",
                    name, bounds.min, bounds.max
                )));
            }
        }

        Ok(())
    }

    /// Parse and validate a TOML table.
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        let config: CalculationConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON table.
    pub fn from_json_str(s: &str) -> CalcResult<Self> {
        let config: CalculationConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a table from disk. Files ending in `.json` are read as JSON,
    /// everything else as TOML.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        tracing::debug!(
            path = %path.display(),
            depths = config.depths.len(),
            ranges = config.ranges.len(),
            "loaded calculation config"
        );
        Ok(config)
    }
}
