//! # Wall-Profile Form
//!
//! The user enters the mounting height of the wall profile and gets back the
//! passage height under the gutter. Passage heights are capped at
//! `max_passage_height`.
//!
//! ## Example
//!
//! ```rust
//! use passage_core::calculations::{RailSystem, SiteMeasurements};
//! use passage_core::calculations::wall_profile::WallProfileRequest;
//! use passage_core::config::DEFAULT_CONFIG;
//!
//! let request = WallProfileRequest {
//!     site: SiteMeasurements::new(3.0, Some(0), RailSystem::Standard),
//!     wall_profile_height: 2700,
//! };
//!
//! assert!(request.validate(&DEFAULT_CONFIG).is_ok());
//! assert_eq!(request.passage_height(&DEFAULT_CONFIG), 2281);
//! ```

use serde::{Deserialize, Serialize};

use super::{validate_main_input, FormType, SiteMeasurements};
use crate::config::CalculationConfig;
use crate::equations::{calculate_from_wall_profile, wall_profile_for_passage_height};
use crate::errors::CalcResult;

/// Input parameters for the wall-profile form.
///
/// ## JSON Example
///
/// ```json
/// {
///   "depth": 3,
///   "slope": 0,
///   "railSystemSlope": "unchecked",
///   "wallProfileHeight": 2700
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallProfileRequest {
    #[serde(flatten)]
    pub site: SiteMeasurements,

    /// Wall-profile mounting height in millimeters
    pub wall_profile_height: i32,
}

impl WallProfileRequest {
    /// Validate input parameters.
    pub fn validate(&self, config: &CalculationConfig) -> CalcResult<()> {
        self.site.validate(config)?;
        validate_main_input(config, FormType::WallProfile, self.wall_profile_height)
    }

    /// Passage height for the entered wall profile (mm)
    pub fn passage_height(&self, config: &CalculationConfig) -> i32 {
        calculate_from_wall_profile(
            config,
            self.site.depth,
            self.site.slope_mm(),
            f64::from(self.wall_profile_height),
            self.site.rail_system_slope,
        )
    }

    /// Wall-profile height that yields `passage_mm` for these measurements
    pub fn wall_profile_for(&self, config: &CalculationConfig, passage_mm: i32) -> i32 {
        wall_profile_for_passage_height(
            config,
            self.site.depth,
            self.site.slope_mm(),
            f64::from(passage_mm),
            self.site.rail_system_slope,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::RailSystem;
    use crate::config::DEFAULT_CONFIG;

    fn test_request() -> WallProfileRequest {
        WallProfileRequest {
            site: SiteMeasurements::new(3.0, Some(0), RailSystem::Standard),
            wall_profile_height: 2700,
        }
    }

    #[test]
    fn test_passage_height() {
        assert_eq!(test_request().passage_height(&DEFAULT_CONFIG), 2281);
    }

    #[test]
    fn test_slope_raises_passage() {
        let mut req = test_request();
        req.site.slope = Some(40);
        // drop ≈ 40 mm over the inside depth
        assert_eq!(req.passage_height(&DEFAULT_CONFIG), 2321);
    }

    #[test]
    fn test_bounds_inclusive() {
        let mut req = test_request();
        req.wall_profile_height = 2259;
        assert!(req.validate(&DEFAULT_CONFIG).is_ok());
        req.wall_profile_height = 3278;
        assert!(req.validate(&DEFAULT_CONFIG).is_ok());
        req.wall_profile_height = 3279;
        assert!(req.validate(&DEFAULT_CONFIG).is_err());
    }

    #[test]
    fn test_inverse_round_trip() {
        let req = test_request();
        let wall = req.wall_profile_for(&DEFAULT_CONFIG, 2300);
        let mut rerun = req;
        rerun.wall_profile_height = wall;
        assert!((rerun.passage_height(&DEFAULT_CONFIG) - 2300).abs() <= 1);
    }

    #[test]
    fn test_serialization() {
        let req = test_request();
        let json = serde_json::to_string_pretty(&req).unwrap();
        assert!(json.contains("\"wallProfileHeight\": 2700"));
        assert!(json.contains("\"railSystemSlope\": \"unchecked\""));
        let roundtrip: WallProfileRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, roundtrip);
    }
}
