//! # Gutter-Height Form
//!
//! The user enters the bottom-gutter height they want and gets back the
//! wall-profile height needed to reach it. The entered height is a target to
//! invert against, not a measurement, so the slope drop is added rather than
//! subtracted and the rail offset is taken off the target first.

use serde::{Deserialize, Serialize};

use super::{validate_main_input, FormType, SiteMeasurements};
use crate::config::CalculationConfig;
use crate::equations::{calculate_from_gutter_height, gutter_target_for_wall_profile};
use crate::errors::CalcResult;

/// Input parameters for the gutter-height form.
///
/// ## JSON Example
///
/// ```json
/// {
///   "depth": 2.5,
///   "slope": 50,
///   "railSystemSlope": "checked",
///   "heightBottomGutter": 1800
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GutterHeightRequest {
    #[serde(flatten)]
    pub site: SiteMeasurements,

    /// Target bottom-gutter height in millimeters
    pub height_bottom_gutter: i32,
}

impl GutterHeightRequest {
    /// Validate input parameters.
    pub fn validate(&self, config: &CalculationConfig) -> CalcResult<()> {
        self.site.validate(config)?;
        validate_main_input(config, FormType::GutterHeight, self.height_bottom_gutter)
    }

    /// Wall-profile height needed for the entered target (mm)
    pub fn wall_profile_height(&self, config: &CalculationConfig) -> i32 {
        calculate_from_gutter_height(
            config,
            self.site.depth,
            self.site.slope_mm(),
            f64::from(self.height_bottom_gutter),
            self.site.rail_system_slope,
        )
    }

    /// Gutter-height target that yields `wall_profile_mm`
    pub fn gutter_target_for(&self, config: &CalculationConfig, wall_profile_mm: i32) -> i32 {
        gutter_target_for_wall_profile(
            config,
            self.site.depth,
            self.site.slope_mm(),
            f64::from(wall_profile_mm),
            self.site.rail_system_slope,
        )
    }
}
