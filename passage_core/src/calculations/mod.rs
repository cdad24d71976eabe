//! # Passage Height Calculations
//!
//! This module contains the calculation pipeline. Each form type follows the
//! pattern:
//!
//! - `*Request` - Validated input for one form type (JSON-serializable)
//! - `CalculationResult` - Output, range classification and recommendation
//! - `calculate(config, request) -> Result<CalculationResult, CalcError>`
//!
//! ## Form Types
//!
//! - [`wall_profile`] - Wall-profile height in, passage height out
//! - [`gutter_height`] - Target passage height in, wall-profile height out
//! - [`recommendation`] - Corrected main input for out-of-range outputs
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "formType": "wallProfile",
//!   "depth": 3,
//!   "slope": 0,
//!   "railSystemSlope": "unchecked",
//!   "wallProfileHeight": 2700
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use passage_core::calculations::{calculate, CalculationRequest, RailSystem, SiteMeasurements};
//! use passage_core::calculations::wall_profile::WallProfileRequest;
//! use passage_core::config::DEFAULT_CONFIG;
//!
//! let request = CalculationRequest::WallProfile(WallProfileRequest {
//!     site: SiteMeasurements::new(3.0, None, RailSystem::Standard),
//!     wall_profile_height: 2700,
//! });
//!
//! let result = calculate(&DEFAULT_CONFIG, &request).unwrap();
//! assert_eq!(result.output, 2281);
//! assert!(result.in_range);
//! assert!(result.recommendation.is_none());
//! ```

pub mod gutter_height;
pub mod recommendation;
pub mod wall_profile;

use serde::{Deserialize, Serialize};

use crate::config::{CalculationConfig, PassageRange};
use crate::equations::{calculate_dimensions, Dimensions};
use crate::errors::{CalcError, CalcResult};
use crate::ranges::check_range;

// Re-export commonly used types
pub use gutter_height::GutterHeightRequest;
pub use recommendation::{generate_suggestion, Recommendation};
pub use wall_profile::WallProfileRequest;

// ============================================================================
// Discriminators
// ============================================================================

/// Which dimension the user entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormType {
    /// Wall-profile height entered, passage height computed
    WallProfile,
    /// Target bottom-gutter height entered, wall-profile height computed
    GutterHeight,
}

impl FormType {
    /// Name of the main input field for this form type
    pub fn main_field(&self) -> &'static str {
        match self {
            FormType::WallProfile => "wall_profile_height",
            FormType::GutterHeight => "height_bottom_gutter",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FormType::WallProfile => "Wall profile",
            FormType::GutterHeight => "Gutter height",
        }
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Rail-system configuration under the sliding walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RailSystem {
    /// Rails mounted on the floor
    #[default]
    #[serde(rename = "unchecked")]
    Standard,
    /// Recessed (sloped) rails, adding a fixed vertical offset
    #[serde(rename = "checked")]
    Recessed,
}

impl RailSystem {
    /// Parse the form's checkbox value (`"checked"` / `"unchecked"`)
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim() {
            "checked" => Some(RailSystem::Recessed),
            "unchecked" => Some(RailSystem::Standard),
            _ => None,
        }
    }
}

// ============================================================================
// Shared Measurements
// ============================================================================

/// Measurements common to both form types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeasurements {
    /// Veranda depth in meters, one of the permitted depths
    pub depth: f64,

    /// Terrace slope in millimeters; absent means level
    #[serde(default)]
    pub slope: Option<i32>,

    /// Rail-system configuration
    pub rail_system_slope: RailSystem,
}

impl SiteMeasurements {
    pub fn new(depth: f64, slope: Option<i32>, rail_system_slope: RailSystem) -> Self {
        SiteMeasurements {
            depth,
            slope,
            rail_system_slope,
        }
    }

    /// Slope in millimeters, 0 when absent
    pub fn slope_mm(&self) -> f64 {
        f64::from(self.slope.unwrap_or(0))
    }

    /// Validate depth and slope against the configuration.
    pub fn validate(&self, config: &CalculationConfig) -> CalcResult<()> {
        if !config.is_permitted_depth(self.depth) {
            return Err(CalcError::invalid_input(
                "depth",
                self.depth.to_string(),
                format!("Depth must be one of {:?} m", config.depths),
            ));
        }
        if let Some(slope) = self.slope {
            if slope < 0 {
                return Err(CalcError::invalid_input(
                    "slope",
                    slope.to_string(),
                    "Slope cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Intermediate dimensions for these measurements
    pub fn dimensions(&self, config: &CalculationConfig) -> Dimensions {
        calculate_dimensions(config, self.depth, self.slope_mm())
    }
}

/// Check a main input against its form's bounds.
pub(crate) fn validate_main_input(config: &CalculationConfig, form_type: FormType, value: i32) -> CalcResult<()> {
    let bounds = config.bounds(form_type);
    if !bounds.contains(value) {
        return Err(CalcError::invalid_input(
            form_type.main_field(),
            value.to_string(),
            format!("Must be between {} and {} mm", bounds.min, bounds.max),
        ));
    }
    Ok(())
}

// ============================================================================
// Request
// ============================================================================

/// A validated calculator submission, tagged by form type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formType", rename_all = "camelCase")]
pub enum CalculationRequest {
    WallProfile(WallProfileRequest),
    GutterHeight(GutterHeightRequest),
}

impl CalculationRequest {
    pub fn form_type(&self) -> FormType {
        match self {
            CalculationRequest::WallProfile(_) => FormType::WallProfile,
            CalculationRequest::GutterHeight(_) => FormType::GutterHeight,
        }
    }

    pub fn site(&self) -> &SiteMeasurements {
        match self {
            CalculationRequest::WallProfile(r) => &r.site,
            CalculationRequest::GutterHeight(r) => &r.site,
        }
    }

    /// The value the user entered in the main field (mm)
    pub fn main_input(&self) -> i32 {
        match self {
            CalculationRequest::WallProfile(r) => r.wall_profile_height,
            CalculationRequest::GutterHeight(r) => r.height_bottom_gutter,
        }
    }

    /// Copy of this request with a different main input
    pub fn with_main_input(&self, value: i32) -> Self {
        match self {
            CalculationRequest::WallProfile(r) => CalculationRequest::WallProfile(WallProfileRequest {
                wall_profile_height: value,
                ..*r
            }),
            CalculationRequest::GutterHeight(r) => CalculationRequest::GutterHeight(GutterHeightRequest {
                height_bottom_gutter: value,
                ..*r
            }),
        }
    }

    pub fn validate(&self, config: &CalculationConfig) -> CalcResult<()> {
        match self {
            CalculationRequest::WallProfile(r) => r.validate(config),
            CalculationRequest::GutterHeight(r) => r.validate(config),
        }
    }

    /// Forward computation for this form type (mm)
    pub fn output(&self, config: &CalculationConfig) -> i32 {
        match self {
            CalculationRequest::WallProfile(r) => r.passage_height(config),
            CalculationRequest::GutterHeight(r) => r.wall_profile_height(config),
        }
    }

    /// Main input that maps onto `target_output`, unclamped (mm)
    pub fn solve_main_input(&self, config: &CalculationConfig, target_output: i32) -> i32 {
        match self {
            CalculationRequest::WallProfile(r) => r.wall_profile_for(config, target_output),
            CalculationRequest::GutterHeight(r) => r.gutter_target_for(config, target_output),
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Results from a passage height calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "formType": "wallProfile",
///   "output": 2281,
///   "inRange": true,
///   "range": [2280, 2320],
///   "recommendation": null,
///   "dimensions": { "insideDepth": 2982.39, "wallToGutterDiff": 418.52, "slopeDrop": 0.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub form_type: FormType,

    /// Computed opposing dimension (mm)
    pub output: i32,

    /// Whether `output` lies inside a manufacturable band
    pub in_range: bool,

    /// Matched band, or the closest one when out of range
    pub range: Option<PassageRange>,

    /// Corrected main input, only when out of range and reachable
    pub recommendation: Option<Recommendation>,

    /// Unrounded intermediate dimensions
    pub dimensions: Dimensions,
}

/// Run the full calculation for a request.
///
/// # Returns
///
/// * `Ok(CalculationResult)` - Output, classification and recommendation
/// * `Err(CalcError)` - If the request fails validation
pub fn calculate(config: &CalculationConfig, request: &CalculationRequest) -> CalcResult<CalculationResult> {
    request.validate(config)?;

    let form_type = request.form_type();
    let dimensions = request.site().dimensions(config);
    let output = request.output(config);
    let check = check_range(config, output, form_type);

    tracing::debug!(
        form_type = ?form_type,
        input = request.main_input(),
        output,
        in_range = check.in_range,
        "calculated passage dimensions"
    );

    let recommendation = if check.in_range {
        None
    } else {
        check
            .range
            .and_then(|closest| generate_suggestion(config, request, output, closest))
    };

    Ok(CalculationResult {
        form_type,
        output,
        in_range: check.in_range,
        range: check.range,
        recommendation,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG;

    fn wall_request(depth: f64, slope: Option<i32>, rail: RailSystem, height: i32) -> CalculationRequest {
        CalculationRequest::WallProfile(WallProfileRequest {
            site: SiteMeasurements::new(depth, slope, rail),
            wall_profile_height: height,
        })
    }

    fn gutter_request(depth: f64, slope: Option<i32>, rail: RailSystem, height: i32) -> CalculationRequest {
        CalculationRequest::GutterHeight(GutterHeightRequest {
            site: SiteMeasurements::new(depth, slope, rail),
            height_bottom_gutter: height,
        })
    }

    #[test]
    fn test_wall_profile_in_range() {
        let result = calculate(&DEFAULT_CONFIG, &wall_request(3.0, Some(0), RailSystem::Standard, 2700)).unwrap();
        assert_eq!(result.output, 2281);
        assert!(result.in_range);
        assert_eq!(result.range, Some(PassageRange::new(2280, 2320)));
        assert!(result.recommendation.is_none());
        assert!((result.dimensions.inside_depth - 2982.394).abs() < 0.001);
    }

    #[test]
    fn test_gutter_height_with_slope_and_rail() {
        let result = calculate(&DEFAULT_CONFIG, &gutter_request(2.5, Some(50), RailSystem::Recessed, 1800)).unwrap();
        assert_eq!(result.form_type, FormType::GutterHeight);
        assert_eq!(result.output, 2181);
        assert!(result.in_range);
        assert_eq!(result.range, Some(PassageRange::new(2180, 2220)));
    }

    #[test]
    fn test_out_of_range_gets_recommendation() {
        // depth 3: 2870 − 418.52 = 2451.48 → 2451, in the 2420-2480 gap
        let request = wall_request(3.0, None, RailSystem::Standard, 2870);
        let result = calculate(&DEFAULT_CONFIG, &request).unwrap();
        assert_eq!(result.output, 2451);
        assert!(!result.in_range);
        assert_eq!(result.range, Some(PassageRange::new(2480, 2520)));

        let rec = result.recommendation.unwrap();
        let bounds = DEFAULT_CONFIG.bounds(FormType::WallProfile);
        assert!(bounds.contains(rec.recommended_input));
        let rerun = request.with_main_input(rec.recommended_input).output(&DEFAULT_CONFIG);
        assert!(rec.new_output_range.contains(rerun));
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let err = calculate(&DEFAULT_CONFIG, &wall_request(2.7, None, RailSystem::Standard, 2700)).unwrap_err();
        assert_eq!(err.field(), Some("depth"));
    }

    #[test]
    fn test_negative_slope_rejected() {
        let err = calculate(&DEFAULT_CONFIG, &wall_request(3.0, Some(-5), RailSystem::Standard, 2700)).unwrap_err();
        assert_eq!(err.field(), Some("slope"));
    }

    #[test]
    fn test_main_input_out_of_bounds_rejected() {
        let err = calculate(&DEFAULT_CONFIG, &wall_request(3.0, None, RailSystem::Standard, 2000)).unwrap_err();
        assert_eq!(err.field(), Some("wall_profile_height"));

        let err = calculate(&DEFAULT_CONFIG, &gutter_request(3.0, None, RailSystem::Standard, 2600)).unwrap_err();
        assert_eq!(err.field(), Some("height_bottom_gutter"));
    }

    #[test]
    fn test_missing_slope_defaults_to_level() {
        let level = calculate(&DEFAULT_CONFIG, &wall_request(3.0, Some(0), RailSystem::Standard, 2700)).unwrap();
        let absent = calculate(&DEFAULT_CONFIG, &wall_request(3.0, None, RailSystem::Standard, 2700)).unwrap();
        assert_eq!(level.output, absent.output);
    }

    #[test]
    fn test_rail_system_form_values() {
        assert_eq!(RailSystem::from_form_value("checked"), Some(RailSystem::Recessed));
        assert_eq!(RailSystem::from_form_value("unchecked"), Some(RailSystem::Standard));
        assert_eq!(RailSystem::from_form_value("yes"), None);
    }

    #[test]
    fn test_request_json() {
        let json = r#"{
            "formType": "wallProfile",
            "depth": 3,
            "slope": 0,
            "railSystemSlope": "unchecked",
            "wallProfileHeight": 2700
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, wall_request(3.0, Some(0), RailSystem::Standard, 2700));

        let json = r#"{
            "formType": "gutterHeight",
            "depth": 2.5,
            "railSystemSlope": "checked",
            "heightBottomGutter": 1800
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, gutter_request(2.5, None, RailSystem::Recessed, 1800));
    }

    #[test]
    fn test_result_json_contract() {
        let result = calculate(&DEFAULT_CONFIG, &wall_request(3.0, Some(0), RailSystem::Standard, 2700)).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["output"], 2281);
        assert_eq!(value["inRange"], true);
        assert_eq!(value["range"], serde_json::json!([2280, 2320]));
        assert!(value["recommendation"].is_null());
    }
}
