//! # Form Validation
//!
//! Turns raw form values into a [`CalculationRequest`]. Values arrive as
//! optional strings exactly as submitted; nothing reaches the engine until
//! every required field is present and well-formed.
//!
//! The calculator is filled in as a multi-step wizard, so validation can run
//! one [`FormStep`] at a time:
//!
//! 1. [`FormStep::Depth`] - depth, required, one of the permitted depths
//! 2. [`FormStep::Slope`] - slope, optional non-negative integer
//! 3. [`FormStep::RailSystem`] - `"checked"` or `"unchecked"`, required
//! 4. [`FormStep::MainInput`] - the form type's main field, required integer
//!    within bounds
//!
//! ## Example
//!
//! ```rust
//! use passage_core::calculations::FormType;
//! use passage_core::config::DEFAULT_CONFIG;
//! use passage_core::form::{FormStep, FormValues};
//!
//! let mut values = FormValues::new(FormType::WallProfile);
//! values.depth = Some("3".to_string());
//! assert!(values.validate_step(&DEFAULT_CONFIG, FormStep::Depth).is_empty());
//!
//! // Rail system and main input are still missing
//! assert_eq!(values.errors(&DEFAULT_CONFIG).len(), 2);
//!
//! values.rail_system_slope = Some("unchecked".to_string());
//! values.wall_profile_height = Some("2700".to_string());
//! let request = values.into_request(&DEFAULT_CONFIG).unwrap();
//! assert_eq!(request.main_input(), 2700);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{
    validate_main_input, CalculationRequest, FormType, GutterHeightRequest, RailSystem, SiteMeasurements,
    WallProfileRequest,
};
use crate::config::CalculationConfig;
use crate::errors::{CalcError, CalcResult};

/// Wizard steps, in the order they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormStep {
    Depth,
    Slope,
    RailSystem,
    MainInput,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Depth,
        FormStep::Slope,
        FormStep::RailSystem,
        FormStep::MainInput,
    ];
}

/// Raw values of a calculator submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub form_type: FormType,
    #[serde(default)]
    pub depth: Option<String>,
    #[serde(default)]
    pub slope: Option<String>,
    #[serde(default)]
    pub rail_system_slope: Option<String>,
    #[serde(default)]
    pub wall_profile_height: Option<String>,
    #[serde(default)]
    pub height_bottom_gutter: Option<String>,
}

/// Treat empty and whitespace-only strings as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a whole number of millimeters.
fn parse_integer(field: &str, raw: &str) -> CalcResult<i32> {
    if let Ok(value) = raw.parse::<i32>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Err(CalcError::invalid_input(field, raw, "Must be a whole number")),
        _ => Err(CalcError::invalid_input(field, raw, "Must be a number")),
    }
}

impl FormValues {
    /// Empty form of the given type
    pub fn new(form_type: FormType) -> Self {
        FormValues {
            form_type,
            depth: None,
            slope: None,
            rail_system_slope: None,
            wall_profile_height: None,
            height_bottom_gutter: None,
        }
    }

    fn main_value(&self) -> &Option<String> {
        match self.form_type {
            FormType::WallProfile => &self.wall_profile_height,
            FormType::GutterHeight => &self.height_bottom_gutter,
        }
    }

    fn parse_depth(&self, config: &CalculationConfig) -> CalcResult<f64> {
        let raw = present(&self.depth).ok_or_else(|| CalcError::missing_field("depth"))?;
        let depth: f64 = raw
            .parse()
            .map_err(|_| CalcError::invalid_input("depth", raw, "Must be a number"))?;
        if !config.is_permitted_depth(depth) {
            return Err(CalcError::invalid_input(
                "depth",
                raw,
                format!("Depth must be one of {:?} m", config.depths),
            ));
        }
        Ok(depth)
    }

    fn parse_slope(&self) -> CalcResult<Option<i32>> {
        let Some(raw) = present(&self.slope) else {
            return Ok(None);
        };
        let slope = parse_integer("slope", raw)?;
        if slope < 0 {
            return Err(CalcError::invalid_input("slope", raw, "Slope cannot be negative"));
        }
        Ok(Some(slope))
    }

    fn parse_rail_system(&self) -> CalcResult<RailSystem> {
        let raw = present(&self.rail_system_slope).ok_or_else(|| CalcError::missing_field("rail_system_slope"))?;
        RailSystem::from_form_value(raw).ok_or_else(|| {
            CalcError::invalid_input("rail_system_slope", raw, "Must be \"checked\" or \"unchecked\"")
        })
    }

    fn parse_main_input(&self, config: &CalculationConfig) -> CalcResult<i32> {
        let field = self.form_type.main_field();
        let raw = present(self.main_value()).ok_or_else(|| CalcError::missing_field(field))?;
        let value = parse_integer(field, raw)?;
        validate_main_input(config, self.form_type, value)?;
        Ok(value)
    }

    /// Errors for the fields of one wizard step.
    pub fn validate_step(&self, config: &CalculationConfig, step: FormStep) -> Vec<CalcError> {
        let result = match step {
            FormStep::Depth => self.parse_depth(config).map(|_| ()),
            FormStep::Slope => self.parse_slope().map(|_| ()),
            FormStep::RailSystem => self.parse_rail_system().map(|_| ()),
            FormStep::MainInput => self.parse_main_input(config).map(|_| ()),
        };
        result.err().into_iter().collect()
    }

    /// Errors for every step, in wizard order.
    pub fn errors(&self, config: &CalculationConfig) -> Vec<CalcError> {
        FormStep::ALL
            .iter()
            .flat_map(|step| self.validate_step(config, *step))
            .collect()
    }

    /// First step that still has errors, if any
    pub fn first_invalid_step(&self, config: &CalculationConfig) -> Option<FormStep> {
        FormStep::ALL
            .iter()
            .copied()
            .find(|step| !self.validate_step(config, *step).is_empty())
    }

    /// Build a typed request, failing on the first invalid field.
    pub fn into_request(&self, config: &CalculationConfig) -> CalcResult<CalculationRequest> {
        let site = SiteMeasurements::new(
            self.parse_depth(config)?,
            self.parse_slope()?,
            self.parse_rail_system()?,
        );
        let main = self.parse_main_input(config)?;

        Ok(match self.form_type {
            FormType::WallProfile => CalculationRequest::WallProfile(WallProfileRequest {
                site,
                wall_profile_height: main,
            }),
            FormType::GutterHeight => CalculationRequest::GutterHeight(GutterHeightRequest {
                site,
                height_bottom_gutter: main,
            }),
        })
    }
}
