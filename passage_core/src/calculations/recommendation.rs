//! # Recommendations
//!
//! When an output falls outside every band, propose a main input that lands
//! it on the nearest edge of the closest band.
//!
//! 1. Target the lower edge if the output is below the band, otherwise the
//!    upper edge. Wall-profile targets are capped at `max_passage_height`.
//! 2. Solve the form's forward formula backwards for the main input and
//!    round it.
//! 3. Clamp to the form's input bounds.
//! 4. Recompute and re-check. If clamping pushed the result out of range, no
//!    recommendation is returned.

use serde::{Deserialize, Serialize};

use super::{CalculationRequest, FormType};
use crate::config::{CalculationConfig, PassageRange};
use crate::ranges::check_range;

/// A corrected main input and the band it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Suggested main input (mm), within the form's bounds
    pub recommended_input: i32,
    /// Band the recomputed output falls into
    pub new_output_range: PassageRange,
}

/// Output edge of `closest` to aim for.
fn target_output(config: &CalculationConfig, form_type: FormType, output: i32, closest: PassageRange) -> i32 {
    let edge = if output < closest.min {
        closest.min
    } else {
        closest.max
    };
    match form_type {
        FormType::WallProfile => edge.min(config.limits.max_passage_height),
        FormType::GutterHeight => edge,
    }
}

/// Suggest a main input that brings `output` back into `closest`.
///
/// Returns `None` when the clamped suggestion does not land in any band.
pub fn generate_suggestion(
    config: &CalculationConfig,
    request: &CalculationRequest,
    output: i32,
    closest: PassageRange,
) -> Option<Recommendation> {
    let form_type = request.form_type();
    let target = target_output(config, form_type, output, closest);
    let solved = request.solve_main_input(config, target);
    let recommended_input = config.bounds(form_type).clamp(solved);

    let confirmed_output = request.with_main_input(recommended_input).output(config);
    let check = check_range(config, confirmed_output, form_type);

    match check.range {
        Some(range) if check.in_range => {
            tracing::debug!(
                form_type = ?form_type,
                target,
                recommended_input,
                confirmed_output,
                "recommendation found"
            );
            Some(Recommendation {
                recommended_input,
                new_output_range: range,
            })
        }
        _ => {
            tracing::debug!(
                form_type = ?form_type,
                target,
                solved,
                recommended_input,
                confirmed_output,
                "recommendation suppressed, clamped input stays out of range"
            );
            None
        }
    }
}
