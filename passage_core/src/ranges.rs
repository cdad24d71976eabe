//! # Passage Range Classification
//!
//! Classifies a computed output against the table of manufacturable bands.
//!
//! For the wall-profile form the output is a passage height, which is capped
//! at `max_passage_height`: bands starting above the cap are never
//! considered, and an output above the cap is never in range even when the
//! band containing it starts below the cap.
//!
//! ## Example
//!
//! ```rust
//! use passage_core::calculations::FormType;
//! use passage_core::config::{PassageRange, DEFAULT_CONFIG};
//! use passage_core::ranges::check_range;
//!
//! let check = check_range(&DEFAULT_CONFIG, 2281, FormType::WallProfile);
//! assert!(check.in_range);
//! assert_eq!(check.range, Some(PassageRange::new(2280, 2320)));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::FormType;
use crate::config::{CalculationConfig, PassageRange};

/// Outcome of a range lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCheck {
    /// Whether the value lies inside `range`
    pub in_range: bool,
    /// The containing band, or the closest eligible one
    pub range: Option<PassageRange>,
}

/// Upper cap on the output for a form type, if any.
pub fn output_cap(config: &CalculationConfig, form_type: FormType) -> Option<i32> {
    match form_type {
        FormType::WallProfile => Some(config.limits.max_passage_height),
        FormType::GutterHeight => None,
    }
}

/// Bands that an output of `form_type` can ever match, ascending.
pub fn eligible_ranges(
    config: &CalculationConfig,
    form_type: FormType,
) -> impl Iterator<Item = &PassageRange> + '_ {
    let cap = output_cap(config, form_type);
    config
        .ranges
        .iter()
        .filter(move |range| cap.map_or(true, |cap| range.min <= cap))
}

/// Find the band containing `value`, or the nearest one.
///
/// Bands are scanned in ascending order and the first containing band wins.
/// Otherwise the band with the smallest boundary distance is returned; on a
/// tie the lower band (found first) is kept. `range` is `None` only when no
/// band is eligible.
pub fn check_range(config: &CalculationConfig, value: i32, form_type: FormType) -> RangeCheck {
    let can_match = output_cap(config, form_type).map_or(true, |cap| value <= cap);
    let mut closest: Option<(PassageRange, i32)> = None;

    for range in eligible_ranges(config, form_type) {
        if can_match && range.contains(value) {
            return RangeCheck {
                in_range: true,
                range: Some(*range),
            };
        }

        let distance = range.boundary_distance(value);
        if closest.map_or(true, |(_, best)| distance < best) {
            closest = Some((*range, distance));
        }
    }

    RangeCheck {
        in_range: false,
        range: closest.map(|(range, _)| range),
    }
}
