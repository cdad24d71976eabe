//! # Dimension Derivation
//!
//! ```text
//!   wall profile ─┐
//!                 │\  8°
//!                 │  \
//!                 │    \ ← roof
//!                 │      \
//!                 │        ┐ ← gutter
//!                 │        │
//!   ══════════════╧════════╧══  terrace (may slope)
//!                 ←  depth →
//! ```
//!
//! All lengths are millimeters except the depth, which is chosen in meters.
//! Intermediate values keep full floating-point precision; only the final
//! outputs are rounded.

use serde::{Deserialize, Serialize};

use crate::calculations::RailSystem;
use crate::config::CalculationConfig;
use crate::units::{Meters, Millimeters};

/// Intermediate dimensions for one depth/slope combination (mm, unrounded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Horizontal run under the roof, including profile allowances
    pub inside_depth: f64,
    /// Height difference between wall profile and gutter
    pub wall_to_gutter_diff: f64,
    /// Terrace drop over the inside depth
    pub slope_drop: f64,
}

/// Round to the nearest integer, halves upward.
///
/// `2280.5` becomes `2281` and `-0.5` becomes `0`.
#[inline]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Terrace drop over the inside depth.
///
/// # Formula
/// ratio = slope / inside_depth (0 when inside_depth <= 0)
/// drop = inside_depth × sin(asin(clamp(ratio, -1, 1)))
///
/// The ratio is clamped before `asin` so a slope larger than the inside depth
/// saturates at the boundary angle instead of producing NaN.
pub fn slope_drop(inside_depth: f64, slope_mm: f64) -> f64 {
    let ratio = if inside_depth > 0.0 {
        slope_mm / inside_depth
    } else {
        0.0
    };
    let clamped = ratio.clamp(-1.0, 1.0);
    inside_depth * clamped.asin().sin()
}

/// Derive inside depth, wall-to-gutter difference and slope drop.
///
/// # Formula
/// inside_depth = depth × cos(α) × 1000 + depth_primary + depth_secondary
/// wall_to_gutter_diff = depth × sin(α) × 1000 + wall_to_gutter
///
/// # Example
/// ```rust
/// use passage_core::config::DEFAULT_CONFIG;
/// use passage_core::equations::calculate_dimensions;
///
/// let dims = calculate_dimensions(&DEFAULT_CONFIG, 3.0, 0.0);
/// assert!((dims.inside_depth - 2982.39).abs() < 0.01);
/// assert!((dims.wall_to_gutter_diff - 418.52).abs() < 0.01);
/// assert_eq!(dims.slope_drop, 0.0);
/// ```
pub fn calculate_dimensions(config: &CalculationConfig, depth_m: f64, slope_mm: f64) -> Dimensions {
    let angle = config.angle();
    let adj = &config.adjustments;
    // depth × trig × 1000, multiplied in that order
    let run: Millimeters = Meters(depth_m * angle.cos()).into();
    let rise: Millimeters = Meters(depth_m * angle.sin()).into();

    let inside_depth = run.value() + adj.depth_primary + adj.depth_secondary;
    let wall_to_gutter_diff = rise.value() + adj.wall_to_gutter;

    Dimensions {
        inside_depth,
        wall_to_gutter_diff,
        slope_drop: slope_drop(inside_depth, slope_mm),
    }
}

/// Offset contributed by the rail system (mm).
#[inline]
pub fn rail_offset(config: &CalculationConfig, rail: RailSystem) -> f64 {
    match rail {
        RailSystem::Recessed => config.adjustments.rail_slope,
        RailSystem::Standard => 0.0,
    }
}

/// Passage height (mm) from a wall-profile height.
///
/// # Formula
/// passage = wall_profile − wall_to_gutter_diff + slope_drop (+ rail_slope)
pub fn calculate_from_wall_profile(
    config: &CalculationConfig,
    depth_m: f64,
    slope_mm: f64,
    wall_profile_mm: f64,
    rail: RailSystem,
) -> i32 {
    let dims = calculate_dimensions(config, depth_m, slope_mm);
    let passage = wall_profile_mm - dims.wall_to_gutter_diff + dims.slope_drop + rail_offset(config, rail);
    round_half_up(passage)
}

/// Wall-profile height (mm) needed for a target passage height.
///
/// # Formula
/// wall_profile = (target − rail_slope) + wall_to_gutter_diff + slope_drop
///
/// The main input is a target to invert against, and the slope drop is added
/// here as well as in [`calculate_from_wall_profile`].
pub fn calculate_from_gutter_height(
    config: &CalculationConfig,
    depth_m: f64,
    slope_mm: f64,
    target_mm: f64,
    rail: RailSystem,
) -> i32 {
    let dims = calculate_dimensions(config, depth_m, slope_mm);
    let target = target_mm - rail_offset(config, rail);
    round_half_up(target + dims.wall_to_gutter_diff + dims.slope_drop)
}

/// Wall-profile height that [`calculate_from_wall_profile`] maps onto
/// `passage_mm`.
///
/// # Formula
/// wall_profile = passage − rail_slope + wall_to_gutter_diff − slope_drop
pub fn wall_profile_for_passage_height(
    config: &CalculationConfig,
    depth_m: f64,
    slope_mm: f64,
    passage_mm: f64,
    rail: RailSystem,
) -> i32 {
    let dims = calculate_dimensions(config, depth_m, slope_mm);
    round_half_up(passage_mm - rail_offset(config, rail) + dims.wall_to_gutter_diff - dims.slope_drop)
}

/// Gutter-height target that [`calculate_from_gutter_height`] maps onto
/// `wall_profile_mm`.
///
/// # Formula
/// target = wall_profile + rail_slope − wall_to_gutter_diff − slope_drop
pub fn gutter_target_for_wall_profile(
    config: &CalculationConfig,
    depth_m: f64,
    slope_mm: f64,
    wall_profile_mm: f64,
    rail: RailSystem,
) -> i32 {
    let dims = calculate_dimensions(config, depth_m, slope_mm);
    round_half_up(wall_profile_mm + rail_offset(config, rail) - dims.wall_to_gutter_diff - dims.slope_drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2281.48), 2281);
        assert_eq!(round_half_up(2280.5), 2281);
        assert_eq!(round_half_up(2280.49), 2280);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
    }

    #[test]
    fn test_dimensions_depth_3() {
        let dims = calculate_dimensions(&DEFAULT_CONFIG, 3.0, 0.0);
        // 3000 × cos(8°) + 4.59 + 7 = 2982.394
        assert!((dims.inside_depth - 2982.394).abs() < 0.001);
        // 3000 × sin(8°) + 1 = 418.519
        assert!((dims.wall_to_gutter_diff - 418.519).abs() < 0.001);
        assert_eq!(dims.slope_drop, 0.0);
    }

    #[test]
    fn test_dimensions_multiplication_order() {
        let angle = DEFAULT_CONFIG.angle();
        for &depth in &DEFAULT_CONFIG.depths {
            let dims = calculate_dimensions(&DEFAULT_CONFIG, depth, 0.0);
            assert_eq!(dims.inside_depth, depth * angle.cos() * 1000.0 + 4.59 + 7.0);
            assert_eq!(dims.wall_to_gutter_diff, depth * angle.sin() * 1000.0 + 1.0);
        }
    }

    #[test]
    fn test_slope_drop_within_domain() {
        // sin(asin(x)) round trip stays within float noise of the ratio
        let drop = slope_drop(2487.26, 50.0);
        assert!((drop - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_slope_drop_clamps_at_ratio_one() {
        let inside = 2000.0;
        assert!((slope_drop(inside, inside) - inside).abs() < 1e-9);
        assert!((slope_drop(inside, -inside) + inside).abs() < 1e-9);
    }

    #[test]
    fn test_slope_drop_clamps_beyond_domain() {
        let inside = 2000.0;
        let drop = slope_drop(inside, 5000.0);
        assert!(!drop.is_nan());
        assert!((drop - inside).abs() < 1e-9);

        let drop = slope_drop(inside, -5000.0);
        assert!((drop + inside).abs() < 1e-9);
    }

    #[test]
    fn test_slope_drop_non_positive_inside_depth() {
        assert_eq!(slope_drop(0.0, 100.0), 0.0);
        assert_eq!(slope_drop(-10.0, 100.0), 0.0);
    }

    #[test]
    fn test_extreme_slope_degrades_gracefully() {
        let clamped = calculate_from_wall_profile(&DEFAULT_CONFIG, 2.0, 10_000.0, 2700.0, RailSystem::Standard);
        let dims = calculate_dimensions(&DEFAULT_CONFIG, 2.0, 0.0);
        let expected = round_half_up(2700.0 - dims.wall_to_gutter_diff + dims.inside_depth);
        assert_eq!(clamped, expected);
    }

    #[test]
    fn test_from_wall_profile_depth_3() {
        let output = calculate_from_wall_profile(&DEFAULT_CONFIG, 3.0, 0.0, 2700.0, RailSystem::Standard);
        assert_eq!(output, 2281);
    }

    #[test]
    fn test_from_wall_profile_rail_adds_offset() {
        let plain = calculate_from_wall_profile(&DEFAULT_CONFIG, 3.0, 0.0, 2700.0, RailSystem::Standard);
        let rail = calculate_from_wall_profile(&DEFAULT_CONFIG, 3.0, 0.0, 2700.0, RailSystem::Recessed);
        assert_eq!(rail - plain, 18);
    }

    #[test]
    fn test_from_gutter_height_sign_and_rail() {
        // (1800 − 18) + 348.933 + 50 = 2180.93
        let output = calculate_from_gutter_height(&DEFAULT_CONFIG, 2.5, 50.0, 1800.0, RailSystem::Recessed);
        assert_eq!(output, 2181);

        // Without the rail offset: 1800 + 348.933 + 50 = 2198.93
        let output = calculate_from_gutter_height(&DEFAULT_CONFIG, 2.5, 50.0, 1800.0, RailSystem::Standard);
        assert_eq!(output, 2199);
    }

    #[test]
    fn test_directions_invert_on_level_terrace() {
        for &depth in &DEFAULT_CONFIG.depths {
            for wall in (2259..=3278).step_by(37) {
                let passage = calculate_from_wall_profile(&DEFAULT_CONFIG, depth, 0.0, wall as f64, RailSystem::Standard);
                let back = calculate_from_gutter_height(&DEFAULT_CONFIG, depth, 0.0, passage as f64, RailSystem::Standard);
                assert!((back - wall).abs() <= 1, "depth {} wall {} came back as {}", depth, wall, back);
            }
        }
    }

    #[test]
    fn test_wall_profile_inverse() {
        for &rail in &[RailSystem::Standard, RailSystem::Recessed] {
            let wall = wall_profile_for_passage_height(&DEFAULT_CONFIG, 3.5, 120.0, 2300.0, rail);
            let passage = calculate_from_wall_profile(&DEFAULT_CONFIG, 3.5, 120.0, wall as f64, rail);
            assert!((passage - 2300).abs() <= 1);
        }
    }

    #[test]
    fn test_gutter_target_inverse() {
        for &rail in &[RailSystem::Standard, RailSystem::Recessed] {
            let target = gutter_target_for_wall_profile(&DEFAULT_CONFIG, 2.0, 80.0, 2400.0, rail);
            let wall = calculate_from_gutter_height(&DEFAULT_CONFIG, 2.0, 80.0, target as f64, rail);
            assert!((wall - 2400).abs() <= 1);
        }
    }
}
