//! # Passage Height Equations
//!
//! The geometric model behind the calculator. The roof is installed at a
//! fixed angle (8° by default), so for a given depth the wall profile sits a
//! fixed vertical distance above the gutter. A sloping terrace adds a further
//! drop along the inside depth, and a recessed rail system adds a constant
//! offset on the passage-height side.
//!
//! ## Modules
//!
//! - [`geometry`] - Dimension derivation and the two conversion directions
//!
//! ## Sign Conventions
//!
//! - **Wall profile -> passage height**: `wall - diff + drop (+ rail)`
//! - **Target passage height -> wall profile**: `(target - rail) + diff + drop`
//!
//! The slope drop is added in both forward directions. The two directions are
//! therefore only exact inverses of each other on a level terrace.

pub mod geometry;

pub use geometry::{
    calculate_dimensions,
    calculate_from_gutter_height,
    calculate_from_wall_profile,
    gutter_target_for_wall_profile,
    rail_offset,
    round_half_up,
    slope_drop,
    wall_profile_for_passage_height,
    Dimensions,
};
