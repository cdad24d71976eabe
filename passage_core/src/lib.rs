//! # passage_core - Passage Height Calculation Engine
//!
//! `passage_core` converts veranda measurements into the clear passage height
//! under a sliding wall system (or back into the wall-profile height needed
//! for a target), checks the result against the manufacturable height bands,
//! and proposes a corrected input when it falls outside them.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an immutable configuration table
//! - **JSON-First**: Requests and results implement Serialize/Deserialize
//! - **Rich Errors**: Validation errors name the offending form field
//! - **No Engine Faults**: Out-of-domain numbers are clamped, never rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use passage_core::calculations::{calculate, FormType};
//! use passage_core::config::DEFAULT_CONFIG;
//! use passage_core::form::FormValues;
//!
//! let mut form = FormValues::new(FormType::WallProfile);
//! form.depth = Some("3".to_string());
//! form.rail_system_slope = Some("unchecked".to_string());
//! form.wall_profile_height = Some("2700".to_string());
//!
//! let request = form.into_request(&DEFAULT_CONFIG).unwrap();
//! let result = calculate(&DEFAULT_CONFIG, &request).unwrap();
//! assert_eq!(result.output, 2281);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Depths, angle, offsets, bounds and passage bands
//! - [`equations`] - Geometric derivation in both directions
//! - [`ranges`] - Band lookup with the passage-height cap
//! - [`calculations`] - Requests, results and recommendations
//! - [`form`] - Step-by-step validation of raw form values
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod form;
pub mod ranges;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CalculationRequest, CalculationResult, FormType, RailSystem, Recommendation};
pub use config::{CalculationConfig, PassageRange, DEFAULT_CONFIG};
pub use errors::{CalcError, CalcResult};
pub use form::{FormStep, FormValues};
pub use ranges::{check_range, RangeCheck};
