//! Interpolation helpers and easing curves.
//!
//! - functions: scalar/point lerp and progress normalization
//! - easing: linear and cubic-bezier timing curves
//! - color: gamma-aware color blending

pub mod color;
pub mod easing;
pub mod functions;
