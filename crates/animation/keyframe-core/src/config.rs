//! Core configuration for keyframe-core.

use serde::{Deserialize, Serialize};

/// Default tolerance (in path units) for arc-length measurement.
pub const DEFAULT_ARC_LENGTH_ACCURACY: f64 = 1e-3;

/// Default number of bisection steps when inverting a cubic-bezier easing curve.
pub const DEFAULT_BEZIER_ITERATIONS: u32 = 24;

/// Configuration shared by a driver and its evaluator.
/// Keep this minimal; fields are optional when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reuse the last computed value while the active keyframe and eased progress are
    /// unchanged. Ignored while a value callback is installed.
    pub cache_values: bool,

    /// Tolerance used by the path-position evaluator when measuring and inverting arc length.
    pub arc_length_accuracy: f64,

    /// Bisection steps for cubic-bezier easing.
    pub bezier_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_values: true,
            arc_length_accuracy: DEFAULT_ARC_LENGTH_ACCURACY,
            bezier_iterations: DEFAULT_BEZIER_ITERATIONS,
        }
    }
}
