//! Easing curves mapping linear keyframe progress to eased progress.
//!
//! Cubic-bezier timing follows the CSS convention: the curve runs from (0,0) to
//! (1,1) with control points (x1,y1) and (x2,y2). The eased value is found by
//! inverting x(t) with bisection and evaluating y at the result.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_BEZIER_ITERATIONS;

/// Largest magnitude accepted for a control point's y coordinate.
const MAX_CONTROL_Y: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Easing {
    Linear,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// The standard ease-in-out curve.
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Build a cubic-bezier easing. x coordinates are clamped to `[0,1]` so the
    /// curve stays monotonic in x; y may overshoot within ±100.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Easing::CubicBezier {
            x1: sanitize(x1, 0.0, 1.0),
            y1: sanitize(y1, -MAX_CONTROL_Y, MAX_CONTROL_Y),
            x2: sanitize(x2, 0.0, 1.0),
            y2: sanitize(y2, -MAX_CONTROL_Y, MAX_CONTROL_Y),
        }
    }

    /// Apply the curve to linear progress `t` in `[0,1]`.
    #[inline]
    pub fn ease(&self, t: f32) -> f32 {
        self.ease_with_iterations(t, DEFAULT_BEZIER_ITERATIONS)
    }

    pub fn ease_with_iterations(&self, t: f32, iterations: u32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier { x1, y1, x2, y2 } => bezier_ease_t(t, x1, y1, x2, y2, iterations),
        }
    }
}

fn sanitize(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(lo, hi)
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32, iterations: u32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..iterations {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
