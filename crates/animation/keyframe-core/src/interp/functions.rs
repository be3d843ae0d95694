//! Interpolation helpers:
//! - lerp_f32 / lerp_i32 (scalar)
//! - lerp_point / lerp_point_split (component-wise, optionally per-axis progress)
//! - lerp_scale
//! - normalize_progress (NaN and range handling for incoming progress)

use crate::value::{ScaleXY, Vec2};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation of integers, truncated toward zero. Exact at both ends.
#[inline]
pub fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    let span = b as i64 - a as i64;
    (a as f64 + span as f64 * t as f64) as i32
}

#[inline]
pub fn lerp_point(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    lerp_point_split(a, b, t, t)
}

/// Component-wise lerp with independent progress per axis.
#[inline]
pub fn lerp_point_split(a: Vec2, b: Vec2, tx: f32, ty: f32) -> Vec2 {
    Vec2::new(lerp_f32(a.x, b.x, tx), lerp_f32(a.y, b.y, ty))
}

#[inline]
pub fn lerp_scale(a: ScaleXY, b: ScaleXY, t: f32) -> ScaleXY {
    ScaleXY::new(lerp_f32(a.x, b.x, t), lerp_f32(a.y, b.y, t))
}

/// Map incoming progress into `[0,1]`; NaN becomes 0.
#[inline]
pub fn normalize_progress(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
