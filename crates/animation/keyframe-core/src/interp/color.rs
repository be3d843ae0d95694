//! Gamma-aware color blending.
//!
//! Colors are stored sRGB-encoded. Blending the encoded channels directly darkens
//! the midpoint of saturated transitions, so the RGB channels are decoded to linear
//! light, blended there and re-encoded. Alpha is already linear and blends as is.

use palette::{FromColor, LinSrgba, Srgba};

use crate::interp::functions::lerp_f32;
use crate::value::Color;

/// Blend two sRGB colors in linear light. `t == 0` and `t == 1` return the
/// endpoints unchanged.
pub fn lerp_color_gamma(a: Color, b: Color, t: f32) -> Color {
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    let la: LinSrgba = LinSrgba::from_color(Srgba::new(a.r, a.g, a.b, a.a));
    let lb: LinSrgba = LinSrgba::from_color(Srgba::new(b.r, b.g, b.b, b.a));
    let mixed = LinSrgba::new(
        lerp_f32(la.red, lb.red, t),
        lerp_f32(la.green, lb.green, t),
        lerp_f32(la.blue, lb.blue, t),
        lerp_f32(a.a, b.a, t),
    );
    let out: Srgba = Srgba::from_color(mixed);
    Color::rgba(out.red, out.green, out.blue, mixed.alpha)
}

/// Naive blend of the encoded channels. Kept for callers that want it explicitly.
pub fn lerp_color_naive(a: Color, b: Color, t: f32) -> Color {
    Color::rgba(
        lerp_f32(a.r, b.r, t),
        lerp_f32(a.g, b.g, t),
        lerp_f32(a.b, b.b, t),
        lerp_f32(a.a, b.a, t),
    )
}
