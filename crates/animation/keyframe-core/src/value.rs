//! Value types produced by the typed evaluators.
//!
//! All of them are plain values: evaluators build a fresh one on every call, so a
//! caller may keep a returned value across ticks.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{KeyframeError, Result};
use crate::interp::color::lerp_color_gamma;
use crate::interp::functions::lerp_f32;

/// 2D point or offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Non-uniform scale factors (1.0 = unscaled).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleXY {
    pub x: f32,
    pub y: f32,
}

impl ScaleXY {
    pub const IDENTITY: ScaleXY = ScaleXY { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for ScaleXY {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// sRGB-encoded RGBA color with components in `[0,1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Gradient stops: `positions[i]` pairs with `colors[i]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientColor {
    pub positions: Vec<f32>,
    pub colors: Vec<Color>,
}

impl GradientColor {
    /// Build a gradient; both arrays must have the same length.
    pub fn new(positions: Vec<f32>, colors: Vec<Color>) -> Result<Self> {
        if positions.len() != colors.len() {
            return Err(KeyframeError::GradientMismatch {
                expected: positions.len(),
                actual: colors.len(),
            });
        }
        Ok(Self { positions, colors })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Fields are public, so a literal can pair unequal position and color lists.
    fn check_stops(&self) -> Result<()> {
        if self.positions.len() != self.colors.len() {
            return Err(KeyframeError::GradientMismatch {
                expected: self.positions.len(),
                actual: self.colors.len(),
            });
        }
        Ok(())
    }

    /// Element-wise blend of two gradients with the same stop count.
    /// Positions blend linearly, colors gamma-aware.
    pub fn lerp(&self, other: &GradientColor, t: f32) -> Result<GradientColor> {
        self.check_stops()?;
        other.check_stops()?;
        if self.len() != other.len() {
            return Err(KeyframeError::GradientMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let positions = self
            .positions
            .iter()
            .zip(other.positions.iter())
            .map(|(a, b)| lerp_f32(*a, *b, t))
            .collect();
        let colors = self
            .colors
            .iter()
            .zip(other.colors.iter())
            .map(|(a, b)| lerp_color_gamma(*a, *b, t))
            .collect();
        Ok(GradientColor { positions, colors })
    }
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justification {
    #[default]
    LeftAlign,
    RightAlign,
    Center,
}

/// Text content plus its typographic attributes. Step-only (never tweened).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    pub text: String,
    pub font_name: String,
    pub size: f32,
    pub justification: Justification,
    /// Letter spacing in thousandths of an em.
    pub tracking: i32,
    pub line_height: f32,
    pub baseline_shift: f32,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub stroke_over_fill: bool,
}

impl DocumentData {
    /// Document with default styling.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
