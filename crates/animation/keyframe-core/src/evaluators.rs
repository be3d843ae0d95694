//! Typed evaluators: one per animated value kind.
//!
//! Each takes the active segment and returns a freshly built value. Static
//! keyframes never reach an evaluator (the driver returns their start value).

use crate::animation::{Evaluator, Segment};
use crate::error::Result;
use crate::interp::color::lerp_color_gamma;
use crate::interp::functions::{lerp_f32, lerp_i32, lerp_point_split, lerp_scale};
use crate::value::{Color, DocumentData, GradientColor, ScaleXY, Vec2};

#[derive(Clone, Copy, Debug, Default)]
pub struct FloatEvaluator;

impl Evaluator<f32> for FloatEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, f32>) -> Result<f32> {
        let (start, end) = segment.endpoints()?;
        Ok(lerp_f32(*start, *end, segment.progress.eased))
    }
}

/// Integer values; the blended result is truncated toward zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerEvaluator;

impl Evaluator<i32> for IntegerEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, i32>) -> Result<i32> {
        let (start, end) = segment.endpoints()?;
        Ok(lerp_i32(*start, *end, segment.progress.eased))
    }
}

/// Points; honours split-dimension easing through the per-axis progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointEvaluator;

impl Evaluator<Vec2> for PointEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, Vec2>) -> Result<Vec2> {
        let (start, end) = segment.endpoints()?;
        let p = segment.progress;
        Ok(lerp_point_split(*start, *end, p.eased_x, p.eased_y))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleEvaluator;

impl Evaluator<ScaleXY> for ScaleEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, ScaleXY>) -> Result<ScaleXY> {
        let (start, end) = segment.endpoints()?;
        Ok(lerp_scale(*start, *end, segment.progress.eased))
    }
}

/// Colors blend in linear light (see [`lerp_color_gamma`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorEvaluator;

impl Evaluator<Color> for ColorEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, Color>) -> Result<Color> {
        let (start, end) = segment.endpoints()?;
        Ok(lerp_color_gamma(*start, *end, segment.progress.eased))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GradientEvaluator;

impl Evaluator<GradientColor> for GradientEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, GradientColor>) -> Result<GradientColor> {
        let (start, end) = segment.endpoints()?;
        start.lerp(end, segment.progress.eased)
    }
}

/// Text does not tween: always the start document.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextEvaluator;

impl Evaluator<DocumentData> for TextEvaluator {
    fn evaluate(&mut self, segment: &Segment<'_, DocumentData>) -> Result<DocumentData> {
        Ok(segment.keyframe.start_value().clone())
    }
}
