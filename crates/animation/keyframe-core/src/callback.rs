//! Value callbacks: runtime overrides for animated values.
//!
//! A driver with an installed callback asks it for the value before running its
//! own evaluator. Returning `None` falls back to the default interpolation.

use std::fmt;

use crate::interp::easing::Easing;
use crate::interp::functions::{lerp_f32, lerp_point};
use crate::value::Vec2;

/// Snapshot of the evaluation state handed to a [`ValueCallback`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInfo<T> {
    pub start_frame: f32,
    pub end_frame: Option<f32>,
    pub start_value: T,
    pub end_value: Option<T>,
    /// Progress through the active keyframe before easing.
    pub linear_keyframe_progress: f32,
    /// Progress through the active keyframe after easing.
    pub interpolated_keyframe_progress: f32,
    /// Progress through the whole animation.
    pub overall_progress: f32,
}

pub trait ValueCallback<T> {
    /// Value to use for this evaluation, or `None` for the default interpolation.
    fn value(&mut self, frame: &FrameInfo<T>) -> Option<T>;

    /// Replace the stored value, if this callback stores one. Returns whether the
    /// value was taken; drivers notify their listeners when it was.
    fn set_value(&mut self, _value: T) -> bool {
        false
    }
}

/// Adapter turning a closure into a [`ValueCallback`].
pub struct FnCallback<F>(pub F);

impl<F> FnCallback<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F> ValueCallback<T> for FnCallback<F>
where
    F: FnMut(&FrameInfo<T>) -> Option<T>,
{
    fn value(&mut self, frame: &FrameInfo<T>) -> Option<T> {
        (self.0)(frame)
    }
}

impl<F> fmt::Debug for FnCallback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCallback")
    }
}

/// Always yields the stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedValue<T> {
    value: T,
}

impl<T> FixedValue<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> ValueCallback<T> for FixedValue<T> {
    fn value(&mut self, _frame: &FrameInfo<T>) -> Option<T> {
        Some(self.value.clone())
    }

    fn set_value(&mut self, value: T) -> bool {
        self.value = value;
        true
    }
}

/// Default scalar interpolation shifted by a stored offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativeFloatValue {
    offset: f32,
}

impl RelativeFloatValue {
    pub fn new(offset: f32) -> Self {
        Self { offset }
    }
}

impl ValueCallback<f32> for RelativeFloatValue {
    fn value(&mut self, frame: &FrameInfo<f32>) -> Option<f32> {
        let end = frame.end_value.unwrap_or(frame.start_value);
        let base = lerp_f32(
            frame.start_value,
            end,
            frame.interpolated_keyframe_progress,
        );
        Some(base + self.offset)
    }

    fn set_value(&mut self, value: f32) -> bool {
        self.offset = value;
        true
    }
}

/// Default point interpolation shifted by a stored offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativePointValue {
    offset: Vec2,
}

impl RelativePointValue {
    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }
}

impl ValueCallback<Vec2> for RelativePointValue {
    fn value(&mut self, frame: &FrameInfo<Vec2>) -> Option<Vec2> {
        let end = frame.end_value.unwrap_or(frame.start_value);
        let base = lerp_point(
            frame.start_value,
            end,
            frame.interpolated_keyframe_progress,
        );
        Some(base + self.offset)
    }

    fn set_value(&mut self, value: Vec2) -> bool {
        self.offset = value;
        true
    }
}

/// Ignores the keyframe data: blends two fixed values by the eased overall progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolatedFloatValue {
    start: f32,
    end: f32,
    easing: Easing,
}

impl InterpolatedFloatValue {
    pub fn new(start: f32, end: f32, easing: Easing) -> Self {
        Self { start, end, easing }
    }
}

impl ValueCallback<f32> for InterpolatedFloatValue {
    fn value(&mut self, frame: &FrameInfo<f32>) -> Option<f32> {
        let t = self.easing.ease(frame.overall_progress);
        Some(lerp_f32(self.start, self.end, t))
    }
}
