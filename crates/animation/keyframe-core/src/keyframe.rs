//! Keyframe: one animation segment over normalized progress.
//!
//! A keyframe covers the half-open interval `[start_progress, end_progress)`.
//! Progress bounds are derived from frame numbers and the owning [`Composition`]
//! once, at construction; keyframes are immutable afterwards.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::error::{KeyframeError, Result};
use crate::interp::easing::Easing;
use crate::value::Vec2;

/// Bezier handles of a motion path, relative to the segment endpoints.
/// `out_tangent` leaves the start point, `in_tangent` arrives at the end point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialTangents {
    pub out_tangent: Vec2,
    pub in_tangent: Vec2,
}

impl SpatialTangents {
    /// True when both handles are zero-length (the segment is a straight line).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.out_tangent.is_zero() && self.in_tangent.is_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    start_value: T,
    end_value: Option<T>,
    easing: Option<Easing>,
    x_easing: Option<Easing>,
    y_easing: Option<Easing>,
    tangents: Option<SpatialTangents>,
    start_frame: f32,
    end_frame: Option<f32>,
    start_progress: f32,
    end_progress: f32,
}

impl<T> Keyframe<T> {
    /// Keyframe spanning `start_frame..end_frame` of `composition`. Without an end
    /// frame the keyframe runs to the end of the animation. The keyframe is static
    /// until an easing is attached.
    pub fn new(
        composition: &Composition,
        start_frame: f32,
        end_frame: Option<f32>,
        start_value: T,
        end_value: Option<T>,
    ) -> Self {
        // Adjacent keyframes share a frame number, so their bounds match exactly.
        let start_progress = composition.progress_for_frame(start_frame).clamp(0.0, 1.0);
        let mut end_progress = match end_frame {
            None => 1.0,
            Some(end) => composition.progress_for_frame(end).clamp(0.0, 1.0),
        };
        if end_progress < start_progress {
            warn!(
                "keyframe at frame {start_frame} ends before it starts ({end_frame:?}); collapsing"
            );
            end_progress = start_progress;
        }
        Self {
            start_value,
            end_value,
            easing: None,
            x_easing: None,
            y_easing: None,
            tangents: None,
            start_frame,
            end_frame,
            start_progress,
            end_progress,
        }
    }

    /// Single-value keyframe covering the whole animation.
    pub fn constant(value: T) -> Self {
        Self {
            start_value: value,
            end_value: None,
            easing: None,
            x_easing: None,
            y_easing: None,
            tangents: None,
            start_frame: 0.0,
            end_frame: None,
            start_progress: 0.0,
            end_progress: 1.0,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Independent easing for the x and y components (points only).
    pub fn with_split_easing(mut self, x_easing: Easing, y_easing: Easing) -> Self {
        self.x_easing = Some(x_easing);
        self.y_easing = Some(y_easing);
        self
    }

    /// Motion-path handles (path-position keyframes only).
    pub fn with_tangents(mut self, out_tangent: Vec2, in_tangent: Vec2) -> Self {
        self.tangents = Some(SpatialTangents {
            out_tangent,
            in_tangent,
        });
        self
    }

    #[inline]
    pub fn start_value(&self) -> &T {
        &self.start_value
    }

    #[inline]
    pub fn end_value(&self) -> Option<&T> {
        self.end_value.as_ref()
    }

    /// Both endpoints, or `MissingValues` when the end value is absent.
    pub fn endpoints(&self) -> Result<(&T, &T)> {
        match &self.end_value {
            Some(end) => Ok((&self.start_value, end)),
            None => Err(KeyframeError::MissingValues {
                start_frame: self.start_frame,
            }),
        }
    }

    #[inline]
    pub fn easing(&self) -> Option<&Easing> {
        self.easing.as_ref()
    }

    #[inline]
    pub fn x_easing(&self) -> Option<&Easing> {
        self.x_easing.as_ref()
    }

    #[inline]
    pub fn y_easing(&self) -> Option<&Easing> {
        self.y_easing.as_ref()
    }

    #[inline]
    pub fn has_split_easing(&self) -> bool {
        self.x_easing.is_some() && self.y_easing.is_some()
    }

    #[inline]
    pub fn tangents(&self) -> Option<&SpatialTangents> {
        self.tangents.as_ref()
    }

    #[inline]
    pub fn start_frame(&self) -> f32 {
        self.start_frame
    }

    #[inline]
    pub fn end_frame(&self) -> Option<f32> {
        self.end_frame
    }

    #[inline]
    pub fn start_progress(&self) -> f32 {
        self.start_progress
    }

    #[inline]
    pub fn end_progress(&self) -> f32 {
        self.end_progress
    }

    /// Half-open containment: `start <= p < end`.
    #[inline]
    pub fn contains_progress(&self, p: f32) -> bool {
        p >= self.start_progress && p < self.end_progress
    }

    /// Closed containment: `start <= p <= end`. Only the final keyframe of a
    /// driver is tested this way.
    #[inline]
    pub fn contains_progress_inclusive(&self, p: f32) -> bool {
        p >= self.start_progress && p <= self.end_progress
    }

    /// A hold segment: no easing of any kind, evaluates to the start value.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.easing.is_none() && self.x_easing.is_none() && self.y_easing.is_none()
    }
}
