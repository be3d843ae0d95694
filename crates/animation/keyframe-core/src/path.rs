//! Path-position evaluation: motion along the path connecting two keyframe points.
//!
//! A keyframe whose start and end points differ is connected by a cubic (when it
//! carries spatial tangents) or a straight line. Position is found by arc-length
//! parameterization: the eased progress selects a distance along the segment and
//! the segment is inverted at that distance.
//!
//! Measuring arc length is the expensive part, so the evaluator keeps one
//! [`PathMeasure`] for the active keyframe. It is dropped when the active keyframe
//! changes and when the evaluator itself is dropped.

use kurbo::{CubicBez, Line, ParamCurve, ParamCurveArclen, PathSeg, Point};
use log::trace;

use crate::animation::{Evaluator, Segment};
use crate::config::{Config, DEFAULT_ARC_LENGTH_ACCURACY};
use crate::error::Result;
use crate::keyframe::Keyframe;
use crate::value::Vec2;

#[inline]
fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

#[inline]
fn to_vec2(p: Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

/// Segment joining a keyframe's start and end points, or `None` when there is
/// nothing to traverse (no end value, or both points equal).
pub fn connecting_segment(keyframe: &Keyframe<Vec2>) -> Option<PathSeg> {
    let start = *keyframe.start_value();
    let end = *keyframe.end_value()?;
    if start == end {
        return None;
    }
    let seg = match keyframe.tangents() {
        Some(t) if !t.is_degenerate() => PathSeg::Cubic(CubicBez::new(
            to_point(start),
            to_point(start + t.out_tangent),
            to_point(end + t.in_tangent),
            to_point(end),
        )),
        _ => PathSeg::Line(Line::new(to_point(start), to_point(end))),
    };
    Some(seg)
}

/// Arc-length measurement of one path segment.
#[derive(Debug)]
pub struct PathMeasure {
    segment: PathSeg,
    length: f64,
    accuracy: f64,
}

impl PathMeasure {
    pub fn new(segment: PathSeg, accuracy: f64) -> Self {
        let length = segment.arclen(accuracy);
        trace!("measured path segment: length {length}");
        Self {
            segment,
            length,
            accuracy,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn segment(&self) -> &PathSeg {
        &self.segment
    }

    /// Point at `distance` along the segment; distance is clamped to `[0, length]`
    /// and the endpoints are returned exactly.
    pub fn position_at(&self, distance: f64) -> Vec2 {
        if self.length <= 0.0 || distance <= 0.0 {
            return to_vec2(self.segment.eval(0.0));
        }
        if distance >= self.length {
            return to_vec2(self.segment.eval(1.0));
        }
        let t = self.segment.inv_arclen(distance, self.accuracy);
        to_vec2(self.segment.eval(t))
    }
}

impl Drop for PathMeasure {
    fn drop(&mut self) {
        trace!("releasing path measure (length {})", self.length);
    }
}

/// Evaluator for position keyframes that travel along a motion path.
#[derive(Debug)]
pub struct PathPositionEvaluator {
    accuracy: f64,
    /// Measurement for the keyframe at the stored index.
    measured: Option<(usize, PathMeasure)>,
}

impl Default for PathPositionEvaluator {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ARC_LENGTH_ACCURACY,
            measured: None,
        }
    }
}

impl PathPositionEvaluator {
    /// Index of the keyframe whose measurement is currently held.
    pub fn measured_keyframe(&self) -> Option<usize> {
        self.measured.as_ref().map(|(index, _)| *index)
    }

    /// Drop the held measurement now instead of waiting for the next keyframe change.
    pub fn release(&mut self) {
        self.measured = None;
    }
}

impl Evaluator<Vec2> for PathPositionEvaluator {
    fn configure(&mut self, config: &Config) {
        self.accuracy = config.arc_length_accuracy;
        self.measured = None;
    }

    fn keyframe_changed(&mut self, index: usize) {
        if self.measured_keyframe() != Some(index) {
            self.measured = None;
        }
    }

    fn evaluate(&mut self, segment: &Segment<'_, Vec2>) -> Result<Vec2> {
        let (start, _) = segment.endpoints()?;
        if self.measured_keyframe() != Some(segment.index) {
            // Measurement left from another keyframe.
            self.measured = None;
        }
        let Some(path) = connecting_segment(segment.keyframe) else {
            return Ok(*start);
        };
        if self.measured.is_none() {
            self.measured = Some((segment.index, PathMeasure::new(path, self.accuracy)));
        }
        let Some((_, measure)) = self.measured.as_ref() else {
            return Ok(*start);
        };
        let distance = segment.progress.eased as f64 * measure.length();
        Ok(measure.position_at(distance))
    }
}
