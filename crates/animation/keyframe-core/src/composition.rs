//! Composition timing context used to normalize keyframe frame numbers.

use serde::{Deserialize, Serialize};

/// Frame range and rate of the animation that owns the keyframes.
///
/// Field names follow the animation JSON header (`ip`, `op`, `fr`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// First frame (in point).
    #[serde(rename = "ip")]
    pub start_frame: f32,
    /// Last frame (out point).
    #[serde(rename = "op")]
    pub end_frame: f32,
    /// Frames per second.
    #[serde(rename = "fr")]
    pub frame_rate: f32,
}

impl Composition {
    pub fn new(start_frame: f32, end_frame: f32, frame_rate: f32) -> Self {
        Self {
            start_frame,
            end_frame,
            frame_rate,
        }
    }

    /// Length in frames; never negative.
    #[inline]
    pub fn duration_frames(&self) -> f32 {
        (self.end_frame - self.start_frame).max(0.0)
    }

    /// Length in seconds; 0 when the frame rate is not positive.
    #[inline]
    pub fn duration_seconds(&self) -> f32 {
        if self.frame_rate > 0.0 {
            self.duration_frames() / self.frame_rate
        } else {
            0.0
        }
    }

    /// Unclamped progress of `frame` relative to this composition.
    /// Every frame maps to 0 for an empty composition.
    #[inline]
    pub fn progress_for_frame(&self, frame: f32) -> f32 {
        let duration = self.duration_frames();
        if duration <= 0.0 {
            return 0.0;
        }
        (frame - self.start_frame) / duration
    }

    /// Frame at progress `p` (clamped to `[0,1]`).
    #[inline]
    pub fn frame_for_progress(&self, p: f32) -> f32 {
        self.start_frame + crate::interp::functions::normalize_progress(p) * self.duration_frames()
    }
}
