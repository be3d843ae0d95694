//! KeyframeAnimation: the evaluation driver.
//!
//! Model:
//! - The driver owns an ordered list of keyframes (insertion order is chronological).
//! - `set_progress(p)` normalizes `p` (NaN -> 0, clamp to `[0,1]`), clamps it into the
//!   span covered by the keyframes and notifies listeners when it changed.
//! - The active keyframe is the one containing the current progress. The last
//!   resolved index is cached; on a miss the final keyframe is checked with an
//!   inclusive upper bound, then the sorted intervals are binary searched. Progress
//!   falling in a gap between keyframes resolves to the final keyframe.
//! - `value()` hands the active keyframe and its eased sub-progress to the typed
//!   [`Evaluator`], unless an installed [`ValueCallback`] supplies the value.

use std::fmt;

use log::{trace, warn};

use crate::callback::{FrameInfo, ValueCallback};
use crate::config::Config;
use crate::error::{KeyframeError, Result};
use crate::evaluators::{
    ColorEvaluator, FloatEvaluator, GradientEvaluator, IntegerEvaluator, PointEvaluator,
    ScaleEvaluator, TextEvaluator,
};
use crate::ids::ListenerId;
use crate::interp::easing::Easing;
use crate::interp::functions::normalize_progress;
use crate::keyframe::Keyframe;
use crate::listeners::Listeners;
use crate::path::PathPositionEvaluator;
use crate::value::{Color, DocumentData, GradientColor, ScaleXY, Vec2};

pub type FloatAnimation = KeyframeAnimation<f32, FloatEvaluator>;
pub type IntegerAnimation = KeyframeAnimation<i32, IntegerEvaluator>;
pub type PointAnimation = KeyframeAnimation<Vec2, PointEvaluator>;
pub type ScaleAnimation = KeyframeAnimation<ScaleXY, ScaleEvaluator>;
pub type ColorAnimation = KeyframeAnimation<Color, ColorEvaluator>;
pub type GradientAnimation = KeyframeAnimation<GradientColor, GradientEvaluator>;
pub type TextAnimation = KeyframeAnimation<DocumentData, TextEvaluator>;
pub type PathPositionAnimation = KeyframeAnimation<Vec2, PathPositionEvaluator>;

/// Sub-progress through the active keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentProgress {
    /// Linear progress through the keyframe, in `[0,1]`.
    pub linear: f32,
    /// Progress after the keyframe's easing.
    pub eased: f32,
    /// Eased progress for the x component (equals `eased` without split easing).
    pub eased_x: f32,
    /// Eased progress for the y component (equals `eased` without split easing).
    pub eased_y: f32,
}

/// The active keyframe and where evaluation sits inside it.
#[derive(Debug)]
pub struct Segment<'a, T> {
    /// Position of `keyframe` in the driver's list; stable for the driver's lifetime.
    pub index: usize,
    pub keyframe: &'a Keyframe<T>,
    pub progress: SegmentProgress,
}

impl<'a, T> Segment<'a, T> {
    /// Both endpoints of the keyframe, or `MissingValues`.
    #[inline]
    pub fn endpoints(&self) -> Result<(&'a T, &'a T)> {
        self.keyframe.endpoints()
    }
}

/// Per-type interpolation of a keyframe segment.
pub trait Evaluator<T> {
    fn evaluate(&mut self, segment: &Segment<'_, T>) -> Result<T>;

    /// Receive the driver's configuration. Called once when the driver is built.
    fn configure(&mut self, _config: &Config) {}

    /// The active keyframe changed to `index`. Called even when that keyframe
    /// never reaches [`Evaluator::evaluate`] (static or discrete).
    fn keyframe_changed(&mut self, _index: usize) {}
}

struct CachedValue<T> {
    index: usize,
    progress: SegmentProgress,
    value: T,
}

pub struct KeyframeAnimation<T, E> {
    keyframes: Vec<Keyframe<T>>,
    evaluator: E,
    config: Config,
    progress: f32,
    cached_index: Option<usize>,
    cached_value: Option<CachedValue<T>>,
    discrete: bool,
    value_callback: Option<Box<dyn ValueCallback<T>>>,
    listeners: Listeners,
}

impl<T: Clone, E: Evaluator<T> + Default> KeyframeAnimation<T, E> {
    /// Driver with the default evaluator and configuration.
    pub fn new(keyframes: Vec<Keyframe<T>>) -> Self {
        Self::with_config(keyframes, Config::default())
    }

    pub fn with_config(keyframes: Vec<Keyframe<T>>, config: Config) -> Self {
        Self::with_evaluator(keyframes, E::default(), config)
    }
}

impl<T: Clone, E: Evaluator<T>> KeyframeAnimation<T, E> {
    pub fn with_evaluator(keyframes: Vec<Keyframe<T>>, mut evaluator: E, config: Config) -> Self {
        evaluator.configure(&config);
        let mut animation = Self {
            keyframes,
            evaluator,
            config,
            progress: 0.0,
            cached_index: None,
            cached_value: None,
            discrete: false,
            value_callback: None,
            listeners: Listeners::new(),
        };
        animation.progress = animation.start_delay_progress();
        animation
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current progress, always inside `[start_delay_progress, end_progress]`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Start of the first keyframe (0 when there are none).
    pub fn start_delay_progress(&self) -> f32 {
        self.keyframes
            .first()
            .map(|k| k.start_progress())
            .unwrap_or(0.0)
    }

    /// End of the last keyframe (1 when there are none).
    pub fn end_progress(&self) -> f32 {
        self.keyframes
            .last()
            .map(|k| k.end_progress())
            .unwrap_or(1.0)
    }

    /// Disable easing: sub-progress is always 0 and every keyframe yields its start value.
    pub fn set_discrete(&mut self) {
        self.discrete = true;
        self.cached_value = None;
    }

    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.discrete
    }

    /// Move to `progress`. Listeners are notified only when the clamped value differs
    /// from the current one.
    pub fn set_progress(&mut self, progress: f32) {
        if self.keyframes.is_empty() {
            warn!("set_progress({progress}) ignored: animation has no keyframes");
            return;
        }
        let p = normalize_progress(progress)
            .max(self.start_delay_progress())
            .min(self.end_progress());
        if p == self.progress {
            return;
        }
        self.progress = p;
        self.listeners.notify();
    }

    /// Register a value-changed listener.
    pub fn add_listener(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn notify_listeners(&mut self) {
        self.listeners.notify();
    }

    /// Install or clear the value callback. Listeners are notified either way.
    pub fn set_value_callback(&mut self, callback: Option<Box<dyn ValueCallback<T>>>) {
        self.value_callback = callback;
        self.cached_value = None;
        self.listeners.notify();
    }

    #[inline]
    pub fn has_value_callback(&self) -> bool {
        self.value_callback.is_some()
    }

    /// Replace the value stored in the installed callback. Returns false (and does
    /// not notify) when no callback is installed or it stores no value.
    pub fn set_callback_value(&mut self, value: T) -> bool {
        let accepted = self
            .value_callback
            .as_mut()
            .map(|cb| cb.set_value(value))
            .unwrap_or(false);
        if accepted {
            self.listeners.notify();
        }
        accepted
    }

    fn current_index(&mut self) -> Result<usize> {
        if self.keyframes.is_empty() {
            return Err(KeyframeError::EmptyKeyframes);
        }
        let last = self.keyframes.len() - 1;
        if let Some(i) = self.cached_index {
            let kf = &self.keyframes[i];
            if kf.contains_progress(self.progress)
                || (i == last && kf.contains_progress_inclusive(self.progress))
            {
                return Ok(i);
            }
        }
        let index = self.resolve_index(last);
        trace!(
            "active keyframe changed {:?} -> {index} at progress {}",
            self.cached_index,
            self.progress
        );
        if self.cached_index != Some(index) {
            self.evaluator.keyframe_changed(index);
        }
        self.cached_index = Some(index);
        Ok(index)
    }

    fn resolve_index(&self, last: usize) -> usize {
        let p = self.progress;
        if self.keyframes[last].contains_progress_inclusive(p) {
            return last;
        }
        let after = self.keyframes.partition_point(|k| k.start_progress() <= p);
        match after.checked_sub(1) {
            Some(i) if self.keyframes[i].contains_progress(p) => i,
            _ => last,
        }
    }

    /// The keyframe containing the current progress.
    pub fn current_keyframe(&mut self) -> Result<&Keyframe<T>> {
        let index = self.current_index()?;
        Ok(&self.keyframes[index])
    }

    fn linear_progress_at(&self, index: usize) -> f32 {
        if self.discrete {
            return 0.0;
        }
        let kf = &self.keyframes[index];
        if kf.is_static() {
            return 0.0;
        }
        let span = kf.end_progress() - kf.start_progress();
        if span <= 0.0 {
            return 0.0;
        }
        ((self.progress - kf.start_progress()) / span).clamp(0.0, 1.0)
    }

    fn segment_progress(&self, index: usize) -> SegmentProgress {
        let kf = &self.keyframes[index];
        let linear = self.linear_progress_at(index);
        if kf.is_static() {
            return SegmentProgress {
                linear,
                ..SegmentProgress::default()
            };
        }
        let iterations = self.config.bezier_iterations;
        let ease = |easing: Option<&Easing>, fallback: f32| {
            easing
                .map(|e| e.ease_with_iterations(linear, iterations))
                .unwrap_or(fallback)
        };
        let eased = ease(kf.easing(), linear);
        SegmentProgress {
            linear,
            eased,
            eased_x: ease(kf.x_easing(), eased),
            eased_y: ease(kf.y_easing(), eased),
        }
    }

    /// Linear progress through the active keyframe; 0 when discrete or static.
    pub fn linear_keyframe_progress(&mut self) -> Result<f32> {
        let index = self.current_index()?;
        Ok(self.linear_progress_at(index))
    }

    /// Eased progress through the active keyframe; 0 when static.
    pub fn interpolated_keyframe_progress(&mut self) -> Result<f32> {
        let index = self.current_index()?;
        Ok(self.segment_progress(index).eased)
    }

    /// Evaluate the animation at the current progress.
    pub fn value(&mut self) -> Result<T> {
        let index = self.current_index()?;
        let progress = self.segment_progress(index);
        let keyframe = &self.keyframes[index];

        if let Some(callback) = self.value_callback.as_mut() {
            let frame = FrameInfo {
                start_frame: keyframe.start_frame(),
                end_frame: keyframe.end_frame(),
                start_value: keyframe.start_value().clone(),
                end_value: keyframe.end_value().cloned(),
                linear_keyframe_progress: progress.linear,
                interpolated_keyframe_progress: progress.eased,
                overall_progress: self.progress,
            };
            if let Some(value) = callback.value(&frame) {
                return Ok(value);
            }
        } else if self.config.cache_values {
            if let Some(cached) = &self.cached_value {
                if cached.index == index && cached.progress == progress {
                    return Ok(cached.value.clone());
                }
            }
        }

        let value = if keyframe.is_static() || self.discrete {
            keyframe.start_value().clone()
        } else {
            self.evaluator.evaluate(&Segment {
                index,
                keyframe,
                progress,
            })?
        };
        if self.config.cache_values {
            self.cached_value = Some(CachedValue {
                index,
                progress,
                value: value.clone(),
            });
        }
        Ok(value)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for KeyframeAnimation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeAnimation")
            .field("keyframes", &self.keyframes)
            .field("evaluator", &self.evaluator)
            .field("progress", &self.progress)
            .field("cached_index", &self.cached_index)
            .field("discrete", &self.discrete)
            .field("has_value_callback", &self.value_callback.is_some())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
