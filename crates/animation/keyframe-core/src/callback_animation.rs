//! Driver whose value comes only from a callback; there are no keyframes.

use std::fmt;

use crate::callback::{FrameInfo, ValueCallback};
use crate::ids::ListenerId;
use crate::interp::functions::normalize_progress;
use crate::listeners::Listeners;

pub struct CallbackAnimation<T> {
    fallback: T,
    callback: Box<dyn ValueCallback<T>>,
    progress: f32,
    listeners: Listeners,
}

impl<T: Clone> CallbackAnimation<T> {
    /// `fallback` is returned whenever the callback yields `None`.
    pub fn new(fallback: T, callback: Box<dyn ValueCallback<T>>) -> Self {
        Self {
            fallback,
            callback,
            progress: 0.0,
            listeners: Listeners::new(),
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        let p = normalize_progress(progress);
        if p == self.progress {
            return;
        }
        self.progress = p;
        self.listeners.notify();
    }

    pub fn value(&mut self) -> T {
        let frame = FrameInfo {
            start_frame: 0.0,
            end_frame: None,
            start_value: self.fallback.clone(),
            end_value: None,
            linear_keyframe_progress: self.progress,
            interpolated_keyframe_progress: self.progress,
            overall_progress: self.progress,
        };
        self.callback
            .value(&frame)
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Forward `value` to the callback; notifies when it was stored.
    pub fn set_callback_value(&mut self, value: T) -> bool {
        let accepted = self.callback.set_value(value);
        if accepted {
            self.listeners.notify();
        }
        accepted
    }

    pub fn add_listener(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

impl<T: fmt::Debug> fmt::Debug for CallbackAnimation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackAnimation")
            .field("fallback", &self.fallback)
            .field("progress", &self.progress)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
