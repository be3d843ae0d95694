//! Split-dimension position: independent x and y scalar drivers combined into a point.

use crate::animation::FloatAnimation;
use crate::callback::ValueCallback;
use crate::error::Result;
use crate::ids::ListenerId;
use crate::interp::functions::normalize_progress;
use crate::listeners::Listeners;
use crate::value::Vec2;

/// Composite driver with no keyframes of its own. Progress is forwarded to both
/// children and the combined point is recomputed eagerly.
#[derive(Debug)]
pub struct SplitDimensionAnimation {
    x: FloatAnimation,
    y: FloatAnimation,
    value: Vec2,
    progress: f32,
    listeners: Listeners,
}

impl SplitDimensionAnimation {
    /// Build from the two axis drivers and evaluate the initial point.
    pub fn new(x: FloatAnimation, y: FloatAnimation) -> Result<Self> {
        let mut animation = Self {
            x,
            y,
            value: Vec2::ZERO,
            progress: 0.0,
            listeners: Listeners::new(),
        };
        animation.refresh()?;
        Ok(animation)
    }

    fn refresh(&mut self) -> Result<()> {
        self.value = Vec2::new(self.x.value()?, self.y.value()?);
        Ok(())
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Forward `progress` to both axes. A no-op when the normalized progress is unchanged.
    pub fn set_progress(&mut self, progress: f32) -> Result<()> {
        let p = normalize_progress(progress);
        if p == self.progress {
            return Ok(());
        }
        self.progress = p;
        self.x.set_progress(p);
        self.y.set_progress(p);
        self.refresh()?;
        self.listeners.notify();
        Ok(())
    }

    /// Combined point at the current progress.
    #[inline]
    pub fn value(&self) -> Vec2 {
        self.value
    }

    pub fn x(&self) -> &FloatAnimation {
        &self.x
    }

    pub fn y(&self) -> &FloatAnimation {
        &self.y
    }

    /// Install or clear the x-axis callback and re-evaluate.
    pub fn set_x_callback(&mut self, callback: Option<Box<dyn ValueCallback<f32>>>) -> Result<()> {
        self.x.set_value_callback(callback);
        self.refresh()?;
        self.listeners.notify();
        Ok(())
    }

    /// Install or clear the y-axis callback and re-evaluate.
    pub fn set_y_callback(&mut self, callback: Option<Box<dyn ValueCallback<f32>>>) -> Result<()> {
        self.y.set_value_callback(callback);
        self.refresh()?;
        self.listeners.notify();
        Ok(())
    }

    pub fn add_listener(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
