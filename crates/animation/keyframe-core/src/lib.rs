//! Keyframe Core (renderer-agnostic)
//!
//! Evaluates animated properties of a vector animation. A property is an ordered
//! list of [`Keyframe`]s over normalized progress `[0,1]`; a [`KeyframeAnimation`]
//! driver tracks the current progress, resolves the active keyframe, applies its
//! easing and hands the segment to a typed [`Evaluator`] (or to an installed
//! [`ValueCallback`]).
//!
//! Rendering, geometry construction and property plumbing live elsewhere: callers
//! set progress once per tick and read the value.

pub mod animation;
pub mod callback;
pub mod callback_animation;
pub mod composition;
pub mod config;
pub mod error;
pub mod evaluators;
pub mod ids;
pub mod interp;
pub mod keyframe;
pub mod listeners;
pub mod path;
pub mod property;
pub mod split;
pub mod value;

// Re-exports for consumers
pub use animation::{
    ColorAnimation, Evaluator, FloatAnimation, GradientAnimation, IntegerAnimation,
    KeyframeAnimation, PathPositionAnimation, PointAnimation, ScaleAnimation, Segment,
    SegmentProgress, TextAnimation,
};
pub use callback::{
    FixedValue, FnCallback, FrameInfo, InterpolatedFloatValue, RelativeFloatValue,
    RelativePointValue, ValueCallback,
};
pub use callback_animation::CallbackAnimation;
pub use composition::Composition;
pub use config::Config;
pub use error::{KeyframeError, Result};
pub use evaluators::{
    ColorEvaluator, FloatEvaluator, GradientEvaluator, IntegerEvaluator, PointEvaluator,
    ScaleEvaluator, TextEvaluator,
};
pub use ids::ListenerId;
pub use interp::easing::Easing;
pub use keyframe::{Keyframe, SpatialTangents};
pub use path::{PathMeasure, PathPositionEvaluator};
pub use property::{
    parse_composition_json, parse_property, parse_property_json, DecodeOptions, PropertyValue,
};
pub use split::SplitDimensionAnimation;
pub use value::{Color, DocumentData, GradientColor, Justification, ScaleXY, Vec2};
