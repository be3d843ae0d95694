use std::cell::Cell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use keyframe_core::{
    Composition, Config, Easing, FixedValue, FloatAnimation, FnCallback, FrameInfo, Keyframe,
    KeyframeError, RelativeFloatValue,
};

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    (hits, move || h.set(h.get() + 1))
}

fn zero_to_ten() -> FloatAnimation {
    let comp = Composition::new(0.0, 10.0, 10.0);
    FloatAnimation::new(vec![
        Keyframe::new(&comp, 0.0, Some(10.0), 0.0, Some(10.0)).with_easing(Easing::Linear)
    ])
}

fn three_segments() -> FloatAnimation {
    let comp = Composition::new(0.0, 90.0, 30.0);
    FloatAnimation::new(vec![
        Keyframe::new(&comp, 0.0, Some(30.0), 0.0, Some(1.0)).with_easing(Easing::Linear),
        Keyframe::new(&comp, 30.0, Some(60.0), 1.0, Some(2.0)).with_easing(Easing::EASE_IN_OUT),
        Keyframe::new(&comp, 60.0, Some(90.0), 2.0, Some(3.0)).with_easing(Easing::Linear),
    ])
}

#[test]
fn scalar_midpoint() {
    let mut anim = zero_to_ten();
    anim.set_progress(0.5);
    assert_abs_diff_eq!(anim.value().unwrap(), 5.0, epsilon = 1e-6);
}

#[test]
fn progress_is_clamped_into_keyframe_span() {
    let comp = Composition::new(0.0, 100.0, 30.0);
    let mut anim = FloatAnimation::new(vec![
        Keyframe::new(&comp, 20.0, Some(80.0), 0.0, Some(1.0)).with_easing(Easing::Linear)
    ]);
    assert_abs_diff_eq!(anim.start_delay_progress(), 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(anim.end_progress(), 0.8, epsilon = 1e-6);
    assert_abs_diff_eq!(anim.progress(), 0.2, epsilon = 1e-6);

    anim.set_progress(-1.0);
    assert_abs_diff_eq!(anim.progress(), 0.2, epsilon = 1e-6);
    anim.set_progress(2.0);
    assert_abs_diff_eq!(anim.progress(), 0.8, epsilon = 1e-6);
    anim.set_progress(f32::NAN);
    assert_abs_diff_eq!(anim.progress(), 0.2, epsilon = 1e-6);
}

#[test]
fn notification_is_idempotent() {
    let mut anim = zero_to_ten();
    let (hits, listener) = counter();
    anim.add_listener(listener);

    anim.set_progress(0.3);
    anim.set_progress(0.3);
    assert_eq!(hits.get(), 1);

    // Both clamp to the same value.
    anim.set_progress(1.0);
    anim.set_progress(5.0);
    assert_eq!(hits.get(), 2);
}

#[test]
fn removed_listener_is_not_called() {
    let mut anim = zero_to_ten();
    let (hits, listener) = counter();
    let id = anim.add_listener(listener);
    assert!(anim.remove_listener(id));
    assert!(!anim.remove_listener(id));
    anim.set_progress(0.7);
    assert_eq!(hits.get(), 0);
}

#[test]
fn active_keyframe_contains_progress_across_sweep() {
    let mut anim = three_segments();
    let last_start = anim.keyframes()[2].start_progress();
    for step in 0..=200 {
        let p = step as f32 / 200.0;
        anim.set_progress(p);
        let progress = anim.progress();
        let kf = anim.current_keyframe().unwrap();
        let is_last = kf.start_progress() == last_start;
        assert!(
            kf.contains_progress(progress) || (is_last && kf.contains_progress_inclusive(progress)),
            "keyframe [{}, {}) does not contain {progress}",
            kf.start_progress(),
            kf.end_progress()
        );
    }
}

#[test]
fn values_are_continuous_at_segment_boundaries() {
    let mut anim = three_segments();
    anim.set_progress(1.0 / 3.0);
    assert_abs_diff_eq!(anim.value().unwrap(), 1.0, epsilon = 1e-4);
    anim.set_progress(2.0 / 3.0);
    assert_abs_diff_eq!(anim.value().unwrap(), 2.0, epsilon = 1e-4);
    anim.set_progress(1.0);
    assert_abs_diff_eq!(anim.value().unwrap(), 3.0, epsilon = 1e-6);
}

#[test]
fn eased_progress_differs_from_linear() {
    let mut anim = three_segments();
    anim.set_progress(0.375);
    let linear = anim.linear_keyframe_progress().unwrap();
    let eased = anim.interpolated_keyframe_progress().unwrap();
    assert_abs_diff_eq!(linear, 0.125, epsilon = 1e-5);
    assert!(eased < linear);
}

#[test]
fn empty_driver_reports_errors() {
    let mut anim = FloatAnimation::new(Vec::new());
    anim.set_progress(0.5);
    assert_eq!(anim.progress(), 0.0);
    assert!(matches!(anim.value(), Err(KeyframeError::EmptyKeyframes)));
    assert!(anim.current_keyframe().is_err());
    assert_eq!(anim.start_delay_progress(), 0.0);
    assert_eq!(anim.end_progress(), 1.0);
}

#[test]
fn missing_end_value_is_fatal_for_eased_keyframe() {
    let comp = Composition::new(0.0, 10.0, 10.0);
    let mut anim = FloatAnimation::new(vec![
        Keyframe::new(&comp, 0.0, Some(10.0), 1.0, None).with_easing(Easing::Linear)
    ]);
    anim.set_progress(0.5);
    let err = anim.value().unwrap_err();
    assert!(matches!(err, KeyframeError::MissingValues { start_frame } if start_frame == 0.0));
    assert_eq!(err.category(), "evaluation");
}

#[test]
fn static_keyframe_returns_start_value() {
    let comp = Composition::new(0.0, 10.0, 10.0);
    let mut anim =
        FloatAnimation::new(vec![Keyframe::new(&comp, 0.0, Some(10.0), 4.0, Some(8.0))]);
    for p in [0.0, 0.25, 0.5, 1.0] {
        anim.set_progress(p);
        assert_eq!(anim.value().unwrap(), 4.0);
        assert_eq!(anim.interpolated_keyframe_progress().unwrap(), 0.0);
    }

    let mut constant = FloatAnimation::new(vec![Keyframe::constant(7.5)]);
    constant.set_progress(0.9);
    assert_eq!(constant.value().unwrap(), 7.5);
}

#[test]
fn discrete_driver_holds_start_values() {
    let mut anim = three_segments();
    anim.set_discrete();
    assert!(anim.is_discrete());
    anim.set_progress(0.5);
    assert_eq!(anim.linear_keyframe_progress().unwrap(), 0.0);
    assert_eq!(anim.value().unwrap(), 1.0);
    anim.set_progress(0.9);
    assert_eq!(anim.value().unwrap(), 2.0);
}

#[test]
fn value_callback_overrides_interpolation() {
    let mut anim = zero_to_ten();
    let (hits, listener) = counter();
    anim.add_listener(listener);
    anim.set_progress(0.5);
    assert_eq!(hits.get(), 1);

    anim.set_value_callback(Some(Box::new(FixedValue::new(42.0f32))));
    assert!(anim.has_value_callback());
    assert_eq!(hits.get(), 2);
    assert_eq!(anim.value().unwrap(), 42.0);

    assert!(anim.set_callback_value(-1.0));
    assert_eq!(hits.get(), 3);
    assert_eq!(anim.value().unwrap(), -1.0);

    anim.set_value_callback(None);
    assert_abs_diff_eq!(anim.value().unwrap(), 5.0, epsilon = 1e-6);
    assert!(!anim.set_callback_value(1.0));
    assert_eq!(hits.get(), 4);
}

#[test]
fn declining_callback_falls_back_and_sees_frame_info() {
    let mut anim = zero_to_ten();
    let seen = Rc::new(Cell::new(0.0f32));
    let s = seen.clone();
    anim.set_value_callback(Some(Box::new(FnCallback::new(
        move |frame: &FrameInfo<f32>| -> Option<f32> {
            s.set(frame.interpolated_keyframe_progress);
            assert_eq!(frame.end_value, Some(10.0));
            None
        },
    ))));
    anim.set_progress(0.25);
    assert_abs_diff_eq!(anim.value().unwrap(), 2.5, epsilon = 1e-6);
    assert_abs_diff_eq!(seen.get(), 0.25, epsilon = 1e-6);
}

#[test]
fn relative_callback_offsets_default_value() {
    let mut anim = zero_to_ten();
    anim.set_value_callback(Some(Box::new(RelativeFloatValue::new(100.0))));
    anim.set_progress(0.5);
    assert_abs_diff_eq!(anim.value().unwrap(), 105.0, epsilon = 1e-5);
}

#[test]
fn uncached_driver_matches_cached() {
    let comp = Composition::new(0.0, 90.0, 30.0);
    let keyframes = vec![
        Keyframe::new(&comp, 0.0, Some(45.0), 0.0, Some(1.0)).with_easing(Easing::EASE_IN_OUT),
        Keyframe::new(&comp, 45.0, Some(90.0), 1.0, Some(0.0)).with_easing(Easing::Linear),
    ];
    let config = Config {
        cache_values: false,
        ..Config::default()
    };
    let mut cached = FloatAnimation::new(keyframes.clone());
    let mut uncached = FloatAnimation::with_config(keyframes, config);
    assert!(!uncached.config().cache_values);
    for step in 0..=20 {
        let p = step as f32 / 20.0;
        cached.set_progress(p);
        uncached.set_progress(p);
        assert_eq!(cached.value().unwrap(), uncached.value().unwrap());
        assert_eq!(cached.value().unwrap(), uncached.value().unwrap());
    }
}
