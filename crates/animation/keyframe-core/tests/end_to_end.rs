use approx::assert_abs_diff_eq;
use keyframe_core::interp::color::{lerp_color_gamma, lerp_color_naive};
use keyframe_core::{
    parse_composition_json, parse_property_json, Color, ColorAnimation, DecodeOptions,
};
use keyframe_test_fixtures::properties;

#[test]
fn red_to_blue_over_thirty_frames() {
    let comp =
        parse_composition_json(&properties::composition_json("color-red-blue").unwrap()).unwrap();
    assert_eq!(comp.duration_frames(), 30.0);
    let json = properties::json("color-red-blue").unwrap();
    let keyframes = parse_property_json::<Color>(&json, &comp, &DecodeOptions::default()).unwrap();
    let mut anim = ColorAnimation::new(keyframes);

    anim.set_progress(0.0);
    assert_eq!(anim.value().unwrap(), Color::RED);

    anim.set_progress(1.0);
    assert_eq!(anim.value().unwrap(), Color::BLUE);

    anim.set_progress(0.5);
    let mid = anim.value().unwrap();
    let expected = lerp_color_gamma(Color::RED, Color::BLUE, 0.5);
    assert_abs_diff_eq!(mid.r, expected.r, epsilon = 1e-5);
    assert_abs_diff_eq!(mid.b, expected.b, epsilon = 1e-5);
    assert_abs_diff_eq!(mid.r, 0.7354, epsilon = 1e-3);

    let naive = lerp_color_naive(Color::RED, Color::BLUE, 0.5);
    assert!((mid.r - naive.r).abs() > 0.2);
}
