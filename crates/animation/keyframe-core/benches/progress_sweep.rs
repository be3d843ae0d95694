use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyframe_core::{
    Color, ColorAnimation, Composition, Easing, FloatAnimation, Keyframe, PathPositionAnimation,
    Vec2,
};

const STEPS: usize = 240;
const SEGMENTS: usize = 32;

fn scalar_keyframes(comp: &Composition) -> Vec<Keyframe<f32>> {
    let span = comp.duration_frames() / SEGMENTS as f32;
    (0..SEGMENTS)
        .map(|i| {
            let start = i as f32 * span;
            Keyframe::new(comp, start, Some(start + span), i as f32, Some(i as f32 + 1.0))
                .with_easing(Easing::EASE_IN_OUT)
        })
        .collect()
}

fn bench_progress_sweep(c: &mut Criterion) {
    let comp = Composition::new(0.0, 240.0, 60.0);

    c.bench_function("float_sweep_32_segments", |b| {
        let mut anim = FloatAnimation::new(scalar_keyframes(&comp));
        b.iter(|| {
            for step in 0..=STEPS {
                anim.set_progress(step as f32 / STEPS as f32);
                black_box(anim.value().ok());
            }
        })
    });

    c.bench_function("float_random_access_32_segments", |b| {
        let mut anim = FloatAnimation::new(scalar_keyframes(&comp));
        b.iter(|| {
            for step in 0..=STEPS {
                // Stride through progress out of order to defeat the index cache.
                let p = ((step * 97) % (STEPS + 1)) as f32 / STEPS as f32;
                anim.set_progress(p);
                black_box(anim.value().ok());
            }
        })
    });

    c.bench_function("color_sweep", |b| {
        let mut anim = ColorAnimation::new(vec![Keyframe::new(
            &comp,
            0.0,
            Some(240.0),
            Color::RED,
            Some(Color::BLUE),
        )
        .with_easing(Easing::Linear)]);
        b.iter(|| {
            for step in 0..=STEPS {
                anim.set_progress(step as f32 / STEPS as f32);
                black_box(anim.value().ok());
            }
        })
    });

    c.bench_function("path_position_sweep", |b| {
        let mut anim = PathPositionAnimation::new(vec![
            Keyframe::new(&comp, 0.0, Some(120.0), Vec2::ZERO, Some(Vec2::new(200.0, 0.0)))
                .with_easing(Easing::Linear)
                .with_tangents(Vec2::new(0.0, -80.0), Vec2::new(0.0, -80.0)),
            Keyframe::new(
                &comp,
                120.0,
                Some(240.0),
                Vec2::new(200.0, 0.0),
                Some(Vec2::new(0.0, 0.0)),
            )
            .with_easing(Easing::EASE_IN_OUT)
            .with_tangents(Vec2::new(0.0, 80.0), Vec2::new(0.0, 80.0)),
        ]);
        b.iter(|| {
            for step in 0..=STEPS {
                anim.set_progress(step as f32 / STEPS as f32);
                black_box(anim.value().ok());
            }
        })
    });
}

criterion_group!(benches, bench_progress_sweep);
criterion_main!(benches);
