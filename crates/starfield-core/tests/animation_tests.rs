// Host-side tests for the per-tick animation pipeline.

mod common;

use common::RecordingSurface;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_core::*;

fn animator() -> Animator {
    let cfg = FieldConfig::default();
    let layers = generate_field(&cfg, &mut StdRng::seed_from_u64(17));
    Animator::new(MotionConfig::default(), layers, |i| cfg.twinkles(i), 16.0 / 9.0)
}

#[test]
fn first_tick_twinkles_with_advanced_clock() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    a.tick(Vec2::ZERO, &mut surface).unwrap();
    assert!((a.time() - 0.01).abs() < 1e-7);

    for layer in 1..3 {
        let base = a.layers()[layer].base_sizes().to_vec();
        let sizes = a.layer_sizes(layer).unwrap();
        for (i, (s, b)) in sizes.iter().zip(&base).enumerate() {
            let expected = b * twinkle_factor(a.time(), layer, i);
            assert!((s - expected).abs() < 1e-5, "layer {layer} point {i}");
        }
    }
}

#[test]
fn twinkled_sizes_stay_in_band() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    for _ in 0..300 {
        a.tick(Vec2::ZERO, &mut surface).unwrap();
        for layer in 1..3 {
            let base = a.layers()[layer].base_sizes();
            for (s, b) in a.layer_sizes(layer).unwrap().iter().zip(base) {
                assert!(*s >= 0.4 * b - 1e-5 && *s <= b + 1e-5);
            }
        }
    }
}

#[test]
fn distant_layer_is_not_twinkled() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    for _ in 0..10 {
        a.tick(Vec2::ZERO, &mut surface).unwrap();
    }
    assert_eq!(a.layer_sizes(0).unwrap(), a.layers()[0].base_sizes());
    assert_eq!(surface.last_dirty, vec![false, true, true]);
}

#[test]
fn sparse_field_never_twinkles() {
    let cfg = FieldConfig::sparse();
    let layers = generate_field(&cfg, &mut StdRng::seed_from_u64(2));
    let mut a = Animator::new(MotionConfig::default(), layers, |i| cfg.twinkles(i), 1.0);
    let mut surface = RecordingSurface::default();
    a.tick(Vec2::ZERO, &mut surface).unwrap();
    assert!(surface.last_dirty.iter().all(|d| !d));
}

#[test]
fn rotation_accumulates_with_half_rate_about_z() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    for _ in 0..100 {
        a.tick(Vec2::ZERO, &mut surface).unwrap();
    }
    for (i, layer) in a.layers().iter().enumerate() {
        let speed = layer.rotation_speed();
        assert!((speed.z - speed.x * 0.5).abs() < 1e-9);
        let rot = a.layer_rotation(i).unwrap();
        assert!((rot - speed * 100.0).length() < 1e-4);
    }
}

#[test]
fn parallax_offset_follows_smoothed_pointer_with_y_flipped() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    let target = Vec2::new(4.0, 6.0);
    for _ in 0..50 {
        a.tick(target, &mut surface).unwrap();
    }
    let smoothed = a.pointer().smoothed;
    for (i, layer) in a.layers().iter().enumerate() {
        let expected = Vec3::new(smoothed.x, -smoothed.y, 0.0) * layer.parallax_factor();
        let offset = a.layer_offset(i).unwrap();
        assert!((offset - expected).length() < 1e-4);
    }
    // Deeper layers move less.
    let o0 = a.layer_offset(0).unwrap().length();
    let o2 = a.layer_offset(2).unwrap().length();
    assert!(o0 < o2);
}

#[test]
fn smoothed_pointer_never_overshoots_and_converges() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    let target = Vec2::new(10.0, -10.0);
    let mut prev = a.pointer().smoothed;
    for _ in 0..600 {
        a.tick(target, &mut surface).unwrap();
        let s = a.pointer().smoothed;
        assert!(s.x >= prev.x && s.x <= target.x);
        assert!(s.y <= prev.y && s.y >= target.y);
        prev = s;
    }
    assert!((prev - target).length() < 1e-3);
}

#[test]
fn camera_stays_bounded_and_settles_on_pointer_goal() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    let target = Vec2::new(-10.0, 10.0);
    for _ in 0..1500 {
        a.tick(target, &mut surface).unwrap();
        let eye = a.camera().eye;
        assert!(eye.x.abs() <= 1500.0 + 1e-3);
        assert!(eye.y.abs() <= 1500.0 + 1e-3);
    }
    let eye = a.camera().eye;
    assert!((eye.x - -1500.0).abs() < 1.0);
    assert!((eye.y - -1500.0).abs() < 1.0);
    assert_eq!(a.camera().target, Vec3::ZERO);
}

#[test]
fn camera_dolly_tracks_breathing_curve() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    for _ in 0..2000 {
        a.tick(Vec2::ZERO, &mut surface).unwrap();
        let expected = 1000.0 + (a.time() * 0.1).sin() * 50.0;
        assert!((a.camera().eye.z as f64 - expected).abs() < 1e-3);
        assert!(a.camera().eye.z >= 950.0 - 1e-3 && a.camera().eye.z <= 1050.0 + 1e-3);
    }
}

#[test]
fn exactly_one_render_per_tick() {
    let mut a = animator();
    let mut surface = RecordingSurface::default();
    for n in 1..=25 {
        a.tick(Vec2::ZERO, &mut surface).unwrap();
        assert_eq!(surface.renders, n);
        assert_eq!(a.ticks(), n as u64);
    }
    assert_eq!(surface.last_eye, Some(a.camera().eye));
}

#[test]
fn render_error_is_returned_after_state_advanced() {
    let mut a = animator();
    let mut surface = RecordingSurface {
        fail_next: true,
        ..Default::default()
    };
    assert_eq!(a.tick(Vec2::ZERO, &mut surface), Err("surface lost"));
    assert_eq!(a.ticks(), 1);
    assert!(a.tick(Vec2::ZERO, &mut surface).is_ok());
}

#[test]
fn frame_model_places_layer_at_offset() {
    let mut a = animator();
    a.step(Vec2::new(10.0, 0.0));
    let frame = a.frame();
    assert_eq!(frame.layers.len(), 3);
    for lf in &frame.layers {
        let origin = lf.model.transform_point3(Vec3::ZERO);
        assert!((origin - lf.offset).length() < 1e-4);
    }
}

#[test]
fn clock_is_exact_after_long_runs() {
    let mut a = Animator::new(MotionConfig::default(), Vec::new(), |_| false, 1.0);
    let step = MotionConfig::default().time_step as f64;
    // About 80 minutes at 60 Hz.
    for _ in 0..300_000 {
        a.step(Vec2::ZERO);
    }
    assert_eq!(a.ticks(), 300_000);
    assert_eq!(a.time(), 300_000.0 * step);

    let before = a.time();
    a.step(Vec2::ZERO);
    assert!((a.time() - before - step).abs() < 1e-9);
}

#[test]
fn motion_keeps_advancing_at_large_clock_values() {
    // Far past the point where an f32 accumulator stops moving.
    let t = 300_000.0;
    let step = MotionConfig::default().time_step as f64;
    assert_ne!(twinkle_factor(t, 1, 0), twinkle_factor(t + step, 1, 0));
    assert_ne!(twinkle_factor(t, 2, 7), twinkle_factor(t + step, 2, 7));
}
