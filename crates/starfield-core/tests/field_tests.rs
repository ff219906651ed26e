// Host-side tests for layer generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_core::*;
use std::f32::consts::PI;

fn spec(count: usize) -> LayerSpec {
    LayerSpec {
        count,
        radius_min: 800.0,
        radius_spread: 1000.0,
        size: SizeRule {
            base: 2.0,
            spread: 2.0,
        },
        color: Some(ColorRule {
            base: [0.9, 1.0, 1.0],
            span: [0.1, 0.0, 0.0],
        }),
        rotation_speed: glam::Vec2::new(0.0005, 0.001),
        parallax_factor: 20.0,
        point_scale: 3.0,
        opacity: 1.0,
    }
}

/// Kolmogorov-Smirnov statistic of `samples` against `cdf`.
fn ks_statistic(samples: &mut [f32], cdf: impl Fn(f32) -> f32) -> f32 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = samples.len() as f32;
    samples
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let lo = (f - i as f32 / n).abs();
            let hi = ((i + 1) as f32 / n - f).abs();
            lo.max(hi)
        })
        .fold(0.0, f32::max)
}

fn polar_angles(layer: &StarLayer) -> Vec<f32> {
    layer
        .positions()
        .iter()
        .map(|p| (p.z / p.length()).clamp(-1.0, 1.0).acos())
        .collect()
}

#[test]
fn generates_exactly_n_points_with_parallel_arrays() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [0, 1, 150, 800] {
        let layer = generate_layer(&spec(n), &mut rng);
        assert_eq!(layer.len(), n);
        assert_eq!(layer.base_sizes().len(), n);
        assert_eq!(layer.colors().map(|c| c.len()), Some(n));
        assert_eq!(layer.vertices().len(), n);
    }
}

#[test]
fn points_lie_inside_radius_band() {
    let mut rng = StdRng::seed_from_u64(11);
    let layer = generate_layer(&spec(2000), &mut rng);
    for p in layer.positions() {
        let r = p.length();
        assert!(r >= 800.0 - 0.1 && r < 1800.0 + 0.1, "radius {r} out of band");
    }
}

#[test]
fn polar_angle_matches_inverse_cdf_distribution() {
    let mut rng = StdRng::seed_from_u64(42);
    let layer = generate_layer(&spec(4000), &mut rng);
    let mut phis = polar_angles(&layer);
    let n = phis.len() as f32;
    // alpha = 0.01 critical value
    let critical = 1.63 / n.sqrt();

    // phi = acos(2u - 1)  =>  P(phi <= x) = (1 - cos x) / 2
    let d = ks_statistic(&mut phis, |x| (1.0 - x.cos()) / 2.0);
    assert!(d < critical, "KS statistic {d} exceeds {critical}");

    // A naive uniform polar draw would have CDF x / pi; the sample must reject it.
    let d_uniform = ks_statistic(&mut phis, |x| x / PI);
    assert!(
        d_uniform > 3.0 * critical,
        "uniform-angle CDF not rejected (D = {d_uniform})"
    );
}

#[test]
fn azimuth_is_uniform() {
    let mut rng = StdRng::seed_from_u64(5);
    let layer = generate_layer(&spec(4000), &mut rng);
    let mut thetas: Vec<f32> = layer
        .positions()
        .iter()
        .map(|p| p.y.atan2(p.x).rem_euclid(2.0 * PI))
        .collect();
    let critical = 1.63 / (thetas.len() as f32).sqrt();
    let d = ks_statistic(&mut thetas, |x| x / (2.0 * PI));
    assert!(d < critical, "azimuth KS statistic {d} exceeds {critical}");
}

#[test]
fn sizes_and_colors_follow_rules() {
    let mut rng = StdRng::seed_from_u64(3);
    let layer = generate_layer(&spec(500), &mut rng);
    for s in layer.base_sizes() {
        assert!(*s >= 2.0 && *s <= 4.0);
    }
    for c in layer.colors().unwrap() {
        assert!(c[0] >= 0.9 - 1e-6 && c[0] <= 1.0 + 1e-6);
        assert_eq!(c[1], 1.0);
        assert_eq!(c[2], 1.0);
    }
}

#[test]
fn same_seed_same_field() {
    let cfg = FieldConfig::default();
    let a = generate_field(&cfg, &mut StdRng::seed_from_u64(99));
    let b = generate_field(&cfg, &mut StdRng::seed_from_u64(99));
    assert_eq!(a.len(), 3);
    for (la, lb) in a.iter().zip(&b) {
        assert_eq!(la.positions(), lb.positions());
        assert_eq!(la.base_sizes(), lb.base_sizes());
    }
}

#[test]
fn default_field_matches_layer_table() {
    let cfg = FieldConfig::default();
    assert!(cfg.validate().is_ok());
    let counts: Vec<usize> = cfg.layers.iter().map(|l| l.count).collect();
    assert_eq!(counts, vec![800, 400, 150]);
    let parallax: Vec<f32> = cfg.layers.iter().map(|l| l.parallax_factor).collect();
    assert_eq!(parallax, vec![10.0, 15.0, 20.0]);
    assert_eq!(cfg.total_points(), 1350);

    let layers = generate_field(&cfg, &mut StdRng::seed_from_u64(1));
    assert_eq!(layers[0].opacity(), 0.6);
    assert_eq!(layers[2].point_scale(), 3.0);
}
