//! Particle layer generation.
//!
//! A field is a list of [`StarLayer`]s, each built once from a [`LayerSpec`].
//! Base data (positions, colors, sizes) is immutable after construction; the
//! animator keeps its own derived size buffer per layer.

use crate::constants::{PARALLAX_BASE, PARALLAX_STEP, ROTATION_Z_FROM_X};
use crate::error::ConfigError;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Point size as a pure function of one uniform draw: `base + u * spread`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRule {
    pub base: f32,
    pub spread: f32,
}

impl SizeRule {
    #[inline]
    pub fn sample(&self, u: f32) -> f32 {
        self.base + u * self.spread
    }
}

/// Per-point tint as a pure function of one uniform draw shared by all channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRule {
    pub base: [f32; 3],
    pub span: [f32; 3],
}

impl ColorRule {
    #[inline]
    pub fn sample(&self, v: f32) -> [f32; 3] {
        [
            self.base[0] + v * self.span[0],
            self.base[1] + v * self.span[1],
            self.base[2] + v * self.span[2],
        ]
    }
}

/// Declarative parameters for one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    pub count: usize,
    pub radius_min: f32,
    pub radius_spread: f32,
    pub size: SizeRule,
    pub color: Option<ColorRule>,
    /// Per-tick rotation increments about x and y; z is derived from x.
    pub rotation_speed: Vec2,
    pub parallax_factor: f32,
    /// Material size multiplier applied by the renderer.
    pub point_scale: f32,
    pub opacity: f32,
}

impl LayerSpec {
    pub fn validate(&self, layer: usize) -> Result<(), ConfigError> {
        if !(self.radius_min.is_finite() && self.radius_min > 0.0)
            || !(self.radius_spread.is_finite() && self.radius_spread >= 0.0)
        {
            return Err(ConfigError::RadiusBand {
                layer,
                min: self.radius_min,
                spread: self.radius_spread,
            });
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Opacity {
                layer,
                opacity: self.opacity,
            });
        }
        let checks = [
            ("size.base", self.size.base),
            ("size.spread", self.size.spread),
            ("point_scale", self.point_scale),
            ("parallax_factor", self.parallax_factor),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::LayerValue { layer, field, value });
            }
        }
        if !self.rotation_speed.is_finite() {
            return Err(ConfigError::LayerValue {
                layer,
                field: "rotation_speed",
                value: self.rotation_speed.x + self.rotation_speed.y,
            });
        }
        Ok(())
    }
}

/// Default parallax factor for the layer at `index`; nearer layers move more.
#[inline]
pub fn default_parallax(index: usize) -> f32 {
    PARALLAX_BASE + PARALLAX_STEP * index as f32
}

/// Interleaved per-point record uploaded as an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One immutable shell of points.
#[derive(Clone, Debug)]
pub struct StarLayer {
    positions: Vec<Vec3>,
    colors: Option<Vec<[f32; 3]>>,
    base_sizes: Vec<f32>,
    rotation_speed: Vec3,
    parallax_factor: f32,
    point_scale: f32,
    opacity: f32,
}

impl StarLayer {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[[f32; 3]]> {
        self.colors.as_deref()
    }

    pub fn base_sizes(&self) -> &[f32] {
        &self.base_sizes
    }

    pub fn rotation_speed(&self) -> Vec3 {
        self.rotation_speed
    }

    pub fn parallax_factor(&self) -> f32 {
        self.parallax_factor
    }

    pub fn point_scale(&self) -> f32 {
        self.point_scale
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// GPU-ready records; layers without colors render white.
    pub fn vertices(&self) -> Vec<StarVertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| StarVertex {
                position: p.to_array(),
                color: self
                    .colors
                    .as_ref()
                    .map(|c| c[i])
                    .unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect()
    }
}

/// Uniform point in the spherical shell `[radius_min, radius_min + radius_spread)`.
///
/// The polar angle uses the inverse CDF `acos(2u - 1)` so points are uniform
/// over solid angle instead of bunching at the poles.
pub fn sample_shell_point<R: Rng + ?Sized>(rng: &mut R, radius_min: f32, radius_spread: f32) -> Vec3 {
    let radius = radius_min + rng.gen::<f32>() * radius_spread;
    let theta = rng.gen::<f32>() * TAU;
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        radius * sin_phi * cos_theta,
        radius * sin_phi * sin_theta,
        radius * cos_phi,
    )
}

pub fn generate_layer<R: Rng + ?Sized>(spec: &LayerSpec, rng: &mut R) -> StarLayer {
    let mut positions = Vec::with_capacity(spec.count);
    let mut colors = spec.color.map(|_| Vec::with_capacity(spec.count));
    let mut base_sizes = Vec::with_capacity(spec.count);

    for _ in 0..spec.count {
        positions.push(sample_shell_point(rng, spec.radius_min, spec.radius_spread));
        if let (Some(rule), Some(out)) = (spec.color.as_ref(), colors.as_mut()) {
            out.push(rule.sample(rng.gen()));
        }
        base_sizes.push(spec.size.sample(rng.gen()));
    }

    StarLayer {
        positions,
        colors,
        base_sizes,
        rotation_speed: Vec3::new(
            spec.rotation_speed.x,
            spec.rotation_speed.y,
            spec.rotation_speed.x * ROTATION_Z_FROM_X,
        ),
        parallax_factor: spec.parallax_factor,
        point_scale: spec.point_scale,
        opacity: spec.opacity,
    }
}

/// Ordered layer specs plus the twinkle policy flag.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub layers: Vec<LayerSpec>,
    /// When set, every layer but the first (most distant) twinkles.
    pub twinkle: bool,
}

impl FieldConfig {
    /// Two-layer field without twinkle for lighter pages.
    pub fn sparse() -> Self {
        let mut layers = Self::default().layers;
        layers.truncate(2);
        layers[0].count = 500;
        layers[1].count = 200;
        Self {
            layers,
            twinkle: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.is_empty() {
            return Err(ConfigError::EmptyField);
        }
        self.layers
            .iter()
            .enumerate()
            .try_for_each(|(i, spec)| spec.validate(i))
    }

    /// Layer `index` twinkles under this policy.
    #[inline]
    pub fn twinkles(&self, index: usize) -> bool {
        self.twinkle && index > 0
    }

    pub fn total_points(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                // distant: small blue-white points
                LayerSpec {
                    count: 800,
                    radius_min: 2000.0,
                    radius_spread: 2000.0,
                    size: SizeRule {
                        base: 0.5,
                        spread: 0.5,
                    },
                    color: Some(ColorRule {
                        base: [0.8, 0.9, 1.0],
                        span: [0.2, 0.1, 0.0],
                    }),
                    rotation_speed: Vec2::new(0.0001, 0.0003),
                    parallax_factor: default_parallax(0),
                    point_scale: 1.0,
                    opacity: 0.6,
                },
                // medium: cyan-white
                LayerSpec {
                    count: 400,
                    radius_min: 1200.0,
                    radius_spread: 1500.0,
                    size: SizeRule {
                        base: 1.0,
                        spread: 1.5,
                    },
                    color: Some(ColorRule {
                        base: [0.7, 1.0, 1.0],
                        span: [0.3, 0.0, 0.0],
                    }),
                    rotation_speed: Vec2::new(0.0003, 0.0007),
                    parallax_factor: default_parallax(1),
                    point_scale: 2.0,
                    opacity: 0.8,
                },
                // close: bright white-cyan
                LayerSpec {
                    count: 150,
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
                    rotation_speed: Vec2::new(0.0005, 0.001),
                    parallax_factor: default_parallax(2),
                    point_scale: 3.0,
                    opacity: 1.0,
                },
            ],
            twinkle: true,
        }
    }
}

/// Build every layer in order. Regenerating means calling this again and
/// replacing the whole set.
pub fn generate_field<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Vec<StarLayer> {
    let layers: Vec<StarLayer> = config
        .layers
        .iter()
        .map(|spec| generate_layer(spec, rng))
        .collect();
    log::debug!(
        "[field] generated {} layers, {} points",
        layers.len(),
        config.total_points()
    );
    layers
}
