//! Per-refresh animation tick.
//!
//! One call to [`Animator::tick`] runs the whole frame in a fixed order:
//! simulation clock, pointer damping, layer rotation, twinkle, parallax,
//! camera chase and dolly, re-aim, render. Twinkle and parallax read the same
//! tick's clock and smoothed pointer.

use crate::constants::*;
use crate::error::ConfigError;
use crate::field::StarLayer;
use crate::state::{damp, pointer_to_world, CameraPose, PointerState};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::fmt::Debug;

/// Fixed-step motion parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub time_step: f32,
    pub pointer_damping: f32,
    pub camera_damping: f32,
    pub camera_pointer_gain: f32,
    pub camera_rest_z: f32,
    pub breath_rate: f32,
    pub breath_depth: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            time_step: TIME_STEP,
            pointer_damping: POINTER_DAMPING,
            camera_damping: CAMERA_DAMPING,
            camera_pointer_gain: CAMERA_POINTER_GAIN,
            camera_rest_z: CAMERA_REST_Z,
            breath_rate: CAMERA_BREATH_RATE,
            breath_depth: CAMERA_BREATH_DEPTH,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("pointer", self.pointer_damping),
            ("camera", self.camera_damping),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Damping { name, value });
            }
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "time_step",
                value: self.time_step as f64,
            });
        }
        Ok(())
    }
}

/// Size multiplier for point `i` of layer `layer` at simulation time `t`.
///
/// Bounded to `[0.4, 1.0]`; the `i * 0.1` phase decorrelates neighbours
/// without per-frame randomness. The phase is built in `f64` so it keeps
/// advancing for arbitrarily long runs.
#[inline]
pub fn twinkle_factor(t: f64, layer: usize, i: usize) -> f32 {
    let phase = t * (TWINKLE_RATE_BASE as f64 + layer as f64)
        + i as f64 * TWINKLE_PHASE_STEP as f64;
    phase.sin() as f32 * TWINKLE_AMPLITUDE + TWINKLE_MIDPOINT
}

/// Derived per-layer state owned by the animator.
#[derive(Clone, Debug)]
struct LayerMotion {
    rotation: Vec3,
    offset: Vec3,
    sizes: Vec<f32>,
    twinkle: bool,
    sizes_dirty: bool,
}

/// What the renderer needs for one layer this frame.
#[derive(Clone, Debug)]
pub struct LayerFrame<'a> {
    pub model: Mat4,
    pub rotation: Vec3,
    pub offset: Vec3,
    pub sizes: &'a [f32],
    /// Sizes changed since the previous frame and must be re-uploaded.
    pub sizes_dirty: bool,
    pub point_scale: f32,
    pub opacity: f32,
}

/// Snapshot handed to [`RenderSurface::render`].
#[derive(Clone, Debug)]
pub struct SceneFrame<'a> {
    pub camera: &'a CameraPose,
    pub view_proj: Mat4,
    pub layers: Vec<LayerFrame<'a>>,
}

/// Render target driven by the animator and the resize path.
pub trait RenderSurface {
    type Error: Debug;

    /// Upload static layer data; called once per generated field.
    fn load_field(&mut self, layers: &[StarLayer]);

    /// Resize the output to `width` x `height` physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), Self::Error>;
}

pub struct Animator {
    config: MotionConfig,
    layers: Vec<StarLayer>,
    motion: Vec<LayerMotion>,
    pointer: PointerState,
    camera: CameraPose,
    ticks: u64,
}

impl Animator {
    /// `twinkles(i)` decides per layer whether sizes are modulated.
    pub fn new(
        config: MotionConfig,
        layers: Vec<StarLayer>,
        twinkles: impl Fn(usize) -> bool,
        aspect: f32,
    ) -> Self {
        let motion = build_motion(&layers, &twinkles);
        let mut camera = CameraPose::new(aspect);
        camera.eye.z = config.camera_rest_z;
        Self {
            config,
            layers,
            motion,
            pointer: PointerState::default(),
            camera,
            ticks: 0,
        }
    }

    /// Discard the current layers and start over with `layers`.
    pub fn replace_field(&mut self, layers: Vec<StarLayer>, twinkles: impl Fn(usize) -> bool) {
        self.motion = build_motion(&layers, &twinkles);
        self.layers = layers;
    }

    pub fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraPose {
        &mut self.camera
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Simulation time: `ticks * time_step`, derived rather than accumulated.
    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.config.time_step as f64
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn layer_sizes(&self, layer: usize) -> Option<&[f32]> {
        self.motion.get(layer).map(|m| m.sizes.as_slice())
    }

    pub fn layer_rotation(&self, layer: usize) -> Option<Vec3> {
        self.motion.get(layer).map(|m| m.rotation)
    }

    pub fn layer_offset(&self, layer: usize) -> Option<Vec3> {
        self.motion.get(layer).map(|m| m.offset)
    }

    /// Advance one frame toward `pointer_target` and render it.
    pub fn tick<S: RenderSurface + ?Sized>(
        &mut self,
        pointer_target: Vec2,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        self.step(pointer_target);
        let frame = self.frame();
        let res = surface.render(&frame);
        for m in &mut self.motion {
            m.sizes_dirty = false;
        }
        res
    }

    /// Everything a tick does except rendering.
    pub fn step(&mut self, pointer_target: Vec2) {
        self.ticks += 1;
        let t = self.time();
        let cfg = &self.config;

        self.pointer.target = pointer_target;
        self.pointer.advance(cfg.pointer_damping);
        let world = pointer_to_world(self.pointer.smoothed);

        for (index, (layer, m)) in self.layers.iter().zip(self.motion.iter_mut()).enumerate() {
            m.rotation += layer.rotation_speed();

            if m.twinkle {
                for (i, (size, base)) in m.sizes.iter_mut().zip(layer.base_sizes()).enumerate() {
                    *size = base * twinkle_factor(t, index, i);
                }
                m.sizes_dirty = true;
            }

            m.offset = (world * layer.parallax_factor()).extend(0.0);
        }

        let cam = &mut self.camera;
        let goal = world * cfg.camera_pointer_gain;
        cam.eye.x = damp(cam.eye.x, goal.x, cfg.camera_damping);
        cam.eye.y = damp(cam.eye.y, goal.y, cfg.camera_damping);
        let breath = (t * cfg.breath_rate as f64).sin() as f32;
        cam.eye.z = cfg.camera_rest_z + breath * cfg.breath_depth;
        cam.look_at_origin();
    }

    pub fn frame(&self) -> SceneFrame<'_> {
        let layers = self
            .layers
            .iter()
            .zip(&self.motion)
            .map(|(layer, m)| LayerFrame {
                model: Mat4::from_rotation_translation(
                    Quat::from_euler(EulerRot::XYZ, m.rotation.x, m.rotation.y, m.rotation.z),
                    m.offset,
                ),
                rotation: m.rotation,
                offset: m.offset,
                sizes: &m.sizes,
                sizes_dirty: m.sizes_dirty,
                point_scale: layer.point_scale(),
                opacity: layer.opacity(),
            })
            .collect();
        SceneFrame {
            camera: &self.camera,
            view_proj: self.camera.view_projection(),
            layers,
        }
    }
}

fn build_motion(layers: &[StarLayer], twinkles: &impl Fn(usize) -> bool) -> Vec<LayerMotion> {
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| LayerMotion {
            rotation: Vec3::ZERO,
            offset: Vec3::ZERO,
            sizes: layer.base_sizes().to_vec(),
            twinkle: twinkles(i),
            sizes_dirty: false,
        })
        .collect()
}
