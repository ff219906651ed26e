//! Camera and pointer state shared by the animator and the resize path.
//!
//! These types avoid platform-specific APIs; the web frontend reads them to
//! build its uniforms and writes pointer samples into them.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};

/// Exponential smoothing step: moves `current` a fraction `k` of the way to `target`.
///
/// With `k` in `(0, 1]` the result always lies between `current` and `target`.
#[inline]
pub fn damp(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Screen-space pointer (y grows downward) to world-space (y grows upward).
#[inline]
pub fn pointer_to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

/// Right-handed perspective camera that always looks at `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraPose {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_REST_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn look_at_origin(&mut self) {
        self.target = Vec3::ZERO;
    }

    /// Aspect from viewport dimensions; degenerate heights keep the old value.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Raw pointer target plus the smoothed value the animator chases with it.
///
/// `target` is written by pointer events (last write wins); `smoothed` is only
/// advanced by the animation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub target: Vec2,
    pub smoothed: Vec2,
}

impl PointerState {
    pub fn advance(&mut self, k: f32) {
        self.smoothed.x = damp(self.smoothed.x, self.target.x, k);
        self.smoothed.y = damp(self.smoothed.y, self.target.y, k);
    }
}
