use crate::constants::POINTER_HALF_RANGE;
use glam::Vec2;

/// Latest pointer sample mapped into `[-half_range, half_range]` per axis.
///
/// Only the newest sample is kept; the animation tick reads it lazily.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTracker {
    half_range: f32,
    target: Vec2,
}

impl PointerTracker {
    pub fn new(half_range: f32) -> Self {
        Self {
            half_range,
            target: Vec2::ZERO,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Record a move at client pixel `(x, y)` inside a `width` x `height` viewport.
    pub fn on_move(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(t) = normalize_pointer(x, y, width, height, self.half_range) {
            self.target = t;
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(POINTER_HALF_RANGE)
    }
}

/// `(x / width - 0.5) * 2 * half_range`, same for y. `None` for empty viewports.
#[inline]
pub fn normalize_pointer(x: f64, y: f64, width: f64, height: f64, half_range: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
        return None;
    }
    let span = 2.0 * half_range as f64;
    Some(Vec2::new(
        ((x / width - 0.5) * span) as f32,
        ((y / height - 0.5) * span) as f32,
    ))
}
