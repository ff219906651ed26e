use crate::animation::RenderSurface;
use crate::constants::MAX_PIXEL_RATIO;
use crate::nav::{NavController, NavSurface};
use crate::state::CameraPose;

/// Viewport size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Pixel ratio used for the backing store, capped to keep fill rate sane.
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Backing store size in physical pixels, at least 1x1.
    pub fn backing_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio();
        let w = (self.width.max(0.0) * r) as u32;
        let h = (self.height.max(0.0) * r) as u32;
        (w.max(1), h.max(1))
    }

    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }
}

/// Applies a viewport change to the render output, the camera and the nav.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResizeCoordinator;

impl ResizeCoordinator {
    pub fn apply<R, N>(
        &self,
        viewport: Viewport,
        camera: &mut CameraPose,
        surface: Option<&mut R>,
        nav: Option<(&mut NavController, &mut N)>,
    ) where
        R: RenderSurface + ?Sized,
        N: NavSurface + ?Sized,
    {
        if let Some(surface) = surface {
            let (w, h) = viewport.backing_size();
            surface.resize(w, h);
        }
        camera.set_viewport(viewport.width, viewport.height);
        if let Some((controller, nav_surface)) = nav {
            controller.evaluate(viewport.width, nav_surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_size_caps_pixel_ratio() {
        let vp = Viewport::new(800.0, 600.0, 3.0);
        assert_eq!(vp.backing_size(), (1600, 1200));
        let vp = Viewport::new(800.0, 600.0, 1.5);
        assert_eq!(vp.backing_size(), (1200, 900));
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let vp = Viewport::new(0.0, 0.0, 1.0);
        assert_eq!(vp.backing_size(), (1, 1));
        assert_eq!(vp.aspect(), 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).pixel_ratio(), 1.0);
    }
}
