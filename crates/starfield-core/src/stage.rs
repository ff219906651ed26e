//! Owns every piece of backdrop state and routes host signals to it.
//!
//! The host (browser glue or a test) forwards pointer, resize, visibility,
//! reveal-timer and refresh signals here. After [`Stage::stop`] every entry
//! point is a no-op and [`Stage::frame`] reports that no further frame should
//! be scheduled.

use crate::animation::{Animator, MotionConfig, RenderSurface};
use crate::constants::POINTER_HALF_RANGE;
use crate::error::ConfigError;
use crate::field::{generate_field, FieldConfig};
use crate::nav::{NavConfig, NavController, NavMode, NavSurface, RevealToken, VisibilitySample};
use crate::pointer::PointerTracker;
use crate::resize::{ResizeCoordinator, Viewport};
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct StageConfig {
    pub field: FieldConfig,
    pub motion: MotionConfig,
    pub nav: NavConfig,
    pub pointer_half_range: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            motion: MotionConfig::default(),
            nav: NavConfig::default(),
            pointer_half_range: POINTER_HALF_RANGE,
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.motion.validate()?;
        self.nav.validate()?;
        if !(self.pointer_half_range.is_finite() && self.pointer_half_range > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "pointer_half_range",
                value: self.pointer_half_range as f64,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Stopped,
}

pub struct Stage {
    field: FieldConfig,
    nav_config: NavConfig,
    animator: Animator,
    pointer: PointerTracker,
    nav: Option<NavController>,
    resize: ResizeCoordinator,
    viewport: Viewport,
    lifecycle: Lifecycle,
}

impl Stage {
    pub fn new<R: Rng + ?Sized>(
        config: StageConfig,
        viewport: Viewport,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let StageConfig {
            field,
            motion,
            nav,
            pointer_half_range,
        } = config;
        let layers = generate_field(&field, rng);
        let animator = Animator::new(motion, layers, |i| field.twinkles(i), viewport.aspect());
        log::info!(
            "[stage] started: {} layers, {} points, viewport {}x{}",
            field.layers.len(),
            field.total_points(),
            viewport.width,
            viewport.height
        );
        Ok(Self {
            field,
            nav_config: nav,
            animator,
            pointer: PointerTracker::new(pointer_half_range),
            nav: None,
            resize: ResizeCoordinator,
            viewport,
            lifecycle: Lifecycle::Running,
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn nav_mode(&self) -> Option<NavMode> {
        self.nav.as_ref().and_then(|n| n.mode())
    }

    pub fn nav(&self) -> Option<&NavController> {
        self.nav.as_ref()
    }

    /// Upload the field and size the output for the current viewport.
    pub fn attach_surface<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.load_field(self.animator.layers());
        let (w, h) = self.viewport.backing_size();
        surface.resize(w, h);
    }

    /// Start the nav controller. Hosts that lack the nav or hero element
    /// simply never call this.
    pub fn enable_nav<N: NavSurface + ?Sized>(&mut self, surface: &mut N) {
        if !self.is_running() || self.nav.is_some() {
            return;
        }
        let mut nav = NavController::new(self.nav_config.clone());
        nav.init(self.viewport.width, surface);
        self.nav = Some(nav);
    }

    /// Throw the layer set away and build a new one.
    pub fn regenerate<R, S>(&mut self, rng: &mut R, surface: Option<&mut S>)
    where
        R: Rng + ?Sized,
        S: RenderSurface + ?Sized,
    {
        if !self.is_running() {
            return;
        }
        let layers = generate_field(&self.field, rng);
        let field = &self.field;
        self.animator.replace_field(layers, |i| field.twinkles(i));
        if let Some(surface) = surface {
            surface.load_field(self.animator.layers());
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        if !self.is_running() {
            return;
        }
        self.pointer
            .on_move(client_x, client_y, self.viewport.width, self.viewport.height);
    }

    pub fn on_resize<S, N>(&mut self, viewport: Viewport, surface: Option<&mut S>, nav_surface: Option<&mut N>)
    where
        S: RenderSurface + ?Sized,
        N: NavSurface + ?Sized,
    {
        if !self.is_running() {
            return;
        }
        self.viewport = viewport;
        let nav = match (self.nav.as_mut(), nav_surface) {
            (Some(controller), Some(ns)) => Some((controller, ns)),
            _ => None,
        };
        self.resize
            .apply(viewport, self.animator.camera_mut(), surface, nav);
    }

    /// Observer report; `width` is the viewport width read at callback time.
    pub fn on_visibility<N: NavSurface + ?Sized>(
        &mut self,
        sample: VisibilitySample,
        width: f64,
        nav_surface: &mut N,
    ) {
        if !self.is_running() {
            return;
        }
        if let Some(nav) = self.nav.as_mut() {
            nav.on_visibility(sample, width, nav_surface);
        }
    }

    pub fn on_reveal<N: NavSurface + ?Sized>(&mut self, token: RevealToken, nav_surface: &mut N) {
        if !self.is_running() {
            return;
        }
        if let Some(nav) = self.nav.as_mut() {
            nav.on_reveal(token, nav_surface);
        }
    }

    /// One display refresh. Returns `true` while the next frame should be scheduled.
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.is_running() {
            return false;
        }
        if let Err(e) = self.animator.tick(self.pointer.target(), surface) {
            log::warn!("render error: {:?}", e);
        }
        true
    }

    /// Release the observer and pending timers and halt the loop. Idempotent.
    pub fn stop<N: NavSurface + ?Sized>(&mut self, nav_surface: Option<&mut N>) {
        if !self.is_running() {
            return;
        }
        if let (Some(nav), Some(ns)) = (self.nav.as_mut(), nav_surface) {
            nav.release(ns);
        }
        self.lifecycle = Lifecycle::Stopped;
        log::info!("[stage] stopped after {} ticks", self.animator.ticks());
    }
}
