//! Viewport-aware navigation visibility.
//!
//! ```text
//!   width <  breakpoint            width >= breakpoint
//!  ┌──────────┐  resize(wide)   ┌──────────────────────────────┐
//!  │ Disabled │ ──────────────▶ │ Enabled                      │
//!  │ (hidden, │ ◀────────────── │   Hidden ◀──── prominent     │
//!  │  no obs) │  resize(narrow) │   Visible ◀─── not prominent │
//!  └──────────┘                 └──────────────────────────────┘
//! ```
//!
//! Entering `Enabled` attaches the one observer, leaving it detaches it.
//! Resizes that stay inside a regime do nothing.

use crate::constants::*;
use crate::error::ConfigError;

/// When the tracked hero region still counts as prominent (nav hidden).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisibilityThreshold {
    /// Any intersection at all keeps the nav hidden.
    AnyIntersection,
    /// The nav stays hidden while the visible ratio is strictly above this.
    RatioAbove(f32),
}

impl VisibilityThreshold {
    #[inline]
    pub fn hides_nav(&self, sample: VisibilitySample) -> bool {
        match *self {
            Self::AnyIntersection => sample.is_intersecting || sample.ratio > 0.0,
            Self::RatioAbove(x) => sample.ratio > x,
        }
    }
}

impl Default for VisibilityThreshold {
    fn default() -> Self {
        Self::RatioAbove(NAV_HIDE_RATIO)
    }
}

/// One observer report for the hero region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilitySample {
    pub ratio: f32,
    pub is_intersecting: bool,
}

impl VisibilitySample {
    pub fn new(ratio: f32, is_intersecting: bool) -> Self {
        Self {
            ratio,
            is_intersecting,
        }
    }

    pub fn from_ratio(ratio: f32) -> Self {
        Self::new(ratio, ratio > 0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavConfig {
    pub breakpoint_px: f64,
    pub threshold: VisibilityThreshold,
    /// Ratios at which the observer reports.
    pub observer_thresholds: Vec<f32>,
    pub reveal_delay_ms: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: NAV_BREAKPOINT_PX,
            threshold: VisibilityThreshold::default(),
            observer_thresholds: NAV_OBSERVER_THRESHOLDS.to_vec(),
            reveal_delay_ms: NAV_REVEAL_DELAY_MS,
        }
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.breakpoint_px.is_finite() && self.breakpoint_px > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "breakpoint_px",
                value: self.breakpoint_px,
            });
        }
        if let VisibilityThreshold::RatioAbove(x) = self.threshold {
            if !(0.0..=1.0).contains(&x) {
                return Err(ConfigError::RatioThreshold(x));
            }
        }
        if let Some(&bad) = self
            .observer_thresholds
            .iter()
            .find(|r| !(0.0..=1.0).contains(*r))
        {
            return Err(ConfigError::RatioThreshold(bad));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavVisibility {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavMode {
    Disabled,
    Enabled(NavVisibility),
}

/// CSS display applied to the nav element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDisplay {
    None,
    Flex,
}

/// Identifies one deferred reveal; stale tokens are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RevealToken(pub u64);

/// Document-side effects the controller drives.
pub trait NavSurface {
    fn set_display(&mut self, display: NavDisplay);

    /// `false` applies the hidden markers (transparent, offset, not interactive);
    /// `true` swaps them for the shown markers.
    fn set_revealed(&mut self, revealed: bool);

    /// Start observing the hero region with the given report ratios.
    fn attach_observer(&mut self, thresholds: &[f32]);

    fn detach_observer(&mut self);

    /// Call back into [`NavController::on_reveal`] with `token` after `delay_ms`.
    fn schedule_reveal(&mut self, token: RevealToken, delay_ms: u32);

    fn cancel_reveal(&mut self);
}

pub struct NavController {
    config: NavConfig,
    mode: Option<NavMode>,
    observer_attached: bool,
    pending_reveal: Option<RevealToken>,
    next_token: u64,
}

impl NavController {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            mode: None,
            observer_attached: false,
            pending_reveal: None,
            next_token: 0,
        }
    }

    /// `None` until [`init`](Self::init) has run.
    pub fn mode(&self) -> Option<NavMode> {
        self.mode
    }

    pub fn observer_attached(&self) -> bool {
        self.observer_attached
    }

    pub fn pending_reveal(&self) -> Option<RevealToken> {
        self.pending_reveal
    }

    #[inline]
    pub fn is_narrow(&self, width: f64) -> bool {
        width < self.config.breakpoint_px
    }

    /// Force the nav hidden, then evaluate the current width.
    pub fn init<S: NavSurface + ?Sized>(&mut self, width: f64, surface: &mut S) {
        surface.set_display(NavDisplay::None);
        surface.set_revealed(false);
        self.evaluate(width, surface);
    }

    /// Resize entry point.
    pub fn evaluate<S: NavSurface + ?Sized>(&mut self, width: f64, surface: &mut S) {
        if self.is_narrow(width) {
            if self.mode == Some(NavMode::Disabled) {
                return;
            }
            surface.set_display(NavDisplay::None);
            surface.set_revealed(false);
            self.cancel_pending(surface);
            if self.observer_attached {
                surface.detach_observer();
                self.observer_attached = false;
            }
            log::debug!("[nav] disabled at width {width}");
            self.mode = Some(NavMode::Disabled);
            return;
        }

        if matches!(self.mode, Some(NavMode::Enabled(_))) {
            return;
        }
        if !self.observer_attached {
            surface.attach_observer(&self.config.observer_thresholds);
            self.observer_attached = true;
        }
        log::debug!("[nav] enabled at width {width}");
        // Actual visibility arrives with the observer's first report.
        self.mode = Some(NavMode::Enabled(NavVisibility::Hidden));
    }

    /// Observer report for the hero region; `width` is read at callback time.
    pub fn on_visibility<S: NavSurface + ?Sized>(
        &mut self,
        sample: VisibilitySample,
        width: f64,
        surface: &mut S,
    ) {
        if self.is_narrow(width) {
            surface.set_display(NavDisplay::None);
            surface.set_revealed(false);
            self.cancel_pending(surface);
            if let Some(NavMode::Enabled(_)) = self.mode {
                self.mode = Some(NavMode::Enabled(NavVisibility::Hidden));
            }
            return;
        }
        let Some(NavMode::Enabled(current)) = self.mode else {
            // Report from an observer that has already been released.
            return;
        };

        if self.config.threshold.hides_nav(sample) {
            if current == NavVisibility::Hidden {
                return;
            }
            self.cancel_pending(surface);
            surface.set_display(NavDisplay::None);
            surface.set_revealed(false);
            self.mode = Some(NavMode::Enabled(NavVisibility::Hidden));
        } else {
            if current == NavVisibility::Visible {
                return;
            }
            surface.set_display(NavDisplay::Flex);
            let token = RevealToken(self.next_token);
            self.next_token += 1;
            self.pending_reveal = Some(token);
            surface.schedule_reveal(token, self.config.reveal_delay_ms);
            self.mode = Some(NavMode::Enabled(NavVisibility::Visible));
        }
    }

    /// Second half of the show transition, after layout has settled.
    pub fn on_reveal<S: NavSurface + ?Sized>(&mut self, token: RevealToken, surface: &mut S) {
        if self.pending_reveal != Some(token) {
            return;
        }
        self.pending_reveal = None;
        if self.mode == Some(NavMode::Enabled(NavVisibility::Visible)) {
            surface.set_revealed(true);
        }
    }

    /// Drop the observer and any pending reveal; used on teardown.
    pub fn release<S: NavSurface + ?Sized>(&mut self, surface: &mut S) {
        self.cancel_pending(surface);
        if self.observer_attached {
            surface.detach_observer();
            self.observer_attached = false;
        }
    }

    fn cancel_pending<S: NavSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.pending_reveal.take().is_some() {
            surface.cancel_reveal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_predicates() {
        let above = VisibilityThreshold::RatioAbove(0.1);
        assert!(above.hides_nav(VisibilitySample::from_ratio(0.5)));
        assert!(!above.hides_nav(VisibilitySample::from_ratio(0.1)));
        assert!(!above.hides_nav(VisibilitySample::from_ratio(0.05)));

        let any = VisibilityThreshold::AnyIntersection;
        assert!(any.hides_nav(VisibilitySample::from_ratio(0.01)));
        assert!(any.hides_nav(VisibilitySample::new(0.0, true)));
        assert!(!any.hides_nav(VisibilitySample::new(0.0, false)));
    }

    #[test]
    fn config_validation() {
        assert!(NavConfig::default().validate().is_ok());
        let cfg = NavConfig {
            threshold: VisibilityThreshold::RatioAbove(1.5),
            ..NavConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::RatioThreshold(1.5)));
        let cfg = NavConfig {
            breakpoint_px: 0.0,
            ..NavConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
