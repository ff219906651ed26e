// Recording test doubles shared by the integration tests.

#![allow(dead_code)]

use starfield_core::*;

#[derive(Default)]
pub struct RecordingSurface {
    pub loads: usize,
    pub loaded_layers: usize,
    pub size: Option<(u32, u32)>,
    pub resizes: usize,
    pub renders: usize,
    pub last_dirty: Vec<bool>,
    pub last_eye: Option<glam::Vec3>,
    pub fail_next: bool,
}

impl RenderSurface for RecordingSurface {
    type Error = &'static str;

    fn load_field(&mut self, layers: &[StarLayer]) {
        self.loads += 1;
        self.loaded_layers = layers.len();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes += 1;
        self.size = Some((width, height));
    }

    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), Self::Error> {
        self.renders += 1;
        self.last_dirty = frame.layers.iter().map(|l| l.sizes_dirty).collect();
        self.last_eye = Some(frame.camera.eye);
        if std::mem::take(&mut self.fail_next) {
            return Err("surface lost");
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RecordingNav {
    pub display: NavDisplay,
    pub revealed: bool,
    pub observers: usize,
    pub attaches: usize,
    pub detaches: usize,
    pub scheduled: Vec<RevealToken>,
    pub cancels: usize,
}

impl Default for RecordingNav {
    fn default() -> Self {
        Self {
            // the page starts with the nav visible until the controller hides it
            display: NavDisplay::Flex,
            revealed: true,
            observers: 0,
            attaches: 0,
            detaches: 0,
            scheduled: Vec::new(),
            cancels: 0,
        }
    }
}

impl RecordingNav {
    /// Fully shown: in flow and revealed.
    pub fn shown(&self) -> bool {
        self.display == NavDisplay::Flex && self.revealed
    }

    pub fn hidden(&self) -> bool {
        self.display == NavDisplay::None
    }

    pub fn last_token(&self) -> Option<RevealToken> {
        self.scheduled.last().copied()
    }
}

impl NavSurface for RecordingNav {
    fn set_display(&mut self, display: NavDisplay) {
        self.display = display;
    }

    fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed;
    }

    fn attach_observer(&mut self, _thresholds: &[f32]) {
        self.observers += 1;
        self.attaches += 1;
    }

    fn detach_observer(&mut self) {
        self.observers -= 1;
        self.detaches += 1;
    }

    fn schedule_reveal(&mut self, token: RevealToken, _delay_ms: u32) {
        self.scheduled.push(token);
    }

    fn cancel_reveal(&mut self) {
        self.cancels += 1;
    }
}

#[derive(Default)]
pub struct CountingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for CountingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
