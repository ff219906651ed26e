//! Shared app state and the requestAnimationFrame loop.

use crate::dom::{self, Listener};
use crate::nav::DomNav;
use crate::render::GpuState;
use starfield_core::Stage;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct App {
    pub stage: Stage,
    pub gpu: Option<GpuState>,
    pub nav: Option<DomNav>,
    pub listeners: Vec<Listener>,
    raf: FrameCallback,
    raf_id: Option<i32>,
}

impl App {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            gpu: None,
            nav: None,
            listeners: Vec::new(),
            raf: Rc::new(RefCell::new(None)),
            raf_id: None,
        }
    }

    /// Halt the loop, remove every listener, release the observer and timers.
    pub fn stop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's reference to itself.
        self.raf.borrow_mut().take();
        self.listeners.clear();
        self.stage.stop(self.nav.as_mut());
    }
}

/// Start ticking once per display refresh until the stage stops.
pub fn start_loop(app: &Rc<RefCell<App>>) {
    let weak: Weak<RefCell<App>> = Rc::downgrade(app);
    let raf = app.borrow().raf.clone();
    let raf_inner = raf.clone();
    *raf.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(app) = weak.upgrade() else {
            return;
        };
        let mut app = app.borrow_mut();
        app.raf_id = None;
        let App { stage, gpu, .. } = &mut *app;
        let keep_going = match gpu.as_mut() {
            Some(gpu) => stage.frame(gpu),
            None => false,
        };
        if keep_going {
            app.raf_id = request_frame(&raf_inner);
        }
    }) as Box<dyn FnMut()>));
    let id = request_frame(&raf);
    app.borrow_mut().raf_id = id;
}

fn request_frame(raf: &FrameCallback) -> Option<i32> {
    let window = web::window()?;
    let cb = raf.borrow();
    let cb = cb.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
        .ok()
}

/// Resize handler: backing store, camera aspect, nav re-evaluation.
pub fn handle_resize(app: &mut App) {
    let viewport = dom::viewport();
    let App {
        stage, gpu, nav, ..
    } = app;
    stage.on_resize(viewport, gpu.as_mut(), nav.as_mut());
}
