use crate::dom::Listener;
use crate::frame::{self, App};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer moves overwrite the stage's raw target; the next tick consumes it.
pub fn wire_pointer_move(window: &web::Window, app: Weak<RefCell<App>>) -> Option<Listener> {
    Listener::new(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if let Some(app) = app.upgrade() {
            app.borrow_mut()
                .stage
                .on_pointer_move(ev.client_x() as f64, ev.client_y() as f64);
        }
    })
}

pub fn wire_resize(window: &web::Window, app: Weak<RefCell<App>>) -> Option<Listener> {
    Listener::new(window, "resize", move |_ev: web::Event| {
        if let Some(app) = app.upgrade() {
            frame::handle_resize(&mut app.borrow_mut());
        }
    })
}
