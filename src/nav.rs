//! Document side of the nav controller: styles, classes, the hero observer
//! and the deferred reveal timer.

use crate::constants::{NAV_HIDDEN_CLASSES, NAV_SHOWN_CLASSES};
use crate::dom;
use crate::frame::App;
use starfield_core::{NavDisplay, NavSurface, RevealToken, VisibilitySample};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

pub struct DomNav {
    nav: web::HtmlElement,
    hero: web::Element,
    app: Weak<RefCell<App>>,
    observer: Option<(web::IntersectionObserver, ObserverCallback)>,
    reveal: Option<(i32, Closure<dyn FnMut()>)>,
}

impl DomNav {
    /// `None` when either element is missing; the nav feature is then off.
    pub fn find(document: &web::Document, nav_id: &str, hero_id: &str, app: Weak<RefCell<App>>) -> Option<Self> {
        let hero = document.get_element_by_id(hero_id)?;
        let nav = document
            .get_element_by_id(nav_id)?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        Some(Self {
            nav,
            hero,
            app,
            observer: None,
            reveal: None,
        })
    }

    fn set_classes(&self, add: &[&str], remove: &[&str]) {
        let list = self.nav.class_list();
        for c in remove {
            _ = list.remove_1(c);
        }
        for c in add {
            _ = list.add_1(c);
        }
    }
}

impl NavSurface for DomNav {
    fn set_display(&mut self, display: NavDisplay) {
        let value = match display {
            NavDisplay::None => "none",
            NavDisplay::Flex => "flex",
        };
        _ = self.nav.style().set_property("display", value);
    }

    fn set_revealed(&mut self, revealed: bool) {
        if revealed {
            self.set_classes(&NAV_SHOWN_CLASSES, &NAV_HIDDEN_CLASSES);
        } else {
            self.set_classes(&NAV_HIDDEN_CLASSES, &NAV_SHOWN_CLASSES);
        }
    }

    fn attach_observer(&mut self, thresholds: &[f32]) {
        if self.observer.is_some() {
            return;
        }
        let app = self.app.clone();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                let Some(app) = app.upgrade() else {
                    return;
                };
                let width = dom::viewport().width;
                let mut app = app.borrow_mut();
                let App { stage, nav, .. } = &mut *app;
                let Some(nav) = nav.as_mut() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let sample = VisibilitySample::new(
                        entry.intersection_ratio() as f32,
                        entry.is_intersecting(),
                    );
                    stage.on_visibility(sample, width, nav);
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let ratios = js_sys::Array::new();
        for r in thresholds {
            ratios.push(&(*r as f64).into());
        }
        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&ratios);
        match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&self.hero);
                log::info!("[nav] observer attached");
                self.observer = Some((observer, callback));
            }
            Err(e) => log::error!("IntersectionObserver error: {:?}", e),
        }
    }

    fn detach_observer(&mut self) {
        if let Some((observer, _callback)) = self.observer.take() {
            observer.disconnect();
            log::info!("[nav] observer detached");
        }
    }

    fn schedule_reveal(&mut self, token: RevealToken, delay_ms: u32) {
        self.cancel_reveal();
        let Some(window) = web::window() else {
            return;
        };
        let app = self.app.clone();
        let callback = Closure::wrap(Box::new(move || {
            let Some(app) = app.upgrade() else {
                return;
            };
            let mut app = app.borrow_mut();
            let App { stage, nav, .. } = &mut *app;
            if let Some(nav) = nav.as_mut() {
                stage.on_reveal(token, nav);
            }
        }) as Box<dyn FnMut()>);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(id) => self.reveal = Some((id, callback)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    }

    fn cancel_reveal(&mut self) {
        if let Some((id, _callback)) = self.reveal.take() {
            if let Some(window) = web::window() {
                window.clear_timeout_with_handle(id);
            }
        }
    }
}
