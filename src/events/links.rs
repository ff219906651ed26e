//! Smooth in-page anchor scrolling and the protected link notice.

use crate::constants::ANCHOR_SELECTOR;
use crate::dom::{self, Listener};
use starfield_core::{anchor_action, LinkAction, Notifier, ProtectedLink};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&mut self, message: &str) {
        if let Some(w) = web::window() {
            _ = w.alert_with_message(message);
        }
    }
}

fn scroll_to(document: &web::Document, id: &str) {
    if let Some(target) = document.get_element_by_id(id) {
        let opts = web::ScrollIntoViewOptions::new();
        opts.set_behavior(web::ScrollBehavior::Smooth);
        opts.set_block(web::ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// Listeners for every `#` anchor plus the protected link, if present.
///
/// A protected link that is also a `#` anchor gets both listeners.
pub fn wire_links(document: &web::Document, protected_id: &str, notice: &str) -> Vec<Listener> {
    let mut out = Vec::new();

    if let Ok(anchors) = document.query_selector_all(ANCHOR_SELECTOR) {
        for i in 0..anchors.length() {
            let Some(el) = anchors.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
                continue;
            };
            let link = el.clone();
            let doc = document.clone();
            let listener = Listener::new(&el, "click", move |ev: web::Event| {
                ev.prevent_default();
                let href = link.get_attribute("href").unwrap_or_default();
                if let LinkAction::ScrollTo(id) = anchor_action(&href) {
                    scroll_to(&doc, id);
                }
            });
            out.extend(listener);
        }
    }

    let guard = Rc::new(RefCell::new(ProtectedLink::new(notice)));
    let protected = dom::click_listener(document, protected_id, move |ev: web::Event| {
        ev.prevent_default();
        guard.borrow_mut().on_click(&mut AlertNotifier);
    });
    out.extend(protected);

    log::debug!("[links] {} click listeners", out.len());
    out
}
