#![cfg(target_arch = "wasm32")]
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_core::constants::{
    HERO_ELEMENT_ID, NAV_ELEMENT_ID, PROTECTED_LINK_ID, PROTECTED_LINK_NOTICE,
};
use starfield_core::{Stage, StageConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod nav;
mod render;

use frame::App;

thread_local! {
    static RUNNING: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");

    let Some(document) = dom::window_document() else {
        log::error!("init error: no document");
        return Ok(());
    };
    dom::on_ready(&document, || {
        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
    });
    Ok(())
}

/// Tear the running backdrop down: stop the frame loop, drop all listeners,
/// disconnect the observer and cancel timers.
#[wasm_bindgen]
pub fn stop() {
    if let Some(app) = RUNNING.with(|r| r.borrow_mut().take()) {
        app.borrow_mut().stop();
    }
}

async fn init() -> anyhow::Result<()> {
    if RUNNING.with(|r| r.borrow().is_some()) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let viewport = dom::viewport();
    let mut rng = StdRng::from_entropy();
    let stage = Stage::new(StageConfig::default(), viewport, &mut rng)?;
    let app = Rc::new(RefCell::new(App::new(stage)));

    // Nav first so it is hidden before anything else happens.
    match nav::DomNav::find(&document, NAV_ELEMENT_ID, HERO_ELEMENT_ID, Rc::downgrade(&app)) {
        Some(dom_nav) => {
            let mut a = app.borrow_mut();
            let App { stage, nav, .. } = &mut *a;
            let dom_nav = nav.insert(dom_nav);
            stage.enable_nav(dom_nav);
        }
        None => log::info!("[nav] #{NAV_ELEMENT_ID} or #{HERO_ELEMENT_ID} missing; nav tracking off"),
    }

    {
        let mut a = app.borrow_mut();
        a.listeners.extend(events::wire_resize(&window, Rc::downgrade(&app)));
        a.listeners
            .extend(events::wire_pointer_move(&window, Rc::downgrade(&app)));
        a.listeners.extend(events::wire_links(
            &document,
            PROTECTED_LINK_ID,
            PROTECTED_LINK_NOTICE,
        ));
    }
    RUNNING.with(|r| *r.borrow_mut() = Some(app.clone()));

    let canvas = dom::create_backdrop_canvas(&document)?;
    let (w, h) = viewport.backing_size();
    dom::sync_canvas_backing_size(&canvas, w, h);
    let mut gpu = match render::GpuState::new(&canvas).await {
        Ok(g) => g,
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            return Ok(());
        }
    };

    {
        let mut a = app.borrow_mut();
        if !a.stage.is_running() {
            // stop() arrived while the adapter was being requested
            return Ok(());
        }
        a.stage.attach_surface(&mut gpu);
        a.gpu = Some(gpu);
        // The window may have changed size while awaiting the device.
        frame::handle_resize(&mut a);
    }
    frame::start_loop(&app);
    Ok(())
}
