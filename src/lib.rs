#![cfg(target_arch = "wasm32")]
//! Browser host for the greeting card: one 2D canvas per effect layer, DOM
//! gnomes and HUD, driven by `requestAnimationFrame`.
//!
//! The page provides `#layer-blooms`, `#layer-fireworks` and `#layer-confetti`
//! canvases, a `#gnomes` container, the `#hud` with `#hud-counter` and
//! `#hud-hint`, and a hidden `#card`.

use card_core::device::DeviceProfile;
use card_core::scene::LayerKind;
use card_core::timing::FrameClock;
use card_core::{Scene, SceneConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;
mod overlay;

fn layer_canvas_id(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Blooms => "layer-blooms",
        LayerKind::Fireworks => "layer-fireworks",
        LayerKind::Confetti => "layer-confetti",
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("greeting card starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let signals = dom::device_signals(&window);
    let profile = DeviceProfile::classify(&signals);
    log::info!("device: {:?} (signals {:?})", profile, signals);

    let viewport = dom::viewport_size(&window);
    let scene = Rc::new(RefCell::new(Scene::new(
        SceneConfig::default(),
        profile,
        viewport,
        dom::random_seed(),
    )));

    let mut layers = Vec::with_capacity(LayerKind::ALL.len());
    for kind in LayerKind::ALL {
        match canvas::CanvasSurface::from_id(&document, layer_canvas_id(kind)) {
            Ok(surface) => layers.push((kind, surface)),
            Err(e) => log::warn!("{:?} layer disabled: {}", kind, e),
        }
    }

    let gnome_elements = overlay::build_gnomes(&document, scene.borrow().gnomes())?;
    overlay::update_hud(&document, &scene.borrow());

    let alive = Rc::new(Cell::new(true));
    events::wire_resize(&window, &scene);
    events::wire_media_changes(&window, &scene);
    events::wire_gnome_clicks(&document, &gnome_elements, &scene);
    events::wire_pagehide(&window, &scene, &alive);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        layers,
        gnome_elements,
        document,
        clock: FrameClock::new(),
        sized_for: None,
        alive,
    }));
    frame_ctx.borrow_mut().sync_layout();
    frame::start_loop(frame_ctx);
    Ok(())
}
