use crate::canvas::CanvasSurface;
use crate::overlay;
use card_core::scene::{LayerKind, Scene, SceneEvent};
use card_core::timing::FrameClock;
use card_core::{DeviceProfile, Viewport};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the animation frame touches.
pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub layers: Vec<(LayerKind, CanvasSurface)>,
    pub gnome_elements: Vec<web::HtmlElement>,
    pub document: web::Document,
    pub clock: FrameClock,
    /// What the canvases and gnome elements were last laid out for.
    pub sized_for: Option<(Viewport, DeviceProfile)>,
    /// Cleared on teardown; the loop stops at the next frame.
    pub alive: Rc<Cell<bool>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let dt = self.clock.tick_at(Instant::now());
        let events = self.scene.borrow_mut().advance(dt);
        self.sync_layout();

        {
            let scene = self.scene.borrow();
            for ev in &events {
                match ev {
                    SceneEvent::GnomesChanged | SceneEvent::FinaleStarted => {
                        overlay::sync_gnomes(&self.gnome_elements, scene.gnomes());
                    }
                    SceneEvent::CardRevealed => {
                        overlay::show_card(&self.document);
                        overlay::update_hud(&self.document, &scene);
                    }
                    SceneEvent::ConfettiStarted => log::debug!("confetti started"),
                    SceneEvent::ConfettiComplete => log::debug!("confetti settled"),
                }
            }
        }

        let mut scene = self.scene.borrow_mut();
        for (kind, surface) in self.layers.iter_mut() {
            // No context yet: skip this layer and retry next frame.
            if !surface.acquire() {
                continue;
            }
            scene.render_layer(*kind, surface);
        }
    }

    /// Resize the canvases and re-place gnome elements after a committed
    /// viewport or profile change.
    pub fn sync_layout(&mut self) {
        let scene = self.scene.borrow();
        let current = (scene.viewport(), scene.profile());
        if self.sized_for == Some(current) {
            return;
        }
        let ratio = scene.quality().pixel_ratio;
        for (_, surface) in self.layers.iter_mut() {
            surface.resize(current.0, ratio);
        }
        overlay::sync_gnomes(&self.gnome_elements, scene.gnomes());
        log::debug!(
            "layers sized to {}x{} at {:.2}x",
            current.0.width,
            current.0.height,
            ratio
        );
        self.sized_for = Some(current);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    let alive = frame_ctx.borrow().alive.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            log::info!("frame loop stopped");
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
