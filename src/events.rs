use crate::dom;
use crate::overlay;
use card_core::device::DeviceProfile;
use card_core::{CardError, ClickOutcome, Scene};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

fn refresh_profile(window: &web::Window, scene: &Rc<RefCell<Scene>>) {
    let profile = DeviceProfile::classify(&dom::device_signals(window));
    scene.borrow_mut().set_profile(profile);
}

/// Window and visual-viewport resizes feed the scene's debounce; the device
/// class is re-derived at the same time.
pub fn wire_resize(window: &web::Window, scene: &Rc<RefCell<Scene>>) {
    let mut targets: Vec<web::EventTarget> = vec![window.clone().into()];
    if let Some(vv) = window.visual_viewport() {
        targets.push(vv.into());
    }
    for target in targets {
        let window = window.clone();
        let scene = scene.clone();
        dom::listen(&target, "resize", move |_: web::Event| {
            let size = dom::viewport_size(&window);
            if let Err(e) = scene.borrow_mut().notify_resize(size) {
                log::debug!("resize ignored: {}", e);
            }
            refresh_profile(&window, &scene);
        });
    }
}

/// Live changes to reduced motion, pointer type or orientation.
pub fn wire_media_changes(window: &web::Window, scene: &Rc<RefCell<Scene>>) {
    for query in [
        dom::REDUCED_MOTION_QUERY,
        dom::COARSE_POINTER_QUERY,
        dom::PORTRAIT_QUERY,
    ] {
        let Ok(Some(mql)) = window.match_media(query) else {
            continue;
        };
        let window = window.clone();
        let scene = scene.clone();
        dom::listen(&mql, "change", move |_: web::Event| {
            log::info!("media change: {}", query);
            refresh_profile(&window, &scene);
        });
    }
}

pub fn wire_gnome_clicks(
    document: &web::Document,
    elements: &[web::HtmlElement],
    scene: &Rc<RefCell<Scene>>,
) {
    for (id, el) in elements.iter().enumerate() {
        let document = document.clone();
        let all = elements.to_vec();
        let scene = scene.clone();
        dom::listen(el, "pointerup", move |ev: web::PointerEvent| {
            ev.prevent_default();
            let mut scene = scene.borrow_mut();
            match scene.click_gnome(id) {
                Ok(ClickOutcome::Counted { clicks }) => {
                    log::debug!("gnome {} found ({} total)", id, clicks)
                }
                Ok(ClickOutcome::TargetReached) => log::info!("target reached"),
                Ok(ClickOutcome::Locked) | Ok(ClickOutcome::NotHunting) => return,
                Err(CardError::SceneTornDown) => return,
                Err(e) => {
                    log::warn!("click rejected: {}", e);
                    return;
                }
            }
            overlay::sync_gnomes(&all, scene.gnomes());
            overlay::update_hud(&document, &scene);
        });
    }
}

/// Stop the frame loop and cancel every pending timer when the page goes away.
pub fn wire_pagehide(window: &web::Window, scene: &Rc<RefCell<Scene>>, alive: &Rc<Cell<bool>>) {
    let scene = scene.clone();
    let alive = alive.clone();
    dom::listen(window, "pagehide", move |_: web::Event| {
        alive.set(false);
        scene.borrow_mut().teardown();
    });
}
