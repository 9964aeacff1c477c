use card_core::device::DeviceSignals;
use card_core::viewport::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach `handler` to `event` on `target` for the lifetime of the page.
pub fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

#[inline]
pub fn set_hidden(el: &web::Element, hidden: bool) {
    let cl = el.class_list();
    _ = if hidden {
        cl.add_1("hidden")
    } else {
        cl.remove_1("hidden")
    };
}

/// Visible drawing area in CSS pixels; the visual viewport wins when the
/// browser exposes one (mobile URL bars, pinch zoom).
pub fn viewport_size(window: &web::Window) -> Viewport {
    if let Some(vv) = window.visual_viewport() {
        return Viewport::new(vv.width() as f32, vv.height() as f32);
    }
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

pub fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";
pub const PORTRAIT_QUERY: &str = "(orientation: portrait)";

pub fn device_signals(window: &web::Window) -> DeviceSignals {
    DeviceSignals {
        viewport_width: viewport_size(window).width,
        coarse_pointer: media_matches(window, COARSE_POINTER_QUERY),
        portrait: media_matches(window, PORTRAIT_QUERY),
        prefers_reduced_motion: media_matches(window, REDUCED_MOTION_QUERY),
        device_pixel_ratio: window.device_pixel_ratio() as f32,
    }
}

/// Seed for the scene RNG from the browser's crypto source.
pub fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom failed ({}), falling back to Math.random", e);
            (js_sys::Math::random() * u64::MAX as f64) as u64
        }
    }
}
