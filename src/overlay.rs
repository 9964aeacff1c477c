//! DOM side of the scene: gnome elements, the HUD and the revealed card.

use crate::dom;
use card_core::{GnomeSprite, Scene};
use wasm_bindgen::JsCast;
use web_sys as web;

const GNOME_CONTAINER_ID: &str = "gnomes";
const HUD_ID: &str = "hud";
const HUD_COUNTER_ID: &str = "hud-counter";
const HUD_HINT_ID: &str = "hud-hint";
const CARD_ID: &str = "card";

pub fn gnome_element_id(id: usize) -> String {
    format!("gnome-{}", id)
}

/// Create one element per sprite inside the gnome container. Existing
/// elements are reused.
pub fn build_gnomes(document: &web::Document, gnomes: &[GnomeSprite]) -> anyhow::Result<Vec<web::HtmlElement>> {
    let container = document
        .get_element_by_id(GNOME_CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", GNOME_CONTAINER_ID))?;
    let mut out = Vec::with_capacity(gnomes.len());
    for g in gnomes {
        let dom_id = gnome_element_id(g.id);
        let el = match document.get_element_by_id(&dom_id) {
            Some(el) => el,
            None => {
                let el = document
                    .create_element("div")
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el.set_id(&dom_id);
                el.set_class_name("gnome");
                _ = el.set_attribute("role", "button");
                _ = el.set_attribute("aria-label", "Gnome");
                _ = el.set_attribute("data-gnome-id", &g.id.to_string());
                container
                    .append_child(&el)
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el
            }
        };
        let el = el
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        out.push(el);
    }
    Ok(out)
}

/// Mirror sprite positions, float parameters and visibility into the DOM.
pub fn sync_gnomes(elements: &[web::HtmlElement], gnomes: &[GnomeSprite]) {
    for (el, g) in elements.iter().zip(gnomes) {
        let style = el.style();
        _ = style.set_property("width", &format!("{}px", g.size.x));
        _ = style.set_property("height", &format!("{}px", g.size.y));
        _ = style.set_property(
            "transform",
            &format!("translate({:.1}px, {:.1}px)", g.pos.x, g.pos.y),
        );
        match g.float {
            Some(f) => {
                for (name, value) in f.style_vars() {
                    _ = style.set_property(name, &value);
                }
                _ = el.class_list().add_1("floating");
            }
            None => {
                _ = el.class_list().remove_1("floating");
            }
        }
        dom::set_hidden(el, !g.visible);
        _ = if g.locked {
            el.class_list().add_1("found")
        } else {
            el.class_list().remove_1("found")
        };
    }
}

pub fn update_hud(document: &web::Document, scene: &Scene) {
    if let Some(el) = document.get_element_by_id(HUD_COUNTER_ID) {
        el.set_text_content(Some(&scene.hud_text()));
    }
    if let Some(el) = document.get_element_by_id(HUD_HINT_ID) {
        dom::set_hidden(&el, !scene.show_hint());
    }
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        dom::set_hidden(&el, scene.card_visible());
    }
}

pub fn show_card(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CARD_ID) {
        dom::set_hidden(&el, false);
        _ = el.class_list().add_1("revealed");
        _ = el.set_attribute("aria-hidden", "false");
    }
}
