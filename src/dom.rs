use crate::core::projector::build_aligned;
use crate::core::{Marker, OverlaySink, ScreenTransform, Viewport};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CONTAINER_ID: &str = "sphere-canvas-container";
pub const CARDS_ID: &str = "sphereProjectCards";
pub const INDICATOR_ID: &str = "sphereProjectIndicator";

#[inline]
pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Current window and container size, in CSS pixels.
pub fn read_viewport(container: &web::HtmlElement) -> Viewport {
    let (ww, wh, dpr) = web::window()
        .map(|w| {
            let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
            };
            (px(w.inner_width()), px(w.inner_height()), w.device_pixel_ratio() as f32)
        })
        .unwrap_or((0.0, 0.0, 1.0));
    Viewport::new(
        ww,
        wh,
        container.client_width() as f32,
        container.client_height() as f32,
    )
    .with_pixel_ratio(dpr)
}

/// Client coordinates to container-local pixels.
#[inline]
pub fn container_local(container: &web::HtmlElement, client_x: f64, client_y: f64) -> Vec2 {
    let rect = container.get_bounding_client_rect();
    Vec2::new(
        (client_x - rect.left()) as f32,
        (client_y - rect.top()) as f32,
    )
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w, h) = viewport.backing_size();
    canvas.set_width(w);
    canvas.set_height(h);
}

pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = style.set_property("display", "block");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

pub fn set_cursor(container: &web::HtmlElement, cursor: &str) {
    _ = container.style().set_property("cursor", cursor);
}

// ---------------- Listener bookkeeping ----------------

struct Registered {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Event listeners that can all be removed again on teardown.
#[derive(Default)]
pub struct ListenerSet {
    registered: Vec<Registered>,
}

impl ListenerSet {
    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.listen_with(target, kind, false, handler);
    }

    /// Like `listen`, but registered non-passive so the handler may call `prevent_default`.
    pub fn listen_active(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.listen_with(target, kind, true, handler);
    }

    fn listen_with(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        active: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let res = if active {
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
        } else {
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        };
        if let Err(e) = res {
            log::warn!("[dom] could not listen for {}: {:?}", kind, e);
            return;
        }
        self.registered.push(Registered {
            target: target.clone(),
            kind,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn clear(&mut self) {
        for r in self.registered.drain(..) {
            _ = r
                .target
                .remove_event_listener_with_callback(r.kind, r.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}

// ---------------- Overlay cards ----------------

/// Marker cards and indicator items owned by the sphere.
pub struct DomOverlay {
    document: web::Document,
    cards_parent: web::Element,
    indicator_parent: web::Element,
    cards: Vec<web::HtmlElement>,
    indicators: Vec<web::Element>,
    last: Vec<Option<ScreenTransform>>,
}

impl DomOverlay {
    pub fn new(document: &web::Document, container: &web::HtmlElement) -> Self {
        let parent = |id: &str| -> web::Element {
            if let Some(el) = document.get_element_by_id(id) {
                return el;
            }
            // Fall back to a fresh child of the container.
            match document.create_element("div") {
                Ok(el) => {
                    el.set_id(id);
                    _ = container.append_child(&el);
                    el
                }
                Err(_) => container.clone().into(),
            }
        };
        Self {
            document: document.clone(),
            cards_parent: parent(CARDS_ID),
            indicator_parent: parent(INDICATOR_ID),
            cards: Vec::new(),
            indicators: Vec::new(),
            last: Vec::new(),
        }
    }

    pub fn indicators(&self) -> &[web::Element] {
        &self.indicators
    }

    pub fn remove_all(&mut self) {
        for card in self.cards.drain(..) {
            card.remove();
        }
        for item in self.indicators.drain(..) {
            item.remove();
        }
        self.last.clear();
    }

    fn create_card(&self, marker: &Marker) -> Option<web::HtmlElement> {
        let card = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        card.set_class_name("sphere-project-card hidden");
        card.set_inner_html(&crate::core::projects::card_html(&marker.project));
        _ = card.set_attribute("data-index", &marker.index.to_string());
        Some(card)
    }

    fn create_indicator(&self, marker: &Marker) -> Option<web::Element> {
        let item = self.document.create_element("div").ok()?;
        item.set_class_name("sphere-indicator-item");
        let title = self.document.create_element("span").ok()?;
        title.set_class_name("sphere-indicator-title");
        title.set_text_content(Some(&marker.project.title));
        let dot = self.document.create_element("div").ok()?;
        dot.set_class_name("sphere-indicator-dot");
        _ = item.append_child(&title);
        _ = item.append_child(&dot);
        Some(item)
    }
}

impl OverlaySink for DomOverlay {
    fn mount(&mut self, markers: &[Marker]) {
        self.remove_all();
        // Elements stay detached until every marker has both, so a failure
        // leaves nothing behind and indices never drift.
        let built = build_aligned(markers, |marker| {
            Some((self.create_card(marker)?, self.create_indicator(marker)?))
        });
        let pairs = match built {
            Ok(pairs) => pairs,
            Err(i) => {
                log::warn!("[dom] could not create overlay for marker {}, overlay disabled", i);
                return;
            }
        };
        for (card, item) in pairs {
            _ = self.cards_parent.append_child(&card);
            _ = self.indicator_parent.append_child(&item);
            self.cards.push(card);
            self.indicators.push(item);
            self.last.push(None);
        }
    }

    fn apply(&mut self, marker: usize, t: &ScreenTransform) {
        let (Some(card), Some(item), Some(last)) = (
            self.cards.get(marker),
            self.indicators.get(marker),
            self.last.get_mut(marker),
        ) else {
            return;
        };
        if last.as_ref() == Some(t) {
            return;
        }
        let style = card.style();
        _ = style.set_property("left", &format!("{:.1}px", t.left));
        _ = style.set_property("top", &format!("{:.1}px", t.top));
        _ = style.set_property("opacity", &format!("{:.3}", t.opacity));
        _ = style.set_property("transform", &t.css_transform());
        _ = style.set_property("z-index", &t.z_index.to_string());
        _ = style.set_property("pointer-events", if t.visible { "auto" } else { "none" });

        let cl = card.class_list();
        _ = cl.toggle_with_force("visible", t.visible);
        _ = cl.toggle_with_force("hidden", !t.visible);
        _ = item.class_list().toggle_with_force("active", t.indicator_active);
        *last = Some(*t);
    }
}
