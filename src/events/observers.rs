use crate::core::{Theme, ThemeSignal};
use crate::dom::{self, ListenerSet};
use crate::SharedSphere;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const THEME_ATTRIBUTE: &str = "data-theme";
const VISIBILITY_THRESHOLD: f64 = 0.1;

pub fn read_theme(document: &web::Document) -> Theme {
    let value = document
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    Theme::from_attribute(value.as_deref())
}

/// Observers that must be disconnected on teardown.
#[derive(Default)]
pub struct Observers {
    mutation: Option<(web::MutationObserver, Closure<dyn FnMut(js_sys::Array)>)>,
    intersection: Option<(web::IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>,
}

impl Observers {
    pub fn disconnect(&mut self) {
        if let Some((observer, _cb)) = self.mutation.take() {
            observer.disconnect();
        }
        if let Some((observer, _cb)) = self.intersection.take() {
            observer.disconnect();
        }
    }
}

impl Drop for Observers {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Watch the document's theme attribute and forward changes through `signal`.
pub fn observe_theme(
    observers: &mut Observers,
    document: &web::Document,
    signal: Rc<RefCell<ThemeSignal>>,
) -> anyhow::Result<()> {
    let root = document
        .document_element()
        .ok_or_else(|| anyhow::anyhow!("no document element"))?;
    let doc = document.clone();
    let callback = Closure::wrap(Box::new(move |_records: js_sys::Array| {
        let theme = read_theme(&doc);
        signal.borrow_mut().set(theme);
    }) as Box<dyn FnMut(js_sys::Array)>);

    let observer = web::MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let init = web::MutationObserverInit::new();
    init.set_attributes(true);
    let filter = js_sys::Array::of1(&JsValue::from_str(THEME_ATTRIBUTE));
    init.set_attribute_filter(&filter);
    observer
        .observe_with_options(&root, &init)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    observers.mutation = Some((observer, callback));
    Ok(())
}

/// Toggle the frame gate as the container scrolls in and out of view.
pub fn observe_visibility(
    observers: &mut Observers,
    container: &web::HtmlElement,
    sphere: &SharedSphere,
) -> anyhow::Result<()> {
    let sphere = sphere.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                sphere.borrow_mut().set_visible(entry.is_intersecting());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    observer.observe(container);
    observers.intersection = Some((observer, callback));
    Ok(())
}

/// Recompute camera preset and backing size on window resize.
pub fn wire_resize(
    listeners: &mut ListenerSet,
    container: &web::HtmlElement,
    canvas: &web::HtmlCanvasElement,
    sphere: &SharedSphere,
) {
    let Some(window) = web::window() else {
        return;
    };
    let sphere = sphere.clone();
    let container = container.clone();
    let canvas = canvas.clone();
    listeners.listen(window.as_ref(), "resize", move |_ev| {
        let viewport = dom::read_viewport(&container);
        dom::sync_canvas_backing_size(&canvas, &viewport);
        sphere.borrow_mut().resize(viewport);
    });
}
