use crate::dom::{self, ListenerSet};
use crate::SharedSphere;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn now_sec() -> f64 {
    instant::now() / 1000.0
}

/// Mouse and pen input; touch-originated pointer events are left to the touch handlers.
#[inline]
fn mouse_like(ev: &web::PointerEvent) -> bool {
    ev.pointer_type() != "touch"
}

pub fn wire_pointer_handlers(
    listeners: &mut ListenerSet,
    container: &web::HtmlElement,
    sphere: &SharedSphere,
) {
    let target: &web::EventTarget = container.as_ref();

    {
        let sphere = sphere.clone();
        let container = container.clone();
        listeners.listen(target, "pointermove", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if !mouse_like(ev) {
                return;
            }
            let local = dom::container_local(&container, ev.client_x() as f64, ev.client_y() as f64);
            sphere.borrow_mut().pointer_move(local);
        });
    }

    {
        let sphere = sphere.clone();
        let container = container.clone();
        listeners.listen(target, "pointerdown", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if !mouse_like(ev) {
                return;
            }
            let local = dom::container_local(&container, ev.client_x() as f64, ev.client_y() as f64);
            sphere.borrow_mut().pointer_down(local);
            dom::set_cursor(&container, "grabbing");
            log::debug!("[input] drag start at ({:.0},{:.0})", local.x, local.y);
        });
    }

    for kind in ["pointerup", "pointerleave"] {
        let sphere = sphere.clone();
        let container = container.clone();
        listeners.listen(target, kind, move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if !mouse_like(ev) {
                return;
            }
            let mut s = sphere.borrow_mut();
            if kind == "pointerleave" {
                s.pointer_leave(now_sec());
            } else {
                s.pointer_up(now_sec());
            }
            dom::set_cursor(&container, "crosshair");
        });
    }
}

pub fn wire_touch_handlers(
    listeners: &mut ListenerSet,
    container: &web::HtmlElement,
    sphere: &SharedSphere,
) {
    let target: &web::EventTarget = container.as_ref();

    {
        let sphere = sphere.clone();
        let container = container.clone();
        listeners.listen_active(target, "touchstart", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
                return;
            };
            let touches = ev.touches();
            if touches.length() != 1 {
                return;
            }
            let Some(touch) = touches.get(0) else {
                return;
            };
            ev.prevent_default();
            let local =
                dom::container_local(&container, touch.client_x() as f64, touch.client_y() as f64);
            sphere.borrow_mut().touch_start(local, 1);
        });
    }

    {
        let sphere = sphere.clone();
        let container = container.clone();
        listeners.listen_active(target, "touchmove", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
                return;
            };
            let touches = ev.touches();
            if touches.length() != 1 || !sphere.borrow().orbit().is_dragging() {
                return;
            }
            let Some(touch) = touches.get(0) else {
                return;
            };
            ev.prevent_default();
            let local =
                dom::container_local(&container, touch.client_x() as f64, touch.client_y() as f64);
            sphere.borrow_mut().touch_move(local, 1);
        });
    }

    {
        let sphere = sphere.clone();
        listeners.listen(target, "touchend", move |_ev| {
            sphere.borrow_mut().touch_end(now_sec());
        });
    }
}

/// Clicking an indicator item turns its marker toward the viewer.
pub fn wire_indicator_clicks(listeners: &mut ListenerSet, sphere: &SharedSphere) {
    let items: Vec<web::Element> = sphere.borrow().overlay().indicators().to_vec();
    for (index, item) in items.iter().enumerate() {
        let sphere = sphere.clone();
        listeners.listen(item.as_ref(), "click", move |_ev| {
            if sphere.borrow_mut().focus_marker(index, now_sec()) {
                log::info!("[input] focus marker {}", index);
            }
        });
    }
}
