use crate::core::{FrameCallback, FrameHandle, Scheduler};
use crate::SharedSphere;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn now_sec() -> f64 {
    instant::now() / 1000.0
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drives callbacks from `requestAnimationFrame` until their handle is cancelled.
#[derive(Default)]
pub struct RafScheduler;

impl Scheduler for RafScheduler {
    fn every_frame(&mut self, mut callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle::new();
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let handle_tick = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if handle_tick.is_cancelled() {
                // Break the self-reference so the closure can be dropped.
                tick_clone.borrow_mut().take();
                return;
            }
            callback(now_sec());
            request_frame(&tick_clone);
        }) as Box<dyn FnMut()>));
        request_frame(&tick);
        handle
    }
}

pub fn start_loop(sphere: SharedSphere, scheduler: &mut impl Scheduler) -> FrameHandle {
    scheduler.every_frame(Box::new(move |now| {
        sphere.borrow_mut().frame(now);
    }))
}
