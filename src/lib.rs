//! Geodesic project sphere for the portfolio landing page.
//!
//! `core` is platform independent and tested on the host. The remaining
//! modules are the browser front-end: DOM overlay, input wiring, the
//! `requestAnimationFrame` loop and the wgpu renderer.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::{start, SharedSphere};

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::core::{
        portfolio_projects, FrameHandle, GeodesicMesh, SphereConfig, SphereVisualization,
        ThemeSignal,
    };
    use crate::{dom, events, frame, render};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    pub type SharedSphere =
        Rc<RefCell<SphereVisualization<render::GpuState, dom::DomOverlay>>>;

    /// Everything that must be released when the page goes away.
    struct Session {
        sphere: SharedSphere,
        canvas: web::HtmlCanvasElement,
        handle: FrameHandle,
        theme: Rc<RefCell<ThemeSignal>>,
        observers: events::Observers,
        listeners: dom::ListenerSet,
    }

    impl Session {
        fn teardown(mut self) {
            self.handle.cancel();
            self.observers.disconnect();
            self.theme.borrow_mut().clear();
            self.listeners.clear();
            self.sphere.borrow_mut().overlay_mut().remove_all();
            self.canvas.remove();
            log::info!("[sphere] torn down");
        }
    }

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let Some(container) = dom::html_element_by_id(&document, dom::CONTAINER_ID) else {
            log::info!("[sphere] no #{} on this page", dom::CONTAINER_ID);
            return Ok(());
        };

        let config = SphereConfig::from_attributes(|name| container.get_attribute(name));
        if let Err(e) = config.validate() {
            log::warn!("[sphere] disabled: {}", e);
            return Ok(());
        }
        let canvas = dom::create_canvas(&document, &container)?;
        let viewport = dom::read_viewport(&container);
        dom::sync_canvas_backing_size(&canvas, &viewport);

        let gpu = match render::GpuState::new(
            &canvas,
            GeodesicMesh::facet_count(config.detail),
            config.particle_count,
        )
        .await
        {
            Ok(g) => g,
            Err(e) => {
                log::warn!("[sphere] disabled: {:?}", e);
                canvas.remove();
                return Ok(());
            }
        };

        let theme = events::read_theme(&document);
        let overlay = dom::DomOverlay::new(&document, &container);
        let projects = portfolio_projects();
        let sphere = match SphereVisualization::new(
            config,
            &projects,
            viewport,
            theme,
            instant::now() / 1000.0,
            gpu,
            overlay,
        ) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[sphere] disabled: {}", e);
                canvas.remove();
                return Ok(());
            }
        };
        let sphere: SharedSphere = Rc::new(RefCell::new(sphere));

        let mut listeners = dom::ListenerSet::default();
        events::wire_pointer_handlers(&mut listeners, &container, &sphere);
        events::wire_touch_handlers(&mut listeners, &container, &sphere);
        events::wire_indicator_clicks(&mut listeners, &sphere);
        events::wire_resize(&mut listeners, &container, &canvas, &sphere);
        dom::set_cursor(&container, "crosshair");

        let theme_signal = Rc::new(RefCell::new(ThemeSignal::new(theme)));
        {
            let sphere = sphere.clone();
            theme_signal
                .borrow_mut()
                .subscribe(move |t| sphere.borrow_mut().set_theme(t));
        }
        let mut observers = events::Observers::default();
        events::observe_theme(&mut observers, &document, theme_signal.clone())?;
        events::observe_visibility(&mut observers, &container, &sphere)?;

        listeners.listen(window.as_ref(), "pagehide", |_ev| {
            if let Some(session) = SESSION.with(|s| s.borrow_mut().take()) {
                session.teardown();
            }
        });

        let handle = frame::start_loop(sphere.clone(), &mut frame::RafScheduler);
        log::info!("[sphere] running ({} listeners)", listeners.len());

        SESSION.with(|s| {
            *s.borrow_mut() = Some(Session {
                sphere,
                canvas,
                handle,
                theme: theme_signal,
                observers,
                listeners,
            });
        });
        Ok(())
    }
}
