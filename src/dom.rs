use crate::core::{SurfaceSize, SurfaceTracker};
use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An event registration that is removed when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
    attached: Cell<bool>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        let attached = target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| log::error!("addEventListener({}) failed: {:?}", kind, e))
            .is_ok();
        Self {
            target: target.clone(),
            kind,
            closure,
            attached: Cell::new(attached),
        }
    }

    /// Stop receiving events. The closure itself stays alive until drop, so
    /// this is safe to call from inside the handler.
    pub fn detach(&self) {
        if self.attached.replace(false) {
            _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Listener> {
    let el = document.get_element_by_id(element_id)?;
    Some(Listener::new(&el, "click", move |_| handler()))
}

/// Measure the canvas and apply a new backing size if the tracker says so.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    tracker: &mut SurfaceTracker,
) -> Option<SurfaceSize> {
    let w = web::window()?;
    let rect = canvas.get_bounding_client_rect();
    let size = tracker.sync(
        rect.width() as f32,
        rect.height() as f32,
        w.device_pixel_ratio() as f32,
    )?;
    canvas.set_width(size.px_width);
    canvas.set_height(size.px_height);
    Some(size)
}
