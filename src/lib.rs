//! Animated birthday greeting for the browser.
//!
//! The pure pieces (`config`, `constants`, `core`) build everywhere and are
//! covered by host tests; the DOM, canvas and WebAudio glue only exists on
//! `wasm32`.

pub mod config;
pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod decor;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod show;
#[cfg(target_arch = "wasm32")]
mod timers;

pub use config::{ConfigError, Preset, ShowConfig, ShowConfigBuilder};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
thread_local! {
    static AUTO_SHOW: RefCell<Option<show::Show>> = const { RefCell::new(None) };
}

/// Handle returned to JavaScript for a manually mounted show.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct ShowHandle {
    show: Option<show::Show>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl ShowHandle {
    pub fn unmount(&mut self) {
        if let Some(mut s) = self.show.take() {
            s.unmount();
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.show.as_ref().is_some_and(show::Show::is_mounted)
    }

    /// Same as the page's "start show" button.
    pub fn celebrate(&self) {
        if let Some(s) = &self.show {
            events::celebrate(s.shared());
        }
    }
}

/// Mount a show with the named preset onto the current page.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount(preset: &str) -> Result<ShowHandle, JsValue> {
    let preset: Preset = preset
        .parse()
        .map_err(|e: ConfigError| JsValue::from_str(&e.to_string()))?;
    let show = show::Show::mount(ShowConfig::preset(preset))
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    Ok(ShowHandle { show: Some(show) })
}

/// Tear down the show mounted automatically at start-up.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    if let Some(mut s) = AUTO_SHOW.with(|cell| cell.borrow_mut().take()) {
        s.unmount();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("birthday-show starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let Some(body) = dom::window_document().and_then(|d| d.body()) else {
        log::error!("no document body; nothing to mount");
        return Ok(());
    };
    if body.has_attribute("data-manual-mount") {
        return Ok(());
    }
    let preset = match body.get_attribute("data-preset") {
        Some(name) => name.parse().unwrap_or_else(|e: ConfigError| {
            log::warn!("{}; falling back to {}", e, Preset::default());
            Preset::default()
        }),
        None => Preset::default(),
    };
    match show::Show::mount(ShowConfig::preset(preset)) {
        Ok(s) => AUTO_SHOW.with(|cell| *cell.borrow_mut() = Some(s)),
        Err(e) => log::error!("mount error: {:?}", e),
    }
    Ok(())
}
