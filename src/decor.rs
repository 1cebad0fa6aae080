use crate::config::EmojiConfig;
use crate::core::{DecorSpec, ElementId, EphemeralRegistry};
use anyhow::anyhow;
use fnv::FnvHashMap;
use rand::Rng;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

const ID_ATTR: &str = "data-decor-id";

/// Floating emoji layer. Each element is removed by whichever comes first:
/// its `animationend` event or the sweep once its deadline has passed.
pub struct DecorLayer {
    document: web::Document,
    config: EmojiConfig,
    registry: EphemeralRegistry,
    nodes: FnvHashMap<ElementId, web::Element>,
}

impl DecorLayer {
    pub fn new(document: web::Document, config: EmojiConfig) -> Self {
        let registry = EphemeralRegistry::new(config.grace);
        Self {
            document,
            config,
            registry,
            nodes: FnvHashMap::default(),
        }
    }

    pub fn spawn_batch<R: Rng + ?Sized>(&mut self, now: Duration, rng: &mut R) -> usize {
        let mut spawned = 0;
        for _ in 0..self.config.count {
            match self.spawn_one(now, rng) {
                Ok(_) => spawned += 1,
                Err(e) => {
                    log::warn!("[decor] spawn failed: {:?}", e);
                    break;
                }
            }
        }
        log::debug!("[decor] spawned {} (live {})", spawned, self.nodes.len());
        spawned
    }

    fn spawn_one<R: Rng + ?Sized>(&mut self, now: Duration, rng: &mut R) -> anyhow::Result<ElementId> {
        let spec = DecorSpec::roll(&self.config, rng);
        let body = self.document.body().ok_or_else(|| anyhow!("no body"))?;
        let el = self
            .document
            .create_element("span")
            .map_err(|e| anyhow!("createElement: {:?}", e))?;
        let id = self.registry.spawn(now, spec.duration);
        _ = el.set_attribute("style", &spec.style());
        _ = el.set_attribute("aria-hidden", "true");
        _ = el.set_attribute(ID_ATTR, &id.0.to_string());
        el.set_text_content(Some(spec.glyph));
        if let Err(e) = body.append_child(&el) {
            self.registry.retire(id);
            return Err(anyhow!("appendChild: {:?}", e));
        }
        self.nodes.insert(id, el);
        Ok(id)
    }

    /// Completion path, fed by the delegated `animationend` listener.
    pub fn retire(&mut self, id: ElementId) {
        if self.registry.retire(id) {
            self.remove_node(id);
        }
    }

    /// Fallback path; returns how many overdue elements were removed.
    pub fn sweep(&mut self, now: Duration) -> usize {
        let overdue = self.registry.sweep(now);
        for id in &overdue {
            self.remove_node(*id);
        }
        overdue.len()
    }

    pub fn clear(&mut self) {
        self.registry.drain_all();
        for (_, el) in self.nodes.drain() {
            el.remove();
        }
    }

    fn remove_node(&mut self, id: ElementId) {
        if let Some(el) = self.nodes.remove(&id) {
            el.remove();
        }
    }
}

/// Decoration id carried by an event target, if it is one of ours.
pub fn decor_id_of(ev: &web::Event) -> Option<ElementId> {
    let el = ev.target()?.dyn_into::<web::Element>().ok()?;
    el.get_attribute(ID_ATTR)?.parse().ok().map(ElementId)
}
