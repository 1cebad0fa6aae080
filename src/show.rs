use crate::audio::{self, Player};
use crate::config::{BurstPattern, ElementIds, ShowConfig};
use crate::constants::DECOR_SWEEP_INTERVAL_MS;
use crate::core::{BurstQueue, Cadence, EffectEmitter, PlaybackGate, SurfaceTracker};
use crate::decor::DecorLayer;
use crate::dom::Listener;
use crate::events;
use crate::frame::{self, FrameContext};
use crate::overlay;
use crate::timers::{AnimationLoop, Clock, Interval, Timeout};
use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// State reachable from event handlers and timers.
#[derive(Clone)]
pub struct Shared {
    pub document: web::Document,
    pub ids: Rc<ElementIds>,
    pub pattern: Rc<BurstPattern>,
    pub clock: Clock,
    pub mounted: Rc<Cell<bool>>,
    pub gate: Rc<RefCell<PlaybackGate>>,
    pub player: Rc<RefCell<Player>>,
    pub bursts: Rc<RefCell<BurstQueue>>,
    pub emitter: Rc<RefCell<EffectEmitter>>,
    pub decor: Rc<RefCell<DecorLayer>>,
    pub surface: Rc<RefCell<SurfaceTracker>>,
    pub rng: Rc<RefCell<StdRng>>,
    pub gesture_listeners: Rc<RefCell<Vec<Listener>>>,
}

/// A mounted show. Owns every timer, listener and the frame loop; all of
/// them stop when it is unmounted or dropped.
pub struct Show {
    shared: Shared,
    frame_ctx: Rc<RefCell<FrameContext>>,
    animation: Option<AnimationLoop>,
    intervals: Vec<Interval>,
    probe: Option<Timeout>,
    listeners: Vec<Listener>,
}

impl Show {
    pub fn mount(config: ShowConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(&config.ids.canvas)
            .ok_or_else(|| anyhow!("missing #{}", config.ids.canvas))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow!("{:?}", e))?;

        let clock = Clock::start();
        let audio_el = audio::find_audio(&document, &config.ids.audio);
        if audio_el.is_none() {
            log::warn!("[audio] #{} not found; show runs silent", config.ids.audio);
        }
        let has_hint = overlay::exists(&document, &config.ids.hint)
            && !overlay::is_hidden(&document, &config.ids.hint);
        let player = Rc::new(RefCell::new(Player::new(audio_el, config.reactive)));
        let bursts = Rc::new(RefCell::new(BurstQueue::default()));

        let frame_ctx = Rc::new(RefCell::new(FrameContext::new(
            canvas,
            &config,
            player.clone(),
            bursts.clone(),
            clock,
            StdRng::from_entropy(),
        )));
        let surface = frame_ctx.borrow().surface.clone();

        let shared = Shared {
            document: document.clone(),
            ids: Rc::new(config.ids.clone()),
            pattern: Rc::new(config.pattern.clone()),
            clock,
            mounted: Rc::new(Cell::new(true)),
            gate: Rc::new(RefCell::new(PlaybackGate::new(has_hint))),
            player,
            bursts,
            emitter: Rc::new(RefCell::new(EffectEmitter::new(
                config.pattern.clone(),
                config.burst_interval,
            ))),
            decor: Rc::new(RefCell::new(DecorLayer::new(
                document.clone(),
                config.emoji.clone(),
            ))),
            surface,
            rng: Rc::new(RefCell::new(StdRng::from_entropy())),
            gesture_listeners: Rc::new(RefCell::new(Vec::new())),
        };

        let mut show = Self {
            shared: shared.clone(),
            frame_ctx: frame_ctx.clone(),
            animation: None,
            intervals: Vec::new(),
            probe: None,
            listeners: Vec::new(),
        };

        // Background loop and emitter start right away; audio waits for input.
        show.animation = Some(frame::start_loop(frame_ctx));
        show.intervals.push(start_emitter(&shared)?);
        show.intervals.push(start_decor(&shared, &config)?);

        events::wire_gesture_unlock(&shared);
        show.listeners.push(events::wire_resize(&shared, &window));
        show.listeners.push(events::wire_decor_completion(&shared));
        show.listeners.extend(events::wire_hint_press(&shared));
        show.listeners.extend(events::wire_manual_triggers(&shared));

        if let Some(delay) = config.autoplay_probe {
            let s = shared.clone();
            show.probe = Some(Timeout::new(delay.as_millis() as i32, move || {
                let attempt = s.gate.borrow_mut().on_autoplay_probe();
                if let Some(attempt) = attempt {
                    events::attempt_playback(&s, attempt);
                }
            })?);
        }

        log::info!(
            "[show] mounted preset={} interval={:?} background={:?}",
            config.preset,
            config.burst_interval,
            config.background
        );
        Ok(show)
    }

    pub fn shared(&self) -> &Shared {
        &self.shared
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.get()
    }

    /// Stop everything: frame loop, timers, listeners, decorations and the
    /// audio analysis graph. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.shared.mounted.replace(false) {
            return;
        }
        self.animation.take();
        self.intervals.clear();
        self.probe.take();
        self.listeners.clear();
        // breaks the listener -> closure -> Shared cycle
        self.shared.gesture_listeners.borrow_mut().clear();
        self.shared.emitter.borrow_mut().cancel();
        self.shared.bursts.borrow_mut().clear();
        self.shared.decor.borrow_mut().clear();
        self.shared.player.borrow_mut().shutdown();
        let frames = {
            let mut ctx = self.frame_ctx.borrow_mut();
            ctx.confetti.clear();
            if let Some(sky) = &mut ctx.comets {
                sky.clear();
            }
            ctx.frames
        };
        log::info!(
            "[show] unmounted after {} frames, {} emitter ticks",
            frames,
            self.shared.emitter.borrow().ticks()
        );
    }
}

impl Drop for Show {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn start_emitter(shared: &Shared) -> anyhow::Result<Interval> {
    let s = shared.clone();
    let period = s.emitter.borrow().interval().as_millis() as i32;
    Interval::new(period, move || {
        let now = s.clock.now();
        let planned = s.emitter.borrow_mut().tick(now, &mut *s.rng.borrow_mut());
        log::debug!("[emitter] tick at {:?}: {} bursts", now, planned.len());
        s.bursts.borrow_mut().push_all(planned);
    })
}

/// Initial emoji batch, periodic respawn, and the deadline sweep.
fn start_decor(shared: &Shared, config: &ShowConfig) -> anyhow::Result<Interval> {
    let s = shared.clone();
    let now = s.clock.now();
    s.decor
        .borrow_mut()
        .spawn_batch(now, &mut *s.rng.borrow_mut());
    let mut respawn = config.emoji.respawn.map(|p| Cadence::new(p, now + p));
    Interval::new(DECOR_SWEEP_INTERVAL_MS, move || {
        let now = s.clock.now();
        let mut decor = s.decor.borrow_mut();
        let removed = decor.sweep(now);
        if removed > 0 {
            log::debug!("[decor] swept {} overdue", removed);
        }
        if respawn.as_mut().is_some_and(|c| c.due(now)) {
            decor.spawn_batch(now, &mut *s.rng.borrow_mut());
        }
    })
}
