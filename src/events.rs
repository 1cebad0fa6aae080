use crate::audio;
use crate::config::BurstPattern;
use crate::core::color::{Palette, PARTY};
use crate::core::emitter::plan;
use crate::core::{AttemptSource, HintState, PlayAttempt};
use crate::decor::decor_id_of;
use crate::dom::{self, Listener};
use crate::overlay;
use crate::show::Shared;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Input events that count as a user gesture for the autoplay policy.
pub const GESTURE_EVENTS: [&str; 4] = ["click", "touchstart", "pointerdown", "keydown"];

/// Listen on the document for the first qualifying gesture. The listeners are
/// detached as soon as the gate hands out its attempt.
pub fn wire_gesture_unlock(shared: &Shared) {
    let listeners: Vec<Listener> = GESTURE_EVENTS
        .iter()
        .map(|&kind| {
            let document = shared.document.clone();
            let shared = shared.clone();
            Listener::new(&document, kind, move |_ev| {
                let attempt = shared.gate.borrow_mut().on_gesture();
                if let Some(attempt) = attempt {
                    log::info!("[gate] unlocked by {}", kind);
                    detach_gesture_listeners(&shared);
                    attempt_playback(&shared, attempt);
                }
            })
        })
        .collect();
    *shared.gesture_listeners.borrow_mut() = listeners;
}

fn detach_gesture_listeners(shared: &Shared) {
    for l in shared.gesture_listeners.borrow().iter() {
        l.detach();
    }
}

/// Start playback for a gate-issued attempt and feed the outcome back.
pub fn attempt_playback(shared: &Shared, attempt: PlayAttempt) {
    let element = shared.player.borrow().element.clone();
    let Some(element) = element else {
        log::warn!("[audio] no #{} element; nothing to play", shared.ids.audio);
        shared.gate.borrow_mut().on_playback_result(attempt, false);
        return;
    };
    // still inside the input handler here
    shared.player.borrow_mut().prime();
    let shared = shared.clone();
    spawn_local(async move {
        let result = audio::try_play(&element).await;
        if !shared.mounted.get() {
            // unmounted while the promise was pending
            if result.is_ok() {
                _ = element.pause();
            }
            return;
        }
        if let Err(e) = &result {
            log::warn!("[audio] attempt {} ({:?}) failed: {:?}", attempt.seq, attempt.source, e);
        }
        let (settled, hint) = {
            let mut gate = shared.gate.borrow_mut();
            (gate.on_playback_result(attempt, result.is_ok()), gate.hint())
        };
        if settled.detach_gesture_listeners {
            detach_gesture_listeners(&shared);
        }
        if settled.dismiss_hint {
            overlay::hide(&shared.document, &shared.ids.hint);
        }
        let refused_by_user_action = attempt.source != AttemptSource::AutoplayProbe;
        if result.is_err() && refused_by_user_action && hint == HintState::Visible {
            overlay::mark_retry(&shared.document, &shared.ids.hint);
        }
        if settled.started_playing {
            log::info!("[audio] playing");
            attach_analysis(&shared).await;
        }
    });
}

/// Capture the element only once its context runs; a suspended context
/// would silence the music.
async fn attach_analysis(shared: &Shared) {
    let ctx = shared.player.borrow().pending_context();
    let Some(ctx) = ctx else { return };
    let running = audio::ensure_running(&ctx).await;
    if !shared.mounted.get() {
        return;
    }
    if running {
        shared.player.borrow_mut().attach_analysis();
    } else {
        log::warn!("[audio] context not running; visuals stay idle");
    }
}

/// A press on the hint itself retries once the gesture attempt was refused.
pub fn wire_hint_press(shared: &Shared) -> Option<Listener> {
    let s = shared.clone();
    dom::add_click_listener(&shared.document, &shared.ids.hint, move || {
        let attempt = s.gate.borrow_mut().on_hint_pressed();
        if let Some(attempt) = attempt {
            attempt_playback(&s, attempt);
        }
    })
}

/// Resize only marks the surface dirty; the next frame measures and applies.
pub fn wire_resize(shared: &Shared, window: &web::Window) -> Listener {
    let surface = shared.surface.clone();
    Listener::new(window, "resize", move |_| surface.borrow_mut().mark_dirty())
}

/// One delegated `animationend` listener retires finished decorations.
pub fn wire_decor_completion(shared: &Shared) -> Listener {
    let decor = shared.decor.clone();
    Listener::new(&shared.document, "animationend", move |ev| {
        if let Some(id) = decor_id_of(&ev) {
            decor.borrow_mut().retire(id);
        }
    })
}

fn trigger_palette(shared: &Shared) -> Palette {
    shared
        .pattern
        .bursts
        .first()
        .map(|b| b.palette)
        .unwrap_or(Palette::Fixed(PARTY))
}

pub fn fire_cannons(shared: &Shared) {
    let now = shared.clock.now();
    let planned = plan(
        &BurstPattern::corner_cannons(trigger_palette(shared)),
        now,
        &mut *shared.rng.borrow_mut(),
    );
    shared.bursts.borrow_mut().push_all(planned);
}

pub fn fire_fireworks(shared: &Shared) {
    let now = shared.clock.now();
    let pattern = BurstPattern::default()
        .with_stream(BurstPattern::fireworks_stream(trigger_palette(shared)));
    let planned = plan(&pattern, now, &mut *shared.rng.borrow_mut());
    shared.bursts.borrow_mut().push_all(planned);
}

pub fn spawn_emoji(shared: &Shared) {
    let now = shared.clock.now();
    shared
        .decor
        .borrow_mut()
        .spawn_batch(now, &mut *shared.rng.borrow_mut());
}

/// Everything at once: music, cannons, fireworks and an emoji batch.
pub fn celebrate(shared: &Shared) {
    let attempt = shared.gate.borrow_mut().on_explicit_request();
    if let Some(attempt) = attempt {
        detach_gesture_listeners(shared);
        attempt_playback(shared, attempt);
    }
    fire_cannons(shared);
    fire_fireworks(shared);
    spawn_emoji(shared);
}

/// Optional buttons on the page; any that are missing are skipped.
pub fn wire_manual_triggers(shared: &Shared) -> Vec<Listener> {
    let ids = &shared.ids;
    let bindings: [(&str, fn(&Shared)); 4] = [
        (ids.start_button.as_str(), celebrate),
        (ids.burst_button.as_str(), fire_cannons),
        (ids.fireworks_button.as_str(), fire_fireworks),
        (ids.emoji_button.as_str(), spawn_emoji),
    ];
    bindings
        .into_iter()
        .filter_map(|(id, action)| {
            let s = shared.clone();
            dom::add_click_listener(&shared.document, id, move || action(&s))
        })
        .collect()
}
