//! Browser timers as owned handles. Dropping one cancels it, so a show that
//! is unmounted cannot leave callbacks running against a detached page.
use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

pub struct Interval {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: i32, tick: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let handle = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms.max(1),
            )
            .map_err(|e| anyhow!("setInterval: {:?}", e))?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.handle);
        }
    }
}

pub struct Timeout {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(delay_ms: i32, fire: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        let mut fire = Some(fire);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(f) = fire.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let handle = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.max(0),
            )
            .map_err(|e| anyhow!("setTimeout: {:?}", e))?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}

struct LoopInner {
    raf_id: Cell<Option<i32>>,
    stopped: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopInner {
    fn request(&self) {
        if self.stopped.get() {
            return;
        }
        let Ok(w) = window() else { return };
        if let Some(cb) = self.tick.borrow().as_ref() {
            match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.raf_id.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }
}

/// A requestAnimationFrame loop that runs `frame` once per display refresh
/// until the handle is dropped.
pub struct AnimationLoop {
    inner: Rc<LoopInner>,
}

impl AnimationLoop {
    pub fn start(mut frame: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            raf_id: Cell::new(None),
            stopped: Cell::new(false),
            tick: RefCell::new(None),
        });
        let weak: Weak<LoopInner> = Rc::downgrade(&inner);
        *inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else { return };
            inner.raf_id.set(None);
            if inner.stopped.get() {
                return;
            }
            frame();
            inner.request();
        }) as Box<dyn FnMut()>));
        inner.request();
        Self { inner }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.inner.stopped.set(true);
        if let (Some(id), Some(w)) = (self.inner.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.inner.tick.borrow_mut().take();
    }
}

/// Time since mount. Everything in `core` is scheduled on this axis.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: instant::Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }

    pub fn now(&self) -> std::time::Duration {
        self.origin.elapsed()
    }
}
