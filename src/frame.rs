use crate::audio::Player;
use crate::config::{BackgroundKind, ShowConfig};
use crate::core::color::Palette;
use crate::core::{BurstQueue, CometSky, ConfettiField, FrameParams, PointField, SurfaceTracker};
use crate::dom;
use crate::render::Painter;
use crate::timers::{AnimationLoop, Clock};
use glam::Vec2;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    /// `None` when the page gives us no 2D context; state still advances.
    pub painter: Option<Painter>,
    pub surface: Rc<RefCell<SurfaceTracker>>,
    pub player: Rc<RefCell<Player>>,
    pub bursts: Rc<RefCell<BurstQueue>>,
    pub clock: Clock,
    pub rng: StdRng,

    pub background: BackgroundKind,
    pub base_hue_deg: f32,
    pub size: Vec2,
    pub confetti: ConfettiField,
    pub points: PointField,
    pub comets: Option<CometSky>,
    pub frames: u64,
}

impl FrameContext {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        config: &ShowConfig,
        player: Rc<RefCell<Player>>,
        bursts: Rc<RefCell<BurstQueue>>,
        clock: Clock,
        mut rng: StdRng,
    ) -> Self {
        let painter = match Painter::new(&canvas) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("[frame] drawing disabled: {:?}", e);
                None
            }
        };
        let mut surface = SurfaceTracker::new();
        let size = dom::sync_canvas_backing_size(&canvas, &mut surface)
            .map(|s| {
                if let Some(p) = &painter {
                    p.set_scale(s.dpr);
                }
                s.css
            })
            .unwrap_or(Vec2::ONE);
        let points = match config.background {
            BackgroundKind::PointField => {
                PointField::new(config.point_count, size, config.point_palette, &mut rng)
            }
            _ => PointField::new(0, size, Palette::Rainbow, &mut rng),
        };
        let comets = (config.background == BackgroundKind::Comets).then(CometSky::new);
        Self {
            canvas,
            painter,
            surface: Rc::new(RefCell::new(surface)),
            player,
            bursts,
            clock,
            rng,
            background: config.background,
            base_hue_deg: config.base_hue_deg,
            size,
            confetti: ConfettiField::new(),
            points,
            comets,
            frames: 0,
        }
    }

    pub fn frame(&mut self) {
        let now = self.clock.now();
        self.resync_surface();

        let loudness = self
            .player
            .try_borrow_mut()
            .map(|mut p| p.loudness())
            .unwrap_or(0.0);
        let elapsed = now.as_secs_f32();
        let params = if loudness > 0.0 {
            FrameParams::from_loudness(loudness, elapsed, self.base_hue_deg)
        } else {
            FrameParams::idle(elapsed, self.base_hue_deg)
        };

        let due = self.bursts.borrow_mut().drain_due(now);
        for burst in &due {
            self.confetti.fire(burst, self.size, &mut self.rng);
        }
        self.confetti.step();
        self.points.step(params.speed, self.size, &mut self.rng);
        if let Some(sky) = &mut self.comets {
            sky.step(now, self.size, params.hue_deg, &mut self.rng);
        }

        if let Some(p) = &self.painter {
            p.background(&params, self.size);
            match self.background {
                BackgroundKind::PointField => p.points(&self.points),
                BackgroundKind::Comets => {
                    if let Some(sky) = &self.comets {
                        p.comets(sky, now, params.speed);
                    }
                }
                BackgroundKind::Gradient => {}
            }
            p.confetti(&self.confetti);
        }
        self.frames += 1;
    }

    /// Apply a pending resize before anything is painted this frame.
    fn resync_surface(&mut self) {
        let mut tracker = self.surface.borrow_mut();
        if !tracker.is_dirty() {
            return;
        }
        if let Some(s) = dom::sync_canvas_backing_size(&self.canvas, &mut tracker) {
            self.points.rescale(self.size, s.css);
            self.size = s.css;
            if let Some(p) = &self.painter {
                p.set_scale(s.dpr);
            }
            log::debug!("[frame] surface {}x{} @{}", s.px_width, s.px_height, s.dpr);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> AnimationLoop {
    AnimationLoop::start(move || {
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.frame();
        }
    })
}
