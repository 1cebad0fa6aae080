// Host-side tests for the periodic effect emitter and the confetti field.

use birthday_show::config::{BurstPattern, BurstSpec, Origin, StreamSpec};
use birthday_show::core::color::{Palette, PARTY};
use birthday_show::core::emitter::plan;
use birthday_show::core::{BurstConfig, BurstQueue, ConfettiField, EffectEmitter};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::smallvec;
use std::time::Duration;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn short_stream() -> StreamSpec {
    StreamSpec {
        duration: Duration::from_millis(1000),
        step: Duration::from_millis(250),
        bursts: smallvec![BurstSpec::new(5, Origin::Fixed { x: 0.5, y: 0.5 }, Palette::Rainbow)],
    }
}

#[test]
fn corner_cannons_fire_from_both_sides_at_tick_time() {
    let mut emitter = EffectEmitter::new(
        BurstPattern::corner_cannons(Palette::Fixed(PARTY)),
        Duration::from_millis(2500),
    );
    let now = Duration::from_secs(5);
    let bursts = emitter.tick(now, &mut rng());
    assert_eq!(bursts.len(), 2);
    assert!(bursts.iter().all(|b| b.due == now));
    assert_eq!(bursts[0].config.origin, [0.0, 0.6]);
    assert_eq!(bursts[1].config.origin, [1.0, 0.6]);
    assert_eq!(bursts[0].config.particle_count, 180);
}

#[test]
fn stream_spreads_sub_bursts_over_its_duration() {
    let pattern = BurstPattern::default().with_stream(short_stream());
    let now = Duration::from_secs(2);
    let bursts = plan(&pattern, now, &mut rng());
    // 0, 250, 500, 750, 1000 ms
    assert_eq!(bursts.len(), 5);
    assert_eq!(bursts.first().unwrap().due, now);
    assert_eq!(bursts.last().unwrap().due, now + Duration::from_millis(1000));
}

#[test]
fn fireworks_stream_has_two_sides_per_step() {
    let pattern =
        BurstPattern::default().with_stream(BurstPattern::fireworks_stream(Palette::Rainbow));
    let bursts = plan(&pattern, Duration::ZERO, &mut rng());
    assert_eq!(bursts.len() % 2, 0);
    let last = bursts.iter().map(|b| b.due).max().unwrap();
    assert_eq!(last, Duration::from_millis(1500));
}

#[test]
fn emits_every_interval_while_mounted_and_nothing_after_teardown() {
    let interval = Duration::from_millis(2500);
    let pattern = BurstPattern::single(BurstSpec::new(
        20,
        Origin::Fixed { x: 0.5, y: 0.5 },
        Palette::Rainbow,
    ));
    let mut emitter = EffectEmitter::new(pattern, interval);
    let mut queue = BurstQueue::default();
    let mut rng = rng();

    let mut fired = Vec::new();
    for k in 1..=8u32 {
        let now = interval * k;
        queue.push_all(emitter.tick(now, &mut rng));
        fired.push(queue.drain_due(now).len());
    }
    assert_eq!(fired, vec![1; 8]);
    assert_eq!(emitter.ticks(), 8);

    emitter.cancel();
    queue.clear();
    for k in 9..=20u32 {
        let now = interval * k;
        queue.push_all(emitter.tick(now, &mut rng));
        assert!(queue.drain_due(now).is_empty());
    }
    assert!(emitter.is_cancelled());
    assert_eq!(emitter.ticks(), 8);
}

#[test]
fn queue_only_releases_due_bursts() {
    let mut queue = BurstQueue::default();
    let pattern = BurstPattern::default().with_stream(short_stream());
    queue.push_all(plan(&pattern, Duration::ZERO, &mut rng()));
    assert_eq!(queue.len(), 5);

    assert_eq!(queue.drain_due(Duration::from_millis(300)).len(), 2);
    assert_eq!(queue.len(), 3);
    assert!(queue.drain_due(Duration::from_millis(300)).is_empty());
    assert_eq!(queue.drain_due(Duration::from_secs(10)).len(), 3);
    assert!(queue.is_empty());
}

#[test]
fn origins_resolve_inside_their_region() {
    let mut rng = rng();
    let band = Origin::Band { y: 0.15, x: (0.2, 0.8) };
    let rect = Origin::RandomPoint { x: (0.1, 0.9), y: (0.1, 0.5) };
    for _ in 0..200 {
        let [x, y] = band.resolve(&mut rng);
        assert_eq!(y, 0.15);
        assert!((0.2..=0.8).contains(&x));
        let [x, y] = rect.resolve(&mut rng);
        assert!((0.1..=0.9).contains(&x));
        assert!((0.1..=0.5).contains(&y));
    }
    assert_eq!(Origin::Fixed { x: 1.5, y: -0.2 }.resolve(&mut rng), [1.0, 0.0]);
}

fn burst(count: u32, ticks: u32) -> BurstConfig {
    BurstConfig {
        particle_count: count,
        angle_deg: 90.0,
        spread_deg: 45.0,
        start_velocity: 30.0,
        ticks,
        drift: 0.0,
        origin: [0.5, 1.0],
        palette: Palette::Fixed(PARTY),
    }
}

#[test]
fn confetti_spawns_at_origin_and_expires_after_ticks() {
    let mut field = ConfettiField::new();
    let size = Vec2::new(400.0, 800.0);
    field.fire(&burst(30, 10), size, &mut rng());
    assert_eq!(field.len(), 30);
    assert!(field.iter().all(|p| p.pos == Vec2::new(200.0, 800.0)));
    assert!(field.iter().all(|p| PARTY.contains(&p.color)));

    for _ in 0..9 {
        field.step();
    }
    assert_eq!(field.len(), 30);
    assert!(field.iter().all(|p| p.life() > 0.0 && p.life() < 1.0));
    field.step();
    assert!(field.is_empty());
}

#[test]
fn confetti_launched_upward_rises_first() {
    let mut field = ConfettiField::new();
    let size = Vec2::new(400.0, 800.0);
    field.fire(&burst(50, 100), size, &mut rng());
    field.step();
    // straight up with a 45 degree spread: every particle moved up
    assert!(field.iter().all(|p| p.pos.y < 800.0));
}

#[test]
fn confetti_field_is_capped() {
    let mut field = ConfettiField::new();
    let size = Vec2::new(100.0, 100.0);
    let mut rng = rng();
    for _ in 0..40 {
        field.fire(&burst(100, 200), size, &mut rng);
    }
    assert_eq!(field.len(), birthday_show::constants::CONFETTI_MAX_PARTICLES);
    field.clear();
    assert!(field.is_empty());
}

#[test]
fn drift_pushes_confetti_sideways() {
    let size = Vec2::new(400.0, 800.0);
    let still = burst(40, 50);
    let windy = BurstConfig { drift: 2.0, ..still };

    let mut a = ConfettiField::new();
    let mut b = ConfettiField::new();
    a.fire(&still, size, &mut rng());
    b.fire(&windy, size, &mut rng());
    for _ in 0..10 {
        a.step();
        b.step();
    }
    for (p, q) in a.iter().zip(b.iter()) {
        assert!((q.pos.x - p.pos.x - 20.0).abs() < 1e-3);
        assert_eq!(q.pos.y, p.pos.y);
    }
}

#[test]
fn bursts_default_to_no_drift() {
    let spec = BurstSpec::new(10, Origin::Fixed { x: 0.5, y: 0.5 }, Palette::Rainbow);
    assert_eq!(spec.drift, 0.0);
    assert_eq!(BurstConfig::resolve(&spec.drift(1.5), &mut rng()).drift, 1.5);
}
