// Host-side tests for presets and the config builder.

use birthday_show::config::{
    BackgroundKind, BurstPattern, BurstSpec, ConfigError, EmojiConfig, Origin, Preset, ShowConfig,
    StreamSpec,
};
use birthday_show::core::color::Palette;
use smallvec::smallvec;
use std::time::Duration;

#[test]
fn presets_parse_by_name() {
    assert_eq!("classic".parse::<Preset>(), Ok(Preset::Classic));
    assert_eq!(" Circus ".parse::<Preset>(), Ok(Preset::Circus));
    assert_eq!("NEON".parse::<Preset>(), Ok(Preset::Neon));
    for p in Preset::ALL {
        assert_eq!(p.to_string().parse::<Preset>(), Ok(p));
    }
}

#[test]
fn unknown_preset_is_an_error() {
    let err = "disco".parse::<Preset>().unwrap_err();
    assert_eq!(err, ConfigError::UnknownPreset("disco".into()));
    assert_eq!(err.to_string(), "unknown preset 'disco'");
}

#[test]
fn every_preset_is_valid() {
    for p in Preset::ALL {
        let cfg = ShowConfig::preset(p);
        assert_eq!(cfg.preset, p);
        assert_eq!(cfg.validate(), Ok(()), "{}", p);
        assert!(!cfg.pattern.is_empty(), "{}", p);
        assert!(cfg.emoji.count > 0, "{}", p);
    }
    assert_eq!(ShowConfig::default(), ShowConfig::preset(Preset::Classic));
}

#[test]
fn burst_intervals_are_a_few_seconds() {
    for p in Preset::ALL {
        let secs = ShowConfig::preset(p).burst_interval.as_secs_f32();
        assert!((2.0..=3.0).contains(&secs), "{} fires every {}s", p, secs);
    }
}

#[test]
fn presets_pick_distinct_backgrounds() {
    assert_eq!(
        ShowConfig::preset(Preset::Classic).background,
        BackgroundKind::PointField
    );
    assert_eq!(
        ShowConfig::preset(Preset::Circus).background,
        BackgroundKind::Gradient
    );
    assert_eq!(
        ShowConfig::preset(Preset::Neon).background,
        BackgroundKind::Comets
    );
    assert!(ShowConfig::preset(Preset::Circus).pattern.stream.is_some());
}

#[test]
fn builder_rejects_zero_interval() {
    let res = ShowConfig::builder(Preset::Neon)
        .burst_interval(Duration::ZERO)
        .build();
    assert_eq!(res, Err(ConfigError::InvalidInterval));
}

#[test]
fn builder_rejects_bad_emoji_ranges() {
    let base = ShowConfig::preset(Preset::Classic).emoji;

    let inverted = EmojiConfig {
        size_px: (50.0, 10.0),
        ..base.clone()
    };
    assert!(matches!(
        ShowConfig::builder(Preset::Classic).emoji(inverted).build(),
        Err(ConfigError::InvalidRange { what: "emoji size", .. })
    ));

    let instant = EmojiConfig {
        duration_sec: (0.0, 3.0),
        ..base.clone()
    };
    assert!(matches!(
        ShowConfig::builder(Preset::Classic).emoji(instant).build(),
        Err(ConfigError::InvalidRange { what: "emoji duration", .. })
    ));

    let blank = EmojiConfig {
        glyphs: &[],
        ..base
    };
    assert_eq!(
        ShowConfig::builder(Preset::Classic).emoji(blank.clone()).build(),
        Err(ConfigError::EmptyGlyphs)
    );
    let none = ShowConfig::builder(Preset::Classic)
        .emoji(blank)
        .emoji_count(0)
        .build();
    assert!(none.is_ok());
}

#[test]
fn builder_overrides_keep_the_rest_of_the_preset() {
    let cfg = ShowConfig::builder(Preset::Circus)
        .background(BackgroundKind::PointField)
        .reactive(false)
        .autoplay_probe(Some(Duration::from_millis(500)))
        .pattern(BurstPattern::corner_cannons(Palette::Rainbow))
        .build()
        .unwrap();
    assert_eq!(cfg.background, BackgroundKind::PointField);
    assert_eq!(cfg.point_count, 200);
    assert!(!cfg.reactive);
    assert_eq!(cfg.autoplay_probe, Some(Duration::from_millis(500)));
    assert!(cfg.pattern.stream.is_none());
    assert_eq!(cfg.emoji, ShowConfig::preset(Preset::Circus).emoji);

    let sparse = ShowConfig::builder(Preset::Classic)
        .point_count(12)
        .background(BackgroundKind::PointField)
        .build()
        .unwrap();
    assert_eq!(sparse.point_count, 12);
}

fn stream(step: Duration, duration: Duration) -> BurstPattern {
    BurstPattern::default().with_stream(StreamSpec {
        duration,
        step,
        bursts: smallvec![BurstSpec::new(4, Origin::Fixed { x: 0.5, y: 0.5 }, Palette::Rainbow)],
    })
}

#[test]
fn builder_rejects_degenerate_streams() {
    let tiny = ShowConfig::builder(Preset::Circus)
        .pattern(stream(Duration::from_nanos(3), Duration::from_millis(1500)))
        .build();
    assert!(matches!(tiny, Err(ConfigError::InvalidStream { .. })));

    let long = ShowConfig::builder(Preset::Circus)
        .pattern(stream(Duration::from_millis(10), Duration::from_secs(60)))
        .build();
    assert!(matches!(long, Err(ConfigError::InvalidStream { .. })));

    let fine = ShowConfig::builder(Preset::Circus)
        .pattern(stream(Duration::from_millis(50), Duration::from_millis(1500)))
        .build();
    assert!(fine.is_ok());
}

#[test]
fn builder_rejects_grace_shorter_than_the_cleanup_sweep() {
    let emoji = EmojiConfig {
        grace: Duration::from_millis(10),
        ..ShowConfig::preset(Preset::Circus).emoji
    };
    let res = ShowConfig::builder(Preset::Circus).emoji(emoji).build();
    assert!(matches!(res, Err(ConfigError::GraceTooShort(..))));
}
