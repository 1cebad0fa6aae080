use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }

    pub fn css_alpha(self, alpha: f32) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.0,
            self.1,
            self.2,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// HSL to RGB with hue in degrees and saturation/lightness in 0..1.
pub fn hsl(hue_deg: f32, sat: f32, light: f32) -> Rgb {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let s = sat.clamp(0.0, 1.0);
    let l = light.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb(to_u8(r), to_u8(g), to_u8(b))
}

/// Finite color set a burst or field draws from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Palette {
    /// Any hue at full saturation, 60% lightness.
    Rainbow,
    Fixed(&'static [Rgb]),
}

impl Palette {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        match self {
            Palette::Rainbow => hsl(rng.gen::<f32>() * 360.0, 1.0, 0.6),
            Palette::Fixed(colors) if !colors.is_empty() => colors[rng.gen_range(0..colors.len())],
            Palette::Fixed(_) => Rgb(255, 255, 255),
        }
    }
}

pub const PARTY: &[Rgb] = &[
    Rgb::hex(0xffea00),
    Rgb::hex(0xff46c4),
    Rgb::hex(0x63f7ff),
    Rgb::hex(0x26ccff),
    Rgb::hex(0xa25afd),
    Rgb::hex(0xff5e7e),
];

pub const NEON: &[Rgb] = &[
    Rgb::hex(0x39ff14),
    Rgb::hex(0xff00ff),
    Rgb::hex(0x00e5ff),
    Rgb::hex(0xfff01f),
];

/// Linear interpolation driven by a uniform sample; tolerates `lo == hi`.
#[inline]
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.gen::<f32>()
}
