use resvg::tiny_skia::Color;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("unknown color name: {0}")]
    UnknownName(String),
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// RGB triple with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue, lightness and saturation, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

/// Something that can be turned into an [`Rgb`]: a color name, a `#rrggbb`
/// string, or a triple that is used as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Named(String),
    Rgb(Rgb),
}

// Base single-letter colors plus the CSS names in common use for charts.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("b", (0, 0, 255)),
    ("g", (0, 128, 0)),
    ("r", (255, 0, 0)),
    ("c", (0, 191, 191)),
    ("m", (191, 0, 191)),
    ("y", (191, 191, 0)),
    ("k", (0, 0, 0)),
    ("w", (255, 255, 255)),
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("aqua", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("fuchsia", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("lightgray", (211, 211, 211)),
    ("lightgrey", (211, 211, 211)),
    ("darkgray", (169, 169, 169)),
    ("darkgrey", (169, 169, 169)),
    ("dimgray", (105, 105, 105)),
    ("maroon", (128, 0, 0)),
    ("darkred", (139, 0, 0)),
    ("crimson", (220, 20, 60)),
    ("firebrick", (178, 34, 34)),
    ("tomato", (255, 99, 71)),
    ("orange", (255, 165, 0)),
    ("darkorange", (255, 140, 0)),
    ("gold", (255, 215, 0)),
    ("olive", (128, 128, 0)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("forestgreen", (34, 139, 34)),
    ("darkgreen", (0, 100, 0)),
    ("seagreen", (46, 139, 87)),
    ("teal", (0, 128, 128)),
    ("navy", (0, 0, 128)),
    ("royalblue", (65, 105, 225)),
    ("skyblue", (135, 206, 235)),
    ("steelblue", (70, 130, 180)),
    ("dodgerblue", (30, 144, 255)),
    ("purple", (128, 0, 128)),
    ("indigo", (75, 0, 130)),
    ("violet", (238, 130, 238)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("chocolate", (210, 105, 30)),
    ("tan", (210, 180, 140)),
    ("beige", (245, 245, 220)),
    ("ivory", (255, 255, 240)),
];

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    pub fn to_hls(self) -> Hls {
        let max_c = self.r.max(self.g).max(self.b);
        let min_c = self.r.min(self.g).min(self.b);
        let sum_c = max_c + min_c;
        let range_c = max_c - min_c;
        let l = sum_c / 2.0;

        if min_c == max_c {
            return Hls { h: 0.0, l, s: 0.0 };
        }

        let s = if l <= 0.5 {
            range_c / sum_c
        } else {
            range_c / (2.0 - max_c - min_c)
        };

        let rc = (max_c - self.r) / range_c;
        let gc = (max_c - self.g) / range_c;
        let bc = (max_c - self.b) / range_c;

        let h = if self.r == max_c {
            bc - gc
        } else if self.g == max_c {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Hls {
            h: (h / 6.0).rem_euclid(1.0),
            l,
            s,
        }
    }

    /// Opaque tiny-skia color for this triple
    pub fn to_color(self) -> Color {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::from_rgba8(channel(self.r), channel(self.g), channel(self.b), 255)
    }
}

impl Hls {
    pub fn to_rgb(self) -> Rgb {
        if self.s == 0.0 {
            return Rgb::new(self.l, self.l, self.l);
        }

        let m2 = if self.l <= 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let m1 = 2.0 * self.l - m2;

        Rgb::new(
            hue_channel(m1, m2, self.h + 1.0 / 3.0),
            hue_channel(m1, m2, self.h),
            hue_channel(m1, m2, self.h - 1.0 / 3.0),
        )
    }
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

impl ColorSpec {
    pub fn named(name: &str) -> Self {
        ColorSpec::Named(name.to_string())
    }

    pub fn resolve(&self) -> Result<Rgb, ColorParseError> {
        match self {
            ColorSpec::Rgb(rgb) => Ok(*rgb),
            ColorSpec::Named(name) => {
                let name = name.trim();
                if name.starts_with('#') {
                    return parse_hex(name);
                }

                let lower = name.to_ascii_lowercase();
                NAMED_COLORS
                    .iter()
                    .find(|(n, _)| *n == lower)
                    .map(|(_, (r, g, b))| Rgb::from_u8(*r, *g, *b))
                    .ok_or_else(|| ColorParseError::UnknownName(name.to_string()))
            }
        }
    }
}

impl From<Rgb> for ColorSpec {
    fn from(rgb: Rgb) -> Self {
        ColorSpec::Rgb(rgb)
    }
}

fn parse_hex(input: &str) -> Result<Rgb, ColorParseError> {
    let digits = &input[1..];
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex(input.to_string()));
    }

    let byte = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ColorParseError::InvalidHex(input.to_string()))
    };

    Ok(Rgb::from_u8(byte(0)?, byte(2)?, byte(4)?))
}

/// Lighten a color toward white while keeping its hue.
///
/// `amount` is clamped to [0, 1]. At 0 the color comes back unchanged, at 1
/// the lightness is pushed all the way to 1.0.
pub fn lighten(spec: &ColorSpec, amount: f64) -> Result<Rgb, ColorParseError> {
    let rgb = spec.resolve()?;
    let amount = amount.clamp(0.0, 1.0);

    let hls = rgb.to_hls();
    let lightness = 1.0 - (1.0 - amount) * (1.0 - hls.l);

    Ok(Hls { l: lightness, ..hls }.to_rgb())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Rgb, b: Rgb) {
        assert!((a.r - b.r).abs() < 1e-6, "{a:?} != {b:?}");
        assert!((a.g - b.g).abs() < 1e-6, "{a:?} != {b:?}");
        assert!((a.b - b.b).abs() < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn zero_amount_is_identity() {
        for name in ["red", "green", "navy", "gold", "#1d428a", "gray"] {
            let spec = ColorSpec::named(name);
            let original = spec.resolve().unwrap();
            assert_close(lighten(&spec, 0.0).unwrap(), original);
        }

        let raw = Rgb::new(0.2, 0.4, 0.6);
        assert_close(lighten(&ColorSpec::from(raw), 0.0).unwrap(), raw);
    }

    #[test]
    fn full_amount_reaches_white() {
        for name in ["red", "green", "black", "purple"] {
            let out = lighten(&ColorSpec::named(name), 1.0).unwrap();
            assert!((out.to_hls().l - 1.0).abs() < 1e-12);
            assert_close(out, Rgb::new(1.0, 1.0, 1.0));
        }
    }

    #[test]
    fn marker_tints() {
        let red = lighten(&ColorSpec::named("Red"), 0.2).unwrap();
        assert_close(red, Rgb::new(1.0, 0.2, 0.2));

        let green = lighten(&ColorSpec::named("Green"), 0.3).unwrap();
        let hls = green.to_hls();
        let base = ColorSpec::named("green").resolve().unwrap().to_hls();
        assert!((hls.h - base.h).abs() < 1e-9);
        assert!((hls.l - (1.0 - 0.7 * (1.0 - base.l))).abs() < 1e-9);
        assert!(green.r < 1e-9 && green.b < 1e-9);
    }

    #[test]
    fn amount_is_clamped() {
        let spec = ColorSpec::named("blue");
        assert_eq!(lighten(&spec, -3.0).unwrap(), lighten(&spec, 0.0).unwrap());
        assert_eq!(lighten(&spec, 7.0).unwrap(), lighten(&spec, 1.0).unwrap());
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(
            ColorSpec::named("WHITE").resolve(),
            ColorSpec::named("white").resolve()
        );
    }

    #[test]
    fn bad_inputs_are_errors() {
        assert_eq!(
            ColorSpec::named("not-a-color").resolve(),
            Err(ColorParseError::UnknownName("not-a-color".to_string()))
        );
        assert!(matches!(
            ColorSpec::named("#12345").resolve(),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            ColorSpec::named("#zz0000").resolve(),
            Err(ColorParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn hls_round_trip() {
        let rgb = Rgb::new(0.8, 0.3, 0.1);
        assert_close(rgb.to_hls().to_rgb(), rgb);
    }
}
