//! RGB(A) color records and the color operations used by the icon shaders.
//!
//! Channels are f64 in [0, 255] so that chained lerps and darkens keep their
//! precision; values are only quantized when a pixel is written. Alpha is
//! optional: a missing alpha means fully opaque and is omitted from the CSS
//! form, but counts as `1.0` in blending maths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prng::RandomStream;

/// RGB color with channels in [0, 255] and an optional alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

/// Hue (degrees), saturation and value, each of `s`, `v` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);

    /// Opaque color without an explicit alpha.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Color with an explicit alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a),
        }
    }

    /// Alpha used for blending: a missing alpha is opaque.
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }

    /// Uniformly random opaque color (three `range(0, 256)` draws).
    pub fn random(rng: &mut RandomStream) -> Self {
        let r = rng.range(0, 256);
        let g = rng.range(0, 256);
        let b = rng.range(0, 256);
        Self::rgb(f64::from(r), f64::from(g), f64::from(b))
    }

    /// Interpolates from `self` to `other`, `t` clamped to [0, 1].
    ///
    /// The result always carries an alpha. A missing alpha counts as 1; an
    /// explicit alpha of 0 stays 0, so fully transparent styles (a potion
    /// with `glass_alpha = 0`) lerp to transparent rather than opaque.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let aa = self.alpha();
        let ba = other.alpha();
        Color {
            r: (other.r - self.r) * t + self.r,
            g: (other.g - self.g) * t + self.g,
            b: (other.b - self.b) * t + self.b,
            a: Some((ba - aa) * t + aa),
        }
    }

    /// Scales the channels toward black by `t` (1 = black). Alpha is kept.
    pub fn darken(self, t: f64) -> Color {
        Color {
            r: self.r * (1.0 - t),
            g: self.g * (1.0 - t),
            b: self.b * (1.0 - t),
            a: self.a,
        }
    }

    /// Moves the channels toward white by `t` (1 = white). Alpha is kept.
    pub fn lighten(self, t: f64) -> Color {
        let keep = 1.0 - t;
        let up = |c: f64| (1.0 - (1.0 - c / 255.0) * keep) * 255.0;
        Color {
            r: up(self.r),
            g: up(self.g),
            b: up(self.b),
            a: self.a,
        }
    }

    /// Random color whose channels are within `max_amount / 2` of `self`.
    pub fn randomize(self, max_amount: i32, rng: &mut RandomStream) -> Color {
        let half = max_amount / 2;
        let mut jitter = |c: f64| (c + f64::from(rng.range(-half, half))).clamp(0.0, 255.0);
        let r = jitter(self.r);
        let g = jitter(self.g);
        let b = jitter(self.b);
        Color { r, g, b, a: self.a }
    }

    /// Random color whose channels are at least `range / 2` away from `self`
    /// (modulo 256).
    pub fn invert_randomize(self, range: i32, rng: &mut RandomStream) -> Color {
        let offset = f64::from(range / 2);
        let mut shift = |c: f64| (c + offset + f64::from(rng.range(0, 255 - range))).rem_euclid(256.0);
        let r = shift(self.r);
        let g = shift(self.g);
        let b = shift(self.b);
        Color { r, g, b, a: self.a }
    }

    /// Quantizes to RGBA8: channels floored, alpha rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| c.floor().clamp(0.0, 255.0) as u8;
        let a = (self.alpha().clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = (self.r.floor(), self.g.floor(), self.b.floor());
        match self.a {
            Some(a) => write!(f, "rgba({r},{g},{b},{a})"),
            None => write!(f, "rgb({r},{g},{b})"),
        }
    }
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Converts to an opaque RGB color with integer channels.
    pub fn to_rgb(self) -> Color {
        let c = self.v * self.s;
        let x = c * (1.0 - ((self.h / 60.0) % 2.0 - 1.0).abs());
        let m = self.v - c;
        let (r, g, b) = if self.h < 60.0 {
            (c, x, 0.0)
        } else if self.h < 120.0 {
            (x, c, 0.0)
        } else if self.h < 180.0 {
            (0.0, c, x)
        } else if self.h < 240.0 {
            (0.0, x, c)
        } else if self.h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };
        Color::rgb(
            ((r + m) * 255.0).round(),
            ((g + m) * 255.0).round(),
            ((b + m) * 255.0).round(),
        )
    }
}
