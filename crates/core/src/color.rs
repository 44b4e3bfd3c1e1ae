//! Color types used by particles and surfaces.
//!
//! Particles carry CSS-style HSL colors (hue in degrees, saturation and
//! lightness in percent) because that is how the glow is described and how
//! the browser canvas consumes it. The software raster converts them to sRGB
//! with [`Hsl::to_srgb`]. Background fills use [`Rgba`].

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSL color: hue in degrees, saturation and lightness in percent (0–100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// HSL color with straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub color: Hsl,
    pub alpha: f64,
}

/// sRGB color with straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Srgb,
    pub alpha: f64,
}

impl Srgb {
    /// Formats as `"#rrggbb"`, clamping and rounding each channel to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes to 8-bit channels.
    pub fn to_bytes(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { color: self, alpha }
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Returns the same hue and saturation with lightness raised by `amount`
    /// percentage points, capped at 100.
    pub fn lighten(self, amount: f64) -> Self {
        Self {
            l: (self.l + amount).min(100.0),
            ..self
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Hsla {
        Hsla { color: self, alpha }
    }

    /// Converts to sRGB using the CSS Color 4 HSL definition.
    ///
    /// Hue wraps modulo 360; saturation and lightness are clamped to [0, 100].
    pub fn to_srgb(self) -> Srgb {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let a = s * l.min(1.0 - l);
        let f = |n: f64| {
            let k = (n + h / 30.0).rem_euclid(12.0);
            l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };
        Srgb {
            r: f(0.0),
            g: f(8.0),
            b: f(4.0),
        }
    }
}

impl Hsla {
    /// CSS `hsla(h, s%, l%, a)` string for canvas fill styles.
    pub fn css(&self) -> String {
        let Hsl { h, s, l } = self.color;
        format!("hsla({h}, {s}%, {l}%, {})", self.alpha.clamp(0.0, 1.0))
    }
}

impl Rgba {
    /// CSS `rgba(r, g, b, a)` string with 8-bit channels.
    pub fn css(&self) -> String {
        let [r, g, b] = self.color.to_bytes();
        format!("rgba({r}, {g}, {b}, {})", self.alpha.clamp(0.0, 1.0))
    }
}
