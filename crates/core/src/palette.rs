//! Discrete particle palettes.
//!
//! Unlike a gradient palette, particles pick one entry uniformly at spawn
//! time and keep it for their whole life, so a palette here is just a
//! non-empty list of HSL colors.

use crate::color::Hsl;
use crate::error::EngineError;
use crate::prng::Xorshift64;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["swirl", "ember", "glacier"];

/// A non-empty set of HSL colors that particles draw from.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Hsl>,
}

impl Palette {
    /// Requires at least one color.
    pub fn new(colors: Vec<Hsl>) -> Result<Self, EngineError> {
        if colors.is_empty() {
            return Err(EngineError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "swirl" => Ok(Self::swirl()),
            "ember" => Ok(Self::ember()),
            "glacier" => Ok(Self::glacier()),
            other => Err(EngineError::InvalidPalette(format!(
                "no such palette: {other} (expected one of {})",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Hsl] {
        &self.colors
    }

    /// Draws one color uniformly.
    pub fn pick(&self, rng: &mut Xorshift64) -> Hsl {
        // Construction guarantees at least one entry.
        rng.pick(&self.colors)
            .copied()
            .unwrap_or_else(|| self.colors[0])
    }

    /// Purple, magenta, cyan, indigo, pink.
    pub fn swirl() -> Self {
        Self {
            colors: vec![
                Hsl::new(270.0, 80.0, 65.0),
                Hsl::new(300.0, 75.0, 60.0),
                Hsl::new(200.0, 85.0, 65.0),
                Hsl::new(250.0, 70.0, 70.0),
                Hsl::new(320.0, 80.0, 55.0),
            ],
        }
    }

    /// Warm reds and oranges.
    pub fn ember() -> Self {
        Self {
            colors: vec![
                Hsl::new(10.0, 85.0, 55.0),
                Hsl::new(25.0, 90.0, 60.0),
                Hsl::new(40.0, 95.0, 60.0),
                Hsl::new(350.0, 75.0, 50.0),
            ],
        }
    }

    /// Cold blues and teals.
    pub fn glacier() -> Self {
        Self {
            colors: vec![
                Hsl::new(190.0, 80.0, 70.0),
                Hsl::new(205.0, 70.0, 60.0),
                Hsl::new(220.0, 60.0, 75.0),
                Hsl::new(170.0, 65.0, 55.0),
            ],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::swirl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(EngineError::InvalidPalette(_))
        ));
    }

    #[test]
    fn swirl_has_five_entries() {
        let p = Palette::swirl();
        assert_eq!(p.len(), 5);
        assert!(!p.is_empty());
        assert_eq!(p.colors()[0], Hsl::new(270.0, 80.0, 65.0));
        assert_eq!(p.colors()[4], Hsl::new(320.0, 80.0, 55.0));
    }

    #[test]
    fn default_is_swirl() {
        assert_eq!(Palette::default(), Palette::swirl());
    }

    #[test]
    fn every_listed_name_resolves() {
        for name in Palette::list_names() {
            let p = Palette::from_name(name).unwrap();
            assert!(!p.is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn unknown_name_lists_alternatives() {
        let err = Palette::from_name("mauve").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mauve"), "{msg}");
        assert!(msg.contains("swirl"), "{msg}");
    }

    #[test]
    fn pick_only_returns_palette_members() {
        let p = Palette::swirl();
        let mut rng = Xorshift64::new(77);
        for _ in 0..1000 {
            let c = p.pick(&mut rng);
            assert!(p.colors().contains(&c), "picked {c:?} not in palette");
        }
    }

    #[test]
    fn single_color_palette_always_picks_it() {
        let only = Hsl::new(12.0, 34.0, 56.0);
        let p = Palette::new(vec![only]).unwrap();
        let mut rng = Xorshift64::new(3);
        for _ in 0..20 {
            assert_eq!(p.pick(&mut rng), only);
        }
    }

    #[test]
    fn pick_consumes_one_draw_and_indexes_by_it() {
        let p = Palette::swirl();
        let mut rng = Xorshift64::new(11);
        let mut shadow = Xorshift64::new(11);
        for _ in 0..50 {
            let picked = p.pick(&mut rng);
            let idx = shadow.next_usize(p.len());
            assert_eq!(picked, p.colors()[idx]);
        }
        assert_eq!(rng.next_u64(), shadow.next_u64());
    }
}
