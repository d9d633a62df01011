use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::Color;

/// Assigns a display color to a run when it joins a comparison set.
///
/// `ordinal` counts every add the set has accepted, including runs that were
/// later removed, so it never repeats within one set.
pub trait ColorPolicy: fmt::Debug + Send {
    fn color_for(&mut self, ordinal: u64) -> Color;
}

/// Cycles through a fixed palette by insertion ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteCycle {
    palette: Vec<Color>,
}

/// Category palette with enough contrast against a white plot background.
pub const DEFAULT_PALETTE: [u32; 8] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x17becf,
];

impl PaletteCycle {
    /// Falls back to the default palette when `palette` is empty.
    #[must_use]
    pub fn new(palette: Vec<Color>) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        Self { palette }
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}

impl Default for PaletteCycle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .map(|rgb| Color::from_rgb_u32(*rgb))
                .collect(),
        }
    }
}

impl ColorPolicy for PaletteCycle {
    fn color_for(&mut self, ordinal: u64) -> Color {
        let slot = (ordinal % self.palette.len() as u64) as usize;
        self.palette[slot]
    }
}

/// Random hue with fixed saturation and lightness.
///
/// Fixing saturation and lightness keeps every line legible against the plot
/// background; only the hue varies.
#[derive(Debug, Clone)]
pub struct RandomHue {
    rng: StdRng,
    saturation: f64,
    lightness: f64,
}

impl RandomHue {
    pub const DEFAULT_SATURATION: f64 = 0.70;
    pub const DEFAULT_LIGHTNESS: f64 = 0.50;

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Sequence seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_tone(mut self, saturation: f64, lightness: f64) -> Self {
        self.saturation = saturation.clamp(0.0, 1.0);
        self.lightness = lightness.clamp(0.0, 1.0);
        self
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            saturation: Self::DEFAULT_SATURATION,
            lightness: Self::DEFAULT_LIGHTNESS,
        }
    }
}

impl ColorPolicy for RandomHue {
    fn color_for(&mut self, _ordinal: u64) -> Color {
        let hue = self.rng.random_range(0.0..360.0);
        Color::from_hsl(hue, self.saturation, self.lightness)
    }
}
