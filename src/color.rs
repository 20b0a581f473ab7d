use std::f64::consts::TAU;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use serde::Deserialize;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.3, 0.5, 0.7, 1.0)
    }
}

/// Maps a whole-second timestamp and a random draw in `[0, 1)` into `[0, 1]`.
pub fn cycle_channel(seconds: u64, draw: f32) -> f32 {
    let phase = seconds as f64 + draw as f64 * TAU;

    ((phase.sin() * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
}

/// Produces a new random opaque color once per elapsed second.
pub struct ColorCycler {
    generator: SmallRng,
    second: Option<u64>,
    current: Color,
}

impl ColorCycler {
    pub fn new(seed: Option<u64>) -> Self {
        let generator = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };

        Self {
            generator,
            second: None,
            current: Color::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn color_at(&mut self, elapsed: Duration) -> Color {
        let second = elapsed.as_secs();

        if self.second != Some(second) {
            self.current = Color::new(
                cycle_channel(second, self.generator.gen()),
                cycle_channel(second, self.generator.gen()),
                cycle_channel(second, self.generator.gen()),
                1.0,
            );
            self.second = Some(second);

            log::trace!("color for second {second}: {:?}", self.current);
        }

        self.current
    }
}
