//! Seeded background stars
//!
//! Generated once; the same seed always yields the same sky.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// 0.3..1.0, used to dim the star color
    pub brightness: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `count` stars over a `width` x `height` screen
    pub fn generate(seed: u64, count: usize, width: f32, height: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..width).floor(),
                    rng.random_range(0.0..height).floor(),
                ),
                brightness: rng.random_range(0.3..1.0),
            })
            .collect();
        Self { stars }
    }
}
