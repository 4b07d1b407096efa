//! Transient visual effects spawned by physical events
//!
//! Effects never feed back into the physics. Each one loses one unit of
//! life per tick and is dropped the tick its life reaches zero.

use glam::Vec2;

use crate::consts::*;

/// Short-lived glint marking a gravity assist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub pos: Vec2,
    pub life: i32,
}

impl Sparkle {
    /// Remaining-life fraction in (0, 1]
    pub fn intensity(&self) -> f32 {
        (self.life as f32 / SPARKLE_LIFE as f32).clamp(0.0, 1.0)
    }
}

/// Expanding, fading blast left behind by an impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    /// Nominal radius chosen by impact body
    pub size: i32,
    pub life: i32,
    /// Opacity, 1 at spawn fading toward 0
    pub alpha: f32,
    /// Drawn radius, grows from half the nominal size
    pub radius: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, size: i32) -> Self {
        let mut explosion = Self {
            pos,
            size,
            life: EXPLOSION_LIFE,
            alpha: 1.0,
            radius: 0.0,
        };
        explosion.refresh_visuals();
        explosion
    }

    /// Fraction of the lifetime already elapsed (0 at spawn)
    pub fn progress(&self) -> f32 {
        (1.0 - self.life as f32 / EXPLOSION_LIFE as f32).clamp(0.0, 1.0)
    }

    fn refresh_visuals(&mut self) {
        let t = self.progress();
        self.alpha = 1.0 - t;
        self.radius = self.size as f32 * (0.5 + t);
    }
}

/// Both effect collections, aged independently
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub sparkles: Vec<Sparkle>,
    pub explosions: Vec<Explosion>,
}

impl Effects {
    pub fn spawn_sparkle(&mut self, pos: Vec2) {
        self.sparkles.push(Sparkle {
            pos,
            life: SPARKLE_LIFE,
        });
    }

    pub fn spawn_explosion(&mut self, pos: Vec2, size: i32) {
        self.explosions.push(Explosion::new(pos, size));
    }

    /// Take one tick of life from every effect and drop the expired ones
    pub fn age(&mut self) {
        self.sparkles.retain_mut(|s| {
            s.life -= 1;
            s.life > 0
        });
        self.explosions.retain_mut(|e| {
            e.life -= 1;
            e.refresh_visuals();
            e.life > 0
        });
    }

    pub fn clear_sparkles(&mut self) {
        self.sparkles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty() && self.explosions.is_empty()
    }
}
