//! Combined Earth + Moon gravity field
//!
//! Earth is pinned at screen center. The Moon's position is passed in per
//! query because it is driven externally by the orbit driver.

use glam::Vec2;

use crate::consts::*;
use crate::screen_center;

/// Inverse-square field of the two gravitating bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub earth_center: Vec2,
    pub earth_mu: f32,
    pub moon_mu: f32,
}

impl Default for GravityField {
    fn default() -> Self {
        Self {
            earth_center: screen_center(),
            earth_mu: GM_EARTH,
            moon_mu: GM_MOON,
        }
    }
}

impl GravityField {
    /// Field with the Moon switched off (pure Kepler problem)
    pub fn earth_only() -> Self {
        Self {
            moon_mu: 0.0,
            ..Self::default()
        }
    }

    /// Total acceleration at `position` with the Moon at `moon_position`
    #[inline]
    pub fn acceleration(&self, position: Vec2, moon_position: Vec2) -> Vec2 {
        point_mass_pull(position, self.earth_center, self.earth_mu)
            + point_mass_pull(position, moon_position, self.moon_mu)
    }

    /// Earth-centred specific orbital energy: ½|v|² − μ/r
    #[inline]
    pub fn specific_energy(&self, position: Vec2, velocity: Vec2) -> f32 {
        let r = position
            .distance(self.earth_center)
            .max(MIN_GRAVITY_SEPARATION);
        0.5 * velocity.length_squared() - self.earth_mu / r
    }
}

/// a = μ · r_vec / |r_vec|³, with the separation clamped away from zero
#[inline]
fn point_mass_pull(position: Vec2, body: Vec2, mu: f32) -> Vec2 {
    if mu == 0.0 {
        return Vec2::ZERO;
    }
    let r_vec = body - position;
    let r = r_vec.length().max(MIN_GRAVITY_SEPARATION);
    r_vec * (mu / (r * r * r))
}
