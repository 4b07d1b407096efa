//! Moon orbit driver
//!
//! The Moon is a forcing function on a fixed circle. It does not feel
//! Earth's (or anyone's) gravity.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::*;
use crate::{polar_to_cartesian, screen_center, wrap_angle};

#[derive(Debug, Clone)]
pub struct MoonOrbit {
    /// Orbit center (Earth)
    pub center: Vec2,
    pub orbit_radius: f32,
    /// Radians added per tick
    pub angular_velocity: f32,
    /// Current angle, kept in [0, 2π)
    pub angle: f32,
    pub position: Vec2,
    /// Oldest first
    pub trail: VecDeque<Vec2>,
}

impl Default for MoonOrbit {
    fn default() -> Self {
        Self::new(screen_center(), MOON_ORBIT_RADIUS, MOON_ANGULAR_VELOCITY)
    }
}

impl MoonOrbit {
    pub fn new(center: Vec2, orbit_radius: f32, angular_velocity: f32) -> Self {
        Self {
            center,
            orbit_radius,
            angular_velocity,
            angle: 0.0,
            position: center + Vec2::new(orbit_radius, 0.0),
            trail: VecDeque::with_capacity(MOON_TRAIL_LENGTH + 1),
        }
    }

    /// Step one tick along the orbit and record the new position
    pub fn advance(&mut self) {
        self.angle = wrap_angle(self.angle + self.angular_velocity);
        self.position = self.center + polar_to_cartesian(self.orbit_radius, self.angle);

        self.trail.push_back(self.position);
        while self.trail.len() > MOON_TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }
}
