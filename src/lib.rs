//! Moonshot - Earth/Moon gravity sandbox for a 320x240 display
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (gravity, RK4, spacecraft lifecycle, effects)
//! - `render`: Render surface abstraction and software framebuffer
//! - `input`: Edge-triggered touch handling
//! - `pacing`: Fixed-rate frame gate
//! - `settings`: Presentation preferences (never physics)

pub mod input;
pub mod pacing;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use std::time::Duration;

    /// Screen geometry (landscape)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Fixed integration step (pixels and ticks are the unit system)
    pub const SIM_DT: f32 = 1.0;
    /// Minimum wall-clock interval between ticks (~30 Hz)
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

    /// Earth sits at screen center and never moves
    pub const EARTH_RADIUS: f32 = 20.0;
    pub const GM_EARTH: f32 = 200.0;

    /// Moon on a fixed circular orbit around Earth
    pub const MOON_RADIUS: f32 = 8.0;
    pub const GM_MOON: f32 = 20.0;
    pub const MOON_ORBIT_RADIUS: f32 = 90.0;
    /// One revolution per MOON_TRAIL_LENGTH ticks
    pub const MOON_ANGULAR_VELOCITY: f32 = std::f32::consts::TAU / 360.0;

    /// Trail caps
    pub const SPACECRAFT_TRAIL_LENGTH: usize = 50;
    pub const MOON_TRAIL_LENGTH: usize = 360;

    /// Energy gain in one tick that counts as a gravity assist
    pub const SPARKLE_ENERGY_THRESHOLD: f32 = 0.1;

    /// Effect lifetimes in ticks
    pub const SPARKLE_LIFE: i32 = 20;
    pub const EXPLOSION_LIFE: i32 = 30;
    /// Explosion sizes by impact body
    pub const EARTH_EXPLOSION_SIZE: i32 = 15;
    pub const MOON_EXPLOSION_SIZE: i32 = 10;

    /// Launch speed heuristic: 1 + LAUNCH_SPEED_GAIN * (distance / half width)
    pub const LAUNCH_BASE_SPEED: f32 = 1.0;
    pub const LAUNCH_SPEED_GAIN: f32 = 3.0;

    /// Smallest separation used in the inverse-square law (pixels)
    pub const MIN_GRAVITY_SEPARATION: f32 = 1.0;
}

/// Screen center, where Earth lives
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
