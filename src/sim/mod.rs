//! Fixed-step simulation module
//!
//! All physics and entity lifecycle lives here:
//! - Fixed timestep only (dt = 1 tick)
//! - Stable iteration order (launch order)
//! - No rendering or platform dependencies

pub mod effects;
pub mod gravity;
pub mod integrator;
pub mod moon;
pub mod state;
pub mod tick;

pub use effects::{Effects, Explosion, Sparkle};
pub use gravity::GravityField;
pub use integrator::rk4_step;
pub use moon::MoonOrbit;
pub use state::{Impact, OrbitClass, Simulation, Spacecraft};
pub use tick::{CraftFate, TickInput, handle_tap, launch_velocity, tick, update_spacecraft};
