//! Classical fourth-order Runge-Kutta for dr/dt = v, dv/dt = a(r)
//!
//! Fixed step, no error estimate. Close passes are stiff enough that Euler
//! visibly gains energy; RK4 keeps trajectories plausible at dt = 1.

use glam::Vec2;

/// Advance `(pos, vel)` by `dt` under the acceleration field `accel`
pub fn rk4_step<F>(pos: Vec2, vel: Vec2, dt: f32, accel: F) -> (Vec2, Vec2)
where
    F: Fn(Vec2) -> Vec2,
{
    let half = 0.5 * dt;

    let k1_r = vel;
    let k1_v = accel(pos);

    let k2_r = vel + k1_v * half;
    let k2_v = accel(pos + k1_r * half);

    let k3_r = vel + k2_v * half;
    let k3_v = accel(pos + k2_r * half);

    let k4_r = vel + k3_v * dt;
    let k4_v = accel(pos + k3_r * dt);

    let new_pos = pos + (k1_r + k2_r * 2.0 + k3_r * 2.0 + k4_r) * (dt / 6.0);
    let new_vel = vel + (k1_v + k2_v * 2.0 + k3_v * 2.0 + k4_v) * (dt / 6.0);
    (new_pos, new_vel)
}
