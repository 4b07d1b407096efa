//! Fixed timestep simulation tick
//!
//! One call advances the Moon, ages effects, runs every spacecraft through
//! its lifecycle and compacts out the destroyed ones.

use glam::Vec2;

use super::effects::Effects;
use super::gravity::GravityField;
use super::integrator::rk4_step;
use super::state::{Impact, Simulation, Spacecraft};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Screen point of a fresh press (already edge-detected)
    pub tap: Option<Vec2>,
}

/// Outcome of one lifecycle step for a single craft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftFate {
    Continues,
    Destroyed(Impact),
}

/// Advance the simulation by one fixed timestep
pub fn tick(sim: &mut Simulation, input: &TickInput) {
    if let Some(point) = input.tap {
        handle_tap(sim, point);
    }

    sim.time_ticks += 1;
    sim.moon.advance();

    // Aged before the lifecycle so an effect spawned this tick is shown at full life
    sim.effects.age();

    let moon_pos = sim.moon.position;
    let field = sim.field;
    let effects = &mut sim.effects;
    let fates: Vec<CraftFate> = sim
        .spacecraft
        .iter_mut()
        .map(|craft| update_spacecraft(craft, &field, moon_pos, effects))
        .collect();

    // Order-preserving compaction; fates line up with the pre-pass order
    let mut fate_iter = fates.iter();
    sim.spacecraft
        .retain(|_| matches!(fate_iter.next(), Some(CraftFate::Continues)));
}

/// Run one craft through collision, integration and energy bookkeeping
///
/// Collisions are tested on the pre-step position, so a craft never
/// integrates through a body. A destroyed craft leaves exactly one explosion.
pub fn update_spacecraft(
    craft: &mut Spacecraft,
    field: &GravityField,
    moon_pos: Vec2,
    effects: &mut Effects,
) -> CraftFate {
    if let Some(impact) = craft.impact(field, moon_pos) {
        effects.spawn_explosion(craft.pos, impact.explosion_size());
        log::debug!(
            "Spacecraft #{} hit the {:?} at ({:.1}, {:.1})",
            craft.id,
            impact,
            craft.pos.x,
            craft.pos.y
        );
        return CraftFate::Destroyed(impact);
    }

    craft.prev_energy = craft.energy;
    let (pos, vel) = rk4_step(craft.pos, craft.vel, SIM_DT, |p| {
        field.acceleration(p, moon_pos)
    });
    craft.pos = pos;
    craft.vel = vel;
    craft.record_trail();
    craft.energy = field.specific_energy(craft.pos, craft.vel);

    let gain = craft.energy - craft.prev_energy;
    craft.sparkle = gain > SPARKLE_ENERGY_THRESHOLD;
    if craft.sparkle {
        effects.spawn_sparkle(craft.pos);
        log::trace!("Spacecraft #{} gained {:.3} energy", craft.id, gain);
    }

    CraftFate::Continues
}

/// Launch velocity for a tap: tangential, faster the farther from Earth
pub fn launch_velocity(earth_center: Vec2, point: Vec2) -> Vec2 {
    let offset = point - earth_center;
    let distance = offset.length();
    let dir = offset.normalize_or_zero();
    let tangent = dir.perp();
    let speed = LAUNCH_BASE_SPEED + LAUNCH_SPEED_GAIN * (distance / (SCREEN_WIDTH / 2.0));
    tangent * speed
}

/// Map a tap to a launch, or to a full reset when it lands on Earth
pub fn handle_tap(sim: &mut Simulation, point: Vec2) {
    let earth = sim.field.earth_center;
    if point.distance(earth) <= EARTH_RADIUS {
        log::info!(
            "Reset: cleared {} spacecraft and {} sparkles",
            sim.spacecraft.len(),
            sim.effects.sparkles.len()
        );
        sim.spacecraft.clear();
        sim.effects.clear_sparkles();
        return;
    }

    let vel = launch_velocity(earth, point);
    let id = sim.spawn_spacecraft(point, vel);
    log::debug!(
        "Launched spacecraft #{} at ({:.0}, {:.0}) speed {:.2}",
        id,
        point.x,
        point.y,
        vel.length()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen_center;
    use crate::sim::state::OrbitClass;
    use proptest::prelude::*;

    fn no_input() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_tap_right_of_earth_is_tangential() {
        let mut sim = Simulation::new();
        let point = Vec2::new(SCREEN_WIDTH / 2.0 + 50.0, SCREEN_HEIGHT / 2.0);
        handle_tap(&mut sim, point);

        assert_eq!(sim.ship_count(), 1);
        let craft = &sim.spacecraft[0];
        assert_eq!(craft.pos, point);
        assert!(craft.vel.x.abs() < 1e-6);
        let expected = 1.0 + 3.0 * (50.0 / (SCREEN_WIDTH / 2.0));
        assert!((craft.vel.y.abs() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_tap_on_earth_resets() {
        let mut sim = Simulation::new();
        let center = screen_center();
        for i in 0..5 {
            handle_tap(&mut sim, center + Vec2::new(40.0 + i as f32 * 10.0, 0.0));
        }
        for _ in 0..3 {
            sim.effects.spawn_sparkle(center + Vec2::new(70.0, 0.0));
        }
        sim.effects.spawn_explosion(center, EARTH_EXPLOSION_SIZE);
        sim.effects.spawn_explosion(center, MOON_EXPLOSION_SIZE);
        let explosions = sim.effects.explosions.clone();

        handle_tap(&mut sim, center + Vec2::new(3.0, -4.0));

        assert_eq!(sim.ship_count(), 0);
        assert!(sim.effects.sparkles.is_empty());
        assert_eq!(sim.effects.explosions, explosions);
    }

    #[test]
    fn test_many_taps_keep_every_craft() {
        let mut sim = Simulation::new();
        let tap = screen_center() + Vec2::new(60.0, 0.0);
        for _ in 0..33 {
            handle_tap(&mut sim, tap);
        }
        assert_eq!(sim.ship_count(), 33);
        assert!(sim.effects.explosions.is_empty());

        // A crowd of fresh sparkles leaves the first one untouched
        let first = tap + Vec2::new(1.0, 0.0);
        sim.effects.spawn_sparkle(first);
        for _ in 0..64 {
            sim.effects.spawn_sparkle(tap);
        }
        assert_eq!(sim.effects.sparkles[0].pos, first);
        assert_eq!(sim.effects.sparkles[0].life, SPARKLE_LIFE);
    }

    #[test]
    fn test_reset_tap_via_tick_leaves_explosions_running() {
        let mut sim = Simulation::new();
        let center = screen_center();
        sim.effects.spawn_explosion(center, EARTH_EXPLOSION_SIZE);
        sim.effects.spawn_sparkle(center + Vec2::new(50.0, 0.0));
        let input = TickInput { tap: Some(center) };
        tick(&mut sim, &input);
        assert!(sim.effects.sparkles.is_empty());
        assert_eq!(sim.effects.explosions.len(), 1);
        assert_eq!(sim.effects.explosions[0].life, EXPLOSION_LIFE - 1);
    }

    #[test]
    fn test_radial_fall_destroyed_on_pre_step_position() {
        let mut sim = Simulation::new();
        let center = screen_center();
        // Start on the far side from the Moon, falling straight in
        sim.spawn_spacecraft(center - Vec2::new(40.0, 0.0), Vec2::new(1.0, 0.0));

        let mut destroyed_at = None;
        for n in 0..100 {
            let before = sim.spacecraft[0].pos;
            let inside = before.distance(center) <= EARTH_RADIUS;
            let explosions_before = sim.effects.explosions.len();
            tick(&mut sim, &no_input());

            if inside {
                assert!(sim.spacecraft.is_empty(), "craft inside Earth survived tick {n}");
                assert_eq!(sim.effects.explosions.len(), explosions_before + 1);
                let e = sim.effects.explosions.last().copied().unwrap();
                assert_eq!(e.pos, before);
                assert_eq!(e.size, EARTH_EXPLOSION_SIZE);
                destroyed_at = Some(n);
                break;
            }
            assert_eq!(sim.ship_count(), 1, "craft outside Earth destroyed on tick {n}");
        }
        assert!(destroyed_at.is_some(), "radial fall never reached Earth");
    }

    #[test]
    fn test_moon_impact_spawns_small_explosion() {
        let mut sim = Simulation::new();
        let mut fx = Effects::default();
        let moon_pos = sim.moon.position;
        let id = sim.next_entity_id();
        let mut craft = Spacecraft::new(id, moon_pos + Vec2::new(2.0, 0.0), Vec2::ZERO, &sim.field);

        let fate = update_spacecraft(&mut craft, &sim.field, moon_pos, &mut fx);
        assert_eq!(fate, CraftFate::Destroyed(Impact::Moon));
        assert_eq!(fx.explosions.len(), 1);
        assert_eq!(fx.explosions[0].size, MOON_EXPLOSION_SIZE);
        assert!(craft.trail.is_empty(), "destroyed craft must not integrate");
    }

    #[test]
    fn test_trails_capped_after_1000_ticks() {
        let mut sim = Simulation::new();
        let center = screen_center();
        for r in [45.0, 60.0, 130.0] {
            let point = center + Vec2::new(0.0, -r);
            handle_tap(&mut sim, point);
        }
        for _ in 0..1000 {
            tick(&mut sim, &no_input());
            assert!(sim.moon.trail.len() <= MOON_TRAIL_LENGTH);
            for craft in &sim.spacecraft {
                assert!(craft.trail.len() <= SPACECRAFT_TRAIL_LENGTH);
            }
        }
        assert_eq!(sim.moon.trail.len(), MOON_TRAIL_LENGTH);
    }

    #[test]
    fn test_sparkle_shown_for_exactly_its_life() {
        let mut sim = Simulation::new();
        sim.effects.spawn_sparkle(Vec2::new(10.0, 10.0));
        // Frame 1 is the spawn frame
        for frame in 2..=SPARKLE_LIFE {
            tick(&mut sim, &no_input());
            assert_eq!(sim.effects.sparkles.len(), 1, "missing on frame {frame}");
        }
        tick(&mut sim, &no_input());
        assert!(sim.effects.sparkles.is_empty());
    }

    #[test]
    fn test_explosion_shown_for_exactly_its_life() {
        let mut sim = Simulation::new();
        sim.effects.spawn_explosion(Vec2::new(10.0, 10.0), EARTH_EXPLOSION_SIZE);
        for frame in 2..=EXPLOSION_LIFE {
            tick(&mut sim, &no_input());
            assert_eq!(sim.effects.explosions.len(), 1, "missing on frame {frame}");
        }
        tick(&mut sim, &no_input());
        assert!(sim.effects.explosions.is_empty());
    }

    #[test]
    fn test_in_tick_explosion_starts_at_full_life() {
        let mut sim = Simulation::new();
        let center = screen_center();
        sim.spawn_spacecraft(center + Vec2::new(5.0, 0.0), Vec2::ZERO);
        tick(&mut sim, &no_input());
        assert_eq!(sim.effects.explosions.len(), 1);
        assert_eq!(sim.effects.explosions[0].life, EXPLOSION_LIFE);
    }

    #[test]
    fn test_moon_pass_flips_to_escape_with_sparkle() {
        let field = GravityField::default();
        let moon_pos = field.earth_center + Vec2::new(MOON_ORBIT_RADIUS, 0.0);
        // Heading straight at the Moon from 14 px out, just under escape energy
        let pos = moon_pos - Vec2::new(14.0, 0.0);
        let r = pos.distance(field.earth_center);
        let speed = (2.0 * (field.earth_mu / r - 0.05)).sqrt();
        let mut craft = Spacecraft::new(1, pos, Vec2::new(speed, 0.0), &field);
        assert_eq!(craft.orbit_class(), OrbitClass::Bound);

        let mut fx = Effects::default();
        let fate = update_spacecraft(&mut craft, &field, moon_pos, &mut fx);

        assert_eq!(fate, CraftFate::Continues);
        assert!(craft.prev_energy < 0.0);
        assert!(craft.energy >= 0.0, "energy {} after pass", craft.energy);
        assert_eq!(craft.orbit_class(), OrbitClass::Escape);
        assert!(craft.sparkle);
        assert_eq!(fx.sparkles.len(), 1);
        assert_eq!(fx.sparkles[0].pos, craft.pos);
    }

    #[test]
    fn test_sparkle_flag_clears_without_gain() {
        let field = GravityField::earth_only();
        let r = 60.0;
        let pos = field.earth_center + Vec2::new(r, 0.0);
        let mut craft = Spacecraft::new(1, pos, Vec2::new(0.0, (GM_EARTH / r).sqrt()), &field);
        craft.sparkle = true;
        let mut fx = Effects::default();
        update_spacecraft(&mut craft, &field, Vec2::new(-1000.0, -1000.0), &mut fx);
        assert!(!craft.sparkle);
        assert!(fx.sparkles.is_empty());
        assert_eq!(craft.trail.len(), 1);
    }

    #[test]
    fn test_removal_keeps_survivors_in_order() {
        let mut sim = Simulation::new();
        let center = screen_center();
        let vel = Vec2::ZERO;
        let a = sim.spawn_spacecraft(center + Vec2::new(0.0, -60.0), vel);
        sim.spawn_spacecraft(center + Vec2::new(2.0, 0.0), vel);
        let b = sim.spawn_spacecraft(center + Vec2::new(0.0, 60.0), vel);
        sim.spawn_spacecraft(center + Vec2::new(-3.0, 1.0), vel);
        let c = sim.spawn_spacecraft(center + Vec2::new(-60.0, 0.0), vel);

        tick(&mut sim, &no_input());

        let ids: Vec<u32> = sim.spacecraft.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert!(sim.spacecraft.iter().all(|s| s.trail.len() == 1));
        assert_eq!(sim.effects.explosions.len(), 2);
    }

    #[test]
    fn test_energy_sign_matches_class_over_run() {
        let mut sim = Simulation::new();
        let center = screen_center();
        for p in [Vec2::new(60.0, 0.0), Vec2::new(0.0, 100.0), Vec2::new(-140.0, 30.0)] {
            handle_tap(&mut sim, center + p);
        }
        for _ in 0..600 {
            tick(&mut sim, &no_input());
            for craft in &sim.spacecraft {
                assert_eq!(craft.energy < 0.0, craft.orbit_class() == OrbitClass::Bound);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_launch_velocity_is_tangential(
            x in 0.0f32..SCREEN_WIDTH,
            y in 0.0f32..SCREEN_HEIGHT,
        ) {
            let center = screen_center();
            let point = Vec2::new(x, y);
            prop_assume!(point.distance(center) > EARTH_RADIUS);

            let vel = launch_velocity(center, point);
            let radial = (point - center).normalize();
            prop_assert!(vel.dot(radial).abs() < 1e-3);
            let expected = 1.0 + 3.0 * point.distance(center) / (SCREEN_WIDTH / 2.0);
            prop_assert!((vel.length() - expected).abs() < 1e-3);
        }

        #[test]
        fn prop_removal_destroys_exactly_the_colliders(
            offsets in proptest::collection::vec((-70.0f32..70.0, -70.0f32..70.0), 1..12),
        ) {
            let mut sim = Simulation::with_field(GravityField::earth_only());
            let center = screen_center();
            for (dx, dy) in &offsets {
                sim.spawn_spacecraft(center + Vec2::new(*dx, *dy), Vec2::ZERO);
            }
            let mut next_moon = sim.moon.clone();
            next_moon.advance();
            let expected: Vec<u32> = sim
                .spacecraft
                .iter()
                .filter(|c| c.pos.distance(center) > EARTH_RADIUS)
                .filter(|c| c.pos.distance(next_moon.position) > MOON_RADIUS)
                .map(|c| c.id)
                .collect();
            let removed = sim.ship_count() - expected.len();
            let explosions_before = sim.effects.explosions.len();

            tick(&mut sim, &TickInput::default());

            let ids: Vec<u32> = sim.spacecraft.iter().map(|c| c.id).collect();
            prop_assert_eq!(ids, expected);
            prop_assert!(sim.spacecraft.iter().all(|c| c.trail.len() == 1));
            prop_assert_eq!(sim.effects.explosions.len(), explosions_before + removed);
        }

        #[test]
        fn prop_trail_caps_hold_under_random_taps(
            taps in proptest::collection::vec(
                (0u32..200, 0.0f32..SCREEN_WIDTH, 0.0f32..SCREEN_HEIGHT),
                0..20,
            ),
        ) {
            let mut sim = Simulation::new();
            for n in 0..200u32 {
                let tap = taps
                    .iter()
                    .find(|(at, _, _)| *at == n)
                    .map(|(_, x, y)| Vec2::new(*x, *y));
                tick(&mut sim, &TickInput { tap });
                prop_assert!(sim.moon.trail.len() <= MOON_TRAIL_LENGTH);
                for craft in &sim.spacecraft {
                    prop_assert!(craft.trail.len() <= SPACECRAFT_TRAIL_LENGTH);
                    prop_assert!(craft.pos.is_finite());
                }
            }
        }
    }
}
