//! Simulation state and entity types
//!
//! Everything mutable lives in [`Simulation`]; nothing is global.

use std::collections::VecDeque;

use glam::Vec2;

use super::effects::Effects;
use super::gravity::GravityField;
use super::moon::MoonOrbit;
use crate::consts::*;

/// Orbit classification relative to Earth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitClass {
    /// Negative specific energy, captured by Earth
    Bound,
    /// Non-negative specific energy, leaving for good
    Escape,
}

impl OrbitClass {
    #[inline]
    pub fn from_energy(energy: f32) -> Self {
        if energy < 0.0 {
            OrbitClass::Bound
        } else {
            OrbitClass::Escape
        }
    }
}

/// Which body a craft hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Earth,
    Moon,
}

impl Impact {
    pub fn explosion_size(self) -> i32 {
        match self {
            Impact::Earth => EARTH_EXPLOSION_SIZE,
            Impact::Moon => MOON_EXPLOSION_SIZE,
        }
    }
}

/// A user-launched spacecraft
#[derive(Debug, Clone)]
pub struct Spacecraft {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Oldest first, capped at SPACECRAFT_TRAIL_LENGTH
    pub trail: VecDeque<Vec2>,
    /// Earth-centred specific orbital energy
    pub energy: f32,
    pub prev_energy: f32,
    /// Set on the tick a gravity assist was detected
    pub sparkle: bool,
}

impl Spacecraft {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, field: &GravityField) -> Self {
        let energy = field.specific_energy(pos, vel);
        Self {
            id,
            pos,
            vel,
            trail: VecDeque::with_capacity(SPACECRAFT_TRAIL_LENGTH + 1),
            energy,
            prev_energy: energy,
            sparkle: false,
        }
    }

    /// Pure function of the current energy sign
    #[inline]
    pub fn orbit_class(&self) -> OrbitClass {
        OrbitClass::from_energy(self.energy)
    }

    /// Append the current position, evicting the oldest past the cap
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > SPACECRAFT_TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Body whose collision radius currently contains the craft, Earth first
    pub fn impact(&self, field: &GravityField, moon_pos: Vec2) -> Option<Impact> {
        if self.pos.distance(field.earth_center) <= EARTH_RADIUS {
            Some(Impact::Earth)
        } else if self.pos.distance(moon_pos) <= MOON_RADIUS {
            Some(Impact::Moon)
        } else {
            None
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub field: GravityField,
    pub moon: MoonOrbit,
    /// Live spacecraft in launch order
    pub spacecraft: Vec<Spacecraft>,
    pub effects: Effects,
    /// Tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_field(GravityField::default())
    }

    /// Simulation with a custom gravity field (e.g. Moon switched off)
    pub fn with_field(field: GravityField) -> Self {
        Self {
            field,
            moon: MoonOrbit::new(field.earth_center, MOON_ORBIT_RADIUS, MOON_ANGULAR_VELOCITY),
            spacecraft: Vec::new(),
            effects: Effects::default(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Add a craft at `pos` with `vel`
    pub fn spawn_spacecraft(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        let craft = Spacecraft::new(id, pos, vel, &self.field);
        self.spacecraft.push(craft);
        id
    }

    /// Number of live spacecraft (the "Ships: N" status)
    pub fn ship_count(&self) -> usize {
        self.spacecraft.len()
    }
}
