//! Moonshot entry point
//!
//! Runs the simulation headless against the software framebuffer, driven by
//! a scripted touch source. On hardware the framebuffer and script are
//! swapped for the panel driver and the touch controller.
//!
//! Usage: `moonshot [settings.json] [frame-limit] [low|medium|high]`
//!
//! A quality preset given on the command line overrides the settings file
//! and is written back to it.

use std::path::PathBuf;
use std::time::Instant;

use moonshot::{QualityPreset, Settings};
use moonshot::input::{ScriptedTouch, TapDetector, TouchSource};
use moonshot::pacing::FrameGate;
use moonshot::render::{Framebuffer, RenderSurface, Starfield, draw_frame};
use moonshot::sim::{Simulation, TickInput, tick};

/// Frames between status log lines
const LOG_EVERY: u64 = 150;

/// Simulation instance holding all state
struct App<S: RenderSurface, T: TouchSource> {
    sim: Simulation,
    surface: S,
    touch: T,
    taps: TapDetector,
    gate: FrameGate,
    settings: Settings,
    stars: Starfield,
    // FPS tracking
    frame_times: [Option<Instant>; 30],
    frame_index: usize,
    fps: f32,
}

impl<S: RenderSurface, T: TouchSource> App<S, T> {
    fn new(surface: S, touch: T, settings: Settings) -> Self {
        let stars = Starfield::generate(
            settings.seed,
            settings.star_count(),
            surface.width() as f32,
            surface.height() as f32,
        );
        Self {
            sim: Simulation::new(),
            surface,
            touch,
            taps: TapDetector::new(),
            gate: FrameGate::default(),
            settings,
            stars,
            frame_times: [None; 30],
            frame_index: 0,
            fps: 0.0,
        }
    }

    /// Poll input, tick and render if the frame gate admits it
    fn frame(&mut self, now: Instant) -> bool {
        if !self.gate.ready(now) {
            return false;
        }

        let input = TickInput {
            tap: self.taps.poll(&mut self.touch),
        };
        tick(&mut self.sim, &input);
        draw_frame(&self.sim, &mut self.surface, &self.settings, &self.stars);

        // Oldest entry in the ring is the frame 30 ticks ago
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        if let Some(oldest) = oldest {
            let elapsed = now.duration_since(oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.fps = self.frame_times.len() as f32 / elapsed;
            }
        }

        if self.sim.time_ticks % LOG_EVERY == 0 {
            log::info!(
                "tick {}: ships={} sparkles={} explosions={} fps={:.1} skipped={}",
                self.sim.time_ticks,
                self.sim.ship_count(),
                self.sim.effects.sparkles.len(),
                self.sim.effects.explosions.len(),
                self.fps,
                self.gate.skipped(),
            );
        }
        true
    }
}

fn main() {
    env_logger::init();
    log::info!("Moonshot (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let mut settings = match &settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frame_limit = args.next().and_then(|s| match s.parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("Ignoring frame limit {s:?}: {e}");
            None
        }
    });
    if let Some(arg) = args.next() {
        match QualityPreset::parse(&arg) {
            Some(preset) => {
                settings.apply_preset(preset);
                if let Some(path) = &settings_path {
                    if let Err(e) = settings.save(path) {
                        log::warn!("Could not save settings: {e}");
                    }
                }
            }
            None => log::warn!("Unknown quality preset {arg:?}"),
        }
    }

    let mut app = App::new(Framebuffer::screen(), ScriptedTouch::demo(), settings);
    log::info!(
        "Quality {}, {} stars, frame interval {:?}",
        app.settings.quality.as_str(),
        app.stars.stars.len(),
        app.gate.interval()
    );

    loop {
        let now = Instant::now();
        if app.frame(now) {
            if frame_limit.is_some_and(|limit| app.sim.time_ticks >= limit) {
                break;
            }
        } else {
            std::thread::sleep(app.gate.remaining(now));
        }
    }

    log::info!(
        "Stopped after {} ticks ({} frames presented)",
        app.sim.time_ticks,
        app.surface.frames_presented()
    );
}
