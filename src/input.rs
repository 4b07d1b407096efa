//! Touch input handling
//!
//! Touch controllers report level state ("is the panel pressed, and where").
//! The simulation wants edges: one tap per physical press, no matter how long
//! the finger stays down.

use glam::Vec2;

/// A source of raw touch state, polled once per frame
pub trait TouchSource {
    /// Current press position in screen pixels, `None` when released
    fn poll(&mut self) -> Option<Vec2>;
}

/// Converts level-triggered press state into one-shot taps
#[derive(Debug, Clone, Default)]
pub struct TapDetector {
    was_pressed: bool,
}

impl TapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's press state; returns a tap only on the press edge
    pub fn update(&mut self, pressed: Option<Vec2>) -> Option<Vec2> {
        let tap = match pressed {
            Some(point) if !self.was_pressed => Some(point),
            _ => None,
        };
        self.was_pressed = pressed.is_some();
        tap
    }

    /// Poll `source` and edge-detect in one step
    pub fn poll<S: TouchSource + ?Sized>(&mut self, source: &mut S) -> Option<Vec2> {
        let pressed = source.poll();
        self.update(pressed)
    }
}

/// A scheduled press: held at `pos` from frame `start` for `frames` frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedPress {
    pub start: u64,
    pub frames: u64,
    pub pos: Vec2,
}

/// Deterministic touch source replaying a fixed list of presses
///
/// Used by the headless binary in place of a touch controller.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTouch {
    presses: Vec<ScriptedPress>,
    frame: u64,
    /// Restart the script after this many frames (0 = play once)
    loop_frames: u64,
}

impl ScriptedTouch {
    pub fn new(presses: Vec<ScriptedPress>) -> Self {
        Self {
            presses,
            frame: 0,
            loop_frames: 0,
        }
    }

    /// Repeat the script every `frames` frames
    pub fn looping(mut self, frames: u64) -> Self {
        self.loop_frames = frames;
        self
    }

    /// Built-in demo: a few launches at different radii, then a reset tap
    pub fn demo() -> Self {
        let center = crate::screen_center();
        let press = |start, dx, dy| ScriptedPress {
            start,
            frames: 4,
            pos: center + Vec2::new(dx, dy),
        };
        Self::new(vec![
            press(10, 50.0, 0.0),
            press(40, 0.0, -70.0),
            press(70, -100.0, 0.0),
            press(100, 70.0, 60.0),
            press(130, -40.0, 95.0),
            press(600, 0.0, 0.0),
        ])
        .looping(660)
    }
}

impl TouchSource for ScriptedTouch {
    fn poll(&mut self) -> Option<Vec2> {
        let frame = if self.loop_frames > 0 {
            self.frame % self.loop_frames
        } else {
            self.frame
        };
        self.frame += 1;
        self.presses
            .iter()
            .find(|p| frame >= p.start && frame < p.start + p.frames)
            .map(|p| p.pos)
    }
}
