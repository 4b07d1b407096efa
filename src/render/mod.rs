//! Rendering
//!
//! The display is reached only through [`RenderSurface`], the handful of
//! primitives a small SPI panel driver offers. [`Framebuffer`] is a software
//! implementation used by the headless binary and tests.

pub mod frame;
pub mod framebuffer;
pub mod starfield;

pub use frame::draw_frame;
pub use framebuffer::Framebuffer;
pub use starfield::Starfield;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// 16-bit RGB565 color, the native format of most small TFT panels
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color(pub u16);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }

    /// Expand back to 8-bit channels
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1f) as u8;
        let g = ((self.0 >> 5) & 0x3f) as u8;
        let b = (self.0 & 0x1f) as u8;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    /// Fade toward black; the panel has no alpha channel
    pub fn scaled(self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        let (r, g, b) = self.to_rgb();
        let f = |c: u8| (c as f32 * a).round() as u8;
        Self::rgb(f(r), f(g), f(b))
    }
}

/// Colors for scene elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 8);
    pub const STAR: Color = Color::rgb(120, 120, 140);
    pub const EARTH: Color = Color::rgb(40, 110, 230);
    pub const MOON: Color = Color::rgb(190, 190, 190);
    pub const MOON_TRAIL: Color = Color::rgb(60, 60, 70);
    pub const SPACECRAFT: Color = Color::rgb(255, 255, 255);
    pub const SPACECRAFT_BOOST: Color = Color::rgb(255, 240, 120);
    pub const BOUND_TRAIL: Color = Color::rgb(40, 200, 90);
    pub const ESCAPE_TRAIL: Color = Color::rgb(230, 70, 50);
    pub const SPARKLE: Color = Color::rgb(255, 230, 90);
    pub const EXPLOSION: Color = Color::rgb(255, 140, 30);
    pub const TEXT: Color = Color::rgb(230, 230, 230);
}

/// Drawing primitives offered by the display
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self, color: Color);
    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Print `text` with its top-left corner at `cursor`
    fn draw_text(&mut self, cursor: Vec2, text: &str, color: Color);
    /// Flip the back buffer to the panel
    fn present(&mut self);
}
