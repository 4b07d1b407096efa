//! Software RGB565 framebuffer
//!
//! Double buffered: primitives draw into the back buffer, `present` copies it
//! to the front buffer (what a DMA transfer to the panel would read). Text is
//! not rasterised here; printed lines are kept so callers can forward them to
//! a glyph-capable driver or inspect them.

use glam::Vec2;

use super::{Color, RenderSurface};

/// A line of text printed during the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub cursor: Vec2,
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    back: Vec<Color>,
    front: Vec<Color>,
    text: Vec<TextLine>,
    frames_presented: u64,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            back: vec![Color::default(); len],
            front: vec![Color::default(); len],
            text: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Buffer matching the fixed screen geometry
    pub fn screen() -> Self {
        Self::new(
            crate::consts::SCREEN_WIDTH as u32,
            crate::consts::SCREEN_HEIGHT as u32,
        )
    }

    /// Back-buffer pixel, `None` outside the buffer
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.back[i])
    }

    /// Last presented frame as raw native-endian RGB565 bytes
    pub fn front_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.front)
    }

    /// Text printed since the last clear
    pub fn text(&self) -> &[TextLine] {
        &self.text
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Count of back-buffer pixels equal to `color`
    pub fn count(&self, color: Color) -> usize {
        self.back.iter().filter(|&&c| c == color).count()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = color;
        }
    }

    fn hspan(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        for x in x0..=x1 {
            self.plot(x, y, color);
        }
    }
}

impl RenderSurface for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.back.fill(color);
        self.text.clear();
    }

    /// Bresenham; off-screen pixels are clipped individually
    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        if !p0.is_finite() || !p1.is_finite() {
            return;
        }
        let (mut x0, mut y0) = (p0.x.round() as i32, p0.y.round() as i32);
        let (x1, y1) = (p1.x.round() as i32, p1.y.round() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !center.is_finite() || !radius.is_finite() {
            return;
        }
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        let r = radius.round().max(0.0) as i32;
        let r2 = r * r;
        for dy in -r..=r {
            let half = ((r2 - dy * dy) as f32).sqrt() as i32;
            self.hspan(cx - half, cx + half, cy + dy, color);
        }
    }

    fn draw_text(&mut self, cursor: Vec2, text: &str, color: Color) {
        self.text.push(TextLine {
            cursor,
            text: text.to_owned(),
            color,
        });
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_clear_and_present() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(RED);
        assert_eq!(fb.count(RED), 12);
        assert!(fb.front_bytes().iter().all(|&b| b == 0));
        fb.present();
        assert_eq!(fb.front_bytes().len(), 24);
        assert_eq!(&fb.front_bytes()[..2], &RED.0.to_ne_bytes()[..]);
        assert_eq!(fb.frames_presented(), 1);
    }

    #[test]
    fn test_diagonal_line_hits_endpoints() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_line(Vec2::new(1.0, 1.0), Vec2::new(8.0, 8.0), RED);
        assert_eq!(fb.count(RED), 8);
        assert_eq!(fb.pixel(1, 1), Some(RED));
        assert_eq!(fb.pixel(8, 8), Some(RED));
    }

    #[test]
    fn test_line_clips_offscreen() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_line(Vec2::new(-5.0, 2.0), Vec2::new(15.0, 2.0), RED);
        assert_eq!(fb.count(RED), 10);
        fb.draw_line(Vec2::new(f32::NAN, 0.0), Vec2::new(3.0, 3.0), Color(1));
        assert_eq!(fb.count(Color(1)), 0);
    }

    #[test]
    fn test_fill_circle() {
        let mut fb = Framebuffer::new(20, 20);
        fb.fill_circle(Vec2::new(10.0, 10.0), 3.0, RED);
        assert_eq!(fb.pixel(10, 10), Some(RED));
        assert_eq!(fb.pixel(13, 10), Some(RED));
        assert_eq!(fb.pixel(10, 7), Some(RED));
        assert_eq!(fb.pixel(13, 13), Some(Color::default()));
        assert_eq!(fb.count(RED), 29);
    }

    #[test]
    fn test_zero_radius_circle_is_a_dot() {
        let mut fb = Framebuffer::new(5, 5);
        fb.fill_circle(Vec2::new(2.0, 2.0), 0.2, RED);
        assert_eq!(fb.count(RED), 1);
    }

    #[test]
    fn test_text_is_recorded_per_frame() {
        let mut fb = Framebuffer::new(5, 5);
        fb.draw_text(Vec2::new(1.0, 1.0), "Ships: 2", RED);
        assert_eq!(fb.text()[0].text, "Ships: 2");
        fb.clear(Color::default());
        assert!(fb.text().is_empty());
    }
}
