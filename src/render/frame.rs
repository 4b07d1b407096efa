//! Draw one simulation frame onto a render surface

use glam::Vec2;

use super::starfield::Starfield;
use super::{Color, RenderSurface, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{OrbitClass, Simulation};

/// Segments farther than this outside the screen are skipped
const CULL_MARGIN: f32 = 16.0;

/// Status line position
const STATUS_CURSOR: Vec2 = Vec2::new(4.0, 4.0);

fn on_screen(p: Vec2, width: f32, height: f32) -> bool {
    p.x >= -CULL_MARGIN
        && p.y >= -CULL_MARGIN
        && p.x <= width + CULL_MARGIN
        && p.y <= height + CULL_MARGIN
}

/// Polyline through every `stride`-th point, always ending on the newest
fn draw_polyline<S, I>(surface: &mut S, points: I, stride: usize, color: Color)
where
    S: RenderSurface + ?Sized,
    I: IntoIterator<Item = Vec2>,
    I::IntoIter: ExactSizeIterator,
{
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    let points = points.into_iter();
    let last = points.len().saturating_sub(1);
    let stride = stride.max(1);
    let kept = points
        .enumerate()
        .filter(|&(i, _)| i % stride == 0 || i == last)
        .map(|(_, p)| p);
    let mut prev: Option<Vec2> = None;
    for p in kept {
        if let Some(q) = prev {
            if on_screen(p, w, h) || on_screen(q, w, h) {
                surface.draw_line(q, p, color);
            }
        }
        prev = Some(p);
    }
}

/// Trail color by orbit classification
pub fn trail_color(class: OrbitClass) -> Color {
    match class {
        OrbitClass::Bound => colors::BOUND_TRAIL,
        OrbitClass::Escape => colors::ESCAPE_TRAIL,
    }
}

/// Render the whole scene and present it
pub fn draw_frame<S>(sim: &Simulation, surface: &mut S, settings: &Settings, stars: &Starfield)
where
    S: RenderSurface + ?Sized,
{
    surface.clear(colors::BACKGROUND);

    if settings.starfield {
        for star in &stars.stars {
            surface.fill_circle(star.pos, 0.0, colors::STAR.scaled(star.brightness));
        }
    }

    if settings.moon_trail {
        draw_polyline(
            surface,
            sim.moon.trail.iter().copied(),
            settings.quality.trail_stride(),
            colors::MOON_TRAIL,
        );
    }

    surface.fill_circle(sim.field.earth_center, EARTH_RADIUS, colors::EARTH);
    surface.fill_circle(sim.moon.position, MOON_RADIUS, colors::MOON);

    let (w, h) = (surface.width() as f32, surface.height() as f32);
    for craft in &sim.spacecraft {
        if settings.trails {
            draw_polyline(
                surface,
                craft.trail.iter().copied(),
                settings.quality.trail_stride(),
                trail_color(craft.orbit_class()),
            );
        }
        if on_screen(craft.pos, w, h) {
            let color = if craft.sparkle {
                colors::SPACECRAFT_BOOST
            } else {
                colors::SPACECRAFT
            };
            surface.fill_circle(craft.pos, 1.0, color);
        }
    }

    if settings.effects {
        for sparkle in &sim.effects.sparkles {
            let arm = 1.0 + 3.0 * sparkle.intensity();
            let color = colors::SPARKLE.scaled(0.4 + 0.6 * sparkle.intensity());
            let p = sparkle.pos;
            surface.draw_line(p - Vec2::new(arm, 0.0), p + Vec2::new(arm, 0.0), color);
            surface.draw_line(p - Vec2::new(0.0, arm), p + Vec2::new(0.0, arm), color);
        }
        for explosion in &sim.effects.explosions {
            surface.fill_circle(
                explosion.pos,
                explosion.radius,
                colors::EXPLOSION.scaled(explosion.alpha),
            );
        }
    }

    if settings.show_status {
        let status = format!("Ships: {}", sim.ship_count());
        surface.draw_text(STATUS_CURSOR, &status, colors::TEXT);
    }

    surface.present();
}
