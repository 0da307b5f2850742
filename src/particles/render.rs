//! Drawing pass for the particle field
//!
//! Written against `Surface` so the browser provides a Canvas 2D backend
//! and tests can record calls.

use std::fmt;

use glam::Vec2;

use super::field::ParticleField;
use crate::consts::LINK_WIDTH;

/// Straight-alpha colour, RGB in 0-255
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// CSS `rgba()` notation
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Node fill; links use the same blue at their own opacity
pub const NODE_COLOR: Rgba = Rgba::new(59, 130, 246, 0.4);

/// Minimal 2D drawing backend
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Draw one frame: nodes first, then the links over them
pub fn draw<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
    let bounds = field.bounds();
    surface.clear(bounds.x, bounds.y);

    let particles = field.particles();
    for p in particles {
        surface.fill_circle(p.pos, p.size, NODE_COLOR);
    }

    for link in field.links() {
        surface.stroke_line(
            particles[link.a].pos,
            particles[link.b].pos,
            LINK_WIDTH,
            NODE_COLOR.with_alpha(link.opacity),
        );
    }
}
