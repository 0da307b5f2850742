//! Decorative particle background
//!
//! A fixed set of drifting nodes that bounce off the canvas edges, shy
//! away from the pointer, and are joined by faint lines when close.
//! Simulation is independent of rendering; drawing goes through `Surface`.

pub mod clock;
pub mod field;
pub mod render;

pub use clock::FrameClock;
pub use field::{Link, Particle, ParticleConfig, ParticleField};
pub use render::{NODE_COLOR, Rgba, Surface, draw};
