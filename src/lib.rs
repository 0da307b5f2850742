//! Slide Deck - a browser slide presentation
//!
//! Core modules:
//! - `deck`: Slide index controller and input mapping (pure, clock passed in)
//! - `particles`: Decorative particle background (simulation + drawing pass)
//! - `settings`: Data-driven deck configuration
//! - `error`: Errors raised while binding to the DOM

pub mod deck;
pub mod error;
pub mod particles;
pub mod settings;

pub use deck::{DeckCommand, SlideController, SlidePlacement, Transition, WheelGate};
pub use error::DeckError;
pub use particles::{FrameClock, ParticleConfig, ParticleField, Rgba, Surface};
pub use settings::{DeckConfig, ParticleDensity};

/// Deck configuration constants
pub mod consts {
    /// Cooldown after a transition, in ms (synced with the CSS transition)
    pub const TRANSITION_MS: f64 = 1000.0;
    /// Minimum gap between accepted wheel events, in ms
    pub const WHEEL_INTERVAL_MS: f64 = 1200.0;
    /// Wheel deltas at or below this magnitude are ignored
    pub const WHEEL_MIN_DELTA: f64 = 10.0;
    /// Delay before the first slide is shown, in ms
    pub const INITIAL_DELAY_MS: i32 = 100;

    /// Fixed particle timestep (particle velocities are px per 60 Hz frame)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Particle defaults
    pub const PARTICLE_COUNT: usize = 60;
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 2.0;
    /// Max speed per axis, px/frame
    pub const PARTICLE_MAX_SPEED: f32 = 0.25;

    /// Pointer repulsion
    pub const POINTER_RADIUS: f32 = 150.0;
    pub const REPEL_DIVISOR: f32 = 150.0;

    /// Connecting lines
    pub const LINK_DISTANCE: f32 = 150.0;
    pub const LINK_MAX_OPACITY: f32 = 0.2;
    pub const LINK_WIDTH: f32 = 1.0;
}
