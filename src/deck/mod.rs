//! Slide navigation
//!
//! Pure state, no DOM access. Every input source is mapped to a
//! `DeckCommand` and funnelled into `SlideController::apply`, which owns
//! the bounds check and the transition guard. Time is passed in as
//! milliseconds so the guard can be tested without a browser clock.

pub mod controller;
pub mod input;

pub use controller::{SlideController, SlidePlacement, Transition};
pub use input::{DeckCommand, WheelGate, command_for_key};
