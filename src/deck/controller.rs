//! Slide index controller
//!
//! Holds the active slide and the transition guard. The guard is a
//! deadline rather than a timer callback so the browser layer only has to
//! pass the current time in.

use super::input::DeckCommand;
use crate::consts::TRANSITION_MS;

/// Where a slide sits relative to the active one (maps to CSS classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePlacement {
    Prev,
    Active,
    Next,
}

impl SlidePlacement {
    pub fn class_name(&self) -> &'static str {
        match self {
            SlidePlacement::Prev => "prev",
            SlidePlacement::Active => "active",
            SlidePlacement::Next => "next",
        }
    }
}

/// An accepted navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Bounded slide index with a cooldown between transitions
#[derive(Debug, Clone)]
pub struct SlideController {
    count: usize,
    current: usize,
    cooldown_ms: f64,
    /// Transitions are refused until this time (ms)
    busy_until: Option<f64>,
}

impl SlideController {
    pub fn new(count: usize) -> Self {
        Self::with_cooldown(count, TRANSITION_MS)
    }

    pub fn with_cooldown(count: usize, cooldown_ms: f64) -> Self {
        Self {
            count,
            current: 0,
            cooldown_ms,
            busy_until: None,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// True while a transition started before `now_ms` is still running
    pub fn is_transitioning(&self, now_ms: f64) -> bool {
        self.busy_until.is_some_and(|until| now_ms < until)
    }

    /// Move to `index`. Returns `None` if the index is out of range or a
    /// transition is in flight.
    pub fn go_to(&mut self, index: usize, now_ms: f64) -> Option<Transition> {
        if index >= self.count || self.is_transitioning(now_ms) {
            return None;
        }

        let from = self.current;
        self.current = index;
        self.busy_until = Some(now_ms + self.cooldown_ms);
        log::debug!("Slide {} -> {} ({}/{})", from, index, index + 1, self.count);

        Some(Transition { from, to: index })
    }

    pub fn next(&mut self, now_ms: f64) -> Option<Transition> {
        self.go_to(self.current + 1, now_ms)
    }

    pub fn prev(&mut self, now_ms: f64) -> Option<Transition> {
        let index = self.current.checked_sub(1)?;
        self.go_to(index, now_ms)
    }

    /// Single entry point for every input source
    pub fn apply(&mut self, command: DeckCommand, now_ms: f64) -> Option<Transition> {
        match command {
            DeckCommand::Next => self.next(now_ms),
            DeckCommand::Prev => self.prev(now_ms),
            DeckCommand::GoTo(index) => self.go_to(index, now_ms),
        }
    }

    /// Fraction of the deck shown so far, `(current + 1) / count`
    pub fn progress(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            (self.current + 1) as f32 / self.count as f32
        }
    }

    pub fn placement(&self, index: usize) -> SlidePlacement {
        use std::cmp::Ordering;
        match index.cmp(&self.current) {
            Ordering::Less => SlidePlacement::Prev,
            Ordering::Equal => SlidePlacement::Active,
            Ordering::Greater => SlidePlacement::Next,
        }
    }

    /// Whether the previous button should be enabled
    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Whether the next button should be enabled
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.count
    }
}
