//! Keyboard and wheel mapping to deck commands

use crate::consts::{WHEEL_INTERVAL_MS, WHEEL_MIN_DELTA};

/// A navigation request from any input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckCommand {
    /// Advance one slide
    Next,
    /// Go back one slide
    Prev,
    /// Jump to a slide (indicator click)
    GoTo(usize),
}

/// Map a `KeyboardEvent.key` value to a command.
///
/// Forward keys are ignored while focus is on a link so Enter/Space still
/// follow it.
pub fn command_for_key(key: &str, target_is_link: bool) -> Option<DeckCommand> {
    match key {
        "ArrowUp" | "ArrowLeft" => Some(DeckCommand::Prev),
        "ArrowDown" | "ArrowRight" | " " | "Space" | "Enter" if !target_is_link => {
            Some(DeckCommand::Next)
        }
        _ => None,
    }
}

/// Debounce for wheel input
///
/// Trackpads emit dozens of wheel events per gesture; only the first
/// significant one in each interval becomes a command.
#[derive(Debug, Clone)]
pub struct WheelGate {
    min_interval_ms: f64,
    min_delta: f64,
    last_accepted: Option<f64>,
}

impl Default for WheelGate {
    fn default() -> Self {
        Self::new(WHEEL_INTERVAL_MS, WHEEL_MIN_DELTA)
    }
}

impl WheelGate {
    pub fn new(min_interval_ms: f64, min_delta: f64) -> Self {
        Self {
            min_interval_ms,
            min_delta,
            last_accepted: None,
        }
    }

    /// Feed one wheel event. Returns the command to apply, if any.
    ///
    /// The acceptance time is recorded whether or not the controller
    /// ends up honouring the command.
    pub fn filter(&mut self, delta_y: f64, now_ms: f64) -> Option<DeckCommand> {
        if let Some(last) = self.last_accepted {
            if now_ms - last < self.min_interval_ms {
                return None;
            }
        }

        if delta_y.abs() <= self.min_delta {
            return None;
        }

        self.last_accepted = Some(now_ms);
        if delta_y > 0.0 {
            Some(DeckCommand::Next)
        } else {
            Some(DeckCommand::Prev)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for_key("ArrowLeft", false), Some(DeckCommand::Prev));
        assert_eq!(command_for_key("ArrowUp", false), Some(DeckCommand::Prev));
        assert_eq!(command_for_key("ArrowRight", false), Some(DeckCommand::Next));
        assert_eq!(command_for_key("ArrowDown", false), Some(DeckCommand::Next));
    }

    #[test]
    fn test_forward_keys_skip_links() {
        for key in [" ", "Space", "Enter", "ArrowRight"] {
            assert_eq!(command_for_key(key, false), Some(DeckCommand::Next));
            assert_eq!(command_for_key(key, true), None, "key {:?}", key);
        }
        // Backward keys still work on links
        assert_eq!(command_for_key("ArrowLeft", true), Some(DeckCommand::Prev));
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(command_for_key("a", false), None);
        assert_eq!(command_for_key("Escape", false), None);
    }

    #[test]
    fn test_wheel_direction() {
        let mut gate = WheelGate::default();
        assert_eq!(gate.filter(50.0, 0.0), Some(DeckCommand::Next));
        assert_eq!(gate.filter(-50.0, 5000.0), Some(DeckCommand::Prev));
    }

    #[test]
    fn test_wheel_debounce() {
        let mut gate = WheelGate::default();
        assert_eq!(gate.filter(100.0, 1000.0), Some(DeckCommand::Next));
        assert_eq!(gate.filter(100.0, 1500.0), None);
        assert_eq!(gate.filter(100.0, 2199.0), None);
        assert_eq!(gate.filter(100.0, 2200.0), Some(DeckCommand::Next));
    }

    #[test]
    fn test_small_delta_does_not_reset_interval() {
        let mut gate = WheelGate::default();
        assert_eq!(gate.filter(5.0, 0.0), None);
        assert_eq!(gate.filter(-10.0, 10.0), None);
        // The tiny scrolls above did not arm the debounce
        assert_eq!(gate.filter(11.0, 20.0), Some(DeckCommand::Next));
    }
}
