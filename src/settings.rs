//! Deck configuration
//!
//! Read from an optional JSON block embedded in the page:
//! `<script type="application/json" id="deck-config">{ ... }</script>`.
//! Missing fields take their defaults.

use serde::Deserialize;

use crate::consts::*;
use crate::particles::ParticleConfig;

/// Particle density presets
///
/// Parsed case-insensitively from the config, same as `from_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum ParticleDensity {
    Low,
    #[default]
    Medium,
    High,
}

impl ParticleDensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticleDensity::Low => "Low",
            ParticleDensity::Medium => "Medium",
            ParticleDensity::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(ParticleDensity::Low),
            "medium" | "med" => Some(ParticleDensity::Medium),
            "high" => Some(ParticleDensity::High),
            _ => None,
        }
    }

    /// Particle count for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            ParticleDensity::Low => PARTICLE_COUNT / 2,
            ParticleDensity::Medium => PARTICLE_COUNT,
            ParticleDensity::High => PARTICLE_COUNT * 2,
        }
    }
}

impl TryFrom<String> for ParticleDensity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value).ok_or_else(|| format!("unknown particle density {:?}", value))
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    // === Navigation ===
    /// Cooldown after each transition (ms), keep in sync with the CSS
    pub transition_ms: f64,
    /// Minimum gap between wheel-driven transitions (ms)
    pub wheel_interval_ms: f64,
    /// Wheel deltas at or below this are ignored
    pub wheel_min_delta: f64,
    /// Delay before showing the first slide (ms)
    pub initial_delay_ms: i32,

    // === Background ===
    /// Draw the particle background at all
    pub particles: bool,
    pub density: ParticleDensity,
    pub pointer_radius: f32,
    pub link_distance: f32,

    // === Accessibility ===
    /// Freeze the background when the OS asks for reduced motion
    pub respect_reduced_motion: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            transition_ms: TRANSITION_MS,
            wheel_interval_ms: WHEEL_INTERVAL_MS,
            wheel_min_delta: WHEEL_MIN_DELTA,
            initial_delay_ms: INITIAL_DELAY_MS,

            particles: true,
            density: ParticleDensity::Medium,
            pointer_radius: POINTER_RADIUS,
            link_distance: LINK_DISTANCE,

            respect_reduced_motion: true,
        }
    }
}

impl DeckConfig {
    /// Element id of the embedded JSON block
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "deck-config";

    /// Parse a JSON config, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid deck config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Settings for the particle field
    pub fn particle_config(&self) -> ParticleConfig {
        ParticleConfig {
            count: self.density.particle_count(),
            pointer_radius: self.pointer_radius,
            link_distance: self.link_distance,
            ..Default::default()
        }
    }

    /// Whether the background should animate given the OS preference
    pub fn animate_particles(&self, prefers_reduced_motion: bool) -> bool {
        self.particles && !(self.respect_reduced_motion && prefers_reduced_motion)
    }

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => {
                log::info!("Loaded deck config from #{}", Self::CONFIG_ELEMENT_ID);
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default deck config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
