//! Session settings and key bindings
//!
//! Loaded from JSON; missing fields fall back to defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;
use crate::sim::particles::DEFAULT_MAX_PARTICLES;

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
    Dash,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
    /// Floating text effects
    pub particles: bool,
    /// Particle pool size when particles are enabled
    pub max_particles: usize,
    /// Lower-case key name -> action
    pub key_bindings: BTreeMap<String, Action>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            particles: true,
            max_particles: DEFAULT_MAX_PARTICLES,
            key_bindings: default_key_bindings(),
        }
    }
}

fn default_key_bindings() -> BTreeMap<String, Action> {
    [
        ("arrowleft", Action::Left),
        ("a", Action::Left),
        ("arrowright", Action::Right),
        ("d", Action::Right),
        ("arrowup", Action::Jump),
        ("w", Action::Jump),
        (" ", Action::Jump),
        ("z", Action::Attack),
        ("j", Action::Attack),
        ("k", Action::Attack),
        ("x", Action::Dash),
        ("shift", Action::Dash),
    ]
    .into_iter()
    .map(|(key, action)| (key.to_string(), action))
    .collect()
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// Action bound to a key name, if any (case-insensitive)
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.key_bindings.get(&key.to_lowercase()).copied()
    }

    /// Build a frame's input from the set of currently pressed key names
    pub fn input_from_keys<'a>(&self, pressed: impl IntoIterator<Item = &'a str>) -> TickInput {
        let mut input = TickInput::default();
        for action in pressed.into_iter().filter_map(|k| self.action_for(k)) {
            match action {
                Action::Left => input.left = true,
                Action::Right => input.right = true,
                Action::Jump => input.jump = true,
                Action::Attack => input.attack = true,
                Action::Dash => input.dash = true,
            }
        }
        input
    }
}
