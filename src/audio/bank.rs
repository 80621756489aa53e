//! Sound bank: logical sound names mapped to clip variants
//!
//! Loaded once at startup and immutable afterwards. Names are normalized to
//! lowercase so lookups are case-insensitive.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::backend::Clip;
use crate::error::{GameError, Result};

/// A logical sound with one or more interchangeable clips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundEffect {
    pub name: String,
    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl SoundEffect {
    pub fn new(name: impl Into<String>, clips: Vec<Clip>) -> Self {
        Self {
            name: name.into(),
            clips,
        }
    }

    /// Uniformly random clip, `None` for an entry with no clips
    pub fn random_clip<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Clip> {
        if self.clips.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.clips.len());
        self.clips.get(index)
    }
}

/// Normalized lookup key for a sound name
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// All sound effects known to the game
#[derive(Debug, Default)]
pub struct SoundBank {
    effects: HashMap<String, SoundEffect>,
    /// Configuration errors found while loading
    problems: Vec<GameError>,
}

impl SoundBank {
    /// Build a bank from loaded entries.
    ///
    /// Empty entries are kept (they resolve, but yield no clip) and duplicate
    /// names keep the first definition. Both are recorded in `problems`.
    pub fn from_entries(entries: impl IntoIterator<Item = SoundEffect>) -> Self {
        let mut bank = Self::default();

        for mut effect in entries {
            let key = normalize_name(&effect.name);
            effect.name = key.clone();

            if bank.effects.contains_key(&key) {
                log::warn!("Duplicate sound effect '{}' ignored", key);
                bank.problems
                    .push(GameError::DuplicateSoundEffect { name: key });
                continue;
            }
            if effect.clips.is_empty() {
                log::warn!("Sound effect '{}' has no clips", key);
                bank.problems
                    .push(GameError::EmptySoundEffect { name: key.clone() });
            }
            bank.effects.insert(key, effect);
        }

        log::info!(
            "Sound bank loaded: {} effects, {} problems",
            bank.effects.len(),
            bank.problems.len()
        );
        bank
    }

    /// Parse a JSON array of `{ name, clips: [{ name, duration }] }`
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<SoundEffect> = serde_json::from_str(json).map_err(GameError::BankParse)?;
        Ok(Self::from_entries(entries))
    }

    /// Look up a sound effect by name (case-insensitive)
    pub fn resolve(&self, name: &str) -> Option<&SoundEffect> {
        self.effects.get(&normalize_name(name))
    }

    pub fn problems(&self) -> &[GameError] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
