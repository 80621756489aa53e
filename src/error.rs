//! Crate error type
//!
//! Expected runtime conditions (missing sounds, bad frame deltas, stray input)
//! are handled locally and never show up here. `GameError` covers load-time
//! configuration problems and broken internal invariants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to parse sound bank: {0}")]
    BankParse(#[source] serde_json::Error),

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[source] serde_json::Error),

    #[error("invalid setting `{field}`: {value}")]
    InvalidSetting { field: &'static str, value: String },

    #[error("sound effect `{name}` has no clips")]
    EmptySoundEffect { name: String },

    #[error("sound effect `{name}` is defined more than once")]
    DuplicateSoundEffect { name: String },

    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
}

pub type Result<T> = std::result::Result<T, GameError>;
