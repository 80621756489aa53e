//! Mortar Run - a tiny arcade dash under mortar fire
//!
//! Core modules:
//! - `sim`: Player state machine, hazard timer, input queue
//! - `audio`: Sound bank, bus mixing, crossfades, ambience
//! - `settings`: Data-driven timings, mix levels and cue names
//! - `error`: Crate error type

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioDirector, Bus, Clip, SoundBank, SoundEffect, SourceId};
pub use error::{GameError, Result};
pub use settings::Settings;
pub use sim::{GameEvent, GameState, PlayerStateMachine, Scenery, SceneryFlags, SceneryGroup};

/// Game configuration constants
pub mod consts {
    /// Seconds the intro screen stays up before play starts
    pub const INTRO_SCREEN_TIME: f32 = 3.0;
    /// Seconds between mortar shots (idle countdown)
    pub const BREAK_TIME: f32 = 5.0;
    /// Seconds a shell is airborne before it explodes
    pub const AIRBORNE_TIME: f32 = 3.0;
    /// Seconds the explosion stays lethal
    pub const DEATH_TIME: f32 = 1.0;
    /// Seconds the lose screen stays up before returning to intro
    pub const LOSE_SCREEN_TIME: f32 = 3.0;
    /// Seconds into the lose screen before the intro music comes back
    pub const LOSE_MUSIC_DELAY: f32 = 7.0;

    /// Default crossfade duration (seconds)
    pub const FADE_DURATION: f32 = 1.0;
    /// Default crossfade target level
    pub const FADE_TARGET: f32 = 1.0;
    /// Lowest level a fade may target (mixers can't attenuate to true silence in dB)
    pub const MIN_FADE_LEVEL: f32 = 0.0001;

    /// Mean seconds between ambience accents
    pub const TIME_BETWEEN_ACCENTS: f32 = 4.0;
    /// Random spread applied to the accent interval (+/- seconds)
    pub const ACCENT_VARIANCE: f32 = 1.5;

    /// Demo driver frame rate
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Linear interpolation, `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// True for a usable frame delta (finite, non-negative)
#[inline]
pub fn valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt >= 0.0
}
