//! Game settings
//!
//! Timings, mix levels and cue names. Read once at startup, never written back.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// Screen and hazard timings (seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub intro_screen_time: f32,
    pub break_time: f32,
    pub airborne_time: f32,
    pub death_time: f32,
    pub lose_screen_time: f32,
    /// Intro music restarts once the lose screen has been up this long
    pub lose_music_delay: f32,
    /// Player velocity while moving (units per second)
    pub movement: Vec3,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            intro_screen_time: INTRO_SCREEN_TIME,
            break_time: BREAK_TIME,
            airborne_time: AIRBORNE_TIME,
            death_time: DEATH_TIME,
            lose_screen_time: LOSE_SCREEN_TIME,
            lose_music_delay: LOSE_MUSIC_DELAY,
            movement: Vec3::Z,
        }
    }
}

/// Initial bus levels and crossfade shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MixSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Ambience volume (0.0 - 1.0)
    pub ambience_volume: f32,
    pub fade_duration: f32,
    pub fade_target: f32,
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sound_volume: 1.0,
            music_volume: 1.0,
            ambience_volume: 1.0,
            fade_duration: FADE_DURATION,
            fade_target: FADE_TARGET,
        }
    }
}

/// Logical sound names the state machine asks the bank for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CueSheet {
    pub intro_drum: String,
    pub intro_music: String,
    pub airborne: String,
    pub explosion: String,
    pub footsteps: String,
    pub lose_stingers: Vec<String>,
    pub win_stingers: Vec<String>,
}

impl Default for CueSheet {
    fn default() -> Self {
        Self {
            intro_drum: "sfx_trailer_drum".to_string(),
            intro_music: "music_intro".to_string(),
            airborne: "sfx_airborne".to_string(),
            explosion: "sfx_explosion".to_string(),
            footsteps: "sfx_footsteps".to_string(),
            lose_stingers: vec!["sfx_lose".to_string(), "vo_lose".to_string()],
            win_stingers: vec!["sfx_win".to_string(), "vo_win".to_string()],
        }
    }
}

/// Battlefield ambience bed plus randomly timed accents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbienceSettings {
    pub bed: String,
    pub accents: Vec<String>,
    pub time_between_accents: f32,
    pub time_variance: f32,
}

impl Default for AmbienceSettings {
    fn default() -> Self {
        Self {
            bed: "amb_battlefield".to_string(),
            accents: vec![
                "amb_distant_gunfire".to_string(),
                "amb_shouts".to_string(),
            ],
            time_between_accents: TIME_BETWEEN_ACCENTS,
            time_variance: ACCENT_VARIANCE,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for clip selection and accent scheduling
    pub seed: u64,
    pub timing: Timing,
    pub mix: MixSettings,
    pub cues: CueSheet,
    pub ambience: AmbienceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            timing: Timing::default(),
            mix: MixSettings::default(),
            cues: CueSheet::default(),
            ambience: AmbienceSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(GameError::SettingsParse)?;
        settings.validate()?;
        log::info!("Loaded settings (seed {})", settings.seed);
        Ok(settings)
    }

    /// Reject durations and levels the simulation can't work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.timing;
        check_duration("timing.intro_screen_time", t.intro_screen_time)?;
        check_duration("timing.break_time", t.break_time)?;
        check_duration("timing.airborne_time", t.airborne_time)?;
        check_duration("timing.death_time", t.death_time)?;
        check_duration("timing.lose_screen_time", t.lose_screen_time)?;
        check_duration("timing.lose_music_delay", t.lose_music_delay)?;
        if !t.movement.is_finite() {
            return Err(GameError::InvalidSetting {
                field: "timing.movement",
                value: format!("{:?}", t.movement),
            });
        }

        let m = &self.mix;
        check_level("mix.master_volume", m.master_volume)?;
        check_level("mix.sound_volume", m.sound_volume)?;
        check_level("mix.music_volume", m.music_volume)?;
        check_level("mix.ambience_volume", m.ambience_volume)?;
        check_level("mix.fade_target", m.fade_target)?;
        check_duration("mix.fade_duration", m.fade_duration)?;

        let a = &self.ambience;
        check_duration("ambience.time_between_accents", a.time_between_accents)?;
        check_duration("ambience.time_variance", a.time_variance)?;

        let c = &self.cues;
        for (field, name) in [
            ("cues.intro_drum", &c.intro_drum),
            ("cues.intro_music", &c.intro_music),
            ("cues.airborne", &c.airborne),
            ("cues.explosion", &c.explosion),
            ("cues.footsteps", &c.footsteps),
        ] {
            if name.trim().is_empty() {
                return Err(GameError::InvalidSetting {
                    field,
                    value: "empty name".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_duration(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            field,
            value: value.to_string(),
        })
    }
}

fn check_level(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            field,
            value: value.to_string(),
        })
    }
}
