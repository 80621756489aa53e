//! Mortar hazard timer
//!
//! Cycle: idle countdown from `break_time` -> shell airborne for
//! `airborne_time` -> explosion lethal for `death_time` -> idle again.
//! Time left over after a phase boundary carries into the next phase, so a
//! single long tick and many short ones produce the same events.

use crate::error::{GameError, Result};
use crate::settings::Timing;

/// Phase of the current hazard cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardPhase {
    /// Counting down to the next shot
    Idle,
    /// Shell in the air
    Airborne,
    /// Explosion window, lethal to a moving player
    Exploding,
}

/// Phase changes produced by one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardEvent {
    Armed,
    Exploded,
    Resolved,
}

/// Cues the hazard wants sounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardCue {
    Airborne,
    Explosion,
}

/// Result of advancing the hazard timer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardStep {
    pub events: Vec<HazardEvent>,
    pub cues: Vec<HazardCue>,
    /// The player was moving inside the explosion window
    pub lethal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HazardTimer {
    time_until_next_shot: f32,
    airborne: bool,
    time_in_air: f32,
    dying: bool,
    time_that_kills: f32,
    /// Set while a hazard cue is sounding; blocks the next cue until cleared
    cue_latched: bool,
    break_time: f32,
    airborne_time: f32,
    death_time: f32,
}

impl HazardTimer {
    pub fn new(timing: &Timing) -> Self {
        Self {
            time_until_next_shot: timing.break_time,
            airborne: false,
            time_in_air: 0.0,
            dying: false,
            time_that_kills: 0.0,
            cue_latched: false,
            break_time: timing.break_time,
            airborne_time: timing.airborne_time,
            death_time: timing.death_time,
        }
    }

    /// Back to idle with a full countdown
    pub fn reset(&mut self) {
        self.time_until_next_shot = self.break_time;
        self.airborne = false;
        self.time_in_air = 0.0;
        self.dying = false;
        self.time_that_kills = 0.0;
        self.cue_latched = false;
    }

    pub fn phase(&self) -> Result<HazardPhase> {
        match (self.airborne, self.dying) {
            (false, false) => Ok(HazardPhase::Idle),
            (true, false) => Ok(HazardPhase::Airborne),
            (false, true) => Ok(HazardPhase::Exploding),
            (true, true) => Err(GameError::InvariantViolation(
                "hazard is airborne and dying at once",
            )),
        }
    }

    pub fn time_until_next_shot(&self) -> f32 {
        self.time_until_next_shot
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn time_in_air(&self) -> f32 {
        self.time_in_air
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    pub fn time_that_kills(&self) -> f32 {
        self.time_that_kills
    }

    /// Advance by `dt` seconds. Stops early (with `lethal` set) when the
    /// player is moving during the explosion window.
    pub fn advance(&mut self, dt: f32, moving: bool) -> Result<HazardStep> {
        let mut step = HazardStep::default();
        let mut remaining = dt;

        loop {
            match self.phase()? {
                HazardPhase::Idle => {
                    if remaining < self.time_until_next_shot {
                        self.time_until_next_shot -= remaining;
                        break;
                    }
                    remaining -= self.time_until_next_shot;
                    self.arm(&mut step);
                }
                HazardPhase::Airborne => {
                    let left = self.airborne_time - self.time_in_air;
                    if remaining < left {
                        self.time_in_air += remaining;
                        break;
                    }
                    remaining -= left.max(0.0);
                    self.explode(&mut step);
                }
                HazardPhase::Exploding => {
                    if moving {
                        step.lethal = true;
                        break;
                    }
                    let left = self.death_time - self.time_that_kills;
                    if remaining < left {
                        self.time_that_kills += remaining;
                        break;
                    }
                    remaining -= left.max(0.0);
                    self.resolve(&mut step);

                    // A zero-length cycle would never consume time
                    let period = self.period();
                    if period <= 0.0 {
                        break;
                    }
                    // Whole cycles beyond this one are skipped silently
                    if remaining >= period {
                        remaining %= period;
                    }
                }
            }
        }

        Ok(step)
    }

    fn period(&self) -> f32 {
        self.break_time + self.airborne_time + self.death_time
    }

    fn arm(&mut self, step: &mut HazardStep) {
        self.time_until_next_shot = 0.0;
        self.airborne = true;
        self.time_in_air = 0.0;
        step.events.push(HazardEvent::Armed);
        if !self.cue_latched {
            step.cues.push(HazardCue::Airborne);
            self.cue_latched = true;
        }
    }

    fn explode(&mut self, step: &mut HazardStep) {
        self.airborne = false;
        self.time_in_air = 0.0;
        self.dying = true;
        self.time_that_kills = 0.0;
        step.events.push(HazardEvent::Exploded);

        // The airborne cue gives way to the explosion
        self.cue_latched = false;
        step.cues.push(HazardCue::Explosion);
        self.cue_latched = true;
    }

    fn resolve(&mut self, step: &mut HazardStep) {
        self.dying = false;
        self.time_that_kills = 0.0;
        self.cue_latched = false;
        self.time_until_next_shot = self.break_time;
        step.events.push(HazardEvent::Resolved);
    }
}
