//! Player state machine
//!
//! Drives the screens (intro, game, lost, won), the mortar hazard and player
//! movement, one `tick` per frame. Every audible consequence goes through the
//! injected `AudioDirector`; scenery toggles go through the host `Scenery`.

use glam::Vec3;

use super::hazard::{HazardCue, HazardEvent, HazardTimer};
use super::input::{InputQueue, Key, KeyEvent};
use super::scenery::Scenery;
use super::state::{GameEvent, GameState};
use crate::audio::{AmbienceController, AudioBackend, AudioDirector, Clip, SourceId};
use crate::error::Result;
use crate::settings::{CueSheet, Settings, Timing};
use crate::valid_dt;

pub struct PlayerStateMachine<B: AudioBackend, S: Scenery> {
    timing: Timing,
    cues: CueSheet,
    audio: AudioDirector<B>,
    scenery: S,
    ambience: AmbienceController,
    intro_music: Option<Clip>,

    state: GameState,
    hazard: HazardTimer,
    input: InputQueue,
    events: Vec<GameEvent>,

    time_in_intro: f32,
    time_in_lost: f32,
    moving: bool,
    position: Vec3,
}

impl<B: AudioBackend, S: Scenery> PlayerStateMachine<B, S> {
    /// Start on the intro screen
    pub fn new(settings: &Settings, audio: AudioDirector<B>, scenery: S) -> Self {
        let intro_music = audio
            .bank()
            .resolve(&settings.cues.intro_music)
            .and_then(|effect| effect.clips.first().cloned());
        if intro_music.is_none() {
            log::warn!("Intro music '{}' not in sound bank", settings.cues.intro_music);
        }

        let mut machine = Self {
            timing: settings.timing.clone(),
            cues: settings.cues.clone(),
            audio,
            scenery,
            ambience: AmbienceController::new(
                settings.ambience.clone(),
                settings.seed.wrapping_add(1),
            ),
            intro_music,
            state: GameState::Intro,
            hazard: HazardTimer::new(&settings.timing),
            input: InputQueue::new(),
            events: Vec::new(),
            time_in_intro: 0.0,
            time_in_lost: 0.0,
            moving: false,
            position: Vec3::ZERO,
        };

        machine.scenery.set_active(GameState::Intro.into(), true);
        machine.enter(GameState::Intro);
        machine
    }

    // === Accessors ===

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn hazard(&self) -> &HazardTimer {
        &self.hazard
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn time_in_intro(&self) -> f32 {
        self.time_in_intro
    }

    pub fn time_in_lost(&self) -> f32 {
        self.time_in_lost
    }

    pub fn audio(&self) -> &AudioDirector<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioDirector<B> {
        &mut self.audio
    }

    pub fn scenery(&self) -> &S {
        &self.scenery
    }

    pub fn ambience(&self) -> &AmbienceController {
        &self.ambience
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Queue a key edge for the next tick
    pub fn push_key(&mut self, event: KeyEvent) {
        self.input.push(event);
    }

    /// Start or stop moving. Only meaningful during gameplay.
    pub fn set_moving(&mut self, moving: bool) {
        if self.state != GameState::Game {
            log::debug!("set_moving({}) ignored in {:?}", moving, self.state);
            return;
        }
        self.moving = moving;
    }

    /// The player touched the goal. Only accepted during gameplay.
    pub fn on_goal_reached(&mut self) {
        if self.state != GameState::Game {
            log::debug!("Goal signal ignored in {:?}", self.state);
            return;
        }
        self.events.push(GameEvent::GoalReached);
        self.transition(GameState::Won);
    }

    /// Jump straight to `target`, running its enter actions
    pub fn request_state(&mut self, target: GameState) {
        self.transition(target);
    }

    // === Frame ===

    /// Advance the game by `dt` seconds. Negative or non-finite deltas are
    /// ignored. Errors only on a broken internal invariant.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        if !valid_dt(dt) {
            log::warn!("Ignoring invalid frame delta {}", dt);
            return Ok(());
        }

        let input = self.input.drain();

        match self.state {
            GameState::Intro => {
                self.time_in_intro += dt;
                if self.time_in_intro > self.timing.intro_screen_time {
                    self.transition(GameState::Game);
                }
            }
            GameState::Game => {
                if input.pressed(Key::Space) {
                    self.moving = true;
                }
                if input.released(Key::Space) {
                    self.moving = false;
                }

                let step = self.hazard.advance(dt, self.moving)?;
                for cue in step.cues {
                    let name = match cue {
                        HazardCue::Airborne => &self.cues.airborne,
                        HazardCue::Explosion => &self.cues.explosion,
                    };
                    self.audio.play_sound(name);
                }
                self.events.extend(step.events.iter().map(|event| match event {
                    HazardEvent::Armed => GameEvent::HazardArmed,
                    HazardEvent::Exploded => GameEvent::HazardExploded,
                    HazardEvent::Resolved => GameEvent::HazardResolved,
                }));

                if step.lethal {
                    log::info!("Caught in the blast at {:?}", self.position);
                    self.events.push(GameEvent::PlayerKilled);
                    self.transition(GameState::Lost);
                } else {
                    if self.moving {
                        self.position += self.timing.movement * dt;
                    }
                    self.ambience.tick(dt, &mut self.audio);
                }
            }
            GameState::Lost => {
                self.time_in_lost += dt;
                if self.time_in_lost > self.timing.lose_music_delay {
                    self.start_intro_music();
                }
                if self.time_in_lost > self.timing.lose_screen_time {
                    self.transition(GameState::Intro);
                }
            }
            GameState::Won => {
                if input.pressed(Key::Space) {
                    self.transition(GameState::Intro);
                }
            }
        }

        // Volume writes made above land before fades advance
        self.audio.tick(dt);
        Ok(())
    }

    // === Transitions ===

    fn transition(&mut self, to: GameState) {
        let from = self.state;
        self.leave(from);

        self.state = to;
        self.scenery.set_active(from.into(), false);
        self.scenery.set_active(to.into(), true);
        self.enter(to);

        log::info!("{:?} -> {:?}", from, to);
        self.events.push(GameEvent::StateEntered { from, to });
    }

    /// Reset whatever accrued while in `state`
    fn leave(&mut self, state: GameState) {
        match state {
            GameState::Intro => self.time_in_intro = 0.0,
            GameState::Game => {
                self.moving = false;
                self.hazard.reset();
                self.audio.stop_source(SourceId::Footsteps);
                self.ambience.stop(&mut self.audio);
            }
            GameState::Lost => self.time_in_lost = 0.0,
            GameState::Won => {}
        }
    }

    fn enter(&mut self, state: GameState) {
        match state {
            GameState::Intro => {
                self.time_in_intro = 0.0;
                self.time_in_lost = 0.0;
                self.hazard.reset();
                self.audio.play_sound(&self.cues.intro_drum);
                self.start_intro_music();
            }
            GameState::Game => {
                self.audio.stop_music();
                self.ambience.start(&mut self.audio);
                self.audio
                    .play_sound_on(&self.cues.footsteps, SourceId::Footsteps, true);
                self.position = Vec3::ZERO;
                self.moving = false;
                self.hazard.reset();
            }
            GameState::Lost => {
                self.moving = false;
                self.audio.stop_source(SourceId::Footsteps);
                for name in &self.cues.lose_stingers {
                    self.audio.play_one_shot(name);
                }
            }
            GameState::Won => {
                self.moving = false;
                self.audio.stop_source(SourceId::Footsteps);
                for name in &self.cues.win_stingers {
                    self.audio.play_one_shot(name);
                }
                self.start_intro_music();
            }
        }
    }

    fn start_intro_music(&mut self) {
        if let Some(clip) = &self.intro_music {
            self.audio.play_music(clip, false);
        }
    }
}
