//! Audio director
//!
//! Resolves logical sound names to clips, keeps bus volumes applied to every
//! routed source, runs bus fades and suppresses overlapping one-shots. A
//! missing or empty sound is never an error: the call just does nothing.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::backend::{AudioBackend, Clip, SourceId};
use super::bank::{SoundBank, normalize_name};
use super::bus::{Bus, Mixer};
use super::fade::Fade;
use crate::consts::MIN_FADE_LEVEL;
use crate::settings::MixSettings;
use crate::valid_dt;

/// Audio director for the game
pub struct AudioDirector<B: AudioBackend> {
    backend: B,
    bank: SoundBank,
    mixer: Mixer,
    rng: Pcg32,
    /// Which bus each source mixes into
    routes: HashMap<SourceId, Bus>,
    /// In-flight fades, at most one per bus
    fades: Vec<Fade>,
    /// Deduplicated one-shots still sounding: name -> seconds left
    active_one_shots: HashMap<String, f32>,
    current_music: Option<Clip>,
    fade_duration: f32,
    fade_target: f32,
}

impl<B: AudioBackend> AudioDirector<B> {
    pub fn new(backend: B, bank: SoundBank, mix: &MixSettings, seed: u64) -> Self {
        let mut mixer = Mixer::default();
        mixer.set_level(Bus::Master, mix.master_volume);
        mixer.set_level(Bus::Sound, mix.sound_volume);
        mixer.set_level(Bus::Music, mix.music_volume);
        mixer.set_level(Bus::Ambience, mix.ambience_volume);

        let mut director = Self {
            backend,
            bank,
            mixer,
            rng: Pcg32::seed_from_u64(seed),
            routes: HashMap::new(),
            fades: Vec::new(),
            active_one_shots: HashMap::new(),
            current_music: None,
            fade_duration: mix.fade_duration,
            fade_target: mix.fade_target,
        };

        for source in SourceId::ALL {
            director.route(source, source.default_bus());
        }
        director
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    // === Volume ===

    /// Level set on a bus (0.0 - 1.0)
    pub fn volume(&self, bus: Bus) -> f32 {
        self.mixer.level(bus)
    }

    /// Output volume of sources on `bus` (bus level times master)
    pub fn effective_volume(&self, bus: Bus) -> f32 {
        self.mixer.effective(bus)
    }

    /// Set a bus level and re-apply it to every affected source.
    /// Cancels any fade running on that bus.
    pub fn set_volume(&mut self, bus: Bus, volume: f32) {
        if !self.mixer.set_level(bus, volume) {
            log::warn!("Ignoring non-finite volume for {:?}", bus);
            return;
        }
        self.cancel_fade(bus);
        self.reapply(bus);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.set_volume(Bus::Master, volume);
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.set_volume(Bus::Sound, volume);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.set_volume(Bus::Music, volume);
    }

    pub fn set_ambience_volume(&mut self, volume: f32) {
        self.set_volume(Bus::Ambience, volume);
    }

    // === Sound effects ===

    /// Play a random variant of `name` on the sound source, unless a
    /// previous call for the same name is still sounding.
    pub fn play_one_shot(&mut self, name: &str) {
        let key = normalize_name(name);
        if self.active_one_shots.contains_key(&key) {
            log::debug!("One-shot '{}' already playing, skipped", key);
            return;
        }
        let Some(clip) = self.pick_clip(name) else { return };

        self.backend.play_one_shot(SourceId::Sound, &clip);
        self.active_one_shots.insert(key, clip.duration);
    }

    /// Play a random variant of `name` on the sound source, always
    pub fn play_sound(&mut self, name: &str) {
        let Some(clip) = self.pick_clip(name) else { return };
        self.backend.play_one_shot(SourceId::Sound, &clip);
    }

    /// Play `name` on an auxiliary source at the sound bus volume
    pub fn play_sound_on(&mut self, name: &str, source: SourceId, looped: bool) {
        let Some(clip) = self.pick_clip(name) else { return };
        self.route(source, Bus::Sound);
        self.backend.play(source, &clip, looped);
    }

    /// True while a deduplicated one-shot for `name` is in flight
    pub fn is_one_shot_active(&self, name: &str) -> bool {
        self.active_one_shots.contains_key(&normalize_name(name))
    }

    // === Music ===

    /// Start looping `clip` on the music source. Re-requesting the clip
    /// already loaded does nothing. With `crossfade`, the music bus ramps
    /// toward the configured fade target.
    pub fn play_music(&mut self, clip: &Clip, crossfade: bool) {
        if self.current_music.as_ref() == Some(clip) {
            return;
        }

        if crossfade {
            self.fade_bus(Bus::Music, self.fade_target, self.fade_duration);
        }
        log::info!("Music: {}", clip.name);
        self.backend.play(SourceId::Music, clip, true);
        self.current_music = Some(clip.clone());
    }

    pub fn stop_music(&mut self) {
        if !self.backend.is_playing(SourceId::Music) {
            return;
        }
        self.backend.stop(SourceId::Music);
        self.current_music = None;
    }

    pub fn current_music(&self) -> Option<&Clip> {
        self.current_music.as_ref()
    }

    // === Ambience ===

    /// Loop a random variant of `name` on the ambience source. With `fade`,
    /// the ambience bus ramps toward the configured fade target.
    pub fn play_ambience(&mut self, name: &str, fade: bool) {
        let Some(clip) = self.pick_clip(name) else { return };
        if fade {
            self.fade_bus(Bus::Ambience, self.fade_target, self.fade_duration);
        }
        self.backend.play(SourceId::Ambience, &clip, true);
    }

    /// Play a random variant of `name` on an auxiliary source at the
    /// ambience bus volume
    pub fn play_ambience_on(&mut self, name: &str, source: SourceId) {
        let Some(clip) = self.pick_clip(name) else { return };
        self.route(source, Bus::Ambience);
        self.backend.play(source, &clip, false);
    }

    pub fn stop_ambience(&mut self) {
        self.stop_source(SourceId::Ambience);
    }

    pub fn playing_ambience(&self) -> bool {
        self.backend.is_playing(SourceId::Ambience)
    }

    /// Stop any source if it is playing
    pub fn stop_source(&mut self, source: SourceId) {
        if self.backend.is_playing(source) {
            self.backend.stop(source);
        }
    }

    // === Fades ===

    /// Ramp a bus from its current level to `target` over `duration`
    /// seconds. Replaces any fade already running on the bus.
    pub fn fade_bus(&mut self, bus: Bus, target: f32, duration: f32) {
        let target = target.clamp(MIN_FADE_LEVEL, 1.0);
        self.cancel_fade(bus);
        self.fades
            .push(Fade::new(bus, self.mixer.level(bus), target, duration));
    }

    pub fn is_fading(&self, bus: Bus) -> bool {
        self.fades.iter().any(|f| f.bus == bus)
    }

    /// Advance fades and expire finished one-shots. Call once per frame,
    /// after any volume changes for the frame have been made.
    pub fn tick(&mut self, dt: f32) {
        if !valid_dt(dt) {
            return;
        }

        let mut fades = std::mem::take(&mut self.fades);
        for fade in &mut fades {
            let level = fade.advance(dt);
            self.mixer.set_level(fade.bus, level);
            self.reapply(fade.bus);
        }
        fades.retain(|f| !f.is_finished());
        self.fades = fades;

        self.active_one_shots.retain(|_, remaining| {
            *remaining -= dt;
            *remaining > 0.0
        });
    }

    // === Internals ===

    fn cancel_fade(&mut self, bus: Bus) {
        let before = self.fades.len();
        self.fades.retain(|f| f.bus != bus);
        if self.fades.len() != before {
            log::debug!("Fade on {:?} superseded", bus);
        }
    }

    /// Route a source to a bus and bring its volume in line
    fn route(&mut self, source: SourceId, bus: Bus) {
        self.routes.insert(source, bus);
        self.backend
            .set_volume(source, self.mixer.effective(bus));
    }

    /// Push effective volumes to every source affected by `bus`
    fn reapply(&mut self, bus: Bus) {
        for &dependent in bus.dependents() {
            let volume = self.mixer.effective(dependent);
            for source in SourceId::ALL {
                if self.routes.get(&source) == Some(&dependent) {
                    self.backend.set_volume(source, volume);
                }
            }
        }
    }

    fn pick_clip(&mut self, name: &str) -> Option<Clip> {
        let Some(effect) = self.bank.resolve(name) else {
            log::debug!("Sound '{}' not found", name);
            return None;
        };
        let clip = effect.random_clip(&mut self.rng).cloned();
        if clip.is_none() {
            log::debug!("Sound '{}' has no clips", effect.name);
        }
        clip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::backend::{BackendCall, RecordingBackend};
    use crate::audio::bank::SoundEffect;

    fn director() -> AudioDirector<RecordingBackend> {
        let bank = SoundBank::from_entries(vec![
            SoundEffect::new("sfx_explosion", vec![Clip::new("boom", 2.0)]),
            SoundEffect::new(
                "amb_wind",
                vec![Clip::new("wind_a", 30.0), Clip::new("wind_b", 30.0)],
            ),
            SoundEffect::new("sfx_empty", vec![]),
        ]);
        AudioDirector::new(RecordingBackend::new(), bank, &MixSettings::default(), 1)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_one_shot_dedup_until_duration_elapses() {
        let mut audio = director();
        audio.play_one_shot("sfx_explosion");
        audio.play_one_shot("SFX_EXPLOSION");
        assert_eq!(audio.backend().starts_of("boom"), 1);
        assert!(audio.is_one_shot_active("sfx_explosion"));

        audio.tick(1.0);
        audio.play_one_shot("sfx_explosion");
        assert_eq!(audio.backend().starts_of("boom"), 1);

        audio.tick(1.0);
        assert!(!audio.is_one_shot_active("sfx_explosion"));
        audio.play_one_shot("sfx_explosion");
        assert_eq!(audio.backend().starts_of("boom"), 2);
    }

    #[test]
    fn test_play_sound_is_not_deduplicated() {
        let mut audio = director();
        audio.play_sound("sfx_explosion");
        audio.play_sound("sfx_explosion");
        assert_eq!(audio.backend().starts_of("boom"), 2);
    }

    #[test]
    fn test_volume_composition() {
        let mut audio = director();
        audio.set_master_volume(0.5);
        audio.set_music_volume(0.8);
        assert!(approx(audio.effective_volume(Bus::Music), 0.4));
        assert!(approx(
            audio.backend().volume(SourceId::Music).unwrap(),
            0.4
        ));

        audio.set_master_volume(0.25);
        assert_eq!(audio.volume(Bus::Music), 0.8);
        assert!(approx(audio.backend().volume(SourceId::Music).unwrap(), 0.2));
        assert!(approx(audio.backend().volume(SourceId::Sound).unwrap(), 0.25));
        assert!(approx(
            audio.backend().volume(SourceId::Accent).unwrap(),
            0.25
        ));
    }

    #[test]
    fn test_sound_volume_only_touches_sound_sources() {
        let mut audio = director();
        audio.backend_mut().clear_calls();
        audio.set_sound_volume(0.3);
        let touched: Vec<SourceId> = audio
            .backend()
            .calls()
            .iter()
            .filter_map(|c| match c {
                BackendCall::SetVolume(s, _) => Some(*s),
                _ => None,
            })
            .collect();
        assert!(touched.contains(&SourceId::Sound));
        assert!(touched.contains(&SourceId::Footsteps));
        assert!(!touched.contains(&SourceId::Music));
        assert!(!touched.contains(&SourceId::Ambience));
    }

    #[test]
    fn test_play_music_is_idempotent() {
        let mut audio = director();
        let theme = Clip::new("theme", 60.0);
        audio.play_music(&theme, false);
        audio.play_music(&theme, false);
        assert_eq!(audio.backend().starts_of("theme"), 1);
        assert_eq!(audio.current_music(), Some(&theme));

        audio.stop_music();
        assert!(audio.current_music().is_none());
        assert!(!audio.backend().is_playing(SourceId::Music));

        audio.play_music(&theme, false);
        assert_eq!(audio.backend().starts_of("theme"), 2);
    }

    #[test]
    fn test_stop_music_when_silent_is_noop() {
        let mut audio = director();
        audio.stop_music();
        assert!(
            !audio
                .backend()
                .calls()
                .iter()
                .any(|c| matches!(c, BackendCall::Stop(_)))
        );
    }

    #[test]
    fn test_crossfade_reaches_target() {
        let mut audio = director();
        audio.set_music_volume(0.2);
        audio.play_music(&Clip::new("theme", 60.0), true);
        assert!(audio.is_fading(Bus::Music));

        audio.tick(0.5);
        assert!(approx(audio.volume(Bus::Music), 0.6));
        audio.tick(0.25);
        audio.tick(0.25);
        assert!(approx(audio.volume(Bus::Music), 1.0));
        assert!(!audio.is_fading(Bus::Music));
    }

    #[test]
    fn test_new_fade_supersedes_old() {
        let mut audio = director();
        audio.set_music_volume(0.2);
        audio.fade_bus(Bus::Music, 1.0, 1.0);
        audio.fade_bus(Bus::Music, 0.5, 1.0);
        for _ in 0..20 {
            audio.tick(0.1);
        }
        assert!(approx(audio.volume(Bus::Music), 0.5));
        assert!(!audio.is_fading(Bus::Music));
    }

    #[test]
    fn test_volume_set_cancels_fade() {
        let mut audio = director();
        audio.set_music_volume(0.0);
        audio.fade_bus(Bus::Music, 1.0, 1.0);
        audio.tick(0.5);
        audio.set_music_volume(0.3);
        assert!(!audio.is_fading(Bus::Music));
        audio.tick(1.0);
        assert!(approx(audio.volume(Bus::Music), 0.3));
    }

    #[test]
    fn test_fade_target_clamped_above_zero() {
        let mut audio = director();
        audio.fade_bus(Bus::Ambience, 0.0, 0.5);
        audio.tick(1.0);
        assert!(approx(audio.volume(Bus::Ambience), MIN_FADE_LEVEL));
    }

    #[test]
    fn test_unresolved_ambience_leaves_bus_untouched() {
        let mut audio = director();
        audio.backend_mut().clear_calls();
        audio.play_ambience("nonexistent", true);
        audio.play_ambience("sfx_empty", false);
        assert!(audio.backend().calls().is_empty());
        assert!(!audio.playing_ambience());
        assert!(!audio.is_fading(Bus::Ambience));
    }

    #[test]
    fn test_ambience_fade_in() {
        let mut audio = director();
        audio.set_ambience_volume(0.0);
        audio.play_ambience("amb_wind", true);
        assert!(audio.playing_ambience());
        assert!(audio.is_fading(Bus::Ambience));

        audio.tick(0.5);
        assert!(approx(audio.volume(Bus::Ambience), 0.5));
        assert!(approx(
            audio.backend().volume(SourceId::Ambience).unwrap(),
            0.5
        ));
        audio.tick(0.5);
        assert!(approx(audio.volume(Bus::Ambience), 1.0));
        assert!(!audio.is_fading(Bus::Ambience));
    }

    #[test]
    fn test_ambience_loops_and_stops() {
        let mut audio = director();
        audio.play_ambience("amb_wind", false);
        assert!(audio.playing_ambience());
        let looped = audio.backend().calls().iter().any(|c| {
            matches!(c, BackendCall::Play { source: SourceId::Ambience, looped: true, .. })
        });
        assert!(looped);

        audio.stop_ambience();
        assert!(!audio.playing_ambience());
    }

    #[test]
    fn test_ambience_on_aux_source_uses_ambience_volume() {
        let mut audio = director();
        audio.set_master_volume(0.5);
        audio.set_ambience_volume(0.5);
        audio.play_ambience_on("amb_wind", SourceId::Footsteps);
        assert!(approx(
            audio.backend().volume(SourceId::Footsteps).unwrap(),
            0.25
        ));

        audio.set_ambience_volume(1.0);
        assert!(approx(
            audio.backend().volume(SourceId::Footsteps).unwrap(),
            0.5
        ));
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut audio = director();
        audio.play_one_shot("sfx_explosion");
        audio.tick(-5.0);
        assert!(audio.is_one_shot_active("sfx_explosion"));
    }
}
