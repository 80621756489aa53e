//! Battlefield ambience: a looping bed plus randomly timed accents

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::backend::{AudioBackend, SourceId};
use super::director::AudioDirector;
use crate::settings::AmbienceSettings;

/// Keeps the ambience bed running and schedules accents while active
#[derive(Debug)]
pub struct AmbienceController {
    settings: AmbienceSettings,
    rng: Pcg32,
    time_to_next_accent: f32,
    running: bool,
}

impl AmbienceController {
    pub fn new(settings: AmbienceSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            time_to_next_accent: 0.0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds until the next accent fires
    pub fn time_to_next_accent(&self) -> f32 {
        self.time_to_next_accent
    }

    /// Start the bed and fire the first accent immediately
    pub fn start<B: AudioBackend>(&mut self, audio: &mut AudioDirector<B>) {
        self.running = true;
        audio.play_ambience(&self.settings.bed, false);
        self.play_accent(audio);
    }

    /// Silence the bed and any accent still sounding
    pub fn stop<B: AudioBackend>(&mut self, audio: &mut AudioDirector<B>) {
        if !self.running {
            return;
        }
        self.running = false;
        audio.stop_ambience();
        audio.stop_source(SourceId::Accent);
    }

    pub fn tick<B: AudioBackend>(&mut self, dt: f32, audio: &mut AudioDirector<B>) {
        if !self.running {
            return;
        }
        self.time_to_next_accent -= dt;
        if self.time_to_next_accent <= 0.0 {
            self.play_accent(audio);
        }
    }

    fn play_accent<B: AudioBackend>(&mut self, audio: &mut AudioDirector<B>) {
        if !self.settings.accents.is_empty() {
            let index = self.rng.random_range(0..self.settings.accents.len());
            audio.play_ambience_on(&self.settings.accents[index], SourceId::Accent);
        }

        // Negative or non-finite spreads mean no jitter, never an empty range
        let variance = self.settings.time_variance.abs();
        let jitter = if variance.is_finite() && variance > 0.0 {
            self.rng.random_range(-variance..=variance)
        } else {
            0.0
        };
        // NaN intervals collapse to 0 through `max`
        self.time_to_next_accent = (self.settings.time_between_accents + jitter).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::backend::{Clip, RecordingBackend};
    use crate::audio::bank::{SoundBank, SoundEffect};
    use crate::settings::MixSettings;

    fn setup() -> (AmbienceController, AudioDirector<RecordingBackend>) {
        let bank = SoundBank::from_entries(vec![
            SoundEffect::new("amb_bed", vec![Clip::new("bed", 60.0)]),
            SoundEffect::new("amb_gun", vec![Clip::new("gun", 1.0)]),
        ]);
        let audio = AudioDirector::new(RecordingBackend::new(), bank, &MixSettings::default(), 3);
        let controller = AmbienceController::new(
            AmbienceSettings {
                bed: "amb_bed".to_string(),
                accents: vec!["amb_gun".to_string()],
                time_between_accents: 4.0,
                time_variance: 1.0,
            },
            9,
        );
        (controller, audio)
    }

    #[test]
    fn test_start_plays_bed_and_first_accent() {
        let (mut ambience, mut audio) = setup();
        ambience.start(&mut audio);
        assert!(audio.playing_ambience());
        assert_eq!(audio.backend().starts_of("bed"), 1);
        assert_eq!(audio.backend().starts_of("gun"), 1);

        let next = ambience.time_to_next_accent();
        assert!((3.0..=5.0).contains(&next));
    }

    #[test]
    fn test_accents_follow_schedule() {
        let (mut ambience, mut audio) = setup();
        ambience.start(&mut audio);

        // 20s with a 3-5s interval: the opening accent plus 3 to 6 more
        for _ in 0..200 {
            ambience.tick(0.1, &mut audio);
        }
        let accents = audio.backend().starts_of("gun");
        assert!((4..=7).contains(&accents), "got {accents} accents");
    }

    #[test]
    fn test_bad_variance_does_not_panic() {
        for variance in [-1.0, f32::NAN, f32::INFINITY, 0.0] {
            let (mut ambience, mut audio) = setup();
            ambience.settings.time_variance = variance;
            ambience.start(&mut audio);
            if variance < 0.0 {
                let next = ambience.time_to_next_accent();
                assert!((3.0..=5.0).contains(&next));
            } else if !variance.is_finite() || variance == 0.0 {
                assert_eq!(ambience.time_to_next_accent(), 4.0);
            }
            ambience.tick(10.0, &mut audio);
        }
    }

    #[test]
    fn test_stop_silences_everything() {
        let (mut ambience, mut audio) = setup();
        ambience.start(&mut audio);
        ambience.stop(&mut audio);
        assert!(!ambience.is_running());
        assert!(!audio.playing_ambience());
        assert!(!audio.backend().is_playing(SourceId::Accent));

        ambience.tick(10.0, &mut audio);
        assert_eq!(audio.backend().starts_of("gun"), 1);
    }
}
