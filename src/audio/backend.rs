//! Host audio abstraction
//!
//! The director never touches audio hardware. It drives a handful of named
//! sources through `AudioBackend`, which the host implements on top of its
//! engine. `RecordingBackend` is an in-memory implementation for tests and
//! the headless demo.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::bus::Bus;

/// A concrete, playable clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Clip identity (asset name)
    pub name: String,
    /// Length in seconds
    pub duration: f32,
}

impl Clip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Audio sources the game drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Shared one-shot source for effects
    Sound,
    /// Looping music source
    Music,
    /// Looping ambience bed
    Ambience,
    /// Player footstep loop
    Footsteps,
    /// Ambience accent source
    Accent,
}

impl SourceId {
    pub const ALL: [SourceId; 5] = [
        SourceId::Sound,
        SourceId::Music,
        SourceId::Ambience,
        SourceId::Footsteps,
        SourceId::Accent,
    ];

    /// Bus a source mixes into until something routes it elsewhere
    pub fn default_bus(self) -> Bus {
        match self {
            SourceId::Sound | SourceId::Footsteps => Bus::Sound,
            SourceId::Music => Bus::Music,
            SourceId::Ambience | SourceId::Accent => Bus::Ambience,
        }
    }
}

/// Playback primitives provided by the host engine
pub trait AudioBackend {
    /// Replace the source's clip and start it
    fn play(&mut self, source: SourceId, clip: &Clip, looped: bool);
    /// Fire a clip on the source without disturbing what it is playing
    fn play_one_shot(&mut self, source: SourceId, clip: &Clip);
    fn stop(&mut self, source: SourceId);
    /// Set source volume (0.0 - 1.0)
    fn set_volume(&mut self, source: SourceId, volume: f32);
    fn is_playing(&self, source: SourceId) -> bool;
}

/// A single backend call, as seen by `RecordingBackend`
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Play {
        source: SourceId,
        clip: String,
        looped: bool,
    },
    PlayOneShot {
        source: SourceId,
        clip: String,
    },
    Stop(SourceId),
    SetVolume(SourceId, f32),
}

/// Backend that records calls and tracks which sources are playing
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    playing: HashSet<SourceId>,
    clips: HashMap<SourceId, String>,
    volumes: HashMap<SourceId, f32>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget recorded calls (source state is kept)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Last volume written to a source
    pub fn volume(&self, source: SourceId) -> Option<f32> {
        self.volumes.get(&source).copied()
    }

    /// Clip currently loaded on a playing source
    pub fn current_clip(&self, source: SourceId) -> Option<&str> {
        if self.playing.contains(&source) {
            self.clips.get(&source).map(String::as_str)
        } else {
            None
        }
    }

    /// Number of times a clip was started (looped or one-shot)
    pub fn starts_of(&self, clip: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| match call {
                BackendCall::Play { clip: c, .. } | BackendCall::PlayOneShot { clip: c, .. } => {
                    c == clip
                }
                _ => false,
            })
            .count()
    }

    /// Number of starts on a given source
    pub fn starts_on(&self, source: SourceId) -> usize {
        self.calls
            .iter()
            .filter(|call| match call {
                BackendCall::Play { source: s, .. } | BackendCall::PlayOneShot { source: s, .. } => {
                    *s == source
                }
                _ => false,
            })
            .count()
    }
}

impl AudioBackend for RecordingBackend {
    fn play(&mut self, source: SourceId, clip: &Clip, looped: bool) {
        self.calls.push(BackendCall::Play {
            source,
            clip: clip.name.clone(),
            looped,
        });
        self.playing.insert(source);
        self.clips.insert(source, clip.name.clone());
    }

    fn play_one_shot(&mut self, source: SourceId, clip: &Clip) {
        self.calls.push(BackendCall::PlayOneShot {
            source,
            clip: clip.name.clone(),
        });
    }

    fn stop(&mut self, source: SourceId) {
        self.calls.push(BackendCall::Stop(source));
        self.playing.remove(&source);
    }

    fn set_volume(&mut self, source: SourceId, volume: f32) {
        self.calls.push(BackendCall::SetVolume(source, volume));
        self.volumes.insert(source, volume);
    }

    fn is_playing(&self, source: SourceId) -> bool {
        self.playing.contains(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracks_playing() {
        let mut backend = RecordingBackend::new();
        let clip = Clip::new("loop", 2.0);
        assert!(!backend.is_playing(SourceId::Music));

        backend.play(SourceId::Music, &clip, true);
        assert!(backend.is_playing(SourceId::Music));
        assert_eq!(backend.current_clip(SourceId::Music), Some("loop"));

        backend.stop(SourceId::Music);
        assert!(!backend.is_playing(SourceId::Music));
        assert_eq!(backend.current_clip(SourceId::Music), None);
    }

    #[test]
    fn test_one_shot_does_not_mark_playing() {
        let mut backend = RecordingBackend::new();
        backend.play_one_shot(SourceId::Sound, &Clip::new("boom", 0.5));
        assert!(!backend.is_playing(SourceId::Sound));
        assert_eq!(backend.starts_of("boom"), 1);
        assert_eq!(backend.starts_on(SourceId::Sound), 1);
    }

    #[test]
    fn test_default_routing() {
        assert_eq!(SourceId::Footsteps.default_bus(), Bus::Sound);
        assert_eq!(SourceId::Accent.default_bus(), Bus::Ambience);
        assert_eq!(SourceId::Music.default_bus(), Bus::Music);
    }
}
