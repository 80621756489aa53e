//! Mix buses and volume composition

/// Mix buses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bus {
    Master,
    Sound,
    Music,
    Ambience,
}

impl Bus {
    fn index(self) -> usize {
        match self {
            Bus::Master => 0,
            Bus::Sound => 1,
            Bus::Music => 2,
            Bus::Ambience => 3,
        }
    }

    /// Buses whose effective volume changes when this bus's level changes
    pub fn dependents(self) -> &'static [Bus] {
        match self {
            Bus::Master => &[Bus::Sound, Bus::Music, Bus::Ambience],
            Bus::Sound => &[Bus::Sound],
            Bus::Music => &[Bus::Music],
            Bus::Ambience => &[Bus::Ambience],
        }
    }
}

/// Per-bus levels, each in [0, 1]
#[derive(Debug, Clone)]
pub struct Mixer {
    levels: [f32; 4],
}

impl Default for Mixer {
    fn default() -> Self {
        Self { levels: [1.0; 4] }
    }
}

impl Mixer {
    pub fn level(&self, bus: Bus) -> f32 {
        self.levels[bus.index()]
    }

    /// Set a bus level (clamped to [0, 1], non-finite values ignored).
    /// Returns false when the value was rejected.
    pub fn set_level(&mut self, bus: Bus, level: f32) -> bool {
        if !level.is_finite() {
            return false;
        }
        self.levels[bus.index()] = level.clamp(0.0, 1.0);
        true
    }

    /// Output volume for sources on `bus`: its own level times master.
    /// Master is not multiplied by itself.
    pub fn effective(&self, bus: Bus) -> f32 {
        match bus {
            Bus::Master => self.level(Bus::Master),
            _ => self.level(bus) * self.level(Bus::Master),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_is_product_with_master() {
        let mut mixer = Mixer::default();
        mixer.set_level(Bus::Master, 0.5);
        mixer.set_level(Bus::Music, 0.8);
        assert!((mixer.effective(Bus::Music) - 0.4).abs() < 1e-6);
        assert!((mixer.effective(Bus::Sound) - 0.5).abs() < 1e-6);
        assert_eq!(mixer.effective(Bus::Master), 0.5);
    }

    #[test]
    fn test_set_level_clamps_and_rejects_nan() {
        let mut mixer = Mixer::default();
        assert!(mixer.set_level(Bus::Sound, 3.0));
        assert_eq!(mixer.level(Bus::Sound), 1.0);
        assert!(mixer.set_level(Bus::Sound, -1.0));
        assert_eq!(mixer.level(Bus::Sound), 0.0);
        assert!(!mixer.set_level(Bus::Sound, f32::NAN));
        assert_eq!(mixer.level(Bus::Sound), 0.0);
    }

    #[test]
    fn test_master_dependents() {
        assert_eq!(Bus::Master.dependents().len(), 3);
        assert_eq!(Bus::Music.dependents(), &[Bus::Music]);
    }
}
