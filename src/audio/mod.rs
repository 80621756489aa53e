//! Audio layer
//!
//! Everything audible goes through `AudioDirector`. The host supplies an
//! `AudioBackend` with play/stop/volume primitives; the director never talks
//! to hardware and never calls back into the game.

pub mod ambience;
pub mod backend;
pub mod bank;
pub mod bus;
pub mod director;
pub mod fade;

pub use ambience::AmbienceController;
pub use backend::{AudioBackend, BackendCall, Clip, RecordingBackend, SourceId};
pub use bank::{SoundBank, SoundEffect};
pub use bus::{Bus, Mixer};
pub use director::AudioDirector;
pub use fade::Fade;
