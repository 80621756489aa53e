//! Gameplay simulation
//!
//! Frame-driven and single-threaded:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - No engine or hardware dependencies; audio and scenery are injected

pub mod hazard;
pub mod input;
pub mod player;
pub mod scenery;
pub mod state;

pub use hazard::{HazardCue, HazardEvent, HazardPhase, HazardStep, HazardTimer};
pub use input::{FrameInput, InputQueue, Key, KeyEvent};
pub use player::PlayerStateMachine;
pub use scenery::{Scenery, SceneryFlags, SceneryGroup};
pub use state::{GameEvent, GameState};
