//! Game state and semantic events

use serde::{Deserialize, Serialize};

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen with intro music
    Intro,
    /// Active gameplay under mortar fire
    Game,
    /// Caught in an explosion
    Lost,
    /// Reached the goal
    Won,
}

impl GameState {
    /// Transitions the frame loop can take on its own (direct jumps excluded)
    pub fn can_advance_to(self, to: GameState) -> bool {
        matches!(
            (self, to),
            (GameState::Intro, GameState::Game)
                | (GameState::Game, GameState::Lost)
                | (GameState::Game, GameState::Won)
                | (GameState::Lost, GameState::Intro)
                | (GameState::Won, GameState::Intro)
        )
    }
}

/// Events emitted by the state machine, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StateEntered { from: GameState, to: GameState },
    /// A shell has been fired
    HazardArmed,
    /// The shell landed; the explosion window is open
    HazardExploded,
    /// The explosion window closed
    HazardResolved,
    /// The player moved during an explosion
    PlayerKilled,
    GoalReached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use GameState::*;
        assert!(Intro.can_advance_to(Game));
        assert!(Game.can_advance_to(Lost));
        assert!(Game.can_advance_to(Won));
        assert!(Lost.can_advance_to(Intro));
        assert!(Won.can_advance_to(Intro));

        assert!(!Intro.can_advance_to(Won));
        assert!(!Lost.can_advance_to(Won));
        assert!(!Won.can_advance_to(Won));
        assert!(!Game.can_advance_to(Intro));
    }
}
