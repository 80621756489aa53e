//! Scenery groups toggled on state changes

use super::state::GameState;

/// One scenery group per screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneryGroup {
    Intro,
    Game,
    Lost,
    Won,
}

impl From<GameState> for SceneryGroup {
    fn from(state: GameState) -> Self {
        match state {
            GameState::Intro => SceneryGroup::Intro,
            GameState::Game => SceneryGroup::Game,
            GameState::Lost => SceneryGroup::Lost,
            GameState::Won => SceneryGroup::Won,
        }
    }
}

/// Object activation provided by the host
pub trait Scenery {
    fn set_active(&mut self, group: SceneryGroup, active: bool);
}

/// Plain activation flags, for headless runs
#[derive(Debug, Clone, Default)]
pub struct SceneryFlags {
    intro: bool,
    game: bool,
    lost: bool,
    won: bool,
}

impl SceneryFlags {
    pub fn is_active(&self, group: SceneryGroup) -> bool {
        match group {
            SceneryGroup::Intro => self.intro,
            SceneryGroup::Game => self.game,
            SceneryGroup::Lost => self.lost,
            SceneryGroup::Won => self.won,
        }
    }
}

impl Scenery for SceneryFlags {
    fn set_active(&mut self, group: SceneryGroup, active: bool) {
        let flag = match group {
            SceneryGroup::Intro => &mut self.intro,
            SceneryGroup::Game => &mut self.game,
            SceneryGroup::Lost => &mut self.lost,
            SceneryGroup::Won => &mut self.won,
        };
        *flag = active;
    }
}
