use serde::{Deserialize, Serialize};

use crate::error::InvalidAction;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Decision available to the player facing a revealed card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take the revealed card together with every chip on it.
    Take,
    /// Put one chip on the revealed card and hand it to the next player.
    Pass,
}

impl Action {
    pub const COUNT: usize = 2;
    pub const ALL: [Action; Action::COUNT] = [Action::Take, Action::Pass];

    /// Index used by the environment and value networks: take is 0, pass is 1.
    pub fn index(self) -> usize {
        match self {
            Action::Take => 0,
            Action::Pass => 1,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, InvalidAction> {
        match index {
            0 => Ok(Action::Take),
            1 => Ok(Action::Pass),
            other => Err(InvalidAction::UnknownAction(other)),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = InvalidAction;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_environment_convention() {
        assert_eq!(Action::Take.index(), 0);
        assert_eq!(Action::Pass.index(), 1);
        assert_eq!(Action::try_from(1), Ok(Action::Pass));
        assert_eq!(
            Action::from_index(2),
            Err(InvalidAction::UnknownAction(2))
        );
    }
}
