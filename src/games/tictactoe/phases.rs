//! Game phases as observed by the renderer.

use super::Player;
use super::rules::WinningLine;
use serde::{Deserialize, Serialize};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameStatus {
    /// Waiting for the player to press start.
    #[default]
    NotStarted,
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won {
        /// The player holding the line.
        winner: Player,
        /// The first completed line in static order.
        line: WinningLine,
    },
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Won or Draw.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won { .. } | GameStatus::Draw)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self {
            GameStatus::Won { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Banner text for terminal states.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            GameStatus::Won { winner: Player::X, .. } => Some("You Win!"),
            GameStatus::Won { winner: Player::O, .. } => Some("Computer Wins!"),
            GameStatus::Draw => Some("Draw!"),
            GameStatus::NotStarted | GameStatus::InProgress => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::NotStarted => write!(f, "Not started"),
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won { winner, line } => {
                write!(f, "Player {} wins on {:?}", winner, line.indices())
            }
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
