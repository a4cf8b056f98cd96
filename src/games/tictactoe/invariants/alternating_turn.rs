//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{GameState, GameStatus, Player};
use super::Invariant;

/// Invariant: Players alternate turns, X first.
///
/// While the game runs, the player to move is the one the history says
/// is next.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();

        let alternates = history
            .iter()
            .enumerate()
            .all(|(i, mov)| mov.player == if i % 2 == 0 { Player::X } else { Player::O });
        if !alternates {
            return false;
        }

        if *game.status() != GameStatus::InProgress {
            return true;
        }
        let expected_next = if history.len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };
        game.current_player() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
