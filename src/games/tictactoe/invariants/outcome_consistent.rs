//! Outcome invariant: the reported status matches the board.

use super::super::rules::{check_winner, is_full};
use super::super::{GameState, GameStatus};
use super::Invariant;

/// Invariant: The status agrees with the board.
///
/// - `Won` names the first completed line and the player holding it.
/// - `Draw` means a full board without any line.
/// - A running or unstarted game has no completed line.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        match game.status() {
            GameStatus::Won { winner, line } => {
                line.owner(board) == Some(*winner)
                    && check_winner(board) == Some((*winner, *line))
            }
            GameStatus::Draw => is_full(board) && check_winner(board).is_none(),
            GameStatus::NotStarted | GameStatus::InProgress => check_winner(board).is_none(),
        }
    }

    fn description() -> &'static str {
        "Game status is consistent with the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Player, Position, Square, WinningLine};

    #[test]
    fn test_fresh_game_holds() {
        assert!(OutcomeConsistentInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_won_on_wrong_line_violates() {
        let mut game = GameState::new().start().state;
        let (board, _, status, _) = game.parts_mut();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.overwrite(pos, Square::Occupied(Player::X));
        }
        *status = GameStatus::Won {
            winner: Player::X,
            line: WinningLine::ALL[1],
        };
        assert!(!OutcomeConsistentInvariant::holds(&game));

        let (_, _, status, _) = game.parts_mut();
        *status = GameStatus::Won {
            winner: Player::X,
            line: WinningLine::ALL[0],
        };
        assert!(OutcomeConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_draw_on_partial_board_violates() {
        let mut game = GameState::new().start().state.select_cell(Position::Center).state;
        let (_, _, status, _) = game.parts_mut();
        *status = GameStatus::Draw;
        assert!(!OutcomeConsistentInvariant::holds(&game));
    }
}
