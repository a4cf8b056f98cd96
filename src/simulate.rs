//! Headless batches of games with a random human.

use crate::games::tictactoe::{CellSelector, Event, GameState, GameStatus, Player, RandomSelector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Outcome counts over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    /// Games the human side won.
    pub x_wins: usize,
    /// Games the computer won.
    pub o_wins: usize,
    /// Drawn games.
    pub draws: usize,
}

impl Tally {
    /// Total games counted.
    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    fn record(&mut self, status: &GameStatus) {
        match status.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} draws",
            self.total(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

/// Plays one game to the end, firing deferred tasks immediately.
///
/// `human` picks X's cells among the empty ones, `computer` is the
/// opponent's selector.
pub fn play_one<H, C>(human: &mut H, computer: &mut C) -> GameState
where
    H: CellSelector + ?Sized,
    C: CellSelector + ?Sized,
{
    let mut state = GameState::new().apply(Event::Start, computer).state;
    while !state.status().is_terminal() {
        let event = match state.pending() {
            Some(pending) => Event::TimerElapsed(pending.ticket),
            None => {
                let empty = state.board().empty_positions();
                Event::SelectCell(empty[human.select_index(empty.len()) % empty.len()])
            }
        };
        state = state.apply(event, computer).state;
    }
    state
}

/// Plays `games` games; the same seed always yields the same tally.
#[instrument]
pub fn simulate(games: usize, seed: u64) -> Tally {
    let mut human = RandomSelector::from_seed(seed);
    let mut computer = RandomSelector::from_seed(seed ^ 0x9E37_79B9_7F4A_7C15);
    let mut tally = Tally::default();
    for game in 0..games {
        let state = play_one(&mut human, &mut computer);
        debug!(game, status = %state.status(), "Game finished");
        tally.record(state.status());
    }
    info!(%tally, "Simulation complete");
    tally
}
