//! Human-vs-computer tic-tac-toe.

mod action;
mod machine;
mod opponent;
mod phases;
mod position;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use machine::{Cue, Deferred, Effect, Event, GameState, Pending, Ticket, Transition};
pub use opponent::{CellSelector, RandomSelector, ScriptedSelector};
pub use phases::GameStatus;
pub use position::Position;
pub use rules::WinningLine;
pub use types::{Board, Player, Square};
