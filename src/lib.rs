//! Strictly Solo library - tic-tac-toe against a random computer opponent
//!
//! The game is a pure state machine: every event produces a new state plus
//! the effects (sound cues, timers, cancellations) the caller must perform.
//!
//! # Architecture
//!
//! - **Games**: Board, rules, opponent and the game state machine
//! - **Session**: Async driver that owns the state, runs timers and publishes states
//! - **Audio**: Fire-and-forget sound cue playback
//! - **Simulate**: Headless batches of games
//!
//! # Example
//!
//! ```
//! use strictly_solo::{Event, GameState, Position, ScriptedSelector};
//!
//! let mut computer = ScriptedSelector::new([0]);
//! let state = GameState::new().apply(Event::Start, &mut computer).state;
//! let transition = state.apply(Event::SelectCell(Position::Center), &mut computer);
//! assert!(transition.state.pending().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audio;
mod config;
pub mod games;
mod session;
mod simulate;

// Crate-level exports - Audio
pub use audio::{AudioError, AudioSink, Muted, RecordingAudio, TerminalBell};

// Crate-level exports - Settings
pub use config::{ConfigError, Delays, Settings};

// Crate-level exports - Session driver
pub use session::{GameSession, SessionClosed, SessionHandle};

// Crate-level exports - Simulation
pub use simulate::{Tally, play_one, simulate};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, CellSelector, Cue, Deferred, Effect, Event, GameState, GameStatus, Move, MoveError,
    Pending, Player, Position, RandomSelector, ScriptedSelector, Square, Ticket, Transition,
    WinningLine,
};
