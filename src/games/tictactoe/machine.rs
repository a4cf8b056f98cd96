//! Turn-taking state machine for human-vs-computer tic-tac-toe.
//!
//! The machine is a value plus a pure transition function: every event
//! takes the current [`GameState`] by reference and yields a new state and
//! the side effects the driver must carry out (sound cues, timers). The
//! machine never sleeps, plays audio or draws anything itself.
//!
//! Deferred work (the computer's reply and the draw declaration) is
//! requested through [`Effect::Schedule`] with a [`Ticket`]. Only the
//! ticket currently pending is honoured when its timer fires, so a reset
//! in the middle of a delay discards the stale callback.

use super::action::{Move, MoveError};
use super::opponent::CellSelector;
use super::phases::GameStatus;
use super::rules::{WinningLine, check_winner, is_full};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Identifies one scheduled deferred task. Never reused within a game
/// state's lifetime, resets included.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("#{}", _0)]
pub struct Ticket(u64);

/// Work the machine defers until a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Deferred {
    /// The computer places its mark.
    ComputerMove,
    /// A full board without a winner is declared a draw.
    DeclareDraw,
}

/// The deferred task currently awaiting its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pending {
    /// Token the timer must present.
    pub ticket: Ticket,
    /// What happens when it fires.
    pub task: Deferred,
}

/// Sound cue requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Cue {
    /// A mark was placed.
    Move,
    /// A line was completed.
    Win,
}

/// Inputs to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Leave the start screen.
    Start,
    /// The human selected a cell.
    SelectCell(Position),
    /// Discard the current game and begin a fresh one.
    Reset,
    /// A scheduled timer fired.
    TimerElapsed(Ticket),
}

/// Side effects the driver performs after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Fire-and-forget sound.
    Play(Cue),
    /// Start a timer that reports back with `Event::TimerElapsed(ticket)`.
    Schedule {
        /// Token to hand back.
        ticket: Ticket,
        /// Task the ticket stands for; decides the delay.
        task: Deferred,
    },
    /// Stop a timer that was scheduled earlier.
    Cancel(Ticket),
}

/// Result of feeding one event to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state after the event.
    pub state: GameState,
    /// Effects to perform, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current: Player,
    status: GameStatus,
    history: Vec<Move>,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A game on the start screen.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Player::X,
            status: GameStatus::NotStarted,
            history: Vec::new(),
            pending: None,
            next_ticket: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the deferred task awaiting its timer, if any.
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Returns the winning line once the game is won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.status.winning_line()
    }

    /// True when a cell selection would be accepted somewhere.
    pub fn awaiting_human(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.current.is_human()
            && self.pending.is_none()
    }

    /// Feeds one event to the machine.
    #[instrument(skip(self, selector), fields(status = %self.status))]
    pub fn apply<S>(&self, event: Event, selector: &mut S) -> Transition
    where
        S: CellSelector + ?Sized,
    {
        let next = match event {
            Event::Start => self.start(),
            Event::SelectCell(pos) => self.select_cell(pos),
            Event::Reset => self.reset(),
            Event::TimerElapsed(ticket) => self.timer_elapsed(ticket, selector),
        };

        #[cfg(debug_assertions)]
        {
            use super::invariants::{GameInvariants, InvariantSet};
            if let Err(violations) = GameInvariants::check_all(&next.state) {
                panic!("Invariant violation after {event:?}: {violations:?}");
            }
        }

        next
    }

    /// NotStarted -> InProgress with an empty board and X to move.
    #[instrument(skip(self))]
    pub fn start(&self) -> Transition {
        if self.status != GameStatus::NotStarted {
            debug!(status = %self.status, "Ignoring start: game already started");
            return Transition::unchanged(self);
        }
        info!("Game started");
        Transition {
            state: Self {
                status: GameStatus::InProgress,
                ..Self::new()
            },
            effects: Vec::new(),
        }
    }

    /// The human places X at `pos`.
    ///
    /// A selection during the computer's turn, on an occupied cell, or
    /// outside a running game is a no-op.
    #[instrument(skip(self))]
    pub fn select_cell(&self, pos: Position) -> Transition {
        let mut next = self.clone();
        let mut effects = Vec::new();
        let accepted = self
            .check_turn()
            .and_then(|()| next.place(pos, Player::X, &mut effects));
        match accepted {
            Ok(()) => Transition {
                state: next,
                effects,
            },
            Err(reason) => {
                debug!(%reason, position = %pos, "Ignoring cell selection");
                Transition::unchanged(self)
            }
        }
    }

    /// Like [`select_cell`](Self::select_cell) for a raw 0-8 index.
    #[instrument(skip(self))]
    pub fn select_index(&self, index: usize) -> Transition {
        match Position::from_index(index) {
            Some(pos) => self.select_cell(pos),
            None => {
                debug!(reason = %MoveError::OutOfRange(index), "Ignoring cell selection");
                Transition::unchanged(self)
            }
        }
    }

    /// Fresh game from any state; a pending timer is cancelled.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Transition {
        let effects = self
            .pending
            .map(|pending| Effect::Cancel(pending.ticket))
            .into_iter()
            .collect();
        info!("Game reset");
        Transition {
            state: Self {
                status: GameStatus::InProgress,
                next_ticket: self.next_ticket,
                ..Self::new()
            },
            effects,
        }
    }

    /// Runs the deferred task if `ticket` is the one pending.
    #[instrument(skip(self, selector))]
    fn timer_elapsed<S>(&self, ticket: Ticket, selector: &mut S) -> Transition
    where
        S: CellSelector + ?Sized,
    {
        let task = match self.pending {
            Some(pending) if pending.ticket == ticket => pending.task,
            _ => {
                debug!(%ticket, "Ignoring stale timer");
                return Transition::unchanged(self);
            }
        };

        let mut next = self.clone();
        next.pending = None;
        let mut effects = Vec::new();
        match task {
            Deferred::DeclareDraw => {
                info!("Board full without a winner: draw");
                next.status = GameStatus::Draw;
            }
            Deferred::ComputerMove => {
                if let Err(reason) = next.computer_move(selector, &mut effects) {
                    warn!(%reason, "Computer move failed");
                    return Transition::unchanged(self);
                }
            }
        }
        Transition {
            state: next,
            effects,
        }
    }

    /// The computer places O on a uniformly chosen empty cell.
    fn computer_move<S>(&mut self, selector: &mut S, effects: &mut Vec<Effect>) -> Result<(), MoveError>
    where
        S: CellSelector + ?Sized,
    {
        let empty = self.board.empty_positions();
        if empty.is_empty() {
            return Err(MoveError::NotInProgress);
        }
        let pos = empty[selector.select_index(empty.len()) % empty.len()];
        debug!(position = %pos, candidates = empty.len(), "Computer chose cell");
        self.place(pos, Player::O, effects)
    }

    fn check_turn(&self) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::NotInProgress);
        }
        if !self.current.is_human() || self.pending.is_some() {
            return Err(MoveError::WrongPlayer(Player::X));
        }
        Ok(())
    }

    /// Writes a mark and settles what happens next: win, draw or the
    /// other side's turn.
    fn place(&mut self, pos: Position, player: Player, effects: &mut Vec<Effect>) -> Result<(), MoveError> {
        self.board.place(pos, player)?;
        self.history.push(Move::new(player, pos));
        effects.push(Effect::Play(Cue::Move));

        if let Some((winner, line)) = check_winner(&self.board) {
            info!(%winner, line = ?line.indices(), "Line completed");
            self.status = GameStatus::Won { winner, line };
            effects.push(Effect::Play(Cue::Win));
            return Ok(());
        }

        self.current = player.opponent();
        if is_full(&self.board) {
            self.schedule(Deferred::DeclareDraw, effects);
        } else if player.is_human() {
            self.schedule(Deferred::ComputerMove, effects);
        }
        Ok(())
    }

    fn schedule(&mut self, task: Deferred, effects: &mut Vec<Effect>) {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(Pending { ticket, task });
        debug!(%ticket, %task, "Scheduling deferred task");
        effects.push(Effect::Schedule { ticket, task });
    }
}

#[cfg(test)]
impl GameState {
    /// Raw field access so invariant tests can build corrupted states.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut Board, &mut Player, &mut GameStatus, &mut Vec<Move>) {
        (
            &mut self.board,
            &mut self.current,
            &mut self.status,
            &mut self.history,
        )
    }
}
