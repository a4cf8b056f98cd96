//! Event-driven game session.
//!
//! [`GameSession`] owns the authoritative [`GameState`] and serialises every
//! event through one queue. It performs the effects each transition asks
//! for: sound cues go to the [`AudioSink`], scheduled tasks become tokio
//! timers that post `TimerElapsed` back into the queue, cancelled tasks
//! have their timers aborted. Renderers hold a [`SessionHandle`] and
//! subscribe to published states; they never own the game.

use crate::audio::AudioSink;
use crate::config::Delays;
use crate::games::tictactoe::{
    CellSelector, Deferred, Effect, Event, GameState, MoveError, Position, Ticket, Transition,
};
use derive_more::{Display, Error};
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument, warn};

/// The session task has stopped.
#[derive(Debug, Clone, Copy, Display, Error)]
#[display("Game session is closed")]
pub struct SessionClosed;

/// Cloneable front door to a running [`GameSession`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events_tx: mpsc::UnboundedSender<Event>,
    state_rx: watch::Receiver<GameState>,
}

impl SessionHandle {
    /// Leaves the start screen.
    pub fn start(&self) -> Result<(), SessionClosed> {
        self.send(Event::Start)
    }

    /// Selects a cell for the human player.
    pub fn select_cell(&self, pos: Position) -> Result<(), SessionClosed> {
        self.send(Event::SelectCell(pos))
    }

    /// Selects a cell by raw 0-8 index; other indices are ignored.
    pub fn select_index(&self, index: usize) -> Result<(), SessionClosed> {
        match Position::from_index(index) {
            Some(pos) => self.select_cell(pos),
            None => {
                debug!(reason = %MoveError::OutOfRange(index), "Ignoring cell selection");
                Ok(())
            }
        }
    }

    /// Starts a fresh game.
    pub fn reset(&self) -> Result<(), SessionClosed> {
        self.send(Event::Reset)
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state_rx.clone()
    }

    /// Snapshot of the latest published state.
    pub fn state(&self) -> GameState {
        self.state_rx.borrow().clone()
    }

    fn send(&self, event: Event) -> Result<(), SessionClosed> {
        self.events_tx.send(event).map_err(|_| SessionClosed)
    }
}

/// Drives a [`GameState`] from events, timers and effects.
pub struct GameSession<S, A> {
    state: GameState,
    selector: S,
    audio: A,
    delays: Delays,
    events_rx: mpsc::UnboundedReceiver<Event>,
    timer_tx: mpsc::WeakUnboundedSender<Event>,
    state_tx: watch::Sender<GameState>,
    timers: HashMap<Ticket, AbortHandle>,
}

impl<S, A> GameSession<S, A>
where
    S: CellSelector + Send + 'static,
    A: AudioSink + 'static,
{
    /// Creates a session on the start screen and a handle to it.
    pub fn new(selector: S, audio: A, delays: Delays) -> (Self, SessionHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = GameState::new();
        let (state_tx, state_rx) = watch::channel(state.clone());
        let session = Self {
            state,
            selector,
            audio,
            delays,
            events_rx,
            timer_tx: events_tx.downgrade(),
            state_tx,
            timers: HashMap::new(),
        };
        let handle = SessionHandle {
            events_tx,
            state_rx,
        };
        (session, handle)
    }

    /// Processes events until every [`SessionHandle`] is dropped.
    #[instrument(skip_all)]
    pub async fn run(mut self) {
        info!("Game session running");
        while let Some(event) = self.events_rx.recv().await {
            self.dispatch(event);
        }
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        info!("Game session closed");
    }

    /// Applies one event, performs its effects and publishes the new state.
    ///
    /// Must be called inside a tokio runtime: scheduling spawns timers.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: Event) {
        if let Event::TimerElapsed(ticket) = event {
            self.timers.remove(&ticket);
        }

        let Transition { state, effects } = self.state.apply(event, &mut self.selector);
        for effect in effects {
            self.perform(effect);
        }
        self.state = state;

        let published = &self.state;
        self.state_tx.send_if_modified(|current| {
            if current == published {
                false
            } else {
                current.clone_from(published);
                true
            }
        });
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Play(cue) => {
                if let Err(error) = self.audio.play(cue) {
                    warn!(%error, %cue, "Sound cue failed");
                }
            }
            Effect::Schedule { ticket, task } => {
                let delay = match task {
                    Deferred::ComputerMove => self.delays.computer_move,
                    Deferred::DeclareDraw => self.delays.declare_draw,
                };
                debug!(%ticket, %task, ?delay, "Starting timer");
                let timer_tx = self.timer_tx.clone();
                let timer = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(tx) = timer_tx.upgrade() {
                        let _ = tx.send(Event::TimerElapsed(ticket));
                    }
                });
                self.timers.insert(ticket, timer.abort_handle());
            }
            Effect::Cancel(ticket) => {
                if let Some(timer) = self.timers.remove(&ticket) {
                    debug!(%ticket, "Cancelling timer");
                    timer.abort();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::games::tictactoe::{Cue, GameStatus, Player, RandomSelector, ScriptedSelector};
    use std::time::Duration;

    const DELAYS: Delays = Delays {
        computer_move: Duration::from_millis(1000),
        declare_draw: Duration::from_millis(500),
    };

    #[tokio::test(start_paused = true)]
    async fn test_computer_answers_after_delay() {
        let audio = RecordingAudio::new();
        let (session, handle) = GameSession::new(ScriptedSelector::new([0]), audio.clone(), DELAYS);
        tokio::spawn(session.run());
        let mut states = handle.subscribe();

        handle.start().unwrap();
        handle.select_cell(Position::Center).unwrap();
        let state = states
            .wait_for(|s| !s.history().is_empty())
            .await
            .unwrap()
            .clone();
        assert_eq!(state.current_player(), Player::O);
        assert!(state.pending().is_some());

        let state = states
            .wait_for(|s| s.history().len() == 2)
            .await
            .unwrap()
            .clone();
        assert_eq!(state.board().get(Position::TopLeft).player(), Some(Player::O));
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(audio.played(), vec![Cue::Move, Cue::Move]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending_computer_move() {
        let (session, handle) =
            GameSession::new(ScriptedSelector::new([0]), RecordingAudio::new(), DELAYS);
        tokio::spawn(session.run());
        let mut states = handle.subscribe();

        handle.start().unwrap();
        handle.select_cell(Position::Center).unwrap();
        states.wait_for(|s| s.pending().is_some()).await.unwrap();
        handle.reset().unwrap();
        states.wait_for(|s| s.history().is_empty()).await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        let state = handle.state();
        assert_eq!(*state.status(), GameStatus::InProgress);
        assert!(state.history().is_empty());
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(state.pending(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_during_computer_turn_is_ignored() {
        let (session, handle) =
            GameSession::new(ScriptedSelector::new([0]), RecordingAudio::new(), DELAYS);
        tokio::spawn(session.run());
        let mut states = handle.subscribe();

        handle.start().unwrap();
        handle.select_cell(Position::Center).unwrap();
        handle.select_cell(Position::BottomRight).unwrap();
        handle.select_index(42).unwrap();
        let state = states
            .wait_for(|s| s.history().len() == 2)
            .await
            .unwrap()
            .clone();
        assert!(state.board().is_empty(Position::BottomRight));
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_game_reaches_terminal_state() {
        let audio = RecordingAudio::new();
        let (session, handle) = GameSession::new(RandomSelector::from_seed(3), audio.clone(), DELAYS);
        tokio::spawn(session.run());
        let mut states = handle.subscribe();
        let mut human = RandomSelector::from_seed(4);

        handle.start().unwrap();
        loop {
            let state = states
                .wait_for(|s| s.awaiting_human() || s.status().is_terminal())
                .await
                .unwrap()
                .clone();
            if state.status().is_terminal() {
                let cues = audio.played();
                assert_eq!(
                    cues.iter().filter(|c| **c == Cue::Move).count(),
                    state.history().len()
                );
                assert_eq!(
                    cues.contains(&Cue::Win),
                    state.status().winner().is_some()
                );
                break;
            }
            let empty = state.board().empty_positions();
            let pick = empty[human.select_index(empty.len())];
            handle.select_cell(pick).unwrap();
            states.wait_for(|s| !s.awaiting_human()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_session_stops_when_handles_drop() {
        let (session, handle) =
            GameSession::new(ScriptedSelector::default(), RecordingAudio::new(), Delays::IMMEDIATE);
        let task = tokio::spawn(session.run());
        drop(handle);
        task.await.unwrap();
    }
}
